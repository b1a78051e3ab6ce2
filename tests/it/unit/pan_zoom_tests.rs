//! Pan/Zoom Controller Tests
//!
//! Scale clamping, zoom-about-cursor and pinch behaviour.

use crate::helpers::pointer;
use domino::geometry::{Transform2D, Vec2};
use domino::input::{DeltaMode, PanZoomController, Viewport, WheelEvent, ZoomLimits};

fn viewport() -> Viewport {
    Viewport::sized(800.0, 600.0)
}

#[test]
fn test_scale_stays_within_limits_for_any_wheel_sequence() {
    let vp = viewport();
    let mut pz = PanZoomController::default();
    let deltas = [-100.0, -25.0, -3.0, -400.0, 12.0, 300.0, 300.0, 300.0, -1.0, 250.0];

    for round in 0..20 {
        for (i, delta) in deltas.iter().enumerate() {
            let at = Vec2::new(f64::from(round * 13 % 800), (i * 37 % 600) as f64);
            pz.wheel(&WheelEvent::pixels(at, *delta), &vp);
            let scale = pz.scale();
            assert!((0.25 - 1e-12..=2.0 + 1e-12).contains(&scale), "scale {scale}");
        }
    }
}

#[test]
fn test_wheel_zoom_keeps_point_under_cursor() {
    let vp = Viewport::new(domino::geometry::Rect::new(20.0, 10.0, 800.0, 600.0));
    let mut pz = PanZoomController::default();
    pz.set_transform(Transform2D::new(0.8, 0.0, 0.0, 0.8, -40.0, 25.0));

    let cursor = Vec2::new(333.0, 222.0);
    for delta in [-40.0, -10.0, 15.0, 60.0] {
        let before = pz.mapper(&vp).client_to_scene(cursor);
        assert!(pz.wheel(&WheelEvent::pixels(cursor, delta), &vp));
        let after = pz.mapper(&vp).scene_to_viewport(before);
        assert!(after.approx_eq(vp.to_viewport(cursor), 1e-9), "{after:?}");
    }
}

#[test]
fn test_line_mode_deltas_are_scaled_to_pixels() {
    let vp = viewport();
    let mut pixels = PanZoomController::default();
    let mut lines = PanZoomController::default();

    pixels.wheel(&WheelEvent::pixels(Vec2::ZERO, 0.5 * 33.0), &vp);
    lines.wheel(
        &WheelEvent {
            position: Vec2::ZERO,
            delta_y: 0.5,
            delta_mode: DeltaMode::Line,
        },
        &vp,
    );
    assert!((pixels.scale() - lines.scale()).abs() < 1e-12);
}

#[test]
fn test_pinch_doubles_scale() {
    let vp = viewport();
    let mut pz = PanZoomController::new(ZoomLimits::new(0.25, 4.0));
    pz.set_transform(Transform2D::scaling(0.5));

    assert!(pz.pointer_down(&pointer(1, 300.0, 300.0), &vp));
    assert!(pz.pointer_down(&pointer(2, 400.0, 300.0), &vp));
    assert!(pz.is_pinching());

    assert!(pz.pointer_move(&pointer(2, 500.0, 300.0), &vp));
    assert!((pz.scale() - 1.0).abs() < 1e-12);
}

#[test]
fn test_pinch_is_clamped_to_max_scale() {
    let vp = viewport();
    let mut pz = PanZoomController::default();
    pz.set_transform(Transform2D::scaling(1.5));

    pz.pointer_down(&pointer(1, 300.0, 300.0), &vp);
    pz.pointer_down(&pointer(2, 400.0, 300.0), &vp);
    pz.pointer_move(&pointer(2, 500.0, 300.0), &vp);

    assert!((pz.scale() - 2.0).abs() < 1e-12);
}

#[test]
fn test_pinch_keeps_primary_anchor() {
    let vp = viewport();
    let mut pz = PanZoomController::new(ZoomLimits::new(0.25, 4.0));
    let anchor = pz.mapper(&vp).client_to_scene(Vec2::new(300.0, 300.0));

    pz.pointer_down(&pointer(1, 300.0, 300.0), &vp);
    pz.pointer_down(&pointer(2, 400.0, 300.0), &vp);
    pz.pointer_move(&pointer(2, 450.0, 300.0), &vp);

    let mapped = pz.mapper(&vp).scene_to_viewport(anchor);
    assert!(mapped.approx_eq(Vec2::new(300.0, 300.0), 1e-9));
}

#[test]
fn test_releasing_pinch_pointer_resumes_pan_without_click() {
    let vp = viewport();
    let mut pz = PanZoomController::default();

    pz.pointer_down(&pointer(1, 300.0, 300.0), &vp);
    pz.pointer_down(&pointer(2, 400.0, 300.0), &vp);
    assert_eq!(pz.pointer_up(&pointer(2, 400.0, 300.0), &vp), None);
    assert_eq!(pz.panning_pointer(), Some(1));

    // Pointer 1 never moved, but the gesture included a pinch.
    let ended = pz.pointer_up(&pointer(1, 300.0, 300.0), &vp);
    assert_eq!(ended, Some(domino::input::PanZoomEvent::PanEnded));
}

#[test]
fn test_set_transform_clamps_scale() {
    let mut pz = PanZoomController::default();
    pz.set_transform(Transform2D::scaling(10.0));
    assert!((pz.scale() - 2.0).abs() < 1e-12);
    pz.set_transform(Transform2D::scaling(0.01));
    assert!((pz.scale() - 0.25).abs() < 1e-12);
}

#[test]
fn test_set_transform_refuses_singular_transforms() {
    let mut pz = PanZoomController::default();
    pz.set_transform(Transform2D::scaling(0.5));

    assert!(!pz.set_transform(Transform2D::scaling(0.0)));
    assert!(!pz.set_transform(Transform2D::new(1.0, 0.0, 1.0, 0.0, 0.0, 0.0)));
    assert!(!pz.set_transform(Transform2D::new(1.0, 0.0, 0.0, 1.0, f64::NAN, 0.0)));
    assert_eq!(pz.transform(), &Transform2D::scaling(0.5));
}

#[test]
fn test_releasing_primary_pinch_pointer_pans_with_secondary() {
    let vp = viewport();
    let mut pz = PanZoomController::default();

    pz.pointer_down(&pointer(1, 300.0, 300.0), &vp);
    pz.pointer_down(&pointer(2, 400.0, 300.0), &vp);
    // A pointer outside the pinch changes nothing.
    assert_eq!(pz.pointer_up(&pointer(3, 10.0, 10.0), &vp), None);
    assert!(pz.is_pinching());

    assert_eq!(pz.pointer_up(&pointer(1, 300.0, 300.0), &vp), None);
    assert_eq!(pz.panning_pointer(), Some(2));
}

#[test]
fn test_framing_needs_viewport_area() {
    let rect = domino::geometry::Rect::new(0.0, 0.0, 400.0, 300.0);
    let empty = Viewport::sized(0.0, 0.0);
    assert_eq!(
        PanZoomController::fit_rect(&rect, &empty, ZoomLimits::default()),
        None
    );

    let mut pz = PanZoomController::default();
    assert!(!pz.frame_rect(&rect, &empty, ZoomLimits::default()));
    assert!(!pz.frame_rect_animated(&rect, &empty, ZoomLimits::default(), 0.2));
    assert_eq!(pz.transform(), &Transform2D::IDENTITY);
    assert!(!pz.locked);
}

#[test]
fn test_framing_limits_only_narrow_controller_limits() {
    let vp = viewport();
    let mut pz = PanZoomController::default();
    let tiny = domino::geometry::Rect::new(0.0, 0.0, 1.0, 1.0);
    let huge = domino::geometry::Rect::new(0.0, 0.0, 100_000.0, 100_000.0);

    assert!(pz.frame_rect(&tiny, &vp, ZoomLimits::new(0.1, 50.0)));
    assert!((pz.scale() - 2.0).abs() < 1e-12);
    assert!(pz.frame_rect(&huge, &vp, ZoomLimits::new(0.1, 50.0)));
    assert!((pz.scale() - 0.25).abs() < 1e-12);

    assert!(pz.frame_rect(&tiny, &vp, ZoomLimits::new(0.25, 1.0)));
    assert!((pz.scale() - 1.0).abs() < 1e-12);
}

#[test]
fn test_animated_target_is_clamped() {
    let mut pz = PanZoomController::default();
    assert!(pz.animate_to(Transform2D::scaling(40.0), 0.0));
    assert!((pz.scale() - 2.0).abs() < 1e-12);
    assert!(!pz.animate_to(Transform2D::scaling(0.0), 0.2));
    assert!(!pz.locked);
}
