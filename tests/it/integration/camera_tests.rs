//! Camera Workflow Tests
//!
//! Pinch, wheel and framing through the session.

use crate::helpers::*;
use domino::SessionEvent;
use domino::geometry::Vec2;
use domino::input::WheelEvent;

#[test]
fn test_pinch_zooms_and_falls_back_to_pan() {
    let mut session = single_card_session();

    assert!(session.pointer_down(&pointer(1, 300.0, 300.0)));
    assert!(session.input_state().is_panning());
    assert!(session.pointer_down(&pointer(2, 400.0, 300.0)));
    assert!(session.input_state().is_pinching());

    session.pointer_move(&pointer(2, 500.0, 300.0));
    assert!(session.pan_zoom().scale() > 1.0);

    assert!(session.pointer_up(&pointer(2, 500.0, 300.0)));
    assert!(session.input_state().is_panning());

    session.drain_events();
    assert!(session.pointer_up(&pointer(1, 300.0, 300.0)));
    assert!(session.input_state().is_idle());
    // Lifting the last finger of a pinch is not a background click.
    assert!(!session.drain_events().contains(&SessionEvent::BackgroundClick));
}

#[test]
fn test_third_pointer_is_ignored() {
    let mut session = single_card_session();
    session.pointer_down(&pointer(1, 300.0, 300.0));
    session.pointer_down(&pointer(2, 400.0, 300.0));

    assert!(!session.pointer_down(&pointer(3, 500.0, 500.0)));
    assert!(!session.pointer_move(&pointer(3, 550.0, 500.0)));
}

#[test]
fn test_wheel_zooms_about_cursor() {
    let mut session = single_card_session();
    let cursor = Vec2::new(400.0, 300.0);
    let before = session.pan_zoom().mapper(session.viewport()).client_to_scene(cursor);

    assert!(session.wheel(&WheelEvent::pixels(cursor, -100.0)));
    assert!(session.pan_zoom().scale() > 1.0);

    let after = session.pan_zoom().mapper(session.viewport()).client_to_scene(cursor);
    assert!(after.approx_eq(before, 1e-6));
}

#[test]
fn test_center_origin_animates_then_unlocks() {
    let mut session = single_card_session();
    session.center_origin();
    assert!(session.is_locked());

    let mut frames = 0;
    while session.tick(1.0 / 60.0) {
        frames += 1;
        assert!(frames < 1000);
    }
    assert!(!session.is_locked());
    assert!(
        session
            .drain_events()
            .contains(&SessionEvent::SceneTransformChanged)
    );
}

#[test]
fn test_card_drop_animation_settles() {
    let mut session = single_card_session();
    drag(&mut session, (10.0, 10.0), (310.0, 60.0));

    let a = domino::types::CardId::from("a");
    assert_eq!(session.visual_position(&a), Some(Vec2::new(300.0, 50.0)));
    while session.tick(0.05) {}
    assert_eq!(session.visual_position(&a), Some(Vec2::new(256.0, 80.0)));
}
