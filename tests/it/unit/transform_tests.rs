//! Transform and Grid Tests

use domino::geometry::{GeometryError, Transform2D, Vec2};
use domino::grid::{GridConfig, snap};
use domino::input::{SceneMapper, Viewport};

fn transforms() -> Vec<Transform2D> {
    vec![
        Transform2D::IDENTITY,
        Transform2D::scaling(0.25),
        Transform2D::new(2.0, 0.0, 0.0, 2.0, -300.0, 125.5),
        Transform2D::new(0.7, 0.1, -0.2, 1.3, 17.0, -4.0),
        Transform2D::rotation(0.6).multiply(&Transform2D::scaling(1.7)),
    ]
}

#[test]
fn test_inverse_round_trip() {
    let points = [
        Vec2::ZERO,
        Vec2::new(1.0, -1.0),
        Vec2::new(1234.5, 678.9),
        Vec2::new(-9999.0, 0.001),
    ];
    for t in transforms() {
        let inverse = t.inverse();
        for p in points {
            let back = inverse.apply(t.apply(p));
            assert!(back.approx_eq(p, 1e-6), "{t:?} {p:?} -> {back:?}");
        }
    }
}

#[test]
fn test_singular_transform_is_an_error() {
    let flat = Transform2D::new(1.0, 2.0, 2.0, 4.0, 0.0, 0.0);
    assert!(matches!(
        flat.try_inverse(),
        Err(GeometryError::SingularTransform { .. })
    ));
}

#[test]
fn test_client_scene_mapping_round_trip() {
    let viewport = Viewport::new(domino::geometry::Rect::new(50.0, 20.0, 800.0, 600.0));
    for t in transforms() {
        let mapper = SceneMapper::new(&viewport, &t);
        let client = Vec2::new(420.0, 310.0);
        let scene = mapper.client_to_scene(client);
        let viewport_point = mapper.scene_to_viewport(scene);
        assert!(viewport_point.approx_eq(viewport.to_viewport(client), 1e-6));
        assert!(mapper.viewport_to_scene(viewport_point).approx_eq(scene, 1e-6));
    }
}

#[test]
fn test_snap_idempotence() {
    for cell in [0.5, 3.0, 80.0, 128.0, 1000.0] {
        for i in -500..500 {
            let v = f64::from(i) * 7.31;
            let once = snap(v, cell);
            assert_eq!(snap(once, cell), once, "v={v} cell={cell}");
        }
    }
}

#[test]
fn test_default_grid_snaps_to_half_cells() {
    let grid = GridConfig::default();
    assert_eq!(grid.snap_step(), Vec2::new(128.0, 80.0));
    assert_eq!(grid.snap_point(Vec2::new(300.0, 50.0)), Vec2::new(256.0, 80.0));
}
