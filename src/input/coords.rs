//! Coordinate conversion between client, viewport and scene space.
//!
//! The scene transform maps scene coordinates to viewport pixels. Pointer
//! positions arrive in client pixels and are first made relative to the
//! viewport's bounding box.
//!
//! Pointers are expressed as transforms rather than points so callers can
//! compose them with a grab offset: `pointer · grab` keeps whatever was
//! grabbed rigidly attached to the pointer.

use crate::geometry::{Rect, Transform2D, Vec2};

/// On-screen canvas area, in client pixels.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct Viewport {
    pub bounds: Rect,
}

impl Viewport {
    pub fn new(bounds: Rect) -> Self {
        Self { bounds }
    }

    /// Viewport anchored at the client origin.
    pub fn sized(width: f64, height: f64) -> Self {
        Self::new(Rect::new(0.0, 0.0, width, height))
    }

    #[inline]
    pub fn size(&self) -> Vec2 {
        self.bounds.size()
    }

    /// Client position relative to the viewport's top-left corner.
    #[inline]
    pub fn to_viewport(&self, client: Vec2) -> Vec2 {
        client - self.bounds.origin()
    }
}

/// Context needed for coordinate conversions
pub struct SceneMapper<'a> {
    pub viewport: &'a Viewport,
    pub scene: &'a Transform2D,
}

impl<'a> SceneMapper<'a> {
    #[inline]
    pub fn new(viewport: &'a Viewport, scene: &'a Transform2D) -> Self {
        Self { viewport, scene }
    }

    /// Pure translation to the pointer's viewport-pixel position.
    pub fn pointer_to_viewport_transform(&self, client: Vec2) -> Transform2D {
        Transform2D::translation(self.viewport.to_viewport(client))
    }

    /// The pointer's location in scene space, as a transform:
    /// `scene⁻¹ · viewport_pointer`.
    pub fn pointer_to_scene_transform(&self, client: Vec2) -> Transform2D {
        self.scene
            .inverse()
            .multiply(&self.pointer_to_viewport_transform(client))
    }

    pub fn client_to_scene(&self, client: Vec2) -> Vec2 {
        self.pointer_to_scene_transform(client).translation_of()
    }

    pub fn scene_to_viewport(&self, scene_point: Vec2) -> Vec2 {
        self.scene.apply(scene_point)
    }

    pub fn viewport_to_scene(&self, viewport_point: Vec2) -> Vec2 {
        self.scene.inverse().apply(viewport_point)
    }
}
