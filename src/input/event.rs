//! Pointer and wheel events as the engine consumes them.
//!
//! Positions are client pixels (window space); the viewport's bounding box
//! turns them into viewport pixels.

use crate::geometry::Vec2;

pub type PointerId = u32;

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct PointerEvent {
    pub pointer_id: PointerId,
    /// Pointer position in client pixels
    pub position: Vec2,
    /// Raw movement since the previous event of this pointer, when the
    /// platform reports it
    pub movement: Option<Vec2>,
    pub shift: bool,
}

impl PointerEvent {
    pub fn new(pointer_id: PointerId, position: Vec2) -> Self {
        Self {
            pointer_id,
            position,
            movement: None,
            shift: false,
        }
    }

    pub fn with_movement(mut self, movement: Vec2) -> Self {
        self.movement = Some(movement);
        self
    }

    pub fn with_shift(mut self, shift: bool) -> Self {
        self.shift = shift;
        self
    }
}

/// Unit of a wheel delta.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum DeltaMode {
    #[default]
    Pixel,
    Line,
    Page,
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct WheelEvent {
    pub position: Vec2,
    pub delta_y: f64,
    pub delta_mode: DeltaMode,
}

impl WheelEvent {
    pub fn pixels(position: Vec2, delta_y: f64) -> Self {
        Self {
            position,
            delta_y,
            delta_mode: DeltaMode::Pixel,
        }
    }

    /// Vertical delta in pixels.
    pub fn pixel_delta(&self, line_multiplier: f64) -> f64 {
        match self.delta_mode {
            DeltaMode::Pixel => self.delta_y,
            DeltaMode::Line | DeltaMode::Page => self.delta_y * line_multiplier,
        }
    }
}
