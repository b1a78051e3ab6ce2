//! Camera framing and the per-frame tick.
//!
//! Framing animates the scene transform and keeps the canvas locked until
//! the transition ends. The host drives time by calling
//! [`EditorSession::tick`] once per frame.

use tracing::debug;

use super::{EditorSession, SessionEvent};
use crate::geometry::Rect;
use crate::input::ZoomLimits;

impl EditorSession {
    /// Frame the 4x4-cell area around the scene origin.
    pub fn center_origin(&mut self) -> bool {
        let grid = self.settings.grid;
        let rect = Rect::new(
            -grid.cell_width * 2.0,
            -grid.cell_height * 2.0,
            grid.cell_width * 4.0,
            grid.cell_height * 4.0,
        );
        let limits = self.settings.zoom_limits();
        self.frame(rect.padded(self.settings.frame_padding), limits)
    }

    /// Frame the selected cards. Does nothing without a selection.
    ///
    /// Returns true if a transition started.
    pub fn center_selection(&mut self) -> bool {
        let cards: Vec<_> = self
            .selection
            .cards()
            .iter()
            .filter_map(|id| self.project.card(id))
            .collect();
        if cards.is_empty() {
            return false;
        }
        let rect = self
            .settings
            .grid
            .bound_cards(cards)
            .padded(self.settings.frame_padding);
        let limits = self.settings.selection_limits();
        self.frame(rect, limits)
    }

    /// Animate the camera onto `rect` (scene space) within `limits`.
    ///
    /// Returns false, touching nothing, while the viewport has no area.
    pub fn frame(&mut self, rect: Rect, limits: ZoomLimits) -> bool {
        let size = self.canvas.viewport.size();
        if size.x <= 0.0 || size.y <= 0.0 {
            debug!(?rect, ?size, "viewport has no area, not framing");
            return false;
        }
        let duration = self.settings.camera_transition_secs;
        // The transition drops any pan, so every other gesture goes too.
        self.cancel_gestures();
        if !self
            .canvas
            .pan_zoom
            .frame_rect_animated(&rect, &self.canvas.viewport, limits, duration)
        {
            return false;
        }
        debug!(?rect, duration, "framing");
        if duration <= 0.0 {
            self.emit(SessionEvent::SceneTransformChanged);
        }
        true
    }

    /// Advance camera and snap transitions by `dt` seconds.
    ///
    /// Returns true while anything is still animating.
    pub fn tick(&mut self, dt: f64) -> bool {
        if self.canvas.pan_zoom.tick(dt) {
            self.emit(SessionEvent::SceneTransformChanged);
        }
        if !self.transitions.is_empty() {
            let moving: Vec<_> = self
                .transitions
                .positions
                .iter()
                .map(|a| a.card.clone())
                .collect();
            let resizing: Vec<_> = self
                .transitions
                .sizes
                .iter()
                .map(|a| a.card.clone())
                .collect();
            self.transitions.advance(dt);
            if !moving.is_empty() {
                self.emit(SessionEvent::CardsMoved(moving));
            }
            for card in resizing {
                self.emit(SessionEvent::CardResized(card));
            }
            self.emit(SessionEvent::OverlaysInvalidated);
        }
        self.is_animating()
    }
}
