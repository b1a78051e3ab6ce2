//! Card resizing from the bottom-right grip.
//!
//! The card's pixel extent follows the pointer freely; its cell size is the
//! smallest that covers that extent (never below the minimum), and the
//! target shadow shows the extent the card will snap to on release.

use tracing::debug;

use crate::constants::{MIN_RESIZE_CELLS, RESIZE_GRIP_SIZE};
use crate::geometry::{Rect, Vec2};
use crate::grid::GridConfig;
use crate::input::event::{PointerEvent, PointerId};
use crate::input::gesture::GestureTracker;
use crate::types::{Card, CardId, CardSize};

/// Whether `point` (scene space) is on the grip triangle in the bottom-right
/// corner of `bounds`.
pub fn hits_resize_grip(bounds: &Rect, point: Vec2, grip: f64) -> bool {
    let local = point - Vec2::new(bounds.right() - grip, bounds.bottom() - grip);
    let inside_box = local.x >= 0.0 && local.y >= 0.0 && local.x <= grip && local.y <= grip;
    inside_box && local.x + local.y >= grip
}

#[derive(Clone, Debug, PartialEq)]
pub struct ResizeSession {
    pub card: CardId,
    pub start_pointer: Vec2,
    pub start_size: CardSize,
    pub start_extent: Vec2,
    /// Free pixel extent following the pointer
    pub live_extent: Vec2,
    /// Cell size the card currently reports
    pub size: CardSize,
}

impl ResizeSession {
    /// Extent the card snaps to on release.
    pub fn target_extent(&self, grid: &GridConfig) -> Vec2 {
        grid.card_extent(self.size)
    }
}

#[derive(Clone, Debug, PartialEq)]
pub struct ResizeOutcome {
    pub card: CardId,
    pub from: CardSize,
    pub to: CardSize,
    /// Pixel extent right before snapping; a size animation starts here
    pub released_extent: Vec2,
}

impl ResizeOutcome {
    pub fn changed(&self) -> bool {
        self.from != self.to
    }
}

pub struct ResizeController {
    tracker: Option<GestureTracker>,
    session: Option<ResizeSession>,
    pub min_cells: u32,
    pub grip_size: f64,
}

impl Default for ResizeController {
    fn default() -> Self {
        Self {
            tracker: None,
            session: None,
            min_cells: MIN_RESIZE_CELLS,
            grip_size: RESIZE_GRIP_SIZE,
        }
    }
}

impl ResizeController {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn begin(&mut self, down: &PointerEvent, card: &Card, pointer: Vec2, grid: &GridConfig) {
        let extent = grid.card_extent(card.size);
        debug!(card = %card.id, "resize started");
        self.tracker = Some(GestureTracker::begin(*down));
        self.session = Some(ResizeSession {
            card: card.id.clone(),
            start_pointer: pointer,
            start_size: card.size,
            start_extent: extent,
            live_extent: extent,
            size: card.size,
        });
    }

    pub fn is_active(&self) -> bool {
        self.session.is_some()
    }

    pub fn pointer_id(&self) -> Option<PointerId> {
        self.tracker.as_ref().map(GestureTracker::pointer_id)
    }

    pub fn session(&self) -> Option<&ResizeSession> {
        self.session.as_ref()
    }

    /// Returns the card's new cell size if the move was ours.
    pub fn pointer_move(&mut self, event: &PointerEvent, pointer: Vec2, grid: &GridConfig) -> Option<CardSize> {
        self.tracker.as_mut()?.pointer_move(event)?;
        let session = self.session.as_mut()?;
        session.live_extent = session.start_extent + (pointer - session.start_pointer);
        let fitted = grid.fit_extent(session.live_extent);
        session.size = CardSize {
            x: fitted.x.max(self.min_cells),
            y: fitted.y.max(self.min_cells),
        };
        Some(session.size)
    }

    pub fn pointer_up(&mut self, event: &PointerEvent) -> Option<ResizeOutcome> {
        self.tracker.as_mut()?.pointer_up(event)?;
        self.tracker = None;
        let session = self.session.take()?;
        debug!(card = %session.card, from = ?session.start_size, to = ?session.size, "resize released");
        Some(ResizeOutcome {
            card: session.card,
            from: session.start_size,
            to: session.size,
            released_extent: session.live_extent,
        })
    }

    pub fn cancel(&mut self) {
        if let Some(tracker) = self.tracker.as_mut() {
            tracker.cancel();
        }
        self.tracker = None;
        self.session = None;
    }
}
