//! Card dragging.
//!
//! One gesture drives a session per dragged card. Each session keeps its own
//! grab offset (`grab = pointer⁻¹ · card`) so a multi-card selection moves
//! rigidly with the pointer. While moving, the card follows the pointer
//! exactly and a target shadow shows the snapped landing spot; on release the
//! card lands on the snapped position.
//!
//! The controller never touches the document. Callers read
//! [`DragController::sessions`] after a move and apply the outcome on release.
//!
//! ## Performance Notes
//!
//! Pointer moves arrive at display rate. Moves for other pointers exit early
//! and a move only recomputes two transforms per dragged card.

use tracing::debug;

use crate::geometry::{Transform2D, Vec2};
use crate::grid::GridConfig;
use crate::input::event::{PointerEvent, PointerId};
use crate::input::gesture::GestureTracker;
use crate::types::CardId;

/// Per-card state for one drag gesture.
#[derive(Clone, Debug, PartialEq)]
pub struct DragSession {
    pub card: CardId,
    /// Card pose relative to the pointer at grab time
    pub grab: Transform2D,
    /// Position when the gesture started
    pub start: Vec2,
    /// Free, unsnapped position following the pointer
    pub live: Vec2,
    /// Snapped position shown by the target shadow
    pub target: Vec2,
}

impl DragSession {
    fn new(card: CardId, position: Vec2, pointer_scene: &Transform2D, grid: &GridConfig) -> Self {
        let grab = pointer_scene
            .inverse()
            .multiply(&Transform2D::translation(position));
        Self {
            card,
            grab,
            start: position,
            live: position,
            target: grid.snap_point(position),
        }
    }

    fn follow(&mut self, pointer_scene: &Transform2D, grid: &GridConfig) {
        let live = pointer_scene.multiply(&self.grab);
        self.live = live.translation_of();
        self.target = grid.snap_transform(&live).translation_of();
    }
}

/// Where a card lands after a drag.
#[derive(Clone, Debug, PartialEq)]
pub struct CardMove {
    pub card: CardId,
    pub from: Vec2,
    /// Visual position right before snapping; a snap animation starts here
    pub released: Vec2,
    pub to: Vec2,
}

impl CardMove {
    pub fn is_noop(&self) -> bool {
        self.from == self.to
    }
}

#[derive(Clone, Debug, PartialEq)]
pub enum DragOutcome {
    /// Travel stayed under the click limit. Every card is back at its start
    /// position and `card` should toggle its selection.
    Click {
        card: CardId,
        event: PointerEvent,
        restored: Vec<CardMove>,
    },
    /// The gesture moved the cards.
    Moved(Vec<CardMove>),
}

impl DragOutcome {
    pub fn moves(&self) -> &[CardMove] {
        match self {
            DragOutcome::Click { restored, .. } => restored,
            DragOutcome::Moved(moves) => moves,
        }
    }

    /// True if any card ends somewhere other than where it started.
    pub fn changed_anything(&self) -> bool {
        self.moves().iter().any(|m| !m.is_noop())
    }
}

#[derive(Default)]
pub struct DragController {
    tracker: Option<GestureTracker>,
    /// Card under the pointer at pointer-down
    primary: Option<CardId>,
    sessions: Vec<DragSession>,
    click_limit: Option<f64>,
}

impl DragController {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_click_limit(mut self, click_limit: f64) -> Self {
        self.click_limit = Some(click_limit);
        self
    }

    /// Start dragging `cards` (id and current position). `primary` is the
    /// card the pointer went down on and receives the click, if any.
    pub fn begin<I>(
        &mut self,
        down: &PointerEvent,
        primary: CardId,
        cards: I,
        pointer_scene: &Transform2D,
        grid: &GridConfig,
    ) where
        I: IntoIterator<Item = (CardId, Vec2)>,
    {
        self.cancel();
        self.sessions = cards
            .into_iter()
            .map(|(card, position)| DragSession::new(card, position, pointer_scene, grid))
            .collect();
        self.tracker = Some(match self.click_limit {
            Some(limit) => GestureTracker::with_click_limit(*down, limit),
            None => GestureTracker::begin(*down),
        });
        debug!(card = %primary, count = self.sessions.len(), "drag started");
        self.primary = Some(primary);
    }

    pub fn is_active(&self) -> bool {
        self.tracker.is_some()
    }

    pub fn pointer_id(&self) -> Option<PointerId> {
        self.tracker.as_ref().map(GestureTracker::pointer_id)
    }

    pub fn sessions(&self) -> &[DragSession] {
        &self.sessions
    }

    /// Returns true if the sessions were updated.
    pub fn pointer_move(
        &mut self,
        event: &PointerEvent,
        pointer_scene: &Transform2D,
        grid: &GridConfig,
    ) -> bool {
        let Some(tracker) = self.tracker.as_mut() else {
            return false;
        };
        if tracker.pointer_move(event).is_none() {
            return false;
        }
        for session in &mut self.sessions {
            session.follow(pointer_scene, grid);
        }
        true
    }

    pub fn pointer_up(
        &mut self,
        event: &PointerEvent,
        pointer_scene: &Transform2D,
        grid: &GridConfig,
    ) -> Option<DragOutcome> {
        let release = self.tracker.as_mut()?.pointer_up(event)?;
        self.tracker = None;
        let sessions = std::mem::take(&mut self.sessions);
        let primary = self.primary.take()?;

        if release.is_click {
            let restored = sessions
                .into_iter()
                .map(|s| CardMove {
                    card: s.card,
                    from: s.start,
                    released: s.live,
                    to: s.start,
                })
                .collect();
            debug!(card = %primary, "drag resolved as click");
            return Some(DragOutcome::Click {
                card: primary,
                event: *event,
                restored,
            });
        }

        let moves: Vec<CardMove> = sessions
            .into_iter()
            .map(|mut s| {
                s.follow(pointer_scene, grid);
                CardMove {
                    card: s.card,
                    from: s.start,
                    released: s.live,
                    to: s.target,
                }
            })
            .collect();
        debug!(count = moves.len(), "drag released");
        Some(DragOutcome::Moved(moves))
    }

    /// Abort without an outcome. Card positions are left to the caller.
    pub fn cancel(&mut self) {
        if let Some(tracker) = self.tracker.as_mut() {
            tracker.cancel();
        }
        self.tracker = None;
        self.primary = None;
        self.sessions.clear();
    }
}

/// Short transition from a released position to its snapped spot.
#[derive(Clone, Debug, PartialEq)]
pub struct SnapAnimation {
    pub card: CardId,
    pub from: Vec2,
    pub to: Vec2,
    pub elapsed: f64,
    pub duration: f64,
}

impl SnapAnimation {
    pub fn new(card: CardId, from: Vec2, to: Vec2, duration: f64) -> Self {
        Self {
            card,
            from,
            to,
            elapsed: 0.0,
            duration,
        }
    }

    /// Visual position at the current time.
    pub fn position(&self) -> Vec2 {
        if self.duration <= 0.0 {
            return self.to;
        }
        let t = crate::input::pan_zoom::ease_in_out(self.elapsed / self.duration);
        self.from + (self.to - self.from) * t
    }

    /// Advance by `dt` seconds; returns true once finished.
    pub fn advance(&mut self, dt: f64) -> bool {
        self.elapsed += dt.max(0.0);
        self.is_finished()
    }

    pub fn is_finished(&self) -> bool {
        self.elapsed >= self.duration
    }
}
