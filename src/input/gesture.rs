//! Single-pointer gesture tracking with click/drag classification.
//!
//! A [`GestureTracker`] is created from a pointer-down and then fed every
//! document-level move/up event. It only reacts to its own pointer id, and
//! once it has released (or been cancelled) it ignores everything, so a
//! tracker yields at most one terminal emission.
//!
//! Travel is accumulated from per-event deltas, not distance from the start,
//! so a long jittery hold still counts as a drag.

use crate::constants::CLICK_MOVEMENT_LIMIT;
use crate::input::event::{PointerEvent, PointerId};

/// What a tracker emits, in order.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum GestureEvent {
    Move(PointerEvent),
    Up(PointerEvent),
    /// Follows `Up` when travel stayed within the click limit
    Click(PointerEvent),
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
enum Phase {
    Active,
    Released,
    Cancelled,
}

/// Terminal result of a gesture.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Release {
    pub event: PointerEvent,
    pub is_click: bool,
}

impl Release {
    /// `Up`, then `Click` if the gesture classified as one.
    pub fn events(&self) -> impl Iterator<Item = GestureEvent> + use<> {
        let click = self.is_click.then_some(GestureEvent::Click(self.event));
        std::iter::once(GestureEvent::Up(self.event)).chain(click)
    }
}

#[derive(Clone, Debug)]
pub struct GestureTracker {
    pointer_id: PointerId,
    down_event: PointerEvent,
    last_event: PointerEvent,
    total_movement: f64,
    click_limit: f64,
    phase: Phase,
}

impl GestureTracker {
    pub fn begin(down: PointerEvent) -> Self {
        Self::with_click_limit(down, CLICK_MOVEMENT_LIMIT)
    }

    pub fn with_click_limit(down: PointerEvent, click_limit: f64) -> Self {
        Self {
            pointer_id: down.pointer_id,
            down_event: down,
            last_event: down,
            total_movement: 0.0,
            click_limit,
            phase: Phase::Active,
        }
    }

    /// Feed a document-level move. Returns the emission, if this tracker
    /// owns the pointer and is still live.
    pub fn pointer_move(&mut self, event: &PointerEvent) -> Option<GestureEvent> {
        if !self.accepts(event) {
            return None;
        }
        let delta = event
            .movement
            .unwrap_or(event.position - self.last_event.position);
        self.total_movement += delta.manhattan();
        self.last_event = *event;
        Some(GestureEvent::Move(*event))
    }

    /// Feed a document-level up. Ends the gesture.
    pub fn pointer_up(&mut self, event: &PointerEvent) -> Option<Release> {
        if !self.accepts(event) {
            return None;
        }
        // Only moves count as travel; the release itself carries none.
        self.last_event = *event;
        self.phase = Phase::Released;
        Some(Release {
            event: *event,
            is_click: self.total_movement <= self.click_limit,
        })
    }

    /// Stop listening without emitting `Up`/`Click`.
    pub fn cancel(&mut self) {
        if self.phase == Phase::Active {
            self.phase = Phase::Cancelled;
        }
    }

    #[inline]
    fn accepts(&self, event: &PointerEvent) -> bool {
        self.phase == Phase::Active && event.pointer_id == self.pointer_id
    }

    pub fn pointer_id(&self) -> PointerId {
        self.pointer_id
    }

    pub fn down_event(&self) -> &PointerEvent {
        &self.down_event
    }

    pub fn last_event(&self) -> &PointerEvent {
        &self.last_event
    }

    pub fn total_movement(&self) -> f64 {
        self.total_movement
    }

    pub fn is_active(&self) -> bool {
        self.phase == Phase::Active
    }

    /// Whether the gesture would be a click if released now.
    pub fn is_click_so_far(&self) -> bool {
        self.total_movement <= self.click_limit
    }
}
