//! Input state machine - which controller owns the pointer stream.
//!
//! The session keeps one of these instead of asking every controller in
//! turn, so a pointer can only ever drive a single interaction.
//!
//! ## State Transitions
//!
//! ```text
//! Idle -> Panning              (pointer down on empty canvas)
//! Idle -> DraggingCards        (pointer down on a card or group backing)
//! Idle -> ResizingCard         (pointer down on a card's resize grip)
//! Panning -> Pinching          (second pointer down while panning)
//! Pinching -> Panning          (one of the two pointers up)
//!
//! Any -> Idle                  (owning pointer up - finalizes operation)
//! ```

use crate::input::event::PointerId;
use crate::types::{CardId, GroupId};

#[derive(Debug, Clone, Default, PartialEq)]
pub enum InputState {
    /// No active input operation
    #[default]
    Idle,

    /// Canvas panning with one pointer
    Panning { pointer: PointerId },

    /// Two-pointer pinch zoom
    Pinching {
        primary: PointerId,
        secondary: PointerId,
    },

    /// Dragging one or more cards
    DraggingCards {
        pointer: PointerId,
        /// Card under the pointer at pointer-down
        primary: CardId,
        /// Set when the drag started on a group backing
        group: Option<GroupId>,
    },

    /// Resizing a card from its grip
    ResizingCard { pointer: PointerId, card: CardId },
}

impl InputState {
    /// Returns true if any gesture is in progress
    pub fn is_active(&self) -> bool {
        !self.is_idle()
    }

    pub fn is_idle(&self) -> bool {
        matches!(self, Self::Idle)
    }

    pub fn is_panning(&self) -> bool {
        matches!(self, Self::Panning { .. })
    }

    pub fn is_pinching(&self) -> bool {
        matches!(self, Self::Pinching { .. })
    }

    pub fn is_dragging_cards(&self) -> bool {
        matches!(self, Self::DraggingCards { .. })
    }

    pub fn is_resizing(&self) -> bool {
        matches!(self, Self::ResizingCard { .. })
    }

    /// Get the card under the drag, if dragging
    pub fn dragged_card(&self) -> Option<&CardId> {
        match self {
            Self::DraggingCards { primary, .. } => Some(primary),
            _ => None,
        }
    }

    /// Get the card being resized, if any
    pub fn resized_card(&self) -> Option<&CardId> {
        match self {
            Self::ResizingCard { card, .. } => Some(card),
            _ => None,
        }
    }

    /// Whether events from `pointer` belong to the current interaction.
    pub fn owns_pointer(&self, pointer: PointerId) -> bool {
        match self {
            Self::Idle => false,
            Self::Panning { pointer: p }
            | Self::DraggingCards { pointer: p, .. }
            | Self::ResizingCard { pointer: p, .. } => *p == pointer,
            Self::Pinching { primary, secondary } => *primary == pointer || *secondary == pointer,
        }
    }

    /// Pinch ended by `released`; the other pointer keeps panning.
    pub fn end_pinch(&mut self, released: PointerId) {
        if let Self::Pinching { primary, secondary } = *self {
            let remaining = if primary == released { secondary } else { primary };
            *self = Self::Panning { pointer: remaining };
        }
    }

    /// Reset to Idle state
    pub fn reset(&mut self) {
        *self = Self::Idle;
    }
}
