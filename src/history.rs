//! Checkpoint-based undo/redo.
//!
//! The history is a list of full document snapshots plus the index of the
//! slot that mirrors the live document. Discrete edits call
//! [`HistoryManager::make_checkpoint`] right before mutating; continuous
//! edits (drags, typing) bracket their mutations with
//! [`mark_dirty`](HistoryManager::mark_dirty) and
//! [`confirm_dirty`](HistoryManager::confirm_dirty) /
//! [`cancel_dirty`](HistoryManager::cancel_dirty) so the whole interaction
//! becomes one undo step, or none at all.
//!
//! ```text
//! make_checkpoint()            entries: [s0, s1, s1']   index 2
//!                                              ^ live mirrors this slot
//! mark_dirty(SelectionPosition) -> same as a checkpoint, dirty = Some(..)
//! confirm_dirty(..)            -> dirty = None, slot kept
//! cancel_dirty(..)             -> slot dropped, index back to 1
//! ```
//!
//! The live document is owned by the caller and passed in; every deep copy
//! of it is taken here.

use std::collections::VecDeque;
use tracing::{debug, trace};

use crate::constants::MAX_HISTORY_DEPTH;
use crate::types::{CardId, GroupId, StyleId};

/// The in-progress, not yet committed edit a dirty marker stands for.
///
/// Markers coalesce only when they compare equal, variant and payload.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum PendingEdit {
    /// Dragging the current selection
    SelectionPosition,
    /// Resizing one card
    CardSize(CardId),
    /// Typing into one card's text or icon fields
    CardContent(CardId),
    /// Live colour picking for a group
    GroupColor(GroupId),
    /// Editing a card style's properties
    CardStyleProperties(StyleId),
}

pub struct HistoryManager<T> {
    entries: VecDeque<T>,
    index: usize,
    dirty: Option<PendingEdit>,
    max_depth: usize,
}

impl<T: Clone> HistoryManager<T> {
    /// Fresh history holding `document` as its only entry.
    pub fn new(document: &T) -> Self {
        Self::with_depth(document, MAX_HISTORY_DEPTH)
    }

    pub fn with_depth(document: &T, max_depth: usize) -> Self {
        let mut history = Self {
            entries: VecDeque::new(),
            index: 0,
            dirty: None,
            max_depth: max_depth.max(1),
        };
        history.reset(document);
        history
    }

    /// Forget everything and seed the history with `document`.
    pub fn reset(&mut self, document: &T) {
        self.entries.clear();
        self.entries.push_back(document.clone());
        self.index = 0;
        self.dirty = None;
    }

    /// Commit a step boundary right before a discrete mutation of `live`.
    ///
    /// Drops the redo branch, freezes the current state into the current slot
    /// and opens a new slot for the upcoming edit.
    pub fn make_checkpoint(&mut self, live: &T) {
        self.dirty = None;
        self.push_slot(live);
        self.enforce_depth();
    }

    /// Start (or continue) a continuous edit.
    ///
    /// Marking the edit that is already pending is a no-op, so repeated
    /// move callbacks do not stack checkpoints. A different pending edit is
    /// committed first.
    pub fn mark_dirty(&mut self, edit: PendingEdit, live: &T) {
        if self.dirty.as_ref() == Some(&edit) {
            return;
        }
        if let Some(previous) = self.dirty.take() {
            debug!(?previous, next = ?edit, "superseding pending edit");
            self.enforce_depth();
        }
        // Depth is enforced on commit; cancel restores the exact pre-edit history.
        self.push_slot(live);
        trace!(?edit, index = self.index, "edit marked dirty");
        self.dirty = Some(edit);
    }

    /// Commit the pending edit as a single undo step.
    ///
    /// Returns false (and does nothing) if `edit` is not the pending edit.
    pub fn confirm_dirty(&mut self, edit: &PendingEdit) -> bool {
        if self.dirty.as_ref() != Some(edit) {
            return false;
        }
        self.dirty = None;
        self.enforce_depth();
        trace!(?edit, index = self.index, "pending edit confirmed");
        true
    }

    /// Discard the pending edit's history slot.
    ///
    /// Meant for interactions that ended with no net change; the live
    /// document is not touched. Returns false if `edit` is not pending.
    pub fn cancel_dirty(&mut self, edit: &PendingEdit) -> bool {
        if self.dirty.as_ref() != Some(edit) {
            return false;
        }
        self.dirty = None;
        self.entries.pop_back();
        self.index -= 1;
        trace!(?edit, index = self.index, "pending edit cancelled");
        true
    }

    /// Step back, overwriting `live` with the previous snapshot.
    pub fn undo(&mut self, live: &mut T) -> bool {
        if !self.can_undo() {
            return false;
        }
        if self.dirty.take().is_some() {
            self.enforce_depth();
        }
        self.entries[self.index] = live.clone();
        self.index -= 1;
        *live = self.entries[self.index].clone();
        debug!(index = self.index, len = self.entries.len(), "undo");
        true
    }

    /// Step forward again, overwriting `live` with the next snapshot.
    pub fn redo(&mut self, live: &mut T) -> bool {
        if !self.can_redo() {
            return false;
        }
        self.entries[self.index] = live.clone();
        self.index += 1;
        *live = self.entries[self.index].clone();
        debug!(index = self.index, len = self.entries.len(), "redo");
        true
    }

    pub fn can_undo(&self) -> bool {
        self.index > 0 || self.dirty.is_some()
    }

    pub fn can_redo(&self) -> bool {
        self.index + 1 < self.entries.len() && self.dirty.is_none()
    }

    pub fn dirty(&self) -> Option<&PendingEdit> {
        self.dirty.as_ref()
    }

    pub fn index(&self) -> usize {
        self.index
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn max_depth(&self) -> usize {
        self.max_depth
    }

    /// Snapshot at `index`, if any.
    pub fn entry(&self, index: usize) -> Option<&T> {
        self.entries.get(index)
    }

    fn push_slot(&mut self, live: &T) {
        self.entries.truncate(self.index + 1);
        self.entries[self.index] = live.clone();
        self.entries.push_back(live.clone());
        self.index += 1;
    }

    fn enforce_depth(&mut self) {
        while self.index > self.max_depth {
            self.entries.pop_front();
            self.index -= 1;
            debug!(max_depth = self.max_depth, "evicted oldest history entry");
        }
    }
}
