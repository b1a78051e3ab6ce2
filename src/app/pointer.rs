//! Pointer routing - hands each pointer stream to exactly one controller.
//!
//! Pointer-down decides the owner from what lies under the pointer:
//!
//! ```text
//! second pointer while panning  -> pinch
//! card resize grip              -> resize
//! card                          -> drag (the selection, if the card is in it)
//! group backing                 -> select groups, drag their cards
//! empty canvas                  -> pan
//! ```
//!
//! Later moves and the release go to the owner recorded in `InputState`.

use tracing::{debug, info};

use super::{EditorSession, SessionEvent};
use crate::geometry::{Transform2D, Vec2};
use crate::history::PendingEdit;
use crate::input::resize::hits_resize_grip;
use crate::input::{
    DragOutcome, InputState, PanZoomEvent, PointerEvent, ResizeOutcome, SnapAnimation, WheelEvent,
};
use crate::overlay::groups_at;
use crate::profile_scope;
use crate::types::{CardId, CardSize, GroupId};

impl EditorSession {
    /// Scene position and pointer transform for a client position.
    fn pointer_in_scene(&self, client: Vec2) -> (Vec2, Transform2D) {
        let pointer = self
            .canvas
            .pan_zoom
            .mapper(&self.canvas.viewport)
            .pointer_to_scene_transform(client);
        (pointer.translation_of(), pointer)
    }

    /// Returns true if the pointer started an interaction.
    pub fn pointer_down(&mut self, event: &PointerEvent) -> bool {
        profile_scope!("pointer_down");
        if self.canvas.pan_zoom.locked {
            return false;
        }

        if let InputState::Panning { pointer } = self.canvas.input_state {
            if pointer == event.pointer_id
                || !self.canvas.pan_zoom.pointer_down(event, &self.canvas.viewport)
            {
                return false;
            }
            self.canvas.input_state = InputState::Pinching {
                primary: pointer,
                secondary: event.pointer_id,
            };
            return true;
        }
        if self.canvas.input_state.is_active() {
            return false;
        }

        let (point, pointer_scene) = self.pointer_in_scene(event.position);
        let hit = self
            .canvas
            .index
            .topmost(point, &self.project.cards)
            .map(|card| (card.id.clone(), self.settings.grid.card_bounds(card)));

        if let Some((card, bounds)) = hit {
            if hits_resize_grip(&bounds, point, self.canvas.resize.grip_size) {
                return self.begin_resize(event, card, point);
            }
            let cards = if self.selection.is_selected(&card) {
                self.selection.cards().to_vec()
            } else {
                vec![card.clone()]
            };
            return self.begin_drag(event, card, None, cards, &pointer_scene);
        }

        let groups = groups_at(&self.project, &self.settings.grid, point);
        if !groups.is_empty() && self.begin_group_drag(event, groups, &pointer_scene) {
            return true;
        }

        if self.canvas.pan_zoom.pointer_down(event, &self.canvas.viewport) {
            self.canvas.input_state = InputState::Panning {
                pointer: event.pointer_id,
            };
            return true;
        }
        false
    }

    fn begin_resize(&mut self, event: &PointerEvent, card: CardId, point: Vec2) -> bool {
        let Some(target) = self.project.card(&card) else {
            return false;
        };
        self.canvas
            .resize
            .begin(event, target, point, &self.settings.grid);
        self.history
            .mark_dirty(PendingEdit::CardSize(card.clone()), &self.project);
        self.transitions.sizes.retain(|a| a.card != card);
        self.canvas.input_state = InputState::ResizingCard {
            pointer: event.pointer_id,
            card,
        };
        true
    }

    fn begin_group_drag(
        &mut self,
        event: &PointerEvent,
        groups: Vec<GroupId>,
        pointer_scene: &Transform2D,
    ) -> bool {
        self.selection.select_groups(groups.clone());
        self.emit(SessionEvent::SelectionChanged);

        let mut cards: Vec<CardId> = Vec::new();
        for id in &groups {
            let Some(group) = self.project.group(id) else {
                continue;
            };
            for card in self.project.group_cards(group) {
                if !cards.contains(&card.id) {
                    cards.push(card.id.clone());
                }
            }
        }
        let Some(primary) = cards.first().cloned() else {
            return false;
        };
        let highlighted = self.selection.highlighted_group().cloned();
        self.begin_drag(event, primary, highlighted, cards, pointer_scene)
    }

    fn begin_drag(
        &mut self,
        event: &PointerEvent,
        primary: CardId,
        group: Option<GroupId>,
        cards: Vec<CardId>,
        pointer_scene: &Transform2D,
    ) -> bool {
        let starts: Vec<(CardId, Vec2)> = cards
            .iter()
            .filter_map(|id| self.project.card(id))
            .map(|card| (card.id.clone(), card.position))
            .collect();
        if starts.is_empty() {
            return false;
        }

        self.history
            .mark_dirty(PendingEdit::SelectionPosition, &self.project);
        self.transitions
            .positions
            .retain(|a| !starts.iter().any(|(id, _)| id == &a.card));
        self.canvas
            .drag
            .begin(event, primary.clone(), starts, pointer_scene, &self.settings.grid);
        self.canvas.input_state = InputState::DraggingCards {
            pointer: event.pointer_id,
            primary,
            group,
        };
        true
    }

    /// Returns true if anything visible changed.
    pub fn pointer_move(&mut self, event: &PointerEvent) -> bool {
        profile_scope!("pointer_move");
        if !self.canvas.input_state.owns_pointer(event.pointer_id) {
            return false;
        }

        match &self.canvas.input_state {
            InputState::Panning { .. } | InputState::Pinching { .. } => {
                if !self.canvas.pan_zoom.pointer_move(event, &self.canvas.viewport) {
                    return false;
                }
                self.emit(SessionEvent::SceneTransformChanged);
                true
            }
            InputState::DraggingCards { .. } => {
                let (_, pointer_scene) = self.pointer_in_scene(event.position);
                let grid = self.settings.grid;
                if !self.canvas.drag.pointer_move(event, &pointer_scene, &grid) {
                    return false;
                }
                let mut moved = Vec::with_capacity(self.canvas.drag.sessions().len());
                for session in self.canvas.drag.sessions() {
                    if let Some(card) = self.project.card_mut(&session.card) {
                        card.position = session.live;
                        self.canvas.index.update_card(card, &grid);
                        moved.push(session.card.clone());
                    }
                }
                self.emit(SessionEvent::CardsMoved(moved));
                self.emit(SessionEvent::OverlaysInvalidated);
                true
            }
            InputState::ResizingCard { card, .. } => {
                let card = card.clone();
                let (point, _) = self.pointer_in_scene(event.position);
                let grid = self.settings.grid;
                let Some(size) = self.canvas.resize.pointer_move(event, point, &grid) else {
                    return false;
                };
                if let Some(target) = self.project.card_mut(&card) {
                    target.size = size;
                    self.canvas.index.update_card(target, &grid);
                }
                self.emit(SessionEvent::CardResized(card));
                self.emit(SessionEvent::OverlaysInvalidated);
                true
            }
            InputState::Idle => false,
        }
    }

    /// Returns true if the release belonged to an active interaction.
    pub fn pointer_up(&mut self, event: &PointerEvent) -> bool {
        profile_scope!("pointer_up");
        if !self.canvas.input_state.owns_pointer(event.pointer_id) {
            return false;
        }

        match self.canvas.input_state.clone() {
            InputState::Panning { .. } => {
                let viewport = self.canvas.viewport;
                let Some(ended) = self.canvas.pan_zoom.pointer_up(event, &viewport) else {
                    return false;
                };
                self.canvas.input_state.reset();
                if let PanZoomEvent::BackgroundClick(_) = ended {
                    self.background_click();
                }
                true
            }
            InputState::Pinching { .. } => {
                let viewport = self.canvas.viewport;
                self.canvas.pan_zoom.pointer_up(event, &viewport);
                self.canvas.input_state.end_pinch(event.pointer_id);
                true
            }
            InputState::DraggingCards { group, .. } => {
                let (_, pointer_scene) = self.pointer_in_scene(event.position);
                let grid = self.settings.grid;
                let Some(outcome) = self.canvas.drag.pointer_up(event, &pointer_scene, &grid)
                else {
                    return false;
                };
                self.canvas.input_state.reset();
                self.finish_drag(outcome, group);
                true
            }
            InputState::ResizingCard { .. } => {
                let Some(outcome) = self.canvas.resize.pointer_up(event) else {
                    return false;
                };
                self.canvas.input_state.reset();
                self.finish_resize(outcome);
                true
            }
            InputState::Idle => false,
        }
    }

    fn finish_drag(&mut self, outcome: DragOutcome, group: Option<GroupId>) {
        let grid = self.settings.grid;
        let duration = self.settings.snap_transition_secs;

        let mut moved = Vec::with_capacity(outcome.moves().len());
        for step in outcome.moves() {
            let Some(card) = self.project.card_mut(&step.card) else {
                continue;
            };
            card.position = step.to;
            self.canvas.index.update_card(card, &grid);
            if step.released != step.to {
                self.transitions.push_position(SnapAnimation::new(
                    step.card.clone(),
                    step.released,
                    step.to,
                    duration,
                ));
            }
            moved.push(step.card.clone());
        }

        let edit = PendingEdit::SelectionPosition;
        if outcome.changed_anything() {
            self.history.confirm_dirty(&edit);
            info!(count = moved.len(), "cards moved");
        } else {
            self.history.cancel_dirty(&edit);
            debug!("drag left every card in place");
        }
        self.emit(SessionEvent::CardsMoved(moved));
        self.emit(SessionEvent::OverlaysInvalidated);

        // Clicks on a group backing only select the group.
        if let DragOutcome::Click { card, .. } = outcome {
            if group.is_none() {
                self.toggle_card(card);
            }
        }
    }

    fn finish_resize(&mut self, outcome: ResizeOutcome) {
        let grid = self.settings.grid;
        if let Some(card) = self.project.card_mut(&outcome.card) {
            card.size = outcome.to;
            self.canvas.index.update_card(card, &grid);
        }

        let snapped = grid.card_extent(outcome.to);
        if outcome.released_extent != snapped {
            self.transitions.push_size(SnapAnimation::new(
                outcome.card.clone(),
                outcome.released_extent,
                snapped,
                self.settings.snap_transition_secs,
            ));
        }

        let edit = PendingEdit::CardSize(outcome.card.clone());
        if outcome.changed() {
            self.history.confirm_dirty(&edit);
            info!(card = %outcome.card, size = ?outcome.to, "card resized");
        } else {
            self.history.cancel_dirty(&edit);
        }
        self.emit(SessionEvent::CardResized(outcome.card));
        self.emit(SessionEvent::OverlaysInvalidated);
    }

    fn background_click(&mut self) {
        self.selection.deselect_all();
        self.emit(SessionEvent::BackgroundClick);
        self.emit(SessionEvent::SelectionChanged);
    }

    /// Zoom about the cursor. Returns true if the scene transform changed.
    pub fn wheel(&mut self, event: &WheelEvent) -> bool {
        profile_scope!("wheel");
        if !self.canvas.pan_zoom.wheel(event, &self.canvas.viewport) {
            return false;
        }
        self.emit(SessionEvent::SceneTransformChanged);
        true
    }

    /// Double click at a client position.
    ///
    /// On a card: select only that card, frame it and ask the view to open
    /// its editor. On empty canvas: insert a default-sized card centred on
    /// the pointer. Returns the affected card.
    pub fn double_click(&mut self, position: Vec2) -> Option<CardId> {
        if self.canvas.pan_zoom.locked || self.canvas.input_state.is_active() {
            return None;
        }
        let (point, _) = self.pointer_in_scene(position);

        if let Some(card) = self.canvas.index.topmost(point, &self.project.cards) {
            let id = card.id.clone();
            self.selection.deselect_all();
            self.selection.select_card(id.clone());
            self.emit(SessionEvent::SelectionChanged);
            self.center_selection();
            self.emit(SessionEvent::OpenEditor(id.clone()));
            return Some(id);
        }

        let extent = self.settings.grid.card_extent(CardSize::default());
        let corner = self.settings.grid.snap_point(point - extent * 0.5);
        Some(self.insert_card(corner, "new card :)"))
    }
}
