//! Document edits.
//!
//! Discrete edits take a history checkpoint right before mutating. Edits
//! driven by continuous input (typing, live colour picking) mark a pending
//! edit instead and are committed by [`EditorSession::confirm_pending_edit`].

use rand::Rng;
use tracing::{debug, info};

use super::{EditorSession, SessionEvent};
use crate::geometry::Vec2;
use crate::history::PendingEdit;
use crate::selection::ToggleAction;
use crate::types::{Card, CardIcon, CardId, CardStyle, Group, GroupId, Link, LinkId, StyleId};

/// Random opaque colour in the space-separated `rgb()` syntax.
pub(crate) fn random_color() -> String {
    let mut rng = rand::thread_rng();
    format!(
        "rgb({} {} {})",
        rng.gen_range(0..=255u8),
        rng.gen_range(0..=255u8),
        rng.gen_range(0..=255u8)
    )
}

impl EditorSession {
    // ==================== Cards ====================

    /// Insert a default-sized card with its top-left corner at `position`.
    pub fn insert_card(&mut self, position: Vec2, text: impl Into<String>) -> CardId {
        self.add_card(Card::new(position, text))
    }

    pub fn add_card(&mut self, card: Card) -> CardId {
        self.history.make_checkpoint(&self.project);
        let id = card.id.clone();
        self.canvas.index.update_card(&card, &self.settings.grid);
        self.project.cards.push(card);
        info!(card = %id, "card inserted");
        self.emit(SessionEvent::DocumentChanged);
        id
    }

    /// Delete every selected card along with its links and group
    /// memberships. Returns the number of deleted cards.
    pub fn delete_selected(&mut self) -> usize {
        let ids = self.selection.cards().to_vec();
        if ids.is_empty() {
            return 0;
        }
        self.history.make_checkpoint(&self.project);
        for id in &ids {
            self.project.remove_card(id);
            self.canvas.index.remove(id);
            self.selection.deselect_card(id);
        }
        info!(count = ids.len(), "cards deleted");
        self.emit(SessionEvent::DocumentChanged);
        self.emit(SessionEvent::OverlaysInvalidated);
        self.emit(SessionEvent::SelectionChanged);
        ids.len()
    }

    /// Live text editing; consecutive calls for the same card coalesce into
    /// one undo step.
    pub fn set_card_text(&mut self, card: &CardId, text: impl Into<String>) -> bool {
        if self.project.card(card).is_none() {
            return false;
        }
        self.history
            .mark_dirty(PendingEdit::CardContent(card.clone()), &self.project);
        if let Some(target) = self.project.card_mut(card) {
            target.text = text.into();
        }
        self.emit(SessionEvent::DocumentChanged);
        true
    }

    pub fn set_card_icons(&mut self, card: &CardId, icons: Vec<CardIcon>) -> bool {
        if self.project.card(card).is_none() {
            return false;
        }
        self.history
            .mark_dirty(PendingEdit::CardContent(card.clone()), &self.project);
        if let Some(target) = self.project.card_mut(card) {
            target.icons = icons;
        }
        self.emit(SessionEvent::DocumentChanged);
        true
    }

    /// Point a card at a style, or back to the board default with `None`.
    pub fn set_card_style(&mut self, card: &CardId, style: Option<StyleId>) -> bool {
        let known = style
            .as_ref()
            .is_none_or(|id| self.project.card_styles.iter().any(|s| &s.id == id));
        let Some(current) = self.project.card(card) else {
            return false;
        };
        if !known || current.style == style {
            return false;
        }
        self.history.make_checkpoint(&self.project);
        if let Some(target) = self.project.card_mut(card) {
            target.style = style;
        }
        self.emit(SessionEvent::DocumentChanged);
        true
    }

    /// Live edit of one property of a card style.
    pub fn set_style_property(
        &mut self,
        style: &StyleId,
        key: impl Into<String>,
        value: impl Into<String>,
    ) -> bool {
        if !self.project.card_styles.iter().any(|s| &s.id == style) {
            return false;
        }
        self.history
            .mark_dirty(PendingEdit::CardStyleProperties(style.clone()), &self.project);
        if let Some(target) = self.project.card_styles.iter_mut().find(|s| &s.id == style) {
            target.properties.insert(key.into(), value.into());
        }
        self.emit(SessionEvent::DocumentChanged);
        true
    }

    pub fn add_card_style(&mut self, name: impl Into<String>) -> StyleId {
        self.history.make_checkpoint(&self.project);
        let style = CardStyle {
            id: StyleId::generate(),
            name: name.into(),
            properties: Default::default(),
        };
        let id = style.id.clone();
        self.project.card_styles.push(style);
        self.emit(SessionEvent::DocumentChanged);
        id
    }

    /// Copy a style under a fresh id, named "<name> (copy)".
    pub fn duplicate_card_style(&mut self, style: &StyleId) -> Option<StyleId> {
        let mut copy = self
            .project
            .card_styles
            .iter()
            .find(|s| &s.id == style)?
            .clone();
        self.history.make_checkpoint(&self.project);
        copy.id = StyleId::generate();
        copy.name.push_str(" (copy)");
        let id = copy.id.clone();
        self.project.card_styles.push(copy);
        self.emit(SessionEvent::DocumentChanged);
        Some(id)
    }

    /// Delete a style and detach the cards using it. The last remaining
    /// style cannot be deleted.
    pub fn delete_card_style(&mut self, style: &StyleId) -> bool {
        let exists = self.project.card_styles.iter().any(|s| &s.id == style);
        if !exists || self.project.card_styles.len() <= 1 {
            return false;
        }
        self.history.make_checkpoint(&self.project);
        self.project.card_styles.retain(|s| &s.id != style);
        for card in &mut self.project.cards {
            if card.style.as_ref() == Some(style) {
                card.style = None;
            }
        }
        self.emit(SessionEvent::DocumentChanged);
        true
    }

    /// Commit whatever continuous edit is pending as one undo step.
    pub fn confirm_pending_edit(&mut self) -> bool {
        match self.history.dirty().cloned() {
            Some(edit) => self.history.confirm_dirty(&edit),
            None => false,
        }
    }

    // ==================== Selection ====================

    /// Resolve a click on `card`: link it, toggle its group membership or
    /// toggle its selection.
    pub fn toggle_card(&mut self, card: CardId) -> ToggleAction {
        let action = self.selection.toggle_card(card);
        match &action {
            ToggleAction::CreateLink { from, to } => {
                self.create_link(from.clone(), to.clone());
            }
            ToggleAction::ToggleGroupMember { group, card } => {
                self.toggle_group_member(group, card);
            }
            ToggleAction::Selected(_) | ToggleAction::Deselected(_) => {}
        }
        self.emit(SessionEvent::SelectionChanged);
        action
    }

    pub fn select_card(&mut self, card: CardId) {
        self.selection.select_card(card);
        self.emit(SessionEvent::SelectionChanged);
    }

    pub fn deselect_all(&mut self) {
        self.selection.deselect_all();
        self.emit(SessionEvent::SelectionChanged);
    }

    pub fn select_groups(&mut self, groups: Vec<GroupId>) {
        self.selection.select_groups(groups);
        self.emit(SessionEvent::SelectionChanged);
        self.emit(SessionEvent::OverlaysInvalidated);
    }

    /// Replace the group selection with the highlighted group's cards.
    pub fn select_group_cards(&mut self) -> bool {
        let Some(group) = self
            .selection
            .highlighted_group()
            .and_then(|id| self.project.group(id))
        else {
            return false;
        };
        let cards: Vec<CardId> = self
            .project
            .group_cards(group)
            .map(|card| card.id.clone())
            .collect();
        for card in cards {
            self.selection.select_card(card);
        }
        self.selection.deselect_groups();
        self.emit(SessionEvent::SelectionChanged);
        self.emit(SessionEvent::OverlaysInvalidated);
        true
    }

    // ==================== Groups ====================

    /// Group the selected cards under a random colour and highlight the new
    /// group.
    pub fn group_selection(&mut self) -> Option<GroupId> {
        let cards = self.selection.cards().to_vec();
        if cards.is_empty() {
            return None;
        }
        self.history.make_checkpoint(&self.project);
        let group = Group {
            id: GroupId::generate(),
            cards,
            color: random_color(),
        };
        let id = group.id.clone();
        info!(group = %id, members = group.cards.len(), "group created");
        self.project.groups.push(group);
        self.selection.select_groups(vec![id.clone()]);
        self.emit(SessionEvent::DocumentChanged);
        self.emit(SessionEvent::OverlaysInvalidated);
        self.emit(SessionEvent::SelectionChanged);
        Some(id)
    }

    /// Give the highlighted group a new random colour.
    pub fn recolor_group(&mut self) -> Option<String> {
        let id = self.selection.highlighted_group()?.clone();
        self.project.group(&id)?;
        self.history.make_checkpoint(&self.project);
        let color = random_color();
        if let Some(group) = self.project.group_mut(&id) {
            group.color = color.clone();
        }
        self.emit(SessionEvent::DocumentChanged);
        self.emit(SessionEvent::OverlaysInvalidated);
        Some(color)
    }

    /// Live colour picking; repeated calls for one group coalesce.
    pub fn set_group_color(&mut self, group: &GroupId, color: impl Into<String>) -> bool {
        if self.project.group(group).is_none() {
            return false;
        }
        self.history
            .mark_dirty(PendingEdit::GroupColor(group.clone()), &self.project);
        if let Some(target) = self.project.group_mut(group) {
            target.color = color.into();
        }
        self.emit(SessionEvent::OverlaysInvalidated);
        true
    }

    /// Delete the highlighted group (its cards stay) and clear the group
    /// selection.
    pub fn delete_group(&mut self) -> Option<GroupId> {
        let id = self.selection.highlighted_group()?.clone();
        self.project.group(&id)?;
        self.history.make_checkpoint(&self.project);
        self.project.groups.retain(|group| group.id != id);
        self.selection.deselect_groups();
        info!(group = %id, "group deleted");
        self.emit(SessionEvent::DocumentChanged);
        self.emit(SessionEvent::OverlaysInvalidated);
        self.emit(SessionEvent::SelectionChanged);
        Some(id)
    }

    fn toggle_group_member(&mut self, group: &GroupId, card: &CardId) {
        if self.project.group(group).is_none() {
            return;
        }
        self.history.make_checkpoint(&self.project);
        if let Some(target) = self.project.group_mut(group) {
            if let Some(index) = target.cards.iter().position(|member| member == card) {
                target.cards.remove(index);
                debug!(%group, %card, "card left group");
            } else {
                target.cards.push(card.clone());
                debug!(%group, %card, "card joined group");
            }
        }
        self.emit(SessionEvent::DocumentChanged);
        self.emit(SessionEvent::OverlaysInvalidated);
    }

    // ==================== Links ====================

    /// Enter linking mode; the next card click links to the selected card.
    pub fn begin_link(&mut self) -> bool {
        self.selection.begin_link()
    }

    pub fn cancel_link(&mut self) {
        self.selection.cancel_link();
    }

    /// Link two distinct existing cards.
    pub fn create_link(&mut self, card_a: CardId, card_b: CardId) -> Option<LinkId> {
        if card_a == card_b || self.project.card(&card_a).is_none() || self.project.card(&card_b).is_none() {
            return None;
        }
        self.history.make_checkpoint(&self.project);
        let link = Link {
            id: LinkId::generate(),
            card_a,
            card_b,
            color: None,
        };
        let id = link.id.clone();
        info!(link = %id, a = %link.card_a, b = %link.card_b, "link created");
        self.project.links.push(link);
        self.emit(SessionEvent::DocumentChanged);
        self.emit(SessionEvent::OverlaysInvalidated);
        Some(id)
    }
}
