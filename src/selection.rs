//! Selection of cards and groups, and the pending link source.
//!
//! Selection is view state: it is not snapshotted by the history and is
//! pruned against the document after every reload.

use std::collections::HashSet;

use crate::types::{CardId, GroupId, Project};

/// What a card click should do, given the current selection.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum ToggleAction {
    /// Linking mode was active: link `from` to the clicked card
    CreateLink { from: CardId, to: CardId },
    /// A group is highlighted: add or remove the card from it
    ToggleGroupMember { group: GroupId, card: CardId },
    Selected(CardId),
    Deselected(CardId),
}

#[derive(Clone, Debug, Default, PartialEq)]
pub struct SelectionState {
    cards: Vec<CardId>,
    /// First entry is the highlighted group
    groups: Vec<GroupId>,
    linking: Option<CardId>,
}

impl SelectionState {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn cards(&self) -> &[CardId] {
        &self.cards
    }

    pub fn groups(&self) -> &[GroupId] {
        &self.groups
    }

    pub fn highlighted_group(&self) -> Option<&GroupId> {
        self.groups.first()
    }

    pub fn linking(&self) -> Option<&CardId> {
        self.linking.as_ref()
    }

    pub fn is_selected(&self, card: &CardId) -> bool {
        self.cards.contains(card)
    }

    pub fn is_empty(&self) -> bool {
        self.cards.is_empty() && self.groups.is_empty()
    }

    /// Add `card` to the selection. Selecting a card drops any group
    /// selection.
    pub fn select_card(&mut self, card: CardId) {
        if !self.cards.contains(&card) {
            self.cards.push(card);
        }
        self.groups.clear();
    }

    pub fn deselect_card(&mut self, card: &CardId) {
        self.cards.retain(|c| c != card);
    }

    pub fn deselect_cards(&mut self) {
        self.cards.clear();
    }

    pub fn deselect_groups(&mut self) {
        self.groups.clear();
    }

    pub fn deselect_all(&mut self) {
        self.cards.clear();
        self.groups.clear();
    }

    /// Resolve a click on `card`.
    ///
    /// Only the selection itself is updated here; link creation and group
    /// membership are document edits the caller performs.
    pub fn toggle_card(&mut self, card: CardId) -> ToggleAction {
        if let Some(from) = self.linking.take() {
            return ToggleAction::CreateLink { from, to: card };
        }
        if let Some(group) = self.groups.first() {
            return ToggleAction::ToggleGroupMember {
                group: group.clone(),
                card,
            };
        }
        if self.is_selected(&card) {
            self.deselect_card(&card);
            ToggleAction::Deselected(card)
        } else {
            self.select_card(card.clone());
            ToggleAction::Selected(card)
        }
    }

    /// Enter linking mode from the single selected card.
    ///
    /// Returns false unless exactly one card is selected.
    pub fn begin_link(&mut self) -> bool {
        match self.cards.as_slice() {
            [only] => {
                self.linking = Some(only.clone());
                true
            }
            _ => false,
        }
    }

    pub fn cancel_link(&mut self) {
        self.linking = None;
    }

    /// Select `groups`. Selecting exactly the set that is already selected
    /// cycles the highlight instead.
    pub fn select_groups(&mut self, groups: Vec<GroupId>) {
        if groups.is_empty() {
            return;
        }
        let current: HashSet<&GroupId> = self.groups.iter().collect();
        let requested: HashSet<&GroupId> = groups.iter().collect();
        if current == requested && requested.len() == groups.len() {
            self.cycle_group();
            return;
        }

        let previous = self.groups.first().cloned();
        self.cards.clear();
        self.groups = groups;
        if previous.as_ref() == self.groups.first() {
            self.cycle_group();
        }
    }

    /// Move the highlight to the next selected group.
    pub fn cycle_group(&mut self) {
        if !self.groups.is_empty() {
            self.groups.rotate_left(1);
        }
    }

    pub fn forget_group(&mut self, group: &GroupId) {
        self.groups.retain(|g| g != group);
    }

    /// Cards painted as selected: members of the highlighted group, or the
    /// selected cards.
    pub fn active_cards(&self, project: &Project) -> Vec<CardId> {
        match self.highlighted_group().and_then(|id| project.group(id)) {
            Some(group) => project.group_cards(group).map(|card| card.id.clone()).collect(),
            None => self.cards.clone(),
        }
    }

    /// Drop ids that no longer exist in `project`.
    pub fn retain_existing(&mut self, project: &Project) {
        let cards: HashSet<&CardId> = project.cards.iter().map(|card| &card.id).collect();
        self.cards.retain(|id| cards.contains(id));
        self.groups.retain(|id| project.group(id).is_some());
        if self.linking.as_ref().is_some_and(|id| !cards.contains(id)) {
            self.linking = None;
        }
    }
}
