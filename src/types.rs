//! Core document types for the board.
//!
//! A [`Project`] is the unit the undo history snapshots and the store
//! persists: cards, the groups and links drawn between them, and the styles
//! the cards reference. Serialised field names stay camelCase so saved
//! projects remain readable by older players.

use crate::geometry::Vec2;
use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, HashSet};
use std::fmt;

macro_rules! id_type {
    ($(#[$meta:meta])* $name:ident) => {
        $(#[$meta])*
        #[derive(Clone, Debug, Default, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
        #[serde(transparent)]
        pub struct $name(pub String);

        impl $name {
            /// Fresh random id.
            pub fn generate() -> Self {
                Self(uuid::Uuid::new_v4().to_string())
            }

            pub fn as_str(&self) -> &str {
                &self.0
            }
        }

        impl From<&str> for $name {
            fn from(value: &str) -> Self {
                Self(value.to_string())
            }
        }

        impl From<String> for $name {
            fn from(value: String) -> Self {
                Self(value)
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.write_str(&self.0)
            }
        }
    };
}

id_type!(
    /// Identifies a card within a project.
    CardId
);
id_type!(GroupId);
id_type!(LinkId);
id_type!(StyleId);

// ============================================================================
// Cards
// ============================================================================

/// Card footprint in grid cells.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct CardSize {
    pub x: u32,
    pub y: u32,
}

impl Default for CardSize {
    fn default() -> Self {
        let (x, y) = crate::constants::DEFAULT_CARD_CELLS;
        Self { x, y }
    }
}

#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct CardIcon {
    pub icon: String,
    pub action: String,
}

/// A rectangular card placed on the board.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Card {
    pub id: CardId,
    /// Top-left corner in scene coordinates
    pub position: Vec2,
    pub size: CardSize,
    pub text: String,
    #[serde(default)]
    pub icons: Vec<CardIcon>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub style: Option<StyleId>,
    /// Image as a data URL
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub image: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub alttext: Option<String>,
}

impl Card {
    pub fn new(position: Vec2, text: impl Into<String>) -> Self {
        Self {
            id: CardId::generate(),
            position,
            size: CardSize::default(),
            text: text.into(),
            icons: Vec::new(),
            style: None,
            image: None,
            alttext: None,
        }
    }

    pub fn with_id(mut self, id: impl Into<CardId>) -> Self {
        self.id = id.into();
        self
    }

    pub fn with_size(mut self, x: u32, y: u32) -> Self {
        self.size = CardSize { x, y };
        self
    }
}

// ============================================================================
// Groups, links, styles
// ============================================================================

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Group {
    pub id: GroupId,
    pub cards: Vec<CardId>,
    pub color: String,
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Link {
    pub id: LinkId,
    pub card_a: CardId,
    pub card_b: CardId,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub color: Option<String>,
}

/// Named set of CSS-like properties a card can opt into.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct CardStyle {
    pub id: StyleId,
    pub name: String,
    #[serde(default)]
    pub properties: BTreeMap<String, String>,
}

#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct BoardStyle {
    #[serde(default)]
    pub properties: BTreeMap<String, String>,
}

// ============================================================================
// Project
// ============================================================================

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct ProjectDetails {
    pub id: String,
    pub title: String,
    pub name: String,
    #[serde(default)]
    pub focus: String,
}

impl Default for ProjectDetails {
    fn default() -> Self {
        Self {
            id: uuid::Uuid::new_v4().to_string(),
            title: "new project".to_string(),
            name: "project".to_string(),
            focus: String::new(),
        }
    }
}

/// The whole editable document.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Project {
    pub details: ProjectDetails,
    #[serde(default)]
    pub cards: Vec<Card>,
    #[serde(default)]
    pub groups: Vec<Group>,
    #[serde(default)]
    pub links: Vec<Link>,
    #[serde(default)]
    pub card_styles: Vec<CardStyle>,
    #[serde(default)]
    pub board_style: BoardStyle,
}

impl Project {
    /// Empty project that keeps the styles of `template`.
    pub fn blank_from(template: &Project) -> Self {
        Self {
            details: ProjectDetails::default(),
            cards: Vec::new(),
            groups: Vec::new(),
            links: Vec::new(),
            card_styles: template.card_styles.clone(),
            board_style: template.board_style.clone(),
        }
    }

    pub fn card(&self, id: &CardId) -> Option<&Card> {
        self.cards.iter().find(|card| &card.id == id)
    }

    pub fn card_mut(&mut self, id: &CardId) -> Option<&mut Card> {
        self.cards.iter_mut().find(|card| &card.id == id)
    }

    pub fn group(&self, id: &GroupId) -> Option<&Group> {
        self.groups.iter().find(|group| &group.id == id)
    }

    pub fn group_mut(&mut self, id: &GroupId) -> Option<&mut Group> {
        self.groups.iter_mut().find(|group| &group.id == id)
    }

    /// Member cards of `group` in document order.
    pub fn group_cards<'a>(&'a self, group: &Group) -> impl Iterator<Item = &'a Card> + use<'a> {
        let members: HashSet<CardId> = group.cards.iter().cloned().collect();
        self.cards.iter().filter(move |card| members.contains(&card.id))
    }

    /// Remove a card along with its group memberships and links.
    pub fn remove_card(&mut self, id: &CardId) -> Option<Card> {
        let index = self.cards.iter().position(|card| &card.id == id)?;
        let card = self.cards.remove(index);
        for group in &mut self.groups {
            group.cards.retain(|member| member != id);
        }
        self.links.retain(|link| &link.card_a != id && &link.card_b != id);
        Some(card)
    }

    /// Drop links and groups that reference cards which no longer exist.
    ///
    /// Returns the number of removed links and groups.
    pub fn repair(&mut self) -> usize {
        let ids: HashSet<&CardId> = self.cards.iter().map(|card| &card.id).collect();
        let before = self.links.len() + self.groups.len();
        self.links
            .retain(|link| ids.contains(&link.card_a) && ids.contains(&link.card_b));
        self.groups
            .retain(|group| group.cards.iter().all(|member| ids.contains(member)));
        before - (self.links.len() + self.groups.len())
    }
}
