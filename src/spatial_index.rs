//! Spatial Index Module
//!
//! R-tree over card bounds for hit testing on the board. Point queries are
//! O(log n) instead of a scan over every card.

use rstar::{AABB, RTree, RTreeObject};
use std::collections::{HashMap, HashSet};

use crate::geometry::{Rect, Vec2};
use crate::grid::GridConfig;
use crate::types::{Card, CardId};

/// A card's bounding box as stored in the tree.
#[derive(Debug, Clone)]
pub struct SpatialEntry {
    pub card: CardId,
    pub bounds: Rect,
}

impl SpatialEntry {
    pub fn new(card: CardId, bounds: Rect) -> Self {
        Self { card, bounds }
    }

    #[inline]
    pub fn contains_point(&self, point: Vec2) -> bool {
        self.bounds.contains_point(point)
    }
}

impl RTreeObject for SpatialEntry {
    type Envelope = AABB<[f64; 2]>;

    fn envelope(&self) -> Self::Envelope {
        AABB::from_corners(
            [self.bounds.x, self.bounds.y],
            [self.bounds.right(), self.bounds.bottom()],
        )
    }
}

impl PartialEq for SpatialEntry {
    fn eq(&self, other: &Self) -> bool {
        self.card == other.card
    }
}

/// Spatial index for board cards using an R-tree.
pub struct SpatialIndex {
    tree: RTree<SpatialEntry>,
    entries: HashMap<CardId, SpatialEntry>,
}

impl SpatialIndex {
    pub fn new() -> Self {
        Self {
            tree: RTree::new(),
            entries: HashMap::new(),
        }
    }

    /// Build a spatial index from the cards of a document.
    pub fn from_cards<'a, I>(cards: I, grid: &GridConfig) -> Self
    where
        I: IntoIterator<Item = &'a Card>,
    {
        let mut index = Self::new();
        index.rebuild(cards, grid);
        index
    }

    pub fn insert(&mut self, card: CardId, bounds: Rect) {
        if let Some(old_entry) = self.entries.remove(&card) {
            self.tree.remove(&old_entry);
        }

        let entry = SpatialEntry::new(card.clone(), bounds);
        self.tree.insert(entry.clone());
        self.entries.insert(card, entry);
    }

    /// Re-index one card at its current bounds.
    pub fn update_card(&mut self, card: &Card, grid: &GridConfig) {
        self.insert(card.id.clone(), grid.card_bounds(card));
    }

    pub fn remove(&mut self, card: &CardId) -> bool {
        if let Some(entry) = self.entries.remove(card) {
            self.tree.remove(&entry);
            true
        } else {
            false
        }
    }

    /// All cards whose bounds contain `point` (scene space), in no
    /// particular order.
    pub fn query_point(&self, point: Vec2) -> Vec<CardId> {
        let point_envelope = AABB::from_point([point.x, point.y]);

        self.tree
            .locate_in_envelope_intersecting(&point_envelope)
            .filter(|entry| entry.contains_point(point))
            .map(|entry| entry.card.clone())
            .collect()
    }

    /// All cards that intersect a rectangular region.
    pub fn query_rect(&self, rect: &Rect) -> Vec<CardId> {
        let envelope = AABB::from_corners([rect.x, rect.y], [rect.right(), rect.bottom()]);

        self.tree
            .locate_in_envelope_intersecting(&envelope)
            .map(|entry| entry.card.clone())
            .collect()
    }

    /// The card drawn on top at `point`: the last one in document order.
    pub fn topmost<'a>(&self, point: Vec2, cards: &'a [Card]) -> Option<&'a Card> {
        let hits: HashSet<CardId> = self.query_point(point).into_iter().collect();
        if hits.is_empty() {
            return None;
        }
        cards.iter().rev().find(|card| hits.contains(&card.id))
    }

    pub fn bounds(&self, card: &CardId) -> Option<Rect> {
        self.entries.get(card).map(|entry| entry.bounds)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn rebuild<'a, I>(&mut self, cards: I, grid: &GridConfig)
    where
        I: IntoIterator<Item = &'a Card>,
    {
        let entries: Vec<SpatialEntry> = cards
            .into_iter()
            .map(|card| SpatialEntry::new(card.id.clone(), grid.card_bounds(card)))
            .collect();

        self.entries = entries.iter().map(|e| (e.card.clone(), e.clone())).collect();
        self.tree = RTree::bulk_load(entries);
    }

    pub fn clear(&mut self) {
        self.tree = RTree::new();
        self.entries.clear();
    }
}

impl Default for SpatialIndex {
    fn default() -> Self {
        Self::new()
    }
}
