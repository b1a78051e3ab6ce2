//! Board grid: snapping and card extents.
//!
//! Cards land on a half-cell grid. A card `n` cells wide spans `n` snap steps
//! minus one gap, so neighbouring cards never touch.

use crate::constants::{CELL_GAP, CELL_HEIGHT, CELL_WIDTH};
use crate::geometry::{Rect, Transform2D, Vec2};
use crate::types::{Card, CardSize};
use serde::{Deserialize, Serialize};

/// Round `value` to the nearest multiple of `cell`.
#[inline]
pub fn snap(value: f64, cell: f64) -> f64 {
    (value / cell).round() * cell
}

/// Extent of `cells` units of `unit` separated by `gap`.
#[inline]
pub fn grid_size(cells: u32, unit: f64, gap: f64) -> f64 {
    unit + f64::from(cells.saturating_sub(1)) * (unit + gap)
}

/// Smallest cell count whose extent reaches `extent - gap`.
pub fn fit_cells(extent: f64, unit: f64, gap: f64) -> u32 {
    let cells = ((extent - gap - unit) / (unit + gap)).ceil() + 1.0;
    if cells.is_nan() || cells < 1.0 {
        return 1;
    }
    // Saturates at u32::MAX.
    cells as u32
}

#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct GridConfig {
    pub cell_width: f64,
    pub cell_height: f64,
    pub cell_gap: f64,
}

impl Default for GridConfig {
    fn default() -> Self {
        Self {
            cell_width: CELL_WIDTH,
            cell_height: CELL_HEIGHT,
            cell_gap: CELL_GAP,
        }
    }
}

impl GridConfig {
    /// Snap resolution: half a cell on each axis.
    pub fn snap_step(&self) -> Vec2 {
        Vec2::new(self.cell_width / 2.0, self.cell_height / 2.0)
    }

    /// Extent of a single card cell (one snap step minus the gap).
    pub fn unit(&self) -> Vec2 {
        let step = self.snap_step();
        Vec2::new(step.x - self.cell_gap, step.y - self.cell_gap)
    }

    pub fn snap_point(&self, point: Vec2) -> Vec2 {
        let step = self.snap_step();
        Vec2::new(snap(point.x, step.x), snap(point.y, step.y))
    }

    /// Snap only the translation of `transform`.
    pub fn snap_transform(&self, transform: &Transform2D) -> Transform2D {
        transform.with_translation(self.snap_point(transform.translation_of()))
    }

    pub fn card_extent(&self, size: CardSize) -> Vec2 {
        let unit = self.unit();
        Vec2::new(
            grid_size(size.x, unit.x, self.cell_gap),
            grid_size(size.y, unit.y, self.cell_gap),
        )
    }

    /// Cell count fitting a free-form pixel extent, per axis.
    pub fn fit_extent(&self, extent: Vec2) -> CardSize {
        let unit = self.unit();
        CardSize {
            x: fit_cells(extent.x, unit.x, self.cell_gap),
            y: fit_cells(extent.y, unit.y, self.cell_gap),
        }
    }

    pub fn card_bounds(&self, card: &Card) -> Rect {
        Rect::from_origin_size(card.position, self.card_extent(card.size))
    }

    pub fn card_center(&self, card: &Card) -> Vec2 {
        self.card_bounds(card).center()
    }

    pub fn bound_cards<'a, I>(&self, cards: I) -> Rect
    where
        I: IntoIterator<Item = &'a Card>,
    {
        let rects: Vec<Rect> = cards.into_iter().map(|card| self.card_bounds(card)).collect();
        Rect::bound(&rects, Rect::default())
    }
}
