//! Geometry for the group and link shapes drawn behind the cards.
//!
//! Only the shapes are computed here; turning them into SVG or draw calls is
//! up to the renderer.

use serde::Serialize;

use crate::constants::{GROUP_BACKING_PADDING, GROUP_FLASH_PADDING, LINK_PADDING};
use crate::geometry::{Rect, Vec2};
use crate::grid::GridConfig;
use crate::types::{Group, GroupId, Link, LinkId, Project};

#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct GroupOverlay {
    pub group: GroupId,
    pub color: String,
    /// Coloured backing behind the member cards
    pub backing: Rect,
    /// Outer rect shown while the group is highlighted
    pub flash: Rect,
    pub highlighted: bool,
}

#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct LinkOverlay {
    pub link: LinkId,
    pub color: Option<String>,
    pub from: Vec2,
    pub to: Vec2,
    pub bounds: Rect,
}

pub fn group_overlay(
    project: &Project,
    group: &Group,
    grid: &GridConfig,
    highlighted: bool,
) -> GroupOverlay {
    let backing = grid
        .bound_cards(project.group_cards(group))
        .padded(GROUP_BACKING_PADDING);
    GroupOverlay {
        group: group.id.clone(),
        color: group.color.clone(),
        backing,
        flash: backing.padded(GROUP_FLASH_PADDING),
        highlighted,
    }
}

/// `None` if either end of the link is missing.
pub fn link_overlay(project: &Project, link: &Link, grid: &GridConfig) -> Option<LinkOverlay> {
    let a = project.card(&link.card_a)?;
    let b = project.card(&link.card_b)?;
    Some(LinkOverlay {
        link: link.id.clone(),
        color: link.color.clone(),
        from: grid.card_center(a),
        to: grid.card_center(b),
        bounds: grid.bound_cards([a, b]).padded(LINK_PADDING),
    })
}

/// Overlays for every group and link, in document order.
pub fn build_overlays(
    project: &Project,
    grid: &GridConfig,
    highlighted: Option<&GroupId>,
) -> (Vec<GroupOverlay>, Vec<LinkOverlay>) {
    let groups = project
        .groups
        .iter()
        .map(|group| group_overlay(project, group, grid, Some(&group.id) == highlighted))
        .collect();
    let links = project
        .links
        .iter()
        .filter_map(|link| link_overlay(project, link, grid))
        .collect();
    (groups, links)
}

/// Groups whose backing contains `point`, topmost (last drawn) first.
pub fn groups_at(project: &Project, grid: &GridConfig, point: Vec2) -> Vec<GroupId> {
    project
        .groups
        .iter()
        .rev()
        .filter(|group| group_overlay(project, group, grid, false).backing.contains_point(point))
        .map(|group| group.id.clone())
        .collect()
}
