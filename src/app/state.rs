//! Editor session state - the `EditorSession` struct and its sub-structs.

use crate::geometry::{Transform2D, Vec2};
use crate::grid::GridConfig;
use crate::history::HistoryManager;
use crate::input::{
    DragController, InputState, PanZoomController, ResizeController, SnapAnimation, Viewport,
};
use crate::selection::SelectionState;
use crate::settings::EditorSettings;
use crate::spatial_index::SpatialIndex;
use crate::types::{CardId, Project};

/// Notifications for the view layer, drained with
/// [`EditorSession::drain_events`].
#[derive(Clone, Debug, PartialEq)]
pub enum SessionEvent {
    SceneTransformChanged,
    /// Cards whose position changed (live drag or committed move)
    CardsMoved(Vec<CardId>),
    CardResized(CardId),
    /// Cards, groups, links or styles were added, removed or edited
    DocumentChanged,
    /// Group and link shapes need recomputing
    OverlaysInvalidated,
    SelectionChanged,
    /// The whole document was replaced (undo, redo, load)
    Reloaded,
    OpenEditor(CardId),
    BackgroundClick,
}

/// Controllers and indexes tied to the canvas.
pub struct CanvasState {
    pub pan_zoom: PanZoomController,
    pub drag: DragController,
    pub resize: ResizeController,
    pub input_state: InputState,
    pub index: SpatialIndex,
    pub viewport: Viewport,
}

/// In-flight visual transitions after a release.
#[derive(Default)]
pub struct TransitionState {
    /// Card positions easing from where they were dropped to their cell
    pub positions: Vec<SnapAnimation>,
    /// Card extents easing from the dragged size to the snapped size
    pub sizes: Vec<SnapAnimation>,
}

impl TransitionState {
    pub fn is_empty(&self) -> bool {
        self.positions.is_empty() && self.sizes.is_empty()
    }

    pub fn clear(&mut self) {
        self.positions.clear();
        self.sizes.clear();
    }

    /// Replace any running animation for the same card.
    pub fn push_position(&mut self, animation: SnapAnimation) {
        self.positions.retain(|a| a.card != animation.card);
        self.positions.push(animation);
    }

    pub fn push_size(&mut self, animation: SnapAnimation) {
        self.sizes.retain(|a| a.card != animation.card);
        self.sizes.push(animation);
    }

    /// Advance every animation; returns true if any is still running.
    pub fn advance(&mut self, dt: f64) -> bool {
        self.positions.retain_mut(|a| !a.advance(dt));
        self.sizes.retain_mut(|a| !a.advance(dt));
        !self.is_empty()
    }
}

/// One editing session over a single project.
///
/// Owns the live document, its undo history, the selection and every
/// in-progress gesture. All mutation goes through its methods.
pub struct EditorSession {
    pub(crate) project: Project,
    pub(crate) history: HistoryManager<Project>,
    pub(crate) selection: SelectionState,
    pub(crate) settings: EditorSettings,
    pub(crate) canvas: CanvasState,
    pub(crate) transitions: TransitionState,
    pub(crate) events: Vec<SessionEvent>,
}

impl EditorSession {
    pub fn project(&self) -> &Project {
        &self.project
    }

    pub fn selection(&self) -> &crate::selection::SelectionState {
        &self.selection
    }

    pub fn history(&self) -> &HistoryManager<Project> {
        &self.history
    }

    pub fn settings(&self) -> &EditorSettings {
        &self.settings
    }

    pub fn grid(&self) -> &GridConfig {
        &self.settings.grid
    }

    pub fn scene_transform(&self) -> &Transform2D {
        self.canvas.pan_zoom.transform()
    }

    pub fn pan_zoom(&self) -> &PanZoomController {
        &self.canvas.pan_zoom
    }

    pub fn input_state(&self) -> &InputState {
        &self.canvas.input_state
    }

    pub fn viewport(&self) -> &Viewport {
        &self.canvas.viewport
    }

    pub fn set_viewport(&mut self, viewport: Viewport) {
        self.canvas.viewport = viewport;
    }

    pub fn is_locked(&self) -> bool {
        self.canvas.pan_zoom.locked
    }

    pub fn can_undo(&self) -> bool {
        self.history.can_undo()
    }

    pub fn can_redo(&self) -> bool {
        self.history.can_redo()
    }

    /// Target shadow positions of an active drag, per card.
    pub fn drag_targets(&self) -> Vec<(CardId, Vec2)> {
        self.canvas
            .drag
            .sessions()
            .iter()
            .map(|session| (session.card.clone(), session.target))
            .collect()
    }

    /// Where the renderer should draw `card` right now: mid-animation
    /// positions included.
    pub fn visual_position(&self, card: &CardId) -> Option<Vec2> {
        if let Some(animation) = self.transitions.positions.iter().find(|a| &a.card == card) {
            return Some(animation.position());
        }
        self.project.card(card).map(|card| card.position)
    }

    /// Pixel extent to draw `card` at, mid-animation extents included.
    pub fn visual_extent(&self, card: &CardId) -> Option<Vec2> {
        if let Some(animation) = self.transitions.sizes.iter().find(|a| &a.card == card) {
            return Some(animation.position());
        }
        if let Some(session) = self.canvas.resize.session().filter(|s| &s.card == card) {
            return Some(session.live_extent);
        }
        self.project
            .card(card)
            .map(|card| self.settings.grid.card_extent(card.size))
    }

    pub fn is_animating(&self) -> bool {
        self.canvas.pan_zoom.is_animating() || !self.transitions.is_empty()
    }

    pub(crate) fn emit(&mut self, event: SessionEvent) {
        self.events.push(event);
    }

    /// Take every notification queued since the last call.
    pub fn drain_events(&mut self) -> Vec<SessionEvent> {
        std::mem::take(&mut self.events)
    }
}
