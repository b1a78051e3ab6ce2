//! Session lifecycle - construction, reset, undo/redo and document reloads.

use tracing::{debug, info};

use super::{CanvasState, EditorSession, SessionEvent, TransitionState};
use crate::history::HistoryManager;
use crate::input::{DragController, InputState, PanZoomController, ResizeController, Viewport};
use crate::overlay::{GroupOverlay, LinkOverlay, build_overlays};
use crate::selection::SelectionState;
use crate::settings::EditorSettings;
use crate::spatial_index::SpatialIndex;
use crate::types::Project;

impl EditorSession {
    pub fn new(project: Project) -> Self {
        Self::with_settings(project, EditorSettings::default())
    }

    pub fn with_settings(mut project: Project, settings: EditorSettings) -> Self {
        let settings = settings.sanitized();
        project.repair();

        let mut pan_zoom = PanZoomController::new(settings.zoom_limits())
            .with_click_limit(settings.click_movement_limit);
        pan_zoom.wheel = settings.wheel_zoom();

        let index = SpatialIndex::from_cards(&project.cards, &settings.grid);
        let history = HistoryManager::with_depth(&project, settings.history_depth);
        info!(
            project = %project.details.id,
            cards = project.cards.len(),
            "editor session opened"
        );

        Self {
            canvas: CanvasState {
                pan_zoom,
                drag: DragController::new().with_click_limit(settings.click_movement_limit),
                resize: ResizeController::new(),
                input_state: InputState::default(),
                index,
                viewport: Viewport::default(),
            },
            project,
            history,
            selection: SelectionState::new(),
            settings,
            transitions: TransitionState::default(),
            events: Vec::new(),
        }
    }

    /// Replace the document and start a fresh history for it.
    pub fn reset(&mut self, project: Project) {
        self.cancel_gestures();
        self.project = project;
        self.selection = SelectionState::new();
        self.reload();
        self.history.reset(&self.project);
        info!(project = %self.project.details.id, "session reset");
    }

    pub fn undo(&mut self) -> bool {
        self.cancel_gestures();
        if !self.history.undo(&mut self.project) {
            return false;
        }
        self.reload();
        true
    }

    pub fn redo(&mut self) -> bool {
        self.cancel_gestures();
        if !self.history.redo(&mut self.project) {
            return false;
        }
        self.reload();
        true
    }

    /// Abort every in-flight gesture without committing anything.
    ///
    /// Cards moved by an aborted drag are put back, and a pending drag or
    /// resize edit is dropped from the history.
    pub fn cancel_gestures(&mut self) {
        for session in self.canvas.drag.sessions().to_vec() {
            if let Some(card) = self.project.card_mut(&session.card) {
                card.position = session.start;
            }
        }
        if let Some(session) = self.canvas.resize.session().cloned() {
            if let Some(card) = self.project.card_mut(&session.card) {
                card.size = session.start_size;
            }
        }
        let aborted = self.canvas.drag.is_active() || self.canvas.resize.is_active();
        self.canvas.drag.cancel();
        self.canvas.resize.cancel();
        self.canvas.pan_zoom.cancel();
        self.canvas.input_state.reset();

        if aborted {
            if let Some(edit) = self.history.dirty().cloned() {
                self.history.cancel_dirty(&edit);
            }
            self.canvas.index.rebuild(&self.project.cards, &self.settings.grid);
            debug!("in-flight gesture aborted");
        }
    }

    /// Re-derive every view of the document after it was replaced wholesale.
    pub(crate) fn reload(&mut self) {
        let repaired = self.project.repair();
        if repaired > 0 {
            debug!(repaired, "dropped dangling links and groups");
        }
        self.canvas.index.rebuild(&self.project.cards, &self.settings.grid);
        self.selection.retain_existing(&self.project);
        self.transitions.clear();
        self.emit(SessionEvent::Reloaded);
        self.emit(SessionEvent::OverlaysInvalidated);
        self.emit(SessionEvent::SelectionChanged);
    }

    /// Group and link shapes for the current document.
    pub fn overlays(&self) -> (Vec<GroupOverlay>, Vec<LinkOverlay>) {
        build_overlays(
            &self.project,
            &self.settings.grid,
            self.selection.highlighted_group(),
        )
    }
}
