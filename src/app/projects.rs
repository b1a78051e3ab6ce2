//! Project management - new, save, load, duplicate, delete, import/export.
//!
//! Saving never touches the undo history. Loading a project replaces the
//! document and starts a fresh history.

use tracing::info;

use super::EditorSession;
use crate::storage::{ProjectStore, SaveMetadata, StoreError, StoreResult, sort_newest_first};
use crate::types::Project;

impl EditorSession {
    /// Swap in an empty project that keeps the current styles.
    pub fn new_project(&mut self) {
        let blank = Project::blank_from(&self.project);
        self.reset(blank);
    }

    /// Save the live document under its own id.
    pub fn save(&self, store: &dyn ProjectStore) -> StoreResult<SaveMetadata> {
        store.save(&self.project)
    }

    pub fn load(&mut self, store: &dyn ProjectStore, id: &str) -> StoreResult<()> {
        let project = store
            .get(id)?
            .ok_or_else(|| StoreError::NotFound(id.to_string()))?;
        info!(id, title = %project.details.title, "project loaded");
        self.reset(project);
        Ok(())
    }

    /// Store a copy of save `id` under a fresh id, titled "<title> (copy)".
    pub fn duplicate(&self, store: &dyn ProjectStore, id: &str) -> StoreResult<SaveMetadata> {
        let mut project = store
            .get(id)?
            .ok_or_else(|| StoreError::NotFound(id.to_string()))?;
        project.details.id = uuid::Uuid::new_v4().to_string();
        project.details.title.push_str(" (copy)");
        info!(from = id, to = %project.details.id, "project duplicated");
        store.save(&project)
    }

    /// Returns false if there was no such save.
    pub fn delete(&self, store: &dyn ProjectStore, id: &str) -> StoreResult<bool> {
        store.delete(id)
    }

    /// Every save, newest first.
    pub fn list_saves(&self, store: &dyn ProjectStore) -> StoreResult<Vec<SaveMetadata>> {
        let mut saves = store.list_all()?;
        sort_newest_first(&mut saves);
        Ok(saves)
    }

    /// Replace the document with a project serialised as JSON. The imported
    /// project gets a fresh id so it never overwrites its source save.
    pub fn import_json(&mut self, json: &str) -> StoreResult<()> {
        let mut project: Project = serde_json::from_str(json)?;
        project.details.id = uuid::Uuid::new_v4().to_string();
        info!(title = %project.details.title, "project imported");
        self.reset(project);
        Ok(())
    }

    pub fn export_json(&self) -> StoreResult<String> {
        Ok(serde_json::to_string(&self.project)?)
    }
}
