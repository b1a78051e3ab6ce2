//! Project persistence.
//!
//! Saves live outside the undo history: a key-value store of whole projects
//! plus a small metadata record per key for listing saves.
//!
//! ## On-disk layout ([`FileProjectStore`])
//!
//! ```text
//! <root>/projects/<id>.json   full project
//! <root>/meta/<id>.json       SaveMetadata
//! ```
//!
//! Files are written to a temp file in the same directory and renamed into
//! place, so a crash never leaves a half-written save.

use parking_lot::RwLock;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::io::Write;
use std::path::{Path, PathBuf};
use std::time::{SystemTime, UNIX_EPOCH};
use thiserror::Error;
use tracing::{debug, info, warn};

use crate::perf::measure_and_log;
use crate::types::Project;

/// Errors from a project store
#[derive(Error, Debug)]
pub enum StoreError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// Key would escape the store or is empty
    #[error("invalid project key: {0:?}")]
    InvalidKey(String),

    #[error("project not found: {0}")]
    NotFound(String),
}

pub type StoreResult<T> = Result<T, StoreError>;

/// Listing entry for one save.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct SaveMetadata {
    pub id: String,
    pub title: String,
    /// Milliseconds since the unix epoch
    pub date: u64,
}

impl SaveMetadata {
    pub fn for_project(project: &Project) -> Self {
        Self {
            id: project.details.id.clone(),
            title: project.details.title.clone(),
            date: now_millis(),
        }
    }
}

pub fn now_millis() -> u64 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|d| d.as_millis() as u64)
        .unwrap_or(0)
}

/// Reject keys that are empty or could address something outside the store.
pub fn validate_key(key: &str) -> StoreResult<()> {
    let bad = key.is_empty()
        || key.contains(['/', '\\', '\0'])
        || key.contains("..")
        || key.starts_with('.');
    if bad {
        return Err(StoreError::InvalidKey(key.to_string()));
    }
    Ok(())
}

/// Newest first; ties broken by id so listings are stable.
pub fn sort_newest_first(saves: &mut [SaveMetadata]) {
    saves.sort_by(|a, b| b.date.cmp(&a.date).then_with(|| a.id.cmp(&b.id)));
}

pub trait ProjectStore {
    fn get(&self, key: &str) -> StoreResult<Option<Project>>;

    fn put(&self, key: &str, project: &Project, meta: &SaveMetadata) -> StoreResult<()>;

    /// Returns false if nothing was stored under `key`.
    fn delete(&self, key: &str) -> StoreResult<bool>;

    /// Metadata of every save, in no particular order.
    fn list_all(&self) -> StoreResult<Vec<SaveMetadata>>;

    /// Store `project` under its own id with fresh metadata.
    fn save(&self, project: &Project) -> StoreResult<SaveMetadata> {
        let meta = SaveMetadata::for_project(project);
        self.put(&project.details.id, project, &meta)?;
        Ok(meta)
    }
}

// ============================================================================
// In-memory store
// ============================================================================

#[derive(Default)]
pub struct MemoryProjectStore {
    entries: RwLock<HashMap<String, (Project, SaveMetadata)>>,
}

impl MemoryProjectStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.entries.read().len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.read().is_empty()
    }
}

impl ProjectStore for MemoryProjectStore {
    fn get(&self, key: &str) -> StoreResult<Option<Project>> {
        validate_key(key)?;
        Ok(self.entries.read().get(key).map(|(project, _)| project.clone()))
    }

    fn put(&self, key: &str, project: &Project, meta: &SaveMetadata) -> StoreResult<()> {
        validate_key(key)?;
        self.entries
            .write()
            .insert(key.to_string(), (project.clone(), meta.clone()));
        Ok(())
    }

    fn delete(&self, key: &str) -> StoreResult<bool> {
        validate_key(key)?;
        Ok(self.entries.write().remove(key).is_some())
    }

    fn list_all(&self) -> StoreResult<Vec<SaveMetadata>> {
        Ok(self.entries.read().values().map(|(_, meta)| meta.clone()).collect())
    }
}

// ============================================================================
// File store
// ============================================================================

pub struct FileProjectStore {
    root: PathBuf,
}

impl FileProjectStore {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    /// Store under the platform data dir (`<data dir>/domino`), if any.
    pub fn open_default() -> Option<Self> {
        dirs::data_dir().map(|dir| Self::new(dir.join("domino")))
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    fn projects_dir(&self) -> PathBuf {
        self.root.join("projects")
    }

    fn meta_dir(&self) -> PathBuf {
        self.root.join("meta")
    }

    fn file_name(key: &str) -> String {
        format!("{key}.json")
    }

    fn write_json<T: Serialize>(dir: &Path, key: &str, value: &T) -> StoreResult<()> {
        std::fs::create_dir_all(dir)?;
        let mut tmp = tempfile::NamedTempFile::new_in(dir)?;
        serde_json::to_writer(&mut tmp, value)?;
        tmp.flush()?;
        tmp.persist(dir.join(Self::file_name(key)))
            .map_err(|err| StoreError::Io(err.error))?;
        Ok(())
    }

    fn remove_if_exists(path: &Path) -> StoreResult<bool> {
        match std::fs::remove_file(path) {
            Ok(()) => Ok(true),
            Err(err) if err.kind() == std::io::ErrorKind::NotFound => Ok(false),
            Err(err) => Err(err.into()),
        }
    }
}

impl ProjectStore for FileProjectStore {
    fn get(&self, key: &str) -> StoreResult<Option<Project>> {
        validate_key(key)?;
        let path = self.projects_dir().join(Self::file_name(key));
        let raw = match std::fs::read_to_string(&path) {
            Ok(raw) => raw,
            Err(err) if err.kind() == std::io::ErrorKind::NotFound => return Ok(None),
            Err(err) => return Err(err.into()),
        };
        debug!(key, bytes = raw.len(), "project read");
        Ok(Some(serde_json::from_str(&raw)?))
    }

    fn put(&self, key: &str, project: &Project, meta: &SaveMetadata) -> StoreResult<()> {
        validate_key(key)?;
        Self::write_json(&self.projects_dir(), key, project)?;
        Self::write_json(&self.meta_dir(), key, meta)?;
        info!(key, title = %meta.title, "project saved");
        Ok(())
    }

    fn delete(&self, key: &str) -> StoreResult<bool> {
        validate_key(key)?;
        let project = Self::remove_if_exists(&self.projects_dir().join(Self::file_name(key)))?;
        let meta = Self::remove_if_exists(&self.meta_dir().join(Self::file_name(key)))?;
        if project || meta {
            info!(key, "project deleted");
        }
        Ok(project || meta)
    }

    fn list_all(&self) -> StoreResult<Vec<SaveMetadata>> {
        let dir = self.meta_dir();
        if !dir.exists() {
            return Ok(Vec::new());
        }
        measure_and_log("list_saves", 50.0, || -> StoreResult<Vec<SaveMetadata>> {
            let mut saves = Vec::new();
            for entry in std::fs::read_dir(&dir)? {
                let path = entry?.path();
                if path.extension().and_then(|ext| ext.to_str()) != Some("json") {
                    continue;
                }
                let raw = std::fs::read_to_string(&path)?;
                match serde_json::from_str::<SaveMetadata>(&raw) {
                    Ok(meta) => saves.push(meta),
                    Err(err) => warn!(path = %path.display(), %err, "skipping unreadable save metadata"),
                }
            }
            Ok(saves)
        })
    }
}
