//! Domino - a headless direct-manipulation engine for an infinite card board.
//!
//! The crate owns the board document and everything that edits it: pan, pinch
//! and wheel zoom of the scene, card drags with grid snapping, resizing,
//! selection, groups and links, and checkpoint-based undo/redo. Rendering is
//! left to the host, which feeds in pointer events and reads back transforms,
//! card positions, overlays and the session's event outbox.
//!
//! ## Modules
//!
//! - `app` - The [`EditorSession`] tying every component together
//! - `input` - Pointer events, gesture tracking and the gesture controllers
//! - `history` - Snapshot-based undo/redo with coalesced continuous edits
//! - `types` - The project document (cards, groups, links, styles)
//! - `geometry` / `grid` - Transforms, rects and grid snapping
//! - `selection` / `overlay` - Selection state and group/link shapes
//! - `spatial_index` - R-tree hit testing over card bounds
//! - `storage` / `settings` - Project saves and editor settings
//! - `logging` / `perf` - Tracing setup and hot-path instrumentation

pub mod app;
pub mod constants;
pub mod geometry;
pub mod grid;
pub mod history;
pub mod input;
pub mod logging;
pub mod overlay;
pub mod perf;
pub mod selection;
pub mod settings;
pub mod spatial_index;
pub mod storage;
pub mod types;

pub use app::{EditorSession, SessionEvent};
pub use geometry::{Rect, Transform2D, Vec2};
pub use history::{HistoryManager, PendingEdit};
pub use settings::EditorSettings;
pub use types::{Card, CardId, Group, GroupId, Link, LinkId, Project};
