//! Editor session - the board document plus everything that edits it.
//!
//! This module is organized into several submodules:
//! - `state` - The EditorSession struct definition and sub-structs
//! - `lifecycle` - Construction, reset, undo/redo and reloads
//! - `pointer` - Pointer and wheel routing to the gesture controllers
//! - `actions` - Discrete and continuous document edits
//! - `camera` - Framing, transitions and the frame tick
//! - `projects` - Save, load, duplicate and delete through a store

mod actions;
mod camera;
mod lifecycle;
mod pointer;
mod projects;
mod state;

pub use state::{CanvasState, EditorSession, SessionEvent, TransitionState};
