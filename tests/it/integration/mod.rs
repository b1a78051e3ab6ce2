//! Integration tests for domino.
//!
//! Each file drives an `EditorSession` the way a host view would: pointer
//! events in, document state and session events out.

mod camera_tests;
mod group_tests;
mod project_tests;
