//! Single test binary entry point.
//!
//! Every integration test is compiled into this one binary to keep link
//! times down.
//!
//! Structure:
//! - helpers: Project/session builders and pointer event shorthands
//! - integration: Multi-component workflow tests through `EditorSession`
//! - unit: Single-component tests against the public API

mod integration;
