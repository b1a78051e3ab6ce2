//! Pointer and wheel input for the board canvas.
//!
//! ## Architecture
//!
//! Every interaction is built from a [`GestureTracker`], which follows one
//! pointer from down to up and classifies the gesture as a click or a drag.
//! Controllers layer scene semantics on top and the session's
//! [`InputState`] decides which controller owns the pointer stream.
//!
//! ## Modules
//!
//! - `event` - Pointer and wheel events as delivered by the host
//! - `coords` - Client/viewport/scene coordinate mapping
//! - `gesture` - Click-vs-drag classification for one pointer
//! - `state` - Input state machine enum and helper methods
//! - `pan_zoom` - Canvas panning, pinch and wheel zoom, camera framing
//! - `drag` - Card dragging with grid snapping
//! - `resize` - Card resizing from the grip

pub mod coords;
pub mod drag;
pub mod event;
pub mod gesture;
pub mod pan_zoom;
pub mod resize;
mod state;

pub use coords::{SceneMapper, Viewport};
pub use drag::{CardMove, DragController, DragOutcome, DragSession, SnapAnimation};
pub use event::{DeltaMode, PointerEvent, PointerId, WheelEvent};
pub use gesture::{GestureEvent, GestureTracker, Release};
pub use pan_zoom::{PanZoomController, PanZoomEvent, WheelZoom, ZoomLimits};
pub use resize::{ResizeController, ResizeOutcome, ResizeSession};
pub use state::InputState;
