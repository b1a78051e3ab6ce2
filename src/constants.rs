//! Engine-wide constants.
//!
//! Centralizes magic numbers so the gesture, camera and history code reads
//! in terms of named values. Runtime overrides live in [`crate::settings`].

// ============================================================================
// Grid
// ============================================================================

/// Width of one board cell in scene units
pub const CELL_WIDTH: f64 = 256.0;

/// Height of one board cell in scene units
pub const CELL_HEIGHT: f64 = 160.0;

/// Gap left between neighbouring cards
pub const CELL_GAP: f64 = 8.0;

/// Size (in cells) of a freshly inserted card
pub const DEFAULT_CARD_CELLS: (u32, u32) = (2, 2);

/// Smallest size (in cells) a card can be resized to
pub const MIN_RESIZE_CELLS: u32 = 2;

/// Side of the resize grip triangle in the card's bottom-right corner
pub const RESIZE_GRIP_SIZE: f64 = 32.0;

// ============================================================================
// Zoom & Pan
// ============================================================================

/// Minimum scene scale
pub const MIN_SCALE: f64 = 0.25;

/// Maximum scene scale
pub const MAX_SCALE: f64 = 2.0;

/// Scale range used when framing the current selection
pub const SELECTION_FRAME_SCALE: (f64, f64) = (0.25, 1.0);

/// Padding added around a rect before framing it
pub const FRAME_PADDING: f64 = 64.0;

/// Wheel deltas in line/page mode are multiplied by this to get pixels
pub const WHEEL_LINE_MULTIPLIER: f64 = 33.0;

/// Largest wheel delta (in pixels) honoured by a single wheel event
pub const WHEEL_MAX_DELTA: f64 = 25.0;

/// Zoom exponent per wheel pixel: scale delta is `2^(-sign * magnitude * rate)`
pub const WHEEL_EXPONENT_RATE: f64 = 0.01;

// ============================================================================
// Gestures
// ============================================================================

/// Cumulative travel (device px) at or under which a gesture is a click
pub const CLICK_MOVEMENT_LIMIT: f64 = 5.0;

// ============================================================================
// Animation & Timing
// ============================================================================

/// Camera transition duration for programmatic framing, in seconds
pub const CAMERA_TRANSITION_SECS: f64 = 0.2;

/// Snap-to-grid transition after a drag or resize, in seconds
pub const SNAP_TRANSITION_SECS: f64 = 0.1;

// ============================================================================
// History
// ============================================================================

/// Maximum undo steps kept before the oldest snapshot is evicted
pub const MAX_HISTORY_DEPTH: usize = 20;

// ============================================================================
// Overlays
// ============================================================================

/// Padding between member cards and a group's backing shape
pub const GROUP_BACKING_PADDING: f64 = 8.0;

/// Extra padding for a group's selection flash, outside the backing
pub const GROUP_FLASH_PADDING: f64 = 8.0;

/// Padding around a link's bounding rect
pub const LINK_PADDING: f64 = 8.0;
