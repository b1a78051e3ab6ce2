//! Canvas panning, pinch-zoom and wheel-zoom.
//!
//! ## State Transitions
//!
//! ```text
//! Idle     -> Panning   (pointer down on the background)
//! Panning  -> Pinching  (second pointer down)
//! Pinching -> Panning   (either pointer up; the other keeps panning)
//! Panning  -> Idle      (pointer up; click emits BackgroundClick)
//! ```
//!
//! Panning keeps the grab relation `grab = pointer⁻¹ · scene` fixed, so the
//! scene point under the pointer stays under it. Pinching scales that
//! relation by the ratio of finger distances. Every transform written here
//! keeps its scale inside [`ZoomLimits`].

use serde::{Deserialize, Serialize};
use tracing::{debug, trace, warn};

use crate::constants::{
    CLICK_MOVEMENT_LIMIT, MAX_SCALE, MIN_SCALE, WHEEL_EXPONENT_RATE, WHEEL_LINE_MULTIPLIER,
    WHEEL_MAX_DELTA,
};
use crate::geometry::{Rect, Transform2D, Vec2};
use crate::input::coords::{SceneMapper, Viewport};
use crate::input::event::{PointerEvent, PointerId, WheelEvent};
use crate::input::gesture::GestureTracker;

#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct ZoomLimits {
    pub min_scale: f64,
    pub max_scale: f64,
}

impl Default for ZoomLimits {
    fn default() -> Self {
        Self {
            min_scale: MIN_SCALE,
            max_scale: MAX_SCALE,
        }
    }
}

impl ZoomLimits {
    pub fn new(min_scale: f64, max_scale: f64) -> Self {
        Self { min_scale, max_scale }
    }

    pub fn clamp(&self, scale: f64) -> f64 {
        scale.clamp(self.min_scale, self.max_scale)
    }

    /// `requested` narrowed so it never leaves these limits.
    pub fn restrict(&self, requested: ZoomLimits) -> ZoomLimits {
        let bound = |value: f64, fallback: f64| {
            if value.is_nan() {
                fallback
            } else {
                self.clamp(value)
            }
        };
        let lo = bound(requested.min_scale, self.min_scale);
        let hi = bound(requested.max_scale, self.max_scale);
        ZoomLimits {
            min_scale: lo.min(hi),
            max_scale: lo.max(hi),
        }
    }

    /// Range of multipliers that keep `current` inside the limits.
    pub fn factor_range(&self, current: f64) -> (f64, f64) {
        (self.min_scale / current, self.max_scale / current)
    }
}

/// How wheel deltas turn into zoom factors.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct WheelZoom {
    /// Pixels per line for line/page delta modes
    pub line_multiplier: f64,
    /// Largest |deltaY| honoured per event
    pub max_delta: f64,
    pub exponent_rate: f64,
}

impl Default for WheelZoom {
    fn default() -> Self {
        Self {
            line_multiplier: WHEEL_LINE_MULTIPLIER,
            max_delta: WHEEL_MAX_DELTA,
            exponent_rate: WHEEL_EXPONENT_RATE,
        }
    }
}

impl WheelZoom {
    /// Unclamped zoom factor for one wheel event.
    pub fn factor(&self, event: &WheelEvent) -> f64 {
        let delta = event.pixel_delta(self.line_multiplier);
        if delta == 0.0 {
            return 1.0;
        }
        let magnitude = delta.abs().min(self.max_delta);
        2f64.powf(delta.signum() * magnitude * -self.exponent_rate)
    }
}

/// Emitted when a background gesture resolves.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum PanZoomEvent {
    /// A pan that never moved far enough to count as a drag
    BackgroundClick(PointerEvent),
    PanEnded,
}

#[derive(Clone, Debug)]
enum PanZoomState {
    Idle,
    Panning {
        tracker: GestureTracker,
        grab: Transform2D,
        /// Set once a pinch happened; suppresses the background click
        pinched: bool,
    },
    Pinching {
        primary: GestureTracker,
        secondary: GestureTracker,
        /// Scene relative to the primary pointer at pinch start
        grab: Transform2D,
        initial_distance: f64,
        start_scale: f64,
    },
}

#[derive(Clone, Copy, Debug)]
struct CameraTransition {
    from: Transform2D,
    to: Transform2D,
    elapsed: f64,
    duration: f64,
}

pub struct PanZoomController {
    transform: Transform2D,
    /// Suppresses all pointer and wheel handling
    pub locked: bool,
    pub limits: ZoomLimits,
    pub wheel: WheelZoom,
    click_limit: f64,
    state: PanZoomState,
    transition: Option<CameraTransition>,
}

impl Default for PanZoomController {
    fn default() -> Self {
        Self::new(ZoomLimits::default())
    }
}

impl PanZoomController {
    pub fn new(limits: ZoomLimits) -> Self {
        Self {
            transform: Transform2D::IDENTITY,
            locked: false,
            limits,
            wheel: WheelZoom::default(),
            click_limit: CLICK_MOVEMENT_LIMIT,
            state: PanZoomState::Idle,
            transition: None,
        }
    }

    pub fn with_click_limit(mut self, click_limit: f64) -> Self {
        self.click_limit = click_limit;
        self
    }

    /// Scene → viewport transform.
    pub fn transform(&self) -> &Transform2D {
        &self.transform
    }

    pub fn scale(&self) -> f64 {
        self.transform.scale_of().x
    }

    pub fn mapper<'a>(&'a self, viewport: &'a Viewport) -> SceneMapper<'a> {
        SceneMapper::new(viewport, &self.transform)
    }

    /// Replace the transform, clamping its scale into the limits.
    ///
    /// Singular or non-finite transforms are refused and the current one is
    /// kept. Returns true if the transform was taken.
    pub fn set_transform(&mut self, transform: Transform2D) -> bool {
        match self.constrained(transform) {
            Some(transform) => {
                self.transform = transform;
                true
            }
            None => {
                warn!(?transform, "refusing unusable scene transform");
                false
            }
        }
    }

    /// `transform` with its scale moved into the limits, or None if it cannot
    /// serve as a scene transform.
    fn constrained(&self, transform: Transform2D) -> Option<Transform2D> {
        if !transform.is_finite() || transform.try_inverse().is_err() {
            return None;
        }
        let scale = transform.scale_of().x;
        let clamped = self.limits.clamp(scale);
        Some(if clamped != scale {
            transform.post_scale(clamped / scale)
        } else {
            transform
        })
    }

    pub fn is_idle(&self) -> bool {
        matches!(self.state, PanZoomState::Idle)
    }

    pub fn is_panning(&self) -> bool {
        matches!(self.state, PanZoomState::Panning { .. })
    }

    pub fn is_pinching(&self) -> bool {
        matches!(self.state, PanZoomState::Pinching { .. })
    }

    /// Pointer id of the panning pointer, if a pan (not a pinch) is active.
    pub fn panning_pointer(&self) -> Option<PointerId> {
        match &self.state {
            PanZoomState::Panning { tracker, .. } => Some(tracker.pointer_id()),
            _ => None,
        }
    }

    // ------------------------------------------------------------------------
    // Pointer handling
    // ------------------------------------------------------------------------

    /// Returns true if the pointer was taken (pan start or pinch start).
    pub fn pointer_down(&mut self, event: &PointerEvent, viewport: &Viewport) -> bool {
        if self.locked {
            return false;
        }
        let state = std::mem::replace(&mut self.state, PanZoomState::Idle);
        let (state, taken) = match state {
            PanZoomState::Idle => {
                let grab = self.grab_for(event, viewport);
                debug!(pointer = event.pointer_id, "pan started");
                (
                    PanZoomState::Panning {
                        tracker: GestureTracker::with_click_limit(*event, self.click_limit),
                        grab,
                        pinched: false,
                    },
                    true,
                )
            }
            PanZoomState::Panning { tracker, .. } if tracker.pointer_id() != event.pointer_id => {
                let primary = tracker;
                let initial_distance = pointer_distance(primary.last_event(), event, viewport);
                let grab = self.grab_for(primary.last_event(), viewport);
                debug!(initial_distance, "pinch started");
                (
                    PanZoomState::Pinching {
                        primary,
                        secondary: GestureTracker::with_click_limit(*event, self.click_limit),
                        grab,
                        initial_distance,
                        start_scale: self.scale(),
                    },
                    true,
                )
            }
            other => (other, false),
        };
        self.state = state;
        taken
    }

    /// Returns true if the scene transform changed.
    pub fn pointer_move(&mut self, event: &PointerEvent, viewport: &Viewport) -> bool {
        match &mut self.state {
            PanZoomState::Idle => false,
            PanZoomState::Panning { tracker, grab, .. } => {
                if tracker.pointer_move(event).is_none() {
                    return false;
                }
                let pointer = SceneMapper::new(viewport, &self.transform)
                    .pointer_to_viewport_transform(event.position);
                self.transform = pointer.multiply(grab);
                true
            }
            PanZoomState::Pinching {
                primary,
                secondary,
                grab,
                initial_distance,
                start_scale,
            } => {
                let moved = primary.pointer_move(event).is_some()
                    || secondary.pointer_move(event).is_some();
                if !moved {
                    return false;
                }
                let distance =
                    pointer_distance(primary.last_event(), secondary.last_event(), viewport);
                let ratio = if *initial_distance > 0.0 {
                    distance / *initial_distance
                } else {
                    1.0
                };
                let (min_ratio, max_ratio) = self.limits.factor_range(*start_scale);
                let ratio = ratio.clamp(min_ratio, max_ratio);
                let pointer = SceneMapper::new(viewport, &self.transform)
                    .pointer_to_viewport_transform(primary.last_event().position);
                self.transform = pointer.post_scale(ratio).multiply(grab);
                trace!(ratio, "pinch");
                true
            }
        }
    }

    pub fn pointer_up(&mut self, event: &PointerEvent, viewport: &Viewport) -> Option<PanZoomEvent> {
        let state = std::mem::replace(&mut self.state, PanZoomState::Idle);
        let (state, emitted) = match state {
            PanZoomState::Idle => (PanZoomState::Idle, None),
            PanZoomState::Panning {
                mut tracker,
                grab,
                pinched,
            } => match tracker.pointer_up(event) {
                Some(release) => {
                    debug!(click = release.is_click, "pan ended");
                    let emitted = if release.is_click && !pinched {
                        PanZoomEvent::BackgroundClick(*event)
                    } else {
                        PanZoomEvent::PanEnded
                    };
                    (PanZoomState::Idle, Some(emitted))
                }
                None => (
                    PanZoomState::Panning {
                        tracker,
                        grab,
                        pinched,
                    },
                    None,
                ),
            },
            PanZoomState::Pinching {
                mut primary,
                mut secondary,
                grab,
                initial_distance,
                start_scale,
            } => {
                let remaining = if primary.pointer_up(event).is_some() {
                    secondary
                } else if secondary.pointer_up(event).is_some() {
                    primary
                } else {
                    return self.restore(
                        PanZoomState::Pinching {
                            primary,
                            secondary,
                            grab,
                            initial_distance,
                            start_scale,
                        },
                        None,
                    );
                };
                debug!(pointer = remaining.pointer_id(), "pinch ended");
                let grab = self.grab_for(remaining.last_event(), viewport);
                (
                    PanZoomState::Panning {
                        tracker: remaining,
                        grab,
                        pinched: true,
                    },
                    None,
                )
            }
        };
        self.restore(state, emitted)
    }

    fn restore(&mut self, state: PanZoomState, emitted: Option<PanZoomEvent>) -> Option<PanZoomEvent> {
        self.state = state;
        emitted
    }

    /// Drop any active gesture without emitting anything.
    pub fn cancel(&mut self) {
        match &mut self.state {
            PanZoomState::Idle => {}
            PanZoomState::Panning { tracker, .. } => tracker.cancel(),
            PanZoomState::Pinching {
                primary, secondary, ..
            } => {
                primary.cancel();
                secondary.cancel();
            }
        }
        self.state = PanZoomState::Idle;
    }

    /// Zoom about the cursor. Returns true if the transform changed.
    pub fn wheel(&mut self, event: &WheelEvent, viewport: &Viewport) -> bool {
        if self.locked {
            return false;
        }
        let factor = self.wheel.factor(event);
        if factor == 1.0 {
            return false;
        }
        let mapper = SceneMapper::new(viewport, &self.transform);
        let origin = mapper.client_to_scene(event.position);
        let (min_factor, max_factor) = self.limits.factor_range(self.scale());
        let factor = factor.clamp(min_factor, max_factor);

        self.transform = self.transform.scale_about(factor, origin);
        self.regrab(viewport);
        trace!(factor, scale = self.scale(), "wheel zoom");
        true
    }

    /// Re-anchor an active gesture to the current transform.
    fn regrab(&mut self, viewport: &Viewport) {
        let scale = self.scale();
        let transform = self.transform;
        let mapper = SceneMapper::new(viewport, &transform);
        match &mut self.state {
            PanZoomState::Idle => {}
            PanZoomState::Panning { tracker, grab, .. } => {
                *grab = mapper
                    .pointer_to_viewport_transform(tracker.last_event().position)
                    .inverse()
                    .multiply(&transform);
            }
            PanZoomState::Pinching {
                primary,
                secondary,
                grab,
                initial_distance,
                start_scale,
            } => {
                *grab = mapper
                    .pointer_to_viewport_transform(primary.last_event().position)
                    .inverse()
                    .multiply(&transform);
                *initial_distance =
                    pointer_distance(primary.last_event(), secondary.last_event(), viewport);
                *start_scale = scale;
            }
        }
    }

    fn grab_for(&self, event: &PointerEvent, viewport: &Viewport) -> Transform2D {
        self.mapper(viewport)
            .pointer_to_viewport_transform(event.position)
            .inverse()
            .multiply(&self.transform)
    }

    // ------------------------------------------------------------------------
    // Camera
    // ------------------------------------------------------------------------

    /// Transform that fits `rect` (scene space) into the viewport, centred,
    /// with the scale clamped into `[min_scale, max_scale]`.
    ///
    /// None when the viewport has no area or the rect is not finite.
    pub fn fit_rect(rect: &Rect, viewport: &Viewport, limits: ZoomLimits) -> Option<Transform2D> {
        let size = viewport.size();
        if size.x <= 0.0 || size.y <= 0.0 {
            return None;
        }
        let sx = size.x / rect.width;
        let sy = size.y / rect.height;
        let scale = limits.clamp(sx.min(sy));

        let ex = (1.0 / scale - 1.0 / sx) * size.x * 0.5;
        let ey = (1.0 / scale - 1.0 / sy) * size.y * 0.5;
        let offset = Vec2::new(-rect.x + ex, -rect.y + ey);

        let fitted = Transform2D::scaling(scale).multiply(&Transform2D::translation(offset));
        fitted.is_finite().then_some(fitted)
    }

    /// Jump straight to the framing of `rect`. `limits` can only narrow the
    /// controller's own limits. Returns false if there was nothing to frame.
    pub fn frame_rect(&mut self, rect: &Rect, viewport: &Viewport, limits: ZoomLimits) -> bool {
        let Some(target) = Self::fit_rect(rect, viewport, self.limits.restrict(limits)) else {
            debug!(?rect, size = ?viewport.size(), "nothing to frame");
            return false;
        };
        self.cancel();
        self.transition = None;
        self.transform = target;
        debug!(?rect, scale = self.scale(), "framed rect");
        true
    }

    /// Animate towards the framing of `rect`, locking input until
    /// [`tick`](Self::tick) finishes the transition.
    pub fn frame_rect_animated(
        &mut self,
        rect: &Rect,
        viewport: &Viewport,
        limits: ZoomLimits,
        duration: f64,
    ) -> bool {
        let Some(target) = Self::fit_rect(rect, viewport, self.limits.restrict(limits)) else {
            debug!(?rect, size = ?viewport.size(), "nothing to frame");
            return false;
        };
        self.animate_to(target, duration)
    }

    /// Start a camera transition to `target`, scale-clamped like
    /// [`set_transform`](Self::set_transform). Returns false if `target`
    /// was refused.
    pub fn animate_to(&mut self, target: Transform2D, duration: f64) -> bool {
        let Some(target) = self.constrained(target) else {
            warn!(?target, "refusing unusable camera target");
            return false;
        };
        self.cancel();
        if duration <= 0.0 {
            self.transform = target;
            self.transition = None;
            self.locked = false;
            return true;
        }
        self.transition = Some(CameraTransition {
            from: self.transform,
            to: target,
            elapsed: 0.0,
            duration,
        });
        self.locked = true;
        true
    }

    pub fn is_animating(&self) -> bool {
        self.transition.is_some()
    }

    /// Advance the camera transition by `dt` seconds. Returns true if the
    /// transform changed.
    pub fn tick(&mut self, dt: f64) -> bool {
        let Some(transition) = self.transition.as_mut() else {
            return false;
        };
        transition.elapsed += dt.max(0.0);
        let t = (transition.elapsed / transition.duration).min(1.0);
        self.transform = transition.from.lerp(&transition.to, ease_in_out(t));
        if t >= 1.0 {
            self.transform = transition.to;
            self.transition = None;
            self.locked = false;
            debug!("camera transition finished");
        }
        true
    }
}

/// Smoothstep easing.
pub fn ease_in_out(t: f64) -> f64 {
    let t = t.clamp(0.0, 1.0);
    t * t * (3.0 - 2.0 * t)
}

fn pointer_distance(a: &PointerEvent, b: &PointerEvent, viewport: &Viewport) -> f64 {
    viewport
        .to_viewport(a.position)
        .distance(viewport.to_viewport(b.position))
}
