//! 2D geometry: points, rects and the affine transform used for every
//! viewport/scene mapping.
//!
//! [`Transform2D`] follows the usual 2D matrix layout
//!
//! ```text
//! | a c e |
//! | b d f |
//! | 0 0 1 |
//! ```
//!
//! so `apply(p) = (a*x + c*y + e, b*x + d*y + f)` and `A.multiply(&B)` is the
//! transform that applies `B` first, then `A`.

use serde::{Deserialize, Serialize};
use std::ops::{Add, Mul, Neg, Sub};
use thiserror::Error;

#[derive(Error, Debug, Clone, Copy, PartialEq)]
pub enum GeometryError {
    #[error("singular transform (determinant {determinant})")]
    SingularTransform { determinant: f64 },
}

// ============================================================================
// Vec2
// ============================================================================

#[derive(Clone, Copy, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct Vec2 {
    pub x: f64,
    pub y: f64,
}

impl Vec2 {
    pub const ZERO: Vec2 = Vec2 { x: 0.0, y: 0.0 };

    #[inline]
    pub const fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }

    #[inline]
    pub fn length(self) -> f64 {
        self.x.hypot(self.y)
    }

    /// Sum of absolute components (taxicab length).
    #[inline]
    pub fn manhattan(self) -> f64 {
        self.x.abs() + self.y.abs()
    }

    #[inline]
    pub fn distance(self, other: Vec2) -> f64 {
        (other - self).length()
    }

    pub fn approx_eq(self, other: Vec2, epsilon: f64) -> bool {
        (self.x - other.x).abs() <= epsilon && (self.y - other.y).abs() <= epsilon
    }
}

impl Add for Vec2 {
    type Output = Vec2;
    fn add(self, rhs: Vec2) -> Vec2 {
        Vec2::new(self.x + rhs.x, self.y + rhs.y)
    }
}

impl Sub for Vec2 {
    type Output = Vec2;
    fn sub(self, rhs: Vec2) -> Vec2 {
        Vec2::new(self.x - rhs.x, self.y - rhs.y)
    }
}

impl Mul<f64> for Vec2 {
    type Output = Vec2;
    fn mul(self, rhs: f64) -> Vec2 {
        Vec2::new(self.x * rhs, self.y * rhs)
    }
}

impl Neg for Vec2 {
    type Output = Vec2;
    fn neg(self) -> Vec2 {
        Vec2::new(-self.x, -self.y)
    }
}

// ============================================================================
// Rect
// ============================================================================

/// Axis-aligned rect in whatever space the caller works in.
#[derive(Clone, Copy, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct Rect {
    pub x: f64,
    pub y: f64,
    pub width: f64,
    pub height: f64,
}

impl Rect {
    pub const fn new(x: f64, y: f64, width: f64, height: f64) -> Self {
        Self { x, y, width, height }
    }

    pub fn from_origin_size(origin: Vec2, size: Vec2) -> Self {
        Self::new(origin.x, origin.y, size.x, size.y)
    }

    #[inline]
    pub fn origin(&self) -> Vec2 {
        Vec2::new(self.x, self.y)
    }

    #[inline]
    pub fn size(&self) -> Vec2 {
        Vec2::new(self.width, self.height)
    }

    #[inline]
    pub fn right(&self) -> f64 {
        self.x + self.width
    }

    #[inline]
    pub fn bottom(&self) -> f64 {
        self.y + self.height
    }

    pub fn center(&self) -> Vec2 {
        Vec2::new(self.x + self.width * 0.5, self.y + self.height * 0.5)
    }

    /// Grow the rect by `padding` on every side.
    pub fn padded(&self, padding: f64) -> Self {
        Self::new(
            self.x - padding,
            self.y - padding,
            self.width + padding * 2.0,
            self.height + padding * 2.0,
        )
    }

    /// Half-open containment: the right and bottom edges are outside.
    pub fn contains_point(&self, point: Vec2) -> bool {
        point.x >= self.x && point.y >= self.y && point.x < self.right() && point.y < self.bottom()
    }

    pub fn union(&self, other: &Rect) -> Self {
        let left = self.x.min(other.x);
        let top = self.y.min(other.y);
        let right = self.right().max(other.right());
        let bottom = self.bottom().max(other.bottom());
        Self::new(left, top, right - left, bottom - top)
    }

    /// Smallest rect covering all `rects`, or `fallback` when there are none.
    pub fn bound<'a, I>(rects: I, fallback: Rect) -> Rect
    where
        I: IntoIterator<Item = &'a Rect>,
    {
        let mut rects = rects.into_iter();
        match rects.next() {
            Some(first) => rects.fold(*first, |acc, rect| acc.union(rect)),
            None => fallback,
        }
    }
}

// ============================================================================
// Transform2D
// ============================================================================

/// 2D affine transform (scale, rotation, translation).
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct Transform2D {
    pub a: f64,
    pub b: f64,
    pub c: f64,
    pub d: f64,
    pub e: f64,
    pub f: f64,
}

impl Default for Transform2D {
    fn default() -> Self {
        Self::IDENTITY
    }
}

impl Transform2D {
    pub const IDENTITY: Transform2D = Transform2D {
        a: 1.0,
        b: 0.0,
        c: 0.0,
        d: 1.0,
        e: 0.0,
        f: 0.0,
    };

    pub const fn new(a: f64, b: f64, c: f64, d: f64, e: f64, f: f64) -> Self {
        Self { a, b, c, d, e, f }
    }

    pub const fn translation(offset: Vec2) -> Self {
        Self::new(1.0, 0.0, 0.0, 1.0, offset.x, offset.y)
    }

    pub const fn scaling(scale: f64) -> Self {
        Self::new(scale, 0.0, 0.0, scale, 0.0, 0.0)
    }

    pub fn rotation(radians: f64) -> Self {
        let (sin, cos) = radians.sin_cos();
        Self::new(cos, sin, -sin, cos, 0.0, 0.0)
    }

    /// `self · other`: applies `other` first, then `self`.
    pub fn multiply(&self, other: &Transform2D) -> Transform2D {
        Transform2D {
            a: self.a * other.a + self.c * other.b,
            b: self.b * other.a + self.d * other.b,
            c: self.a * other.c + self.c * other.d,
            d: self.b * other.c + self.d * other.d,
            e: self.a * other.e + self.c * other.f + self.e,
            f: self.b * other.e + self.d * other.f + self.f,
        }
    }

    #[inline]
    pub fn determinant(&self) -> f64 {
        self.a * self.d - self.b * self.c
    }

    pub fn try_inverse(&self) -> Result<Transform2D, GeometryError> {
        let det = self.determinant();
        if det == 0.0 || !det.is_finite() {
            return Err(GeometryError::SingularTransform { determinant: det });
        }
        Ok(Transform2D {
            a: self.d / det,
            b: -self.b / det,
            c: -self.c / det,
            d: self.a / det,
            e: (self.c * self.f - self.d * self.e) / det,
            f: (self.b * self.e - self.a * self.f) / det,
        })
    }

    /// Inverse of the transform.
    ///
    /// # Panics
    ///
    /// Panics on a singular matrix. Scene transforms are scale-clamped, so a
    /// singular one means NaN coordinates are about to spread.
    pub fn inverse(&self) -> Transform2D {
        match self.try_inverse() {
            Ok(inverse) => inverse,
            Err(err) => panic!("{err}"),
        }
    }

    #[inline]
    pub fn apply(&self, point: Vec2) -> Vec2 {
        Vec2::new(
            self.a * point.x + self.c * point.y + self.e,
            self.b * point.x + self.d * point.y + self.f,
        )
    }

    pub fn is_finite(&self) -> bool {
        [self.a, self.b, self.c, self.d, self.e, self.f]
            .iter()
            .all(|v| v.is_finite())
    }

    /// The translation part (`e`, `f`).
    #[inline]
    pub fn translation_of(&self) -> Vec2 {
        Vec2::new(self.e, self.f)
    }

    pub fn with_translation(mut self, offset: Vec2) -> Self {
        self.e = offset.x;
        self.f = offset.y;
        self
    }

    /// Per-axis scale: Euclidean norms of the x and y basis columns.
    pub fn scale_of(&self) -> Vec2 {
        Vec2::new(self.a.hypot(self.b), self.c.hypot(self.d))
    }

    /// `self · S(scale)`: scales in the transform's own (input) space.
    pub fn post_scale(&self, scale: f64) -> Transform2D {
        self.multiply(&Transform2D::scaling(scale))
    }

    /// Scale about `origin`, given in the transform's input space.
    /// `origin` keeps its image under the result.
    pub fn scale_about(&self, scale: f64, origin: Vec2) -> Transform2D {
        self.multiply(&Transform2D::translation(origin))
            .multiply(&Transform2D::scaling(scale))
            .multiply(&Transform2D::translation(-origin))
    }

    /// Component-wise interpolation, adequate for scale+translate transforms.
    pub fn lerp(&self, to: &Transform2D, t: f64) -> Transform2D {
        let t = t.clamp(0.0, 1.0);
        let mix = |from: f64, to: f64| from + (to - from) * t;
        Transform2D {
            a: mix(self.a, to.a),
            b: mix(self.b, to.b),
            c: mix(self.c, to.c),
            d: mix(self.d, to.d),
            e: mix(self.e, to.e),
            f: mix(self.f, to.f),
        }
    }

    pub fn approx_eq(&self, other: &Transform2D, epsilon: f64) -> bool {
        [
            (self.a, other.a),
            (self.b, other.b),
            (self.c, other.c),
            (self.d, other.d),
            (self.e, other.e),
            (self.f, other.f),
        ]
        .iter()
        .all(|(l, r)| (l - r).abs() <= epsilon)
    }
}
