//! Planar vector type used for rope points, anchors, and body transforms.

use crate::float::Float;
use core::ops::{Add, Neg, Sub};

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// 2D vector in world units. +y points down, matching canvas coordinates.
#[derive(Copy, Clone, Debug, Default, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct Vec2<F: Float> {
    pub x: F,
    pub y: F,
}

impl<F: Float> Vec2<F> {
    /// Create a new 2D vector.
    pub fn new(x: F, y: F) -> Self { Vec2 { x, y } }

    /// Zero vector.
    pub fn zero() -> Self { Vec2 { x: F::zero(), y: F::zero() } }

    /// Dot product.
    pub fn dot(self, other: Self) -> F {
        self.x * other.x + self.y * other.y
    }

    /// 2D cross product (returns scalar): self.x * other.y - self.y * other.x
    pub fn cross(self, other: Self) -> F {
        self.x * other.y - self.y * other.x
    }

    /// Scale both components by a scalar.
    pub fn scale(self, s: F) -> Self {
        Vec2 { x: self.x * s, y: self.y * s }
    }

    /// Squared length (avoids sqrt).
    pub fn length_sq(self) -> F {
        self.dot(self)
    }

    /// Length (magnitude).
    pub fn length(self) -> F {
        self.length_sq().sqrt()
    }

    /// Distance between two points.
    pub fn distance(self, other: Self) -> F {
        (self - other).length()
    }

    /// Linear interpolation between self and other.
    pub fn lerp(self, other: Self, t: F) -> Self {
        self + (other - self).scale(t)
    }

    /// Midpoint of self and other.
    pub fn midpoint(self, other: Self) -> Self {
        self.lerp(other, F::half())
    }

    /// Unit vector in the same direction, or `None` when shorter than `epsilon`.
    pub fn try_normalize(self, epsilon: F) -> Option<Self> {
        let len = self.length();
        if len < epsilon {
            None
        } else {
            Some(self.scale(F::one() / len))
        }
    }

    /// Rotate counter-clockwise (in a y-up frame) by `angle` radians.
    pub fn rotate(self, angle: F) -> Self {
        let (sin, cos) = (angle.sin(), angle.cos());
        Vec2 {
            x: self.x * cos - self.y * sin,
            y: self.x * sin + self.y * cos,
        }
    }

    /// Both components finite.
    pub fn is_finite(self) -> bool {
        self.x.is_finite() && self.y.is_finite()
    }

    /// Shortest distance from self to the segment `a..b`.
    ///
    /// A degenerate segment (`a == b`) measures the distance to `a`.
    pub fn distance_to_segment(self, a: Self, b: Self) -> F {
        let ab = b - a;
        let len_sq = ab.length_sq();
        if len_sq == F::zero() {
            return self.distance(a);
        }
        let t = ((self - a).dot(ab) / len_sq).clamp(F::zero(), F::one());
        self.distance(a + ab.scale(t))
    }
}

impl<F: Float> Add for Vec2<F> {
    type Output = Self;
    fn add(self, rhs: Self) -> Self { Vec2 { x: self.x + rhs.x, y: self.y + rhs.y } }
}

impl<F: Float> Sub for Vec2<F> {
    type Output = Self;
    fn sub(self, rhs: Self) -> Self { Vec2 { x: self.x - rhs.x, y: self.y - rhs.y } }
}

impl<F: Float> Neg for Vec2<F> {
    type Output = Self;
    fn neg(self) -> Self { Vec2 { x: -self.x, y: -self.y } }
}
