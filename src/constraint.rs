//! Unilateral distance constraints between adjacent rope points.

use crate::float::Float;
use crate::point::Point;

/// Keeps two points from drifting further apart than `rest_length`.
///
/// Compression is never resisted: a slack rope may bunch up freely.
#[derive(Clone, Debug, PartialEq)]
pub struct DistanceConstraint<F: Float> {
    pub a: usize,
    pub b: usize,
    pub rest_length: F,
}

impl<F: Float> DistanceConstraint<F> {
    pub fn new(a: usize, b: usize, rest_length: F) -> Self {
        DistanceConstraint { a, b, rest_length }
    }

    /// Current distance between the two points.
    pub fn current_length(&self, points: &[Point<F>]) -> F {
        points[self.a].pos.distance(points[self.b].pos)
    }

    /// Apply one relaxation step.
    ///
    /// Each free end moves by half of `stiffness` times the overshoot; a pinned
    /// end takes none of it. Returns `true` when a correction was applied.
    pub fn solve(&self, points: &mut [Point<F>], stiffness: F, epsilon: F) -> bool {
        let delta = points[self.b].pos - points[self.a].pos;
        let dist = delta.length();
        if dist < epsilon || dist <= self.rest_length {
            return false;
        }

        let correction = (self.rest_length - dist) / dist * stiffness;
        let offset = delta.scale(correction * F::half());

        if !points[self.a].pinned {
            points[self.a].pos = points[self.a].pos - offset;
        }
        if !points[self.b].pinned {
            points[self.b].pos = points[self.b].pos + offset;
        }
        true
    }
}
