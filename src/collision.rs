//! Circle-approximated body collision and world boundary clamping.
//!
//! Bodies are reduced to a bounding circle. That is coarse for long thin
//! shapes but cheap enough to run on every point in every relaxation pass.

use crate::body::{bounding_radius, RigidBody};
use crate::config::WorldBounds;
use crate::float::Float;
use crate::point::Point;
use crate::vec::Vec2;

/// Bounding circle of a body, already inflated by the collision buffer.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct BodyCircle<F: Float> {
    pub center: Vec2<F>,
    pub radius: F,
}

impl<F: Float> BodyCircle<F> {
    pub fn from_body<B: RigidBody<F> + ?Sized>(body: &B, buffer: F) -> Self {
        BodyCircle {
            center: body.position(),
            radius: bounding_radius(body) + buffer,
        }
    }

    /// Push a free point lying inside the circle out to its rim.
    ///
    /// The point's velocity is zeroed. Points coincident with the centre
    /// have no defined direction and are left alone. Returns `true` when the
    /// point moved.
    pub fn push_out(&self, point: &mut Point<F>, epsilon: F) -> bool {
        if point.pinned {
            return false;
        }
        let offset = point.pos - self.center;
        let dist = offset.length();
        if dist < epsilon || dist >= self.radius {
            return false;
        }
        point.snap_to(self.center + offset.scale(self.radius / dist));
        true
    }
}

/// Keep a free point inside `bounds` shrunk by `margin` on every side.
///
/// A clamped axis keeps `bounce` of its velocity, reflected back into the
/// world. Returns `true` when any axis was clamped.
pub fn clamp_to_bounds<F: Float>(
    point: &mut Point<F>,
    bounds: &WorldBounds<F>,
    margin: F,
    bounce: F,
) -> bool {
    if point.pinned {
        return false;
    }
    let (min_x, max_x) = (margin, bounds.width - margin);
    let (min_y, max_y) = (margin, bounds.height - margin);
    let mut clamped = false;

    if point.pos.x < min_x || point.pos.x > max_x {
        point.pos.x = point.pos.x.clamp(min_x, max_x);
        let vel_x = point.pos.x - point.prev_pos.x;
        point.prev_pos.x = point.pos.x + vel_x * bounce;
        clamped = true;
    }
    if point.pos.y < min_y || point.pos.y > max_y {
        point.pos.y = point.pos.y.clamp(min_y, max_y);
        let vel_y = point.pos.y - point.prev_pos.y;
        point.prev_pos.y = point.pos.y + vel_y * bounce;
        clamped = true;
    }
    clamped
}
