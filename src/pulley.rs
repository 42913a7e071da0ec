//! Cosmetic pulley wheels that spin along with a rope running over them.

use crate::config::EPSILON;
use crate::float::Float;
use crate::rope::{Rope, RopeId};
use crate::vec::Vec2;

/// A wheel driven by the rope point closest to its centre.
///
/// Purely visual: the rope is never affected by the pulley.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct Pulley<F: Float> {
    pub center: Vec2<F>,
    pub radius: F,
    /// Accumulated rotation in radians.
    pub angle: F,
    /// Radians per tick from the last [`follow`](Pulley::follow).
    pub angular_velocity: F,
    pub rope: RopeId,
}

impl<F: Float> Pulley<F> {
    pub fn new(center: Vec2<F>, radius: F, rope: RopeId) -> Self {
        Pulley {
            center,
            radius,
            angle: F::zero(),
            angular_velocity: F::zero(),
            rope,
        }
    }

    /// Spin by the tangential speed of the nearest rope point.
    pub fn follow(&mut self, rope: &Rope<F>) {
        let epsilon = F::from_f64(EPSILON);
        if self.radius < epsilon {
            return;
        }
        let nearest = rope.points().iter().min_by(|a, b| {
            let da = a.pos.distance(self.center);
            let db = b.pos.distance(self.center);
            da.partial_cmp(&db).unwrap_or(core::cmp::Ordering::Equal)
        });
        let Some(point) = nearest else {
            return;
        };
        let Some(radial) = (point.pos - self.center).try_normalize(epsilon) else {
            return;
        };
        let tangential = radial.cross(point.velocity());
        self.angular_velocity = tangential / self.radius;
        self.angle = self.angle + self.angular_velocity;
    }
}
