//! Rope points: Verlet particles with implicit velocity.

use crate::float::Float;
use crate::vec::Vec2;

/// A simulated rope point.
///
/// Velocity is never stored; it is the delta between `pos` and `prev_pos`.
#[derive(Clone, Debug, PartialEq)]
pub struct Point<F: Float> {
    pub pos: Vec2<F>,
    pub prev_pos: Vec2<F>,
    pub pinned: bool,
}

impl<F: Float> Point<F> {
    /// A free point at rest.
    pub fn new(pos: Vec2<F>) -> Self {
        Point { pos, prev_pos: pos, pinned: false }
    }

    /// A pinned point at rest.
    pub fn pinned(pos: Vec2<F>) -> Self {
        Point { pos, prev_pos: pos, pinned: true }
    }

    /// One step of unconstrained Verlet integration.
    ///
    /// `gravity` is a per-tick displacement, not scaled by a time step.
    pub fn integrate(&mut self, gravity: Vec2<F>, damping: F) {
        if self.pinned {
            return;
        }
        let velocity = (self.pos - self.prev_pos).scale(damping);
        self.prev_pos = self.pos;
        self.pos = self.pos + velocity + gravity;
    }

    /// Implicit velocity in world units per tick.
    pub fn velocity(&self) -> Vec2<F> {
        self.pos - self.prev_pos
    }

    /// Place the point and drop any velocity it carried.
    pub fn snap_to(&mut self, pos: Vec2<F>) {
        self.pos = pos;
        self.prev_pos = pos;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn integrate_applies_gravity_from_rest() {
        let mut p = Point::new(Vec2::new(0.0f32, 0.0));
        p.integrate(Vec2::new(0.0, 1.0), 0.99);
        assert_eq!(p.pos, Vec2::new(0.0, 1.0));
        assert_eq!(p.prev_pos, Vec2::new(0.0, 0.0));
    }

    #[test]
    fn integrate_carries_damped_velocity() {
        let mut p = Point::new(Vec2::new(10.0f32, 0.0));
        p.prev_pos = Vec2::new(0.0, 0.0);
        p.integrate(Vec2::zero(), 0.5);
        assert_eq!(p.pos, Vec2::new(15.0, 0.0));
    }

    #[test]
    fn pinned_point_ignores_integration() {
        let mut p = Point::pinned(Vec2::new(5.0f32, 5.0));
        p.integrate(Vec2::new(1000.0, 1000.0), 1.0);
        assert_eq!(p.pos, Vec2::new(5.0, 5.0));
    }

    #[test]
    fn snap_erases_velocity() {
        let mut p = Point::new(Vec2::new(1.0f32, 1.0));
        p.prev_pos = Vec2::new(0.0, 0.0);
        p.snap_to(Vec2::new(3.0, 4.0));
        assert_eq!(p.velocity(), Vec2::zero());
    }
}
