//! What holds each end of a rope in place.

use crate::body::{BodyHandle, RigidBody};
use crate::float::Float;
use crate::vec::Vec2;

/// One of the two rope endpoints.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub enum RopeEnd {
    Start,
    End,
}

impl RopeEnd {
    /// Slot in a two-element per-end array.
    pub(crate) fn slot(self) -> usize {
        match self {
            RopeEnd::Start => 0,
            RopeEnd::End => 1,
        }
    }
}

/// Binding between a rope endpoint and a point fixed in a body's local frame.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct Attachment<F: Float> {
    pub body: BodyHandle,
    pub local_offset: Vec2<F>,
    pub end: RopeEnd,
}

impl<F: Float> Attachment<F> {
    /// World position of the anchor under the body's current transform.
    pub fn world_anchor<B: RigidBody<F> + ?Sized>(&self, body: &B) -> Vec2<F> {
        body.local_to_world(self.local_offset)
    }
}

/// Where an endpoint is held. Both rope ends are always held by something.
#[derive(Copy, Clone, Debug, PartialEq)]
pub enum Anchor<F: Float> {
    /// A literal world coordinate.
    Fixed(Vec2<F>),
    /// A point riding on a host body.
    Body(Attachment<F>),
}

impl<F: Float> Anchor<F> {
    pub fn attachment(&self) -> Option<&Attachment<F>> {
        match self {
            Anchor::Fixed(_) => None,
            Anchor::Body(a) => Some(a),
        }
    }

    /// Resolve the anchor against the scene.
    ///
    /// `None` when the attached body is not in `bodies`, i.e. the handle is
    /// stale or the host left the body out this tick.
    pub fn resolve<B: RigidBody<F>>(&self, bodies: &[B]) -> Option<Vec2<F>> {
        match self {
            Anchor::Fixed(pos) => Some(*pos),
            Anchor::Body(a) => find_body(bodies, a.body).map(|i| a.world_anchor(&bodies[i])),
        }
    }
}

/// Index of the body carrying `handle`, if any.
pub fn find_body<F: Float, B: RigidBody<F>>(bodies: &[B], handle: BodyHandle) -> Option<usize> {
    bodies.iter().position(|b| b.handle() == handle)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::body::PolygonBody;
    use alloc::vec;

    #[test]
    fn fixed_anchor_resolves_without_bodies() {
        let anchor = Anchor::Fixed(Vec2::new(3.0f32, 4.0));
        let bodies: [PolygonBody<f32>; 0] = [];
        assert_eq!(anchor.resolve(&bodies), Some(Vec2::new(3.0, 4.0)));
    }

    #[test]
    fn body_anchor_follows_transform() {
        let handle = BodyHandle::new(2, 0);
        let mut body = PolygonBody::rectangle(handle, Vec2::new(0.0f64, 0.0), 5.0, 5.0);
        body.set_transform(Vec2::new(100.0, 50.0), core::f64::consts::FRAC_PI_2);
        let anchor = Anchor::Body(Attachment {
            body: handle,
            local_offset: Vec2::new(10.0, 0.0),
            end: RopeEnd::Start,
        });
        let pos = anchor.resolve(&vec![body]).unwrap();
        assert!((pos.x - 100.0).abs() < 1e-9);
        assert!((pos.y - 60.0).abs() < 1e-9);
    }

    #[test]
    fn stale_generation_does_not_resolve() {
        let body = PolygonBody::rectangle(BodyHandle::new(2, 1), Vec2::new(0.0f32, 0.0), 5.0, 5.0);
        let anchor = Anchor::Body(Attachment {
            body: BodyHandle::new(2, 0),
            local_offset: Vec2::zero(),
            end: RopeEnd::End,
        });
        assert_eq!(anchor.resolve(&[body]), None);
    }
}
