//! The rope solver: a chain of Verlet points held by unilateral distance
//! constraints, anchored at both ends, colliding with host bodies, and pulling
//! back on whatever it is attached to.
//!
//! A tick runs in a fixed order:
//!
//! 1. both endpoints snap to their anchors (no inherited velocity)
//! 2. free points integrate under gravity
//! 3. free points are clamped to the world bounds
//! 4. free points are pushed out of every non-attached body
//! 5. [`RopeConfig::iterations`] relaxation passes, each one solving every
//!    constraint, re-running the body push-out and re-syncing the endpoints
//! 6. tension from the total stretch is fed back into attached bodies

use crate::anchor::{find_body, Anchor, Attachment, RopeEnd};
use crate::body::{BodyHandle, RigidBody};
use crate::collision::{clamp_to_bounds, BodyCircle};
use crate::config::{RopeConfig, StepInput, EPSILON, SLACK_FACTOR};
use crate::constraint::DistanceConstraint;
use crate::error::{RopeError, RopeResult};
use crate::float::Float;
use crate::observer::StepObserver;
use crate::point::Point;
use crate::vec::Vec2;
use alloc::vec::Vec as AllocVec;
use core::fmt;
use tracing::{debug, trace};

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// Stable identifier of a rope within a scene.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct RopeId(pub u32);

impl fmt::Display for RopeId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "rope#{}", self.0)
    }
}

/// What one tick did, as seen from outside the rope.
#[derive(Copy, Clone, Debug, Default, PartialEq)]
pub struct TensionReport<F: Float> {
    /// Sum of segment lengths after relaxation.
    pub current_length: F,
    /// Fixed total rest length.
    pub rest_length: F,
    /// `current_length - rest_length`, or zero when slack.
    pub stretch: F,
    /// Force magnitude applied to each attached dynamic body.
    pub tension: F,
    /// Body push-outs performed during the tick.
    pub collisions: usize,
}

/// Tension magnitude for a rope of `current` length and `rest` rest length.
///
/// Zero while the rope is slack, linear in the stretch beyond that.
pub fn tension_magnitude<F: Float>(current: F, rest: F, coefficient: F) -> F {
    if current <= rest {
        F::zero()
    } else {
        (current - rest) * coefficient
    }
}

/// A rope connector between two anchors.
#[derive(Clone, Debug)]
pub struct Rope<F: Float> {
    id: RopeId,
    points: AllocVec<Point<F>>,
    constraints: AllocVec<DistanceConstraint<F>>,
    anchors: [Anchor<F>; 2],
    config: RopeConfig<F>,
    rest_length: F,
}

impl<F: Float> Rope<F> {
    /// Lay out `segments + 1` points evenly from `start` to `end`.
    ///
    /// Both ends start pinned to their construction coordinates. Each segment
    /// gets a rest length of [`SLACK_FACTOR`] times the spacing, so the fresh
    /// rope hangs slack.
    pub fn new(
        id: RopeId,
        start: Vec2<F>,
        end: Vec2<F>,
        segments: usize,
        config: RopeConfig<F>,
    ) -> RopeResult<Self> {
        if segments < 1 {
            return Err(RopeError::InsufficientSegments { segments });
        }
        if !start.is_finite() || !end.is_finite() {
            return Err(RopeError::NonFiniteCoordinate);
        }
        config.validate()?;

        let count = F::from_usize(segments);
        let rest = start.distance(end) / count * F::from_f64(SLACK_FACTOR);

        let mut points = AllocVec::with_capacity(segments + 1);
        for i in 0..=segments {
            let pos = start.lerp(end, F::from_usize(i) / count);
            if i == 0 || i == segments {
                points.push(Point::pinned(pos));
            } else {
                points.push(Point::new(pos));
            }
        }

        let constraints: AllocVec<_> = (0..segments)
            .map(|i| DistanceConstraint::new(i, i + 1, rest))
            .collect();
        let rest_length = constraints
            .iter()
            .fold(F::zero(), |acc, c| acc + c.rest_length);

        debug!(rope = id.0, segments, "rope created");

        Ok(Rope {
            id,
            points,
            constraints,
            anchors: [Anchor::Fixed(start), Anchor::Fixed(end)],
            config,
            rest_length,
        })
    }

    /// Bind `end` to a point on a host body, given in the body's local frame.
    pub fn attach_to_body(&mut self, body: BodyHandle, local_offset: Vec2<F>, end: RopeEnd) {
        debug!(rope = self.id.0, ?body, ?end, "rope attached to body");
        let idx = self.endpoint_index(end);
        self.points[idx].pinned = true;
        self.anchors[end.slot()] = Anchor::Body(Attachment { body, local_offset, end });
    }

    /// Pin `end` to a world coordinate, replacing any body attachment.
    pub fn set_fixed_anchor(&mut self, end: RopeEnd, position: Vec2<F>) {
        let idx = self.endpoint_index(end);
        self.points[idx].pinned = true;
        self.anchors[end.slot()] = Anchor::Fixed(position);
    }

    /// Release a body attachment; the end stays pinned where it currently is.
    pub fn detach(&mut self, end: RopeEnd) -> Option<Attachment<F>> {
        let slot = end.slot();
        let previous = self.anchors[slot].attachment().copied();
        if previous.is_some() {
            let pos = self.points[self.endpoint_index(end)].pos;
            self.anchors[slot] = Anchor::Fixed(pos);
            debug!(rope = self.id.0, ?end, "rope detached from body");
        }
        previous
    }

    pub fn anchor(&self, end: RopeEnd) -> &Anchor<F> {
        &self.anchors[end.slot()]
    }

    pub fn attachment(&self, end: RopeEnd) -> Option<&Attachment<F>> {
        self.anchors[end.slot()].attachment()
    }

    /// Advance the rope by one tick. See the module docs for the phases.
    ///
    /// Bodies carrying one of this rope's attachments never collide with it.
    pub fn update<B: RigidBody<F>, O: StepObserver<F>>(
        &mut self,
        input: &StepInput<F>,
        bodies: &mut [B],
        observer: &mut O,
    ) -> TensionReport<F> {
        let epsilon = F::from_f64(EPSILON);

        for a in self.anchors.iter().filter_map(Anchor::attachment) {
            if find_body::<F, B>(bodies, a.body).is_none() {
                debug!(rope = self.id.0, body = ?a.body, "attached body missing, holding endpoint");
            }
        }

        self.sync_endpoints(bodies);
        observer.on_endpoint_sync();

        for p in self.points.iter_mut() {
            p.integrate(input.gravity, self.config.damping);
        }
        observer.on_integrate();

        if let Some(bounds) = input.bounds {
            for p in self.points.iter_mut() {
                clamp_to_bounds(p, &bounds, self.config.boundary_margin, self.config.bounce_damping);
            }
        }

        // Bodies only receive forces during the tick, so their circles hold.
        let circles = self.collision_circles(bodies);
        let mut collisions = self.push_out_of_bodies(&circles, epsilon, observer);

        for i in 0..self.config.iterations {
            for c in self.constraints.iter() {
                c.solve(&mut self.points, self.config.stiffness, epsilon);
            }
            collisions += self.push_out_of_bodies(&circles, epsilon, observer);
            self.sync_endpoints(bodies);
            observer.on_relaxation_iteration(i);
        }

        let report = self.apply_tension(bodies, collisions, epsilon);
        observer.on_tension(report.tension);
        trace!(
            rope = self.id.0,
            collisions,
            stretch = ?report.stretch,
            tension = ?report.tension,
            "rope tick"
        );
        observer.on_step_complete();
        report
    }

    /// Whether `point` lies within `threshold` of any segment.
    pub fn is_near_point(&self, point: Vec2<F>, threshold: F) -> bool {
        self.constraints.iter().any(|c| {
            point.distance_to_segment(self.points[c.a].pos, self.points[c.b].pos) < threshold
        })
    }

    /// Sum of the current segment lengths.
    pub fn total_length(&self) -> F {
        self.constraints
            .iter()
            .fold(F::zero(), |acc, c| acc + c.current_length(&self.points))
    }

    /// Fixed total rest length.
    pub fn rest_length(&self) -> F {
        self.rest_length
    }

    /// How far the rope is stretched past its rest length, zero when slack.
    pub fn stretch(&self) -> F {
        (self.total_length() - self.rest_length).max(F::zero())
    }

    pub fn id(&self) -> RopeId {
        self.id
    }

    pub fn config(&self) -> &RopeConfig<F> {
        &self.config
    }

    pub fn points(&self) -> &[Point<F>] {
        &self.points
    }

    pub fn point(&self, index: usize) -> &Point<F> {
        &self.points[index]
    }

    /// Direct access for hosts that teleport or seed points.
    ///
    /// Pinned endpoints are overwritten from their anchors on the next tick.
    pub fn point_mut(&mut self, index: usize) -> &mut Point<F> {
        &mut self.points[index]
    }

    pub fn positions(&self) -> AllocVec<Vec2<F>> {
        self.points.iter().map(|p| p.pos).collect()
    }

    pub fn constraints(&self) -> &[DistanceConstraint<F>] {
        &self.constraints
    }

    pub fn len(&self) -> usize {
        self.points.len()
    }

    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }

    pub fn segment_count(&self) -> usize {
        self.constraints.len()
    }

    pub fn endpoint_index(&self, end: RopeEnd) -> usize {
        match end {
            RopeEnd::Start => 0,
            RopeEnd::End => self.points.len() - 1,
        }
    }

    fn sync_endpoints<B: RigidBody<F>>(&mut self, bodies: &[B]) {
        for end in [RopeEnd::Start, RopeEnd::End] {
            let idx = self.endpoint_index(end);
            let target = self.anchors[end.slot()]
                .resolve(bodies)
                .unwrap_or(self.points[idx].pos);
            self.points[idx].snap_to(target);
        }
    }

    fn collision_circles<B: RigidBody<F>>(&self, bodies: &[B]) -> AllocVec<BodyCircle<F>> {
        let attached: AllocVec<BodyHandle> = self
            .anchors
            .iter()
            .filter_map(|a| a.attachment().map(|a| a.body))
            .collect();
        bodies
            .iter()
            .filter(|b| !attached.contains(&b.handle()))
            .map(|b| BodyCircle::from_body(b, self.config.collision_buffer))
            .collect()
    }

    fn push_out_of_bodies<O: StepObserver<F>>(
        &mut self,
        circles: &[BodyCircle<F>],
        epsilon: F,
        observer: &mut O,
    ) -> usize {
        let mut pushed = 0;
        for (i, p) in self.points.iter_mut().enumerate() {
            for circle in circles {
                if circle.push_out(p, epsilon) {
                    observer.on_collision(i);
                    pushed += 1;
                }
            }
        }
        pushed
    }

    fn apply_tension<B: RigidBody<F>>(
        &self,
        bodies: &mut [B],
        collisions: usize,
        epsilon: F,
    ) -> TensionReport<F> {
        let current_length = self.total_length();
        let tension = tension_magnitude(current_length, self.rest_length, self.config.tension_coefficient);
        let report = TensionReport {
            current_length,
            rest_length: self.rest_length,
            stretch: (current_length - self.rest_length).max(F::zero()),
            tension,
            collisions,
        };
        if tension <= F::zero() {
            return report;
        }

        let last = self.points.len() - 1;
        for a in self.anchors.iter().filter_map(Anchor::attachment) {
            let Some(bi) = find_body::<F, B>(bodies, a.body) else {
                continue;
            };
            let body = &mut bodies[bi];
            if body.is_static() {
                continue;
            }
            let (anchor, neighbour) = match a.end {
                RopeEnd::Start => (self.points[0].pos, self.points[1].pos),
                RopeEnd::End => (self.points[last].pos, self.points[last - 1].pos),
            };
            let Some(dir) = (neighbour - anchor).try_normalize(epsilon) else {
                continue;
            };
            let at = body.position();
            body.apply_force(at, dir.scale(tension));
        }
        report
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::body::PolygonBody;
    use crate::observer::NoOpStepObserver;

    fn straight(segments: usize) -> Rope<f32> {
        Rope::new(
            RopeId(1),
            Vec2::new(0.0, 0.0),
            Vec2::new(100.0, 0.0),
            segments,
            RopeConfig::default(),
        )
        .unwrap()
    }

    #[test]
    fn construction_layout() {
        let rope = straight(4);
        assert_eq!(rope.len(), 5);
        assert_eq!(rope.segment_count(), 4);
        assert_eq!(rope.point(2).pos, Vec2::new(50.0, 0.0));
        assert!(rope.point(0).pinned && rope.point(4).pinned);
        assert!(!rope.point(1).pinned);
        for c in rope.constraints() {
            assert_eq!(c.b, c.a + 1);
            assert!((c.rest_length - 37.5).abs() < 1e-4);
        }
        assert!((rope.rest_length() - 150.0).abs() < 1e-3);
    }

    #[test]
    fn zero_segments_rejected() {
        let err = Rope::<f32>::new(RopeId(0), Vec2::zero(), Vec2::new(1.0, 0.0), 0, RopeConfig::new());
        assert_eq!(err.unwrap_err(), RopeError::InsufficientSegments { segments: 0 });
    }

    #[test]
    fn non_finite_endpoint_rejected() {
        let err = Rope::<f32>::new(
            RopeId(0),
            Vec2::new(f32::NAN, 0.0),
            Vec2::new(1.0, 0.0),
            3,
            RopeConfig::new(),
        );
        assert_eq!(err.unwrap_err(), RopeError::NonFiniteCoordinate);
    }

    #[test]
    fn tension_is_zero_until_stretched() {
        assert_eq!(tension_magnitude(10.0f32, 10.0, 0.5), 0.0);
        assert_eq!(tension_magnitude(9.0f32, 10.0, 0.5), 0.0);
        assert!(tension_magnitude(10.5f32, 10.0, 0.5) > 0.0);
        assert!(tension_magnitude(12.0f32, 10.0, 0.5) > tension_magnitude(11.0f32, 10.0, 0.5));
    }

    #[test]
    fn detach_keeps_endpoint_in_place() {
        let handle = BodyHandle::new(0, 0);
        let mut bodies = [PolygonBody::rectangle(handle, Vec2::new(20.0f32, 30.0), 5.0, 5.0)];
        let mut rope = straight(3);
        rope.attach_to_body(handle, Vec2::zero(), RopeEnd::Start);
        rope.update(&StepInput::new(Vec2::zero()), &mut bodies, &mut NoOpStepObserver);
        assert_eq!(rope.point(0).pos, Vec2::new(20.0, 30.0));

        let released = rope.detach(RopeEnd::Start).unwrap();
        assert_eq!(released.body, handle);
        assert_eq!(rope.anchor(RopeEnd::Start), &Anchor::Fixed(Vec2::new(20.0, 30.0)));
        assert!(rope.detach(RopeEnd::Start).is_none());
    }

    #[test]
    fn missing_body_holds_endpoint() {
        let mut rope = straight(3);
        rope.attach_to_body(BodyHandle::new(9, 0), Vec2::zero(), RopeEnd::End);
        let mut bodies: [PolygonBody<f32>; 0] = [];
        rope.update(&StepInput::new(Vec2::new(0.0, 1.0)), &mut bodies, &mut NoOpStepObserver);
        assert_eq!(rope.point(3).pos, Vec2::new(100.0, 0.0));
    }

    #[test]
    fn near_point_uses_segments() {
        let rope = straight(2);
        assert!(rope.is_near_point(Vec2::new(25.0, 3.0), 5.0));
        assert!(!rope.is_near_point(Vec2::new(25.0, 8.0), 5.0));
        assert!(!rope.is_near_point(Vec2::new(-10.0, 0.0), 5.0));
    }
}
