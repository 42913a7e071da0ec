//! The rigid-body capability the rope reads from and pushes forces into.
//!
//! The solver never owns bodies. Hosts pass a slice of them into every
//! [`Rope::update`](crate::rope::Rope::update) call, and ropes refer to them
//! only through a [`BodyHandle`].

use crate::float::Float;
use crate::vec::Vec2;
use alloc::vec::Vec as AllocVec;

/// Generation-tagged, non-owning reference to a host body.
///
/// Hosts that recycle slots bump `generation`, so a rope still holding the old
/// handle stops matching instead of silently binding to the new occupant.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct BodyHandle {
    pub index: u32,
    pub generation: u32,
}

impl BodyHandle {
    pub const fn new(index: u32, generation: u32) -> Self {
        BodyHandle { index, generation }
    }
}

/// Read view of an engine body, plus the single write the solver performs.
pub trait RigidBody<F: Float> {
    /// Stable identity used to match rope attachments.
    fn handle(&self) -> BodyHandle;

    /// World position of the body origin.
    fn position(&self) -> Vec2<F>;

    /// Rotation in radians.
    fn angle(&self) -> F;

    /// Polygon outline in world coordinates.
    fn vertices(&self) -> &[Vec2<F>];

    /// Static bodies never receive rope forces.
    fn is_static(&self) -> bool;

    /// Apply a world-space `force` at world-space `point`.
    fn apply_force(&mut self, point: Vec2<F>, force: Vec2<F>);

    /// World position of a point given in the body's rotated local frame.
    fn local_to_world(&self, local: Vec2<F>) -> Vec2<F> {
        self.position() + local.rotate(self.angle())
    }
}

/// Largest distance from the body origin to any of its vertices.
///
/// Zero for a body with no vertices.
pub fn bounding_radius<F: Float, B: RigidBody<F> + ?Sized>(body: &B) -> F {
    let center = body.position();
    body.vertices()
        .iter()
        .fold(F::zero(), |acc, v| acc.max(v.distance(center)))
}

/// Minimal polygon body for hosts without an engine, tests, and demos.
///
/// Vertices are stored in the local frame and re-projected to world space
/// whenever the transform changes. Forces accumulate until [`clear_forces`].
///
/// [`clear_forces`]: PolygonBody::clear_forces
#[derive(Clone, Debug)]
pub struct PolygonBody<F: Float> {
    handle: BodyHandle,
    position: Vec2<F>,
    angle: F,
    local_vertices: AllocVec<Vec2<F>>,
    world_vertices: AllocVec<Vec2<F>>,
    is_static: bool,
    force: Vec2<F>,
    torque: F,
}

impl<F: Float> PolygonBody<F> {
    pub fn new(handle: BodyHandle, position: Vec2<F>, local_vertices: AllocVec<Vec2<F>>) -> Self {
        let mut body = PolygonBody {
            handle,
            position,
            angle: F::zero(),
            world_vertices: AllocVec::with_capacity(local_vertices.len()),
            local_vertices,
            is_static: false,
            force: Vec2::zero(),
            torque: F::zero(),
        };
        body.refresh_vertices();
        body
    }

    /// Axis-aligned box of the given half extents centred on `position`.
    pub fn rectangle(handle: BodyHandle, position: Vec2<F>, half_width: F, half_height: F) -> Self {
        let vertices = alloc::vec![
            Vec2::new(-half_width, -half_height),
            Vec2::new(half_width, -half_height),
            Vec2::new(half_width, half_height),
            Vec2::new(-half_width, half_height),
        ];
        Self::new(handle, position, vertices)
    }

    pub fn with_static(mut self, is_static: bool) -> Self {
        self.is_static = is_static;
        self
    }

    pub fn set_transform(&mut self, position: Vec2<F>, angle: F) {
        self.position = position;
        self.angle = angle;
        self.refresh_vertices();
    }

    /// Net force accumulated since the last clear.
    pub fn force(&self) -> Vec2<F> {
        self.force
    }

    /// Net torque about the body origin accumulated since the last clear.
    pub fn torque(&self) -> F {
        self.torque
    }

    pub fn clear_forces(&mut self) {
        self.force = Vec2::zero();
        self.torque = F::zero();
    }

    fn refresh_vertices(&mut self) {
        self.world_vertices.clear();
        for &v in &self.local_vertices {
            self.world_vertices.push(self.position + v.rotate(self.angle));
        }
    }
}

impl<F: Float> RigidBody<F> for PolygonBody<F> {
    fn handle(&self) -> BodyHandle { self.handle }
    fn position(&self) -> Vec2<F> { self.position }
    fn angle(&self) -> F { self.angle }
    fn vertices(&self) -> &[Vec2<F>] { &self.world_vertices }
    fn is_static(&self) -> bool { self.is_static }

    fn apply_force(&mut self, point: Vec2<F>, force: Vec2<F>) {
        self.force = self.force + force;
        self.torque = self.torque + (point - self.position).cross(force);
    }
}
