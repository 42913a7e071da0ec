//! A collection of ropes sharing one scene, with picking and pulley driving.

use crate::body::RigidBody;
use crate::config::{RopeConfig, StepInput};
use crate::error::{RopeError, RopeResult};
use crate::float::Float;
use crate::observer::StepObserver;
use crate::pulley::Pulley;
use crate::rope::{Rope, RopeId, TensionReport};
use crate::vec::Vec2;
use alloc::vec::Vec as AllocVec;
use tracing::debug;

/// Owns the ropes of a scene and hands out stable ids.
///
/// Ropes update in insertion order, so a scene replays identically given the
/// same inputs.
pub struct RopeSet<F: Float> {
    ropes: AllocVec<Rope<F>>,
    next_id: u32,
}

impl<F: Float> RopeSet<F> {
    pub fn new() -> Self {
        RopeSet { ropes: AllocVec::new(), next_id: 0 }
    }

    /// Build a rope and add it to the scene.
    pub fn insert(
        &mut self,
        start: Vec2<F>,
        end: Vec2<F>,
        segments: usize,
        config: RopeConfig<F>,
    ) -> RopeResult<RopeId> {
        let id = RopeId(self.next_id);
        let next_id = self.next_id.checked_add(1).ok_or(RopeError::IdsExhausted)?;
        let rope = Rope::new(id, start, end, segments, config)?;
        self.next_id = next_id;
        self.ropes.push(rope);
        Ok(id)
    }

    pub fn get(&self, id: RopeId) -> Option<&Rope<F>> {
        self.ropes.iter().find(|r| r.id() == id)
    }

    pub fn get_mut(&mut self, id: RopeId) -> Option<&mut Rope<F>> {
        self.ropes.iter_mut().find(|r| r.id() == id)
    }

    pub fn remove(&mut self, id: RopeId) -> RopeResult<Rope<F>> {
        let idx = self
            .ropes
            .iter()
            .position(|r| r.id() == id)
            .ok_or(RopeError::UnknownRope(id))?;
        debug!(rope = id.0, "rope removed");
        Ok(self.ropes.remove(idx))
    }

    pub fn len(&self) -> usize {
        self.ropes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.ropes.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &Rope<F>> {
        self.ropes.iter()
    }

    pub fn clear(&mut self) {
        self.ropes.clear();
    }

    /// Tick every rope, then spin the pulleys riding on them.
    ///
    /// Pulleys whose rope no longer exists are left untouched.
    pub fn update<B: RigidBody<F>, O: StepObserver<F>>(
        &mut self,
        input: &StepInput<F>,
        bodies: &mut [B],
        pulleys: &mut [Pulley<F>],
        observer: &mut O,
    ) -> AllocVec<(RopeId, TensionReport<F>)> {
        let reports = self
            .ropes
            .iter_mut()
            .map(|rope| (rope.id(), rope.update(input, bodies, observer)))
            .collect();
        for pulley in pulleys.iter_mut() {
            if let Some(rope) = self.get(pulley.rope) {
                pulley.follow(rope);
            }
        }
        reports
    }

    /// First rope passing within `threshold` of `point`.
    pub fn pick(&self, point: Vec2<F>, threshold: F) -> Option<RopeId> {
        self.ropes
            .iter()
            .find(|r| r.is_near_point(point, threshold))
            .map(Rope::id)
    }
}

impl<F: Float> Default for RopeSet<F> {
    fn default() -> Self {
        Self::new()
    }
}
