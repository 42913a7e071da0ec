//! Hooks for watching a rope tick unfold.

use crate::float::Float;

/// Trait for observing rope updates.
///
/// Useful for debug overlays, profiling, or tests that need to see inside a
/// tick. All methods default to no-ops.
pub trait StepObserver<F: Float> {
    /// Called after both endpoints have been synced to their anchors.
    fn on_endpoint_sync(&mut self) {}

    /// Called after all free points have been integrated.
    fn on_integrate(&mut self) {}

    /// Called whenever a point is pushed out of a body.
    fn on_collision(&mut self, _point: usize) {}

    /// Called after each relaxation pass.
    fn on_relaxation_iteration(&mut self, _iteration: usize) {}

    /// Called with the tension magnitude once per tick, zero when slack.
    fn on_tension(&mut self, _tension: F) {}

    /// Called when the tick is fully complete.
    fn on_step_complete(&mut self) {}
}

/// Observer that ignores everything.
pub struct NoOpStepObserver;

impl<F: Float> StepObserver<F> for NoOpStepObserver {}
