//! Rope parameters, solver constants, and per-tick inputs.

use crate::error::{RopeError, RopeResult};
use crate::float::Float;
use crate::vec::Vec2;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// Relaxation passes per tick. Not an exact solve; fewer passes make the
/// rope visibly stretchier.
pub const RELAXATION_ITERATIONS: usize = 25;
/// Rest length of each segment relative to the construction spacing.
pub const SLACK_FACTOR: f64 = 1.5;
/// Added to a body's bounding radius when pushing points out.
pub const COLLISION_BUFFER: f64 = 4.0;
/// Inset from the world edges used by the boundary clamp.
pub const BOUNDARY_MARGIN: f64 = 5.0;
/// Fraction of velocity kept, reflected, when a point hits the world edge.
pub const BOUNCE_DAMPING: f64 = 0.5;
/// Force per unit of stretch fed back into attached bodies.
pub const TENSION_COEFFICIENT: f64 = 0.001;
/// Distances below this are treated as degenerate and skipped.
pub const EPSILON: f64 = 1e-4;

/// Configuration for a single rope.
///
/// # Builder Pattern
/// ```
/// use tether::config::RopeConfig;
///
/// let config: RopeConfig<f32> = RopeConfig::new()
///     .with_stiffness(0.8)
///     .with_damping(0.98);
/// assert_eq!(config.iterations, 25);
/// ```
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct RopeConfig<F: Float> {
    /// Fraction of the overshoot corrected per relaxation pass, in (0, 1].
    pub stiffness: F,
    /// Fraction of velocity kept each tick, in (0, 1]. Default: 0.99.
    pub damping: F,
    /// Relaxation passes per tick. Default: [`RELAXATION_ITERATIONS`].
    pub iterations: usize,
    /// Default: [`TENSION_COEFFICIENT`].
    pub tension_coefficient: F,
    /// Default: [`COLLISION_BUFFER`].
    pub collision_buffer: F,
    /// Default: [`BOUNDARY_MARGIN`].
    pub boundary_margin: F,
    /// Default: [`BOUNCE_DAMPING`].
    pub bounce_damping: F,
}

impl<F: Float> RopeConfig<F> {
    pub fn new() -> Self {
        RopeConfig {
            stiffness: F::one(),
            damping: F::from_f64(0.99),
            iterations: RELAXATION_ITERATIONS,
            tension_coefficient: F::from_f64(TENSION_COEFFICIENT),
            collision_buffer: F::from_f64(COLLISION_BUFFER),
            boundary_margin: F::from_f64(BOUNDARY_MARGIN),
            bounce_damping: F::from_f64(BOUNCE_DAMPING),
        }
    }

    pub fn with_stiffness(mut self, stiffness: F) -> Self {
        self.stiffness = stiffness;
        self
    }

    pub fn with_damping(mut self, damping: F) -> Self {
        self.damping = damping;
        self
    }

    pub fn with_iterations(mut self, iterations: usize) -> Self {
        self.iterations = iterations;
        self
    }

    pub fn with_tension_coefficient(mut self, coefficient: F) -> Self {
        self.tension_coefficient = coefficient;
        self
    }

    pub fn with_collision_buffer(mut self, buffer: F) -> Self {
        self.collision_buffer = buffer;
        self
    }

    pub fn with_boundary_margin(mut self, margin: F) -> Self {
        self.boundary_margin = margin;
        self
    }

    pub fn with_bounce_damping(mut self, bounce: F) -> Self {
        self.bounce_damping = bounce;
        self
    }

    /// Check stiffness and damping lie in (0, 1].
    pub fn validate(&self) -> RopeResult<()> {
        if !in_unit_interval(self.stiffness) {
            return Err(RopeError::InvalidStiffness);
        }
        if !in_unit_interval(self.damping) {
            return Err(RopeError::InvalidDamping);
        }
        Ok(())
    }
}

impl<F: Float> Default for RopeConfig<F> {
    fn default() -> Self {
        Self::new()
    }
}

fn in_unit_interval<F: Float>(v: F) -> bool {
    v.is_finite() && v > F::zero() && v <= F::one()
}

/// World rectangle `[0, width] x [0, height]` that free points stay inside.
#[derive(Copy, Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct WorldBounds<F: Float> {
    pub width: F,
    pub height: F,
}

impl<F: Float> WorldBounds<F> {
    pub fn new(width: F, height: F) -> Self {
        WorldBounds { width, height }
    }
}

/// Scene state handed to a rope for one tick.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct StepInput<F: Float> {
    /// Displacement added to every free point per tick.
    pub gravity: Vec2<F>,
    /// `None` disables the boundary clamp.
    pub bounds: Option<WorldBounds<F>>,
}

impl<F: Float> StepInput<F> {
    pub fn new(gravity: Vec2<F>) -> Self {
        StepInput { gravity, bounds: None }
    }

    pub fn with_bounds(mut self, width: F, height: F) -> Self {
        self.bounds = Some(WorldBounds::new(width, height));
        self
    }
}
