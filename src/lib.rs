//! Verlet rope connectors for 2D rigid-body scenes.
//!
//! `tether` simulates a rope as a chain of Verlet points joined by unilateral
//! distance constraints. Each end is held either at a fixed world coordinate
//! or at a point on a host rigid body. Every tick the rope sags under gravity,
//! stays inside the world, slides around bodies (approximated by bounding
//! circles), and pulls on the bodies it is attached to once stretched.
//!
//! The host owns its bodies. They are handed to [`Rope::update`] each tick
//! through the [`RigidBody`] trait; ropes keep only [`BodyHandle`]s.
//!
//! # Features
//!
//! - **Unilateral constraints**: ropes resist stretching, never compression
//! - **Fixed relaxation budget**: 25 passes per tick, not an exact solve
//! - **Anchors**: fixed points or rotating body-local offsets
//! - **Tension feedback**: stretch turns into forces on attached bodies
//! - **Presentation**: smoothed paths, picking, cosmetic pulleys
//! - **Observable**: Monitor ticks via the `StepObserver` trait and `tracing`
//! - **`no_std` compatible**: Works in embedded and WASM environments

#![no_std]

extern crate alloc;

pub mod float;
pub mod vec;
pub mod point;
pub mod constraint;
pub mod body;
pub mod anchor;
pub mod collision;
pub mod rope;
pub mod render;
pub mod pulley;
pub mod scene;
pub mod observer;
pub mod config;
pub mod error;

// Re-export primary API
pub use float::Float;
pub use vec::Vec2;
pub use point::Point;
pub use constraint::DistanceConstraint;
pub use body::{bounding_radius, BodyHandle, PolygonBody, RigidBody};
pub use anchor::{Anchor, Attachment, RopeEnd};
pub use collision::BodyCircle;
pub use rope::{tension_magnitude, Rope, RopeId, TensionReport};
pub use render::{PathCommand, RenderSurface};
pub use pulley::Pulley;
pub use scene::RopeSet;
pub use config::{RopeConfig, StepInput, WorldBounds, RELAXATION_ITERATIONS};
pub use observer::{StepObserver, NoOpStepObserver};
pub use error::{RopeError, RopeResult};
