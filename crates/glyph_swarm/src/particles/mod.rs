//! Particle choreography
//!
//! Groups of particles that start scattered, converge on glyph vertices and
//! keep shimmering.

pub mod factory;
pub mod group;
pub mod scene_set;
pub mod stepper;

pub use factory::{random_color, ParticleFactory};
pub use group::ParticleGroup;
pub use scene_set::{SceneSet, SceneStats};
pub use stepper::{AnimationStepper, StepReport};
