//! # Glyph Swarm
//!
//! Renders a word as particle clouds that converge from random 3D positions
//! into the shape of its glyphs and then keep shimmering.
//!
//! ## Pieces
//!
//! - **Text**: font loading, glyph tessellation and word layout
//! - **Particles**: group construction, per-frame stepping and the scene set
//! - **Render**: the point-cloud backend seam, a headless backend and the camera
//! - **Controller**: word replacement and ticking for one scene
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use glyph_swarm::prelude::*;
//! use rand::rngs::StdRng;
//! use rand::SeedableRng;
//!
//! let config = SwarmConfig::default();
//! let backend = HeadlessBackend::new(1280, 720);
//! let mut controller = WordController::new(&config, backend, StdRng::from_entropy());
//!
//! let font = Font::load(DEFAULT_FONT_PATH)?;
//! controller.install_font(font);
//! controller.set_word("HELLO");
//! controller.generate();
//!
//! for frame in 0..120 {
//!     controller.tick(f64::from(frame) * 16.0);
//! }
//! # Ok::<(), glyph_swarm::SwarmError>(())
//! ```

#![warn(missing_docs)]

pub mod config;
pub mod controller;
pub mod foundation;
pub mod particles;
pub mod render;
pub mod text;

mod engine;
mod error;

pub use engine::FrameLoop;
pub use error::SwarmError;

/// Common imports for crate users
pub mod prelude {
    pub use crate::{
        config::{Config, ConfigError, MotionConfig, SwarmConfig},
        controller::{GenerateOutcome, SkipReason, WordController},
        foundation::math::Vec3,
        particles::{AnimationStepper, ParticleFactory, ParticleGroup, SceneSet, SceneStats},
        render::{Camera, HeadlessBackend, PointCloudBackend, PointCloudHandle},
        text::{Font, FontLoader, FontState, Glyph, GlyphSource, GlyphStyle, DEFAULT_FONT_PATH},
        FrameLoop, SwarmError,
    };
}
