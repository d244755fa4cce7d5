//! Crate-level error type

use thiserror::Error;

use crate::config::ConfigError;
use crate::render::BackendError;
use crate::text::FontError;

/// Errors surfaced to applications embedding the swarm
#[derive(Error, Debug)]
pub enum SwarmError {
    /// Font loading failed
    #[error("Font error: {0}")]
    Font(#[from] FontError),

    /// Rendering backend failed
    #[error("Backend error: {0}")]
    Backend(#[from] BackendError),

    /// Configuration could not be loaded or was invalid
    #[error("Config error: {0}")]
    Config(#[from] ConfigError),
}
