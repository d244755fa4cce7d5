//! Rendering seam
//!
//! Particle groups are drawn as point clouds through a [`PointCloudBackend`].
//! The crate ships a [`HeadlessBackend`]; GPU backends live with the host
//! application.

pub mod backend;
pub mod camera;
pub mod headless;

pub use backend::{BackendError, BackendResult, PointCloudBackend, PointCloudHandle};
pub use camera::Camera;
pub use headless::{HeadlessBackend, HeadlessStats, PointCloud};
