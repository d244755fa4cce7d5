//! Backend abstraction for point-cloud rendering
//!
//! The choreography code never talks to a GPU directly. It creates one point
//! cloud per particle group, pushes fresh positions every tick and removes
//! clouds when a word is replaced.

use crate::foundation::math::Vec3;
use crate::render::Camera;

slotmap::new_key_type! {
    /// Opaque handle to a point cloud owned by a backend
    pub struct PointCloudHandle;
}

/// Result type for backend operations
pub type BackendResult<T> = Result<T, BackendError>;

/// Errors reported by rendering backends
#[derive(Debug, thiserror::Error)]
pub enum BackendError {
    /// The handle was never issued or has already been removed
    #[error("Unknown point cloud handle {0:?}")]
    UnknownHandle(PointCloudHandle),

    /// A position upload did not match the cloud's vertex count
    #[error("Position buffer length mismatch: expected {expected}, got {actual}")]
    LengthMismatch {
        /// Length the cloud was created with
        expected: usize,
        /// Length that was supplied
        actual: usize,
    },
}

/// Rendering collaborator for particle groups
pub trait PointCloudBackend {
    /// Create a point cloud from flat `(x, y, z)` positions
    fn create_point_cloud(
        &mut self,
        positions: &[f32],
        color: Vec3,
        point_size: f32,
    ) -> BackendResult<PointCloudHandle>;

    /// Remove a point cloud from the scene and release its buffers
    fn remove_point_cloud(&mut self, handle: PointCloudHandle) -> BackendResult<()>;

    /// Replace the positions of a cloud and flag them for re-upload
    fn mark_positions_dirty(&mut self, handle: PointCloudHandle, positions: &[f32]) -> BackendResult<()>;

    /// Resize the drawing surface
    fn resize(&mut self, width: u32, height: u32);

    /// Draw every live point cloud from the camera's point of view
    fn render_frame(&mut self, camera: &Camera) -> BackendResult<()>;
}
