//! In-memory backend
//!
//! Keeps every point cloud in host memory and counts uploads and frames.
//! Used by the demo binary and throughout the tests.

use slotmap::SlotMap;

use super::backend::{BackendError, BackendResult, PointCloudBackend, PointCloudHandle};
use crate::foundation::math::{Mat4, Vec3};
use crate::render::Camera;

/// Host-side copy of one point cloud
#[derive(Debug, Clone)]
pub struct PointCloud {
    /// Last uploaded flat positions
    pub positions: Vec<f32>,
    /// Material color
    pub color: Vec3,
    /// Point size
    pub point_size: f32,
    /// Number of position uploads since creation
    pub uploads: u64,
}

/// Statistics for the headless backend
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct HeadlessStats {
    /// Clouds created since construction
    pub total_created: u64,
    /// Clouds removed since construction
    pub total_removed: u64,
    /// Frames rendered since construction
    pub frames_rendered: u64,
}

/// Backend that renders nothing and remembers everything
#[derive(Debug)]
pub struct HeadlessBackend {
    clouds: SlotMap<PointCloudHandle, PointCloud>,
    extent: (u32, u32),
    last_view_projection: Mat4,
    stats: HeadlessStats,
}

impl HeadlessBackend {
    /// Create a backend with the given surface size
    pub fn new(width: u32, height: u32) -> Self {
        Self {
            clouds: SlotMap::with_key(),
            extent: (width, height),
            last_view_projection: Mat4::identity(),
            stats: HeadlessStats::default(),
        }
    }

    /// Look up a live cloud
    pub fn cloud(&self, handle: PointCloudHandle) -> Option<&PointCloud> {
        self.clouds.get(handle)
    }

    /// Number of live clouds
    pub fn cloud_count(&self) -> usize {
        self.clouds.len()
    }

    /// Current surface size
    pub fn extent(&self) -> (u32, u32) {
        self.extent
    }

    /// View-projection matrix of the most recent frame
    pub fn last_view_projection(&self) -> &Mat4 {
        &self.last_view_projection
    }

    /// Lifetime counters
    pub fn stats(&self) -> &HeadlessStats {
        &self.stats
    }
}

impl Default for HeadlessBackend {
    fn default() -> Self {
        Self::new(1280, 720)
    }
}

impl PointCloudBackend for HeadlessBackend {
    fn create_point_cloud(
        &mut self,
        positions: &[f32],
        color: Vec3,
        point_size: f32,
    ) -> BackendResult<PointCloudHandle> {
        let handle = self.clouds.insert(PointCloud {
            positions: positions.to_vec(),
            color,
            point_size,
            uploads: 0,
        });
        self.stats.total_created += 1;
        log::trace!("Created point cloud {handle:?} with {} points", positions.len() / 3);
        Ok(handle)
    }

    fn remove_point_cloud(&mut self, handle: PointCloudHandle) -> BackendResult<()> {
        self.clouds
            .remove(handle)
            .ok_or(BackendError::UnknownHandle(handle))?;
        self.stats.total_removed += 1;
        Ok(())
    }

    fn mark_positions_dirty(&mut self, handle: PointCloudHandle, positions: &[f32]) -> BackendResult<()> {
        let cloud = self
            .clouds
            .get_mut(handle)
            .ok_or(BackendError::UnknownHandle(handle))?;
        if cloud.positions.len() != positions.len() {
            return Err(BackendError::LengthMismatch {
                expected: cloud.positions.len(),
                actual: positions.len(),
            });
        }
        cloud.positions.copy_from_slice(positions);
        cloud.uploads += 1;
        Ok(())
    }

    fn resize(&mut self, width: u32, height: u32) {
        self.extent = (width, height);
    }

    fn render_frame(&mut self, camera: &Camera) -> BackendResult<()> {
        self.last_view_projection = camera.view_projection_matrix();
        self.stats.frames_rendered += 1;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_create_update_remove() {
        let mut backend = HeadlessBackend::default();
        let handle = backend
            .create_point_cloud(&[0.0, 1.0, 2.0], Vec3::new(1.0, 0.0, 0.0), 0.4)
            .unwrap();

        backend.mark_positions_dirty(handle, &[3.0, 4.0, 5.0]).unwrap();
        let cloud = backend.cloud(handle).unwrap();
        assert_eq!(cloud.positions, vec![3.0, 4.0, 5.0]);
        assert_eq!(cloud.uploads, 1);

        backend.remove_point_cloud(handle).unwrap();
        assert_eq!(backend.cloud_count(), 0);
        assert!(matches!(
            backend.remove_point_cloud(handle),
            Err(BackendError::UnknownHandle(_))
        ));
        assert_eq!(backend.stats().total_removed, 1);
    }

    #[test]
    fn test_length_mismatch_is_rejected() {
        let mut backend = HeadlessBackend::default();
        let handle = backend.create_point_cloud(&[0.0; 6], Vec3::zeros(), 1.0).unwrap();
        let err = backend.mark_positions_dirty(handle, &[0.0; 3]).unwrap_err();
        assert!(matches!(err, BackendError::LengthMismatch { expected: 6, actual: 3 }));
    }

    #[test]
    fn test_render_records_frame() {
        let mut backend = HeadlessBackend::new(800, 600);
        let camera = Camera::default();
        backend.render_frame(&camera).unwrap();
        assert_eq!(backend.stats().frames_rendered, 1);
        assert_eq!(*backend.last_view_projection(), camera.view_projection_matrix());
    }
}
