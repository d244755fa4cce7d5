//! Particle set factory
//!
//! Builds a [`ParticleGroup`] for one glyph: particles start scattered in a
//! box around the origin, target the glyph's vertices shifted by the layout
//! offset, and carry a random jitter seed per component.

use rand::Rng;

use super::{ParticleGroup, SceneSet};
use crate::config::SwarmConfig;
use crate::foundation::math::{utils, Vec3};
use crate::render::{BackendError, BackendResult, PointCloudBackend, PointCloudHandle};
use crate::text::Glyph;

/// Random RGB color, each channel uniform in `[0, 1)`
pub fn random_color<R: Rng + ?Sized>(rng: &mut R) -> Vec3 {
    Vec3::new(rng.gen(), rng.gen(), rng.gen())
}

/// Creates particle groups and registers them for rendering
#[derive(Debug, Clone, PartialEq)]
pub struct ParticleFactory {
    /// Full extent of the spawn box per axis
    pub spawn_extent: [f32; 3],
    /// Full width of the jitter seed interval
    pub jitter_seed_range: f32,
    /// Rendered point size
    pub point_size: f32,
}

impl Default for ParticleFactory {
    fn default() -> Self {
        Self::from_config(&SwarmConfig::default())
    }
}

impl ParticleFactory {
    /// Factory using the spawn and seed parameters from configuration
    pub fn from_config(config: &SwarmConfig) -> Self {
        Self {
            spawn_extent: config.spawn_extent,
            jitter_seed_range: config.jitter_seed_range,
            point_size: config.point_size,
        }
    }

    /// Build the three parallel arrays for a glyph
    ///
    /// Returns `(current, target, jitter_seed)`.
    pub fn build_arrays<R: Rng + ?Sized>(
        &self,
        glyph: &Glyph,
        offset_x: f32,
        rng: &mut R,
    ) -> (Vec<f32>, Vec<f32>, Vec<f32>) {
        let len = glyph.point_count() * 3;
        let mut current = Vec::with_capacity(len);
        let mut target = Vec::with_capacity(len);
        let mut jitter_seed = Vec::with_capacity(len);

        for vertex in glyph.vertices().chunks_exact(3) {
            for extent in self.spawn_extent {
                current.push(utils::centered(rng.gen(), extent));
            }

            target.extend_from_slice(&[vertex[0] + offset_x, vertex[1], vertex[2]]);

            for _ in 0..3 {
                jitter_seed.push(utils::centered(rng.gen(), self.jitter_seed_range));
            }
        }

        (current, target, jitter_seed)
    }

    /// Build a group for `glyph`, create its point cloud and append it to `scene`
    pub fn spawn<R, B>(
        &self,
        glyph: &Glyph,
        color: Vec3,
        offset_x: f32,
        rng: &mut R,
        scene: &mut SceneSet,
        backend: &mut B,
    ) -> BackendResult<PointCloudHandle>
    where
        R: Rng + ?Sized,
        B: PointCloudBackend + ?Sized,
    {
        let arrays = self.build_arrays(glyph, offset_x, rng);
        let handle = self.register(glyph.character, arrays, color, scene, backend)?;
        log::debug!(
            "Spawned {} particles for {:?} at x = {offset_x:.2}",
            glyph.point_count(),
            glyph.character
        );
        Ok(handle)
    }

    /// Validate the arrays, create the point cloud and append the group
    ///
    /// Nothing is left on the backend when the arrays disagree in length.
    pub(crate) fn register<B>(
        &self,
        character: char,
        (current, target, jitter_seed): (Vec<f32>, Vec<f32>, Vec<f32>),
        color: Vec3,
        scene: &mut SceneSet,
        backend: &mut B,
    ) -> BackendResult<PointCloudHandle>
    where
        B: PointCloudBackend + ?Sized,
    {
        let expected = current.len();
        if let Some(actual) = [target.len(), jitter_seed.len()].into_iter().find(|&len| len != expected) {
            return Err(BackendError::LengthMismatch { expected, actual });
        }

        let handle = backend.create_point_cloud(&current, color, self.point_size)?;
        match ParticleGroup::new(character, current, target, jitter_seed, color, handle) {
            Some(group) => {
                scene.push(group);
                Ok(handle)
            }
            None => {
                backend.remove_point_cloud(handle)?;
                Err(BackendError::LengthMismatch { expected, actual: expected })
            }
        }
    }
}
