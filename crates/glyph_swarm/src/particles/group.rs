//! Particle group: the point cloud of one glyph

use crate::foundation::math::Vec3;
use crate::render::PointCloudHandle;

/// Points of one glyph with their live, target and jitter state
///
/// `current`, `target` and `jitter_seed` are flat `(x, y, z)` arrays of the
/// same length. Only `current` changes after construction.
#[derive(Debug, Clone)]
pub struct ParticleGroup {
    character: char,
    current: Vec<f32>,
    target: Vec<f32>,
    jitter_seed: Vec<f32>,
    color: Vec3,
    handle: PointCloudHandle,
}

impl ParticleGroup {
    /// Assemble a group from parallel arrays
    ///
    /// Returns `None` when the arrays differ in length or do not hold whole
    /// triples.
    pub fn new(
        character: char,
        current: Vec<f32>,
        target: Vec<f32>,
        jitter_seed: Vec<f32>,
        color: Vec3,
        handle: PointCloudHandle,
    ) -> Option<Self> {
        let len = current.len();
        if target.len() != len || jitter_seed.len() != len || len % 3 != 0 {
            return None;
        }
        Some(Self {
            character,
            current,
            target,
            jitter_seed,
            color,
            handle,
        })
    }

    /// Character this group draws
    pub fn character(&self) -> char {
        self.character
    }

    /// Live positions
    pub fn current(&self) -> &[f32] {
        &self.current
    }

    /// Positions the particles converge toward
    pub fn target(&self) -> &[f32] {
        &self.target
    }

    /// Per-component jitter phase seeds
    pub fn jitter_seed(&self) -> &[f32] {
        &self.jitter_seed
    }

    /// Group color
    pub fn color(&self) -> Vec3 {
        self.color
    }

    /// Backend handle of the group's point cloud
    pub fn handle(&self) -> PointCloudHandle {
        self.handle
    }

    /// Number of particles
    pub fn particle_count(&self) -> usize {
        self.current.len() / 3
    }

    /// Sum over particles of the Euclidean distance to target
    pub fn total_distance_to_target(&self) -> f32 {
        self.current
            .chunks_exact(3)
            .zip(self.target.chunks_exact(3))
            .map(|(c, t)| {
                let d = Vec3::new(t[0] - c[0], t[1] - c[1], t[2] - c[2]);
                d.norm()
            })
            .sum()
    }

    /// Mutable live positions alongside the read-only target and seed arrays
    pub(crate) fn motion_arrays(&mut self) -> (&mut [f32], &[f32], &[f32]) {
        (&mut self.current, &self.target, &self.jitter_seed)
    }
}
