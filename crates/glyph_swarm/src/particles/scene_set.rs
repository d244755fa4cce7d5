//! Scene set: the live particle groups
//!
//! The set owns its groups and is the only place point clouds are released,
//! so clearing it is the single path by which a word's resources go away.

use super::ParticleGroup;
use crate::render::PointCloudBackend;

/// Snapshot of the scene for logging and diagnostics
#[derive(Debug, Clone, Default, PartialEq)]
pub struct SceneStats {
    /// Number of particle groups
    pub group_count: usize,
    /// Particles across all groups
    pub particle_count: usize,
    /// Mean particle distance to its target, zero for an empty scene
    pub mean_distance_to_target: f32,
}

/// Insertion-ordered collection of the particle groups on screen
#[derive(Debug, Default)]
pub struct SceneSet {
    groups: Vec<ParticleGroup>,
}

impl SceneSet {
    /// Create an empty scene set
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a group; it is drawn and stepped from the next tick on
    pub fn push(&mut self, group: ParticleGroup) {
        self.groups.push(group);
    }

    /// Groups in insertion order
    pub fn groups(&self) -> &[ParticleGroup] {
        &self.groups
    }

    /// Mutable iteration for the stepper
    pub fn iter_mut(&mut self) -> std::slice::IterMut<'_, ParticleGroup> {
        self.groups.iter_mut()
    }

    /// Number of groups
    pub fn len(&self) -> usize {
        self.groups.len()
    }

    /// Whether no groups are live
    pub fn is_empty(&self) -> bool {
        self.groups.is_empty()
    }

    /// Particles across all groups
    pub fn particle_count(&self) -> usize {
        self.groups.iter().map(ParticleGroup::particle_count).sum()
    }

    /// Drop every group and release its point cloud
    ///
    /// Release failures are logged; the group is dropped regardless. Returns
    /// the number of groups removed.
    pub fn clear<B: PointCloudBackend + ?Sized>(&mut self, backend: &mut B) -> usize {
        let removed = self.groups.len();
        for group in self.groups.drain(..) {
            if let Err(err) = backend.remove_point_cloud(group.handle()) {
                log::warn!("Failed to release point cloud for {:?}: {err}", group.character());
            }
        }
        if removed > 0 {
            log::debug!("Cleared {removed} particle groups");
        }
        removed
    }

    /// Compute counts and convergence for the current state
    pub fn stats(&self) -> SceneStats {
        let particle_count = self.particle_count();
        let total_distance: f32 = self
            .groups
            .iter()
            .map(ParticleGroup::total_distance_to_target)
            .sum();

        SceneStats {
            group_count: self.groups.len(),
            particle_count,
            mean_distance_to_target: if particle_count == 0 {
                0.0
            } else {
                total_distance / particle_count as f32
            },
        }
    }
}
