//! Animation stepper
//!
//! Every tick moves each position component a fixed fraction of the way to
//! its target, then adds a time-driven sinusoidal shimmer on top of the
//! decayed value:
//!
//! ```text
//! current += (target - current) * decay_rate
//! current += sin(now_ms * jitter_frequency + seed * jitter_phase_scale) * jitter_amplitude
//! ```
//!
//! Convergence is asymptotic and the shimmer never stops, so no group ever
//! reaches a settled state.

use super::{ParticleGroup, SceneSet};
use crate::config::MotionConfig;
use crate::render::PointCloudBackend;

/// Outcome of one tick
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct StepReport {
    /// Groups advanced this tick
    pub groups_stepped: usize,
    /// Groups whose position upload failed
    pub upload_failures: usize,
}

/// Advances particle groups toward their targets
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct AnimationStepper {
    motion: MotionConfig,
}

impl AnimationStepper {
    /// Create a stepper with the given motion parameters
    pub fn new(motion: MotionConfig) -> Self {
        Self { motion }
    }

    /// Motion parameters in use
    pub fn motion(&self) -> &MotionConfig {
        &self.motion
    }

    /// Advance one group's live positions to time `now_millis`
    pub fn advance_group(&self, group: &mut ParticleGroup, now_millis: f64) {
        let MotionConfig {
            decay_rate,
            jitter_amplitude,
            jitter_frequency,
            jitter_phase_scale,
        } = self.motion;
        let time_phase = now_millis * jitter_frequency;

        let (current, target, jitter_seed) = group.motion_arrays();
        for ((c, &t), &seed) in current.iter_mut().zip(target).zip(jitter_seed) {
            *c += (t - *c) * decay_rate;
            if jitter_amplitude != 0.0 {
                let phase = time_phase + f64::from(seed * jitter_phase_scale);
                *c += phase.sin() as f32 * jitter_amplitude;
            }
        }
    }

    /// Advance every group and hand its positions to the backend
    ///
    /// Upload failures are logged and counted; they never stop the tick.
    pub fn step<B: PointCloudBackend + ?Sized>(
        &self,
        scene: &mut SceneSet,
        backend: &mut B,
        now_millis: f64,
    ) -> StepReport {
        let mut report = StepReport::default();

        for group in scene.iter_mut() {
            self.advance_group(group, now_millis);
            report.groups_stepped += 1;

            if let Err(err) = backend.mark_positions_dirty(group.handle(), group.current()) {
                log::warn!("Position upload for {:?} failed: {err}", group.character());
                report.upload_failures += 1;
            }
        }

        log::trace!("Stepped {} groups at t = {now_millis:.1} ms", report.groups_stepped);
        report
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::foundation::math::Vec3;
    use crate::render::{HeadlessBackend, PointCloudHandle};
    use approx::assert_relative_eq;

    fn group_at(current: Vec<f32>, target: Vec<f32>, seed: Vec<f32>) -> ParticleGroup {
        ParticleGroup::new('a', current, target, seed, Vec3::zeros(), PointCloudHandle::default()).unwrap()
    }

    #[test]
    fn test_decay_only_converges_geometrically() {
        let stepper = AnimationStepper::new(MotionConfig::decay_only(0.03));
        let mut group = group_at(vec![100.0, -50.0, 20.0], vec![0.0, 10.0, 20.0], vec![0.0; 3]);

        for tick in 0..200 {
            stepper.advance_group(&mut group, f64::from(tick) * 16.0);
        }

        let expected = 0.97_f32.powi(200);
        assert_relative_eq!(group.current()[0], 100.0 * expected, max_relative = 1e-3);
        assert_relative_eq!(group.current()[1], 10.0 - 60.0 * expected, max_relative = 1e-3);
        assert_relative_eq!(group.current()[2], 20.0);
    }

    #[test]
    fn test_jitter_is_added_after_decay() {
        let stepper = AnimationStepper::new(MotionConfig::default());
        let mut group = group_at(vec![10.0, 0.0, 0.0], vec![0.0; 3], vec![0.05, -0.05, 0.0]);
        let now = 1234.0;

        stepper.advance_group(&mut group, now);

        let jitter = |seed: f32| ((now * 0.001 + f64::from(seed * 10.0)).sin() as f32) * 0.1;
        assert_relative_eq!(group.current()[0], 10.0 * 0.97 + jitter(0.05), epsilon = 1e-5);
        assert_relative_eq!(group.current()[1], jitter(-0.05), epsilon = 1e-6);
        assert_relative_eq!(group.current()[2], jitter(0.0), epsilon = 1e-6);
    }

    #[test]
    fn test_jitter_depends_on_time_not_tick_count() {
        let stepper = AnimationStepper::new(MotionConfig {
            decay_rate: 0.0,
            ..MotionConfig::default()
        });
        let mut a = group_at(vec![0.0; 3], vec![0.0; 3], vec![0.02; 3]);
        let mut b = a.clone();

        stepper.advance_group(&mut a, 500.0);
        stepper.advance_group(&mut b, 500.0);
        assert_eq!(a.current(), b.current());

        stepper.advance_group(&mut b, 2000.0);
        assert_ne!(a.current(), b.current());
    }

    #[test]
    fn test_target_and_seed_are_not_mutated() {
        let stepper = AnimationStepper::default();
        let mut group = group_at(vec![5.0; 6], vec![1.0; 6], vec![0.01; 6]);
        for tick in 0..10 {
            stepper.advance_group(&mut group, f64::from(tick));
        }
        assert_eq!(group.target(), &[1.0; 6]);
        assert_eq!(group.jitter_seed(), &[0.01; 6]);
        assert_eq!(group.current().len(), 6);
    }

    #[test]
    fn test_step_uploads_every_group() {
        let stepper = AnimationStepper::default();
        let mut backend = HeadlessBackend::default();
        let mut scene = SceneSet::new();

        for _ in 0..2 {
            let handle = backend.create_point_cloud(&[9.0; 3], Vec3::zeros(), 1.0).unwrap();
            scene.push(ParticleGroup::new('a', vec![9.0; 3], vec![0.0; 3], vec![0.0; 3], Vec3::zeros(), handle).unwrap());
        }

        let report = stepper.step(&mut scene, &mut backend, 16.0);
        assert_eq!(report, StepReport { groups_stepped: 2, upload_failures: 0 });

        for group in scene.groups() {
            let cloud = backend.cloud(group.handle()).unwrap();
            assert_eq!(cloud.uploads, 1);
            assert_eq!(cloud.positions, group.current());
        }
    }

    #[test]
    fn test_upload_failure_does_not_stop_tick() {
        let stepper = AnimationStepper::default();
        let mut backend = HeadlessBackend::default();
        let mut scene = SceneSet::new();

        // First group's cloud was never created on this backend
        scene.push(group_at(vec![1.0; 3], vec![0.0; 3], vec![0.0; 3]));
        let handle = backend.create_point_cloud(&[1.0; 3], Vec3::zeros(), 1.0).unwrap();
        scene.push(ParticleGroup::new('b', vec![1.0; 3], vec![0.0; 3], vec![0.0; 3], Vec3::zeros(), handle).unwrap());

        let report = stepper.step(&mut scene, &mut backend, 0.0);
        assert_eq!(report.groups_stepped, 2);
        assert_eq!(report.upload_failures, 1);
        assert_eq!(backend.cloud(handle).unwrap().uploads, 1);
    }
}
