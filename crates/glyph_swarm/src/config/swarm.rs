//! # Swarm Configuration
//!
//! Every tunable constant of the particle choreography lives here. The
//! defaults reproduce the reference look: a 200×200×50 spawn box, 3% decay
//! per tick and a ±0.1 sinusoidal shimmer.

use serde::{Deserialize, Serialize};

use super::{Config, ConfigError};
use crate::text::GlyphStyle;

/// Motion parameters consumed by the animation stepper
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct MotionConfig {
    /// Fraction of the remaining distance covered per tick
    pub decay_rate: f32,
    /// Peak jitter displacement added per tick
    pub jitter_amplitude: f32,
    /// Angular frequency of the jitter, in radians per millisecond
    pub jitter_frequency: f64,
    /// Multiplier applied to the per-particle seed to form its phase
    pub jitter_phase_scale: f32,
}

impl Default for MotionConfig {
    fn default() -> Self {
        Self {
            decay_rate: 0.03,
            jitter_amplitude: 0.1,
            jitter_frequency: 0.001,
            jitter_phase_scale: 10.0,
        }
    }
}

impl MotionConfig {
    /// Motion without jitter, converging geometrically toward the target
    pub fn decay_only(decay_rate: f32) -> Self {
        Self {
            decay_rate,
            jitter_amplitude: 0.0,
            ..Self::default()
        }
    }
}

/// Perspective camera placement
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CameraConfig {
    /// Vertical field of view in degrees
    pub fov_degrees: f32,
    /// Near clipping plane
    pub near: f32,
    /// Far clipping plane
    pub far: f32,
    /// Distance from the origin along +Z
    pub distance: f32,
}

impl Default for CameraConfig {
    fn default() -> Self {
        Self {
            fov_degrees: 75.0,
            near: 0.1,
            far: 500.0,
            distance: 100.0,
        }
    }
}

/// Initial viewport size in pixels
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ViewportConfig {
    /// Width in pixels
    pub width: u32,
    /// Height in pixels
    pub height: u32,
}

impl Default for ViewportConfig {
    fn default() -> Self {
        Self {
            width: 1280,
            height: 720,
        }
    }
}

/// Top-level configuration for a glyph swarm scene
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SwarmConfig {
    /// Word generated as soon as the font finishes loading
    pub initial_word: String,
    /// Horizontal gap between neighbouring glyphs
    pub letter_spacing: f32,
    /// Full extent of the random spawn box on each axis
    pub spawn_extent: [f32; 3],
    /// Full width of the jitter seed interval, centered on zero
    pub jitter_seed_range: f32,
    /// Rendered point size
    pub point_size: f32,
    /// Target frames per second for the frame loop
    pub frame_rate: u32,
    // Tables last so TOML output stays valid
    /// Glyph tessellation style
    pub glyph: GlyphStyle,
    /// Per-tick motion
    pub motion: MotionConfig,
    /// Camera placement
    pub camera: CameraConfig,
    /// Initial viewport
    pub viewport: ViewportConfig,
}

impl Default for SwarmConfig {
    fn default() -> Self {
        Self {
            initial_word: "PPGEEC".to_string(),
            letter_spacing: 10.0,
            spawn_extent: [200.0, 200.0, 50.0],
            jitter_seed_range: 0.2,
            point_size: 0.4,
            frame_rate: 60,
            glyph: GlyphStyle::default(),
            motion: MotionConfig::default(),
            camera: CameraConfig::default(),
            viewport: ViewportConfig::default(),
        }
    }
}

impl Config for SwarmConfig {}

impl SwarmConfig {
    /// Reject values that would produce NaN positions or a degenerate scene
    pub fn validate(&self) -> Result<(), ConfigError> {
        fn non_negative(field: &'static str, value: f32) -> Result<(), ConfigError> {
            if value.is_finite() && value >= 0.0 {
                Ok(())
            } else {
                Err(ConfigError::Invalid {
                    field,
                    reason: format!("expected a finite non-negative number, got {value}"),
                })
            }
        }

        non_negative("letter_spacing", self.letter_spacing)?;
        non_negative("glyph.size", self.glyph.size)?;
        non_negative("glyph.depth", self.glyph.depth)?;
        non_negative("jitter_seed_range", self.jitter_seed_range)?;
        non_negative("motion.decay_rate", self.motion.decay_rate)?;
        non_negative("motion.jitter_amplitude", self.motion.jitter_amplitude)?;
        non_negative("motion.jitter_phase_scale", self.motion.jitter_phase_scale)?;
        non_negative("point_size", self.point_size)?;
        for extent in self.spawn_extent {
            non_negative("spawn_extent", extent)?;
        }

        if self.motion.decay_rate > 1.0 {
            return Err(ConfigError::Invalid {
                field: "motion.decay_rate",
                reason: "must not exceed 1.0".to_string(),
            });
        }
        if !self.motion.jitter_frequency.is_finite() {
            return Err(ConfigError::Invalid {
                field: "motion.jitter_frequency",
                reason: "must be finite".to_string(),
            });
        }
        if self.glyph.curve_segments == 0 {
            return Err(ConfigError::Invalid {
                field: "glyph.curve_segments",
                reason: "must be at least 1".to_string(),
            });
        }
        if self.frame_rate == 0 {
            return Err(ConfigError::Invalid {
                field: "frame_rate",
                reason: "must be at least 1".to_string(),
            });
        }
        if !(self.camera.fov_degrees > 0.0 && self.camera.fov_degrees < 180.0) {
            return Err(ConfigError::Invalid {
                field: "camera.fov_degrees",
                reason: format!("must lie in (0, 180), got {}", self.camera.fov_degrees),
            });
        }
        if !(self.camera.distance.is_finite() && self.camera.distance > 0.0) {
            return Err(ConfigError::Invalid {
                field: "camera.distance",
                reason: format!("must be a finite positive number, got {}", self.camera.distance),
            });
        }
        if self.camera.near <= 0.0 || self.camera.far <= self.camera.near {
            return Err(ConfigError::Invalid {
                field: "camera",
                reason: format!("need 0 < near < far, got near={} far={}", self.camera.near, self.camera.far),
            });
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_are_valid() {
        let config = SwarmConfig::default();
        assert!(config.validate().is_ok());
        assert_eq!(config.letter_spacing, 10.0);
        assert_eq!(config.glyph.curve_segments, 12);
        assert_eq!(config.spawn_extent, [200.0, 200.0, 50.0]);
    }

    #[test]
    fn test_rejects_decay_above_one() {
        let mut config = SwarmConfig::default();
        config.motion.decay_rate = 1.5;
        assert!(matches!(
            config.validate(),
            Err(ConfigError::Invalid { field: "motion.decay_rate", .. })
        ));
    }

    #[test]
    fn test_rejects_nan_spacing() {
        let config = SwarmConfig {
            letter_spacing: f32::NAN,
            ..SwarmConfig::default()
        };
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_rejects_degenerate_camera() {
        let mut config = SwarmConfig::default();
        config.camera.distance = 0.0;
        assert!(matches!(
            config.validate(),
            Err(ConfigError::Invalid { field: "camera.distance", .. })
        ));

        let mut config = SwarmConfig::default();
        config.camera.fov_degrees = 0.0;
        assert!(matches!(
            config.validate(),
            Err(ConfigError::Invalid { field: "camera.fov_degrees", .. })
        ));

        config.camera.fov_degrees = f32::NAN;
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_toml_round_trip() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("swarm.toml");

        let mut config = SwarmConfig::default();
        config.initial_word = "RUST".to_string();
        config.motion = MotionConfig::decay_only(0.05);
        config.save_to_file(&path).unwrap();

        let loaded = SwarmConfig::load_from_file(&path).unwrap();
        assert_eq!(loaded, config);
    }

    #[test]
    fn test_partial_ron_uses_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("swarm.ron");
        std::fs::write(&path, "(initial_word: \"HI\", point_size: 1.0)").unwrap();

        let loaded = SwarmConfig::load_from_file(&path).unwrap();
        assert_eq!(loaded.initial_word, "HI");
        assert_eq!(loaded.point_size, 1.0);
        assert_eq!(loaded.motion, MotionConfig::default());
    }

    #[test]
    fn test_unknown_extension_is_rejected() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("swarm.json");
        std::fs::write(&path, "{}").unwrap();
        assert!(matches!(
            SwarmConfig::load_from_file(&path),
            Err(ConfigError::UnsupportedFormat(_))
        ));
    }
}
