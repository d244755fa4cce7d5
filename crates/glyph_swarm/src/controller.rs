//! Word replacement controller
//!
//! Owns everything a running scene needs: the font state, the current word,
//! the scene set, the rendering backend and the camera. Generation is always
//! a full rebuild, because every glyph offset moves whenever the total word
//! width changes.

use rand::Rng;

use crate::config::SwarmConfig;
use crate::particles::{random_color, AnimationStepper, ParticleFactory, SceneSet, SceneStats, StepReport};
use crate::render::{Camera, PointCloudBackend};
use crate::text::{layout_word, FontState, Glyph, GlyphSource, GlyphStyle};

/// Why a generation trigger did nothing
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SkipReason {
    /// The font has not finished loading
    FontPending,
    /// The font failed to load
    FontUnavailable,
}

/// Result of a generation trigger
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GenerateOutcome {
    /// The scene was rebuilt for the current word
    Generated {
        /// Groups created, one per character
        groups: usize,
        /// Particles across all groups
        particles: usize,
    },
    /// The word was empty; the scene now holds no groups
    Cleared,
    /// Nothing changed
    Skipped(SkipReason),
}

/// Drives word generation, ticking and resizing for one scene
pub struct WordController<S, B, R> {
    font: FontState<S>,
    word: String,
    scene: SceneSet,
    backend: B,
    camera: Camera,
    stepper: AnimationStepper,
    factory: ParticleFactory,
    glyph_style: GlyphStyle,
    letter_spacing: f32,
    rng: R,
}

impl<S, B, R> WordController<S, B, R>
where
    S: GlyphSource,
    B: PointCloudBackend,
    R: Rng,
{
    /// Create a controller with a pending font and an empty word
    pub fn new(config: &SwarmConfig, mut backend: B, rng: R) -> Self {
        let viewport = config.viewport;
        backend.resize(viewport.width, viewport.height);

        Self {
            font: FontState::Pending,
            word: String::new(),
            scene: SceneSet::new(),
            backend,
            camera: Camera::from_config(&config.camera, viewport.width, viewport.height),
            stepper: AnimationStepper::new(config.motion),
            factory: ParticleFactory::from_config(config),
            glyph_style: config.glyph,
            letter_spacing: config.letter_spacing,
            rng,
        }
    }

    /// Replace the pending word; takes effect on the next [`generate`](Self::generate)
    pub fn set_word(&mut self, word: impl Into<String>) {
        self.word = word.into();
    }

    /// Word that the next generation will build
    pub fn word(&self) -> &str {
        &self.word
    }

    /// Make glyph sampling available
    pub fn install_font(&mut self, source: S) {
        log::info!("Font ready, word generation enabled");
        self.font = FontState::Ready(source);
    }

    /// Record a failed font load
    pub fn mark_font_unavailable(&mut self, reason: impl Into<String>) {
        let reason = reason.into();
        log::warn!("Font unavailable, word generation disabled: {reason}");
        self.font = FontState::Unavailable(reason);
    }

    /// Current font availability
    pub fn font_state(&self) -> &FontState<S> {
        &self.font
    }

    /// Discard every group and rebuild the scene from the current word
    ///
    /// With a ready font an empty word still clears the scene and returns
    /// [`GenerateOutcome::Cleared`]. Before the font is ready nothing is touched.
    pub fn generate(&mut self) -> GenerateOutcome {
        let source = match &self.font {
            FontState::Ready(source) => source,
            FontState::Pending => {
                log::debug!("Ignoring generate: font still loading");
                return GenerateOutcome::Skipped(SkipReason::FontPending);
            }
            FontState::Unavailable(_) => {
                log::debug!("Ignoring generate: font unavailable");
                return GenerateOutcome::Skipped(SkipReason::FontUnavailable);
            }
        };

        self.scene.clear(&mut self.backend);
        if self.word.is_empty() {
            log::info!("Empty word, scene cleared");
            return GenerateOutcome::Cleared;
        }

        let glyphs: Vec<Glyph> = self
            .word
            .chars()
            .map(|c| source.sample(c, &self.glyph_style))
            .collect();
        let widths: Vec<f32> = glyphs.iter().map(Glyph::width).collect();
        let layout = layout_word(&widths, self.letter_spacing);

        for (glyph, &offset) in glyphs.iter().zip(&layout.offsets) {
            let color = random_color(&mut self.rng);
            if let Err(err) =
                self.factory
                    .spawn(glyph, color, offset, &mut self.rng, &mut self.scene, &mut self.backend)
            {
                log::warn!("Skipping {:?}: {err}", glyph.character);
            }
        }

        let groups = self.scene.len();
        let particles = self.scene.particle_count();
        log::info!(
            "Generated {:?}: {groups} groups, {particles} particles, width {:.1}",
            self.word,
            layout.total_width
        );
        GenerateOutcome::Generated { groups, particles }
    }

    /// Advance the animation to `now_millis` and render a frame
    pub fn tick(&mut self, now_millis: f64) -> StepReport {
        let report = self.stepper.step(&mut self.scene, &mut self.backend, now_millis);
        if let Err(err) = self.backend.render_frame(&self.camera) {
            log::warn!("Frame render failed: {err}");
        }
        report
    }

    /// Apply a viewport change; particle positions are unaffected
    pub fn resize(&mut self, width: u32, height: u32) {
        self.camera.set_viewport(width, height);
        if width > 0 && height > 0 {
            self.backend.resize(width, height);
        }
    }

    /// Release every point cloud
    pub fn shutdown(&mut self) {
        let removed = self.scene.clear(&mut self.backend);
        log::info!("Scene shut down, released {removed} point clouds");
    }

    /// Live particle groups
    pub fn scene(&self) -> &SceneSet {
        &self.scene
    }

    /// Counts and convergence of the live scene
    pub fn stats(&self) -> SceneStats {
        self.scene.stats()
    }

    /// Rendering backend
    pub fn backend(&self) -> &B {
        &self.backend
    }

    /// Scene camera
    pub fn camera(&self) -> &Camera {
        &self.camera
    }
}
