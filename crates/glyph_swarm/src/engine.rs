//! Frame loop
//!
//! Registered once per display frame by the host. Each frame polls the font
//! load, then ticks the controller with the stopwatch time. Word replacement
//! happens between frames, so a rebuild never interleaves with a tick.

use rand::Rng;

use crate::controller::WordController;
use crate::foundation::time::Stopwatch;
use crate::render::PointCloudBackend;
use crate::text::{Font, FontLoader};

/// Per-frame driver with an explicit start/stop lifecycle
pub struct FrameLoop<B, R> {
    controller: WordController<Font, B, R>,
    loader: Option<FontLoader>,
    initial_word: String,
    clock: Stopwatch,
}

impl<B, R> FrameLoop<B, R>
where
    B: PointCloudBackend,
    R: Rng,
{
    /// Create a stopped loop
    ///
    /// `initial_word` is generated as soon as the font resolves, unless a
    /// word was already submitted.
    pub fn new(controller: WordController<Font, B, R>, loader: Option<FontLoader>, initial_word: impl Into<String>) -> Self {
        Self {
            controller,
            loader,
            initial_word: initial_word.into(),
            clock: Stopwatch::new(),
        }
    }

    /// Start (or resume) the animation clock
    pub fn start(&mut self) {
        if !self.clock.is_running() {
            log::info!("Frame loop started");
            self.clock.start();
        }
    }

    /// Pause the animation clock; frames become no-ops
    pub fn stop(&mut self) {
        if self.clock.is_running() {
            log::info!("Frame loop stopped after {:.1} s", self.clock.elapsed().as_secs_f32());
            self.clock.stop();
        }
    }

    /// Whether frames are being processed
    pub fn is_running(&self) -> bool {
        self.clock.is_running()
    }

    /// Run one frame; returns `false` when the loop is stopped
    pub fn frame(&mut self) -> bool {
        if !self.is_running() {
            return false;
        }
        self.poll_font();
        let now = self.clock.elapsed_millis();
        self.controller.tick(now);
        true
    }

    /// Whether the font load is still in flight
    pub fn font_pending(&self) -> bool {
        self.loader.as_ref().is_some_and(FontLoader::is_pending)
    }

    /// Controller driven by this loop
    pub fn controller(&self) -> &WordController<Font, B, R> {
        &self.controller
    }

    /// Mutable controller, for word submissions and resize events
    pub fn controller_mut(&mut self) -> &mut WordController<Font, B, R> {
        &mut self.controller
    }

    /// Stop the clock and release the scene
    pub fn shutdown(&mut self) {
        self.stop();
        self.controller.shutdown();
    }

    fn poll_font(&mut self) {
        let Some(result) = self.loader.as_mut().and_then(FontLoader::try_poll) else {
            return;
        };
        self.loader = None;

        match result {
            Ok(font) => {
                self.controller.install_font(font);
                if self.controller.word().is_empty() {
                    self.controller.set_word(self.initial_word.clone());
                }
                self.controller.generate();
            }
            Err(err) => self.controller.mark_font_unavailable(err.to_string()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::SwarmConfig;
    use crate::controller::GenerateOutcome;
    use crate::render::HeadlessBackend;
    use crate::text::FontState;
    use rand::rngs::StdRng;
    use rand::SeedableRng;
    use std::time::{Duration, Instant};

    fn frame_loop(loader: Option<FontLoader>) -> FrameLoop<HeadlessBackend, StdRng> {
        let config = SwarmConfig::default();
        let controller = WordController::new(&config, HeadlessBackend::default(), StdRng::seed_from_u64(0));
        FrameLoop::new(controller, loader, config.initial_word)
    }

    #[test]
    fn test_stopped_loop_does_not_tick() {
        let mut frames = frame_loop(None);
        assert!(!frames.frame());
        assert_eq!(frames.controller().backend().stats().frames_rendered, 0);

        frames.start();
        assert!(frames.frame());
        frames.stop();
        assert!(!frames.frame());
        assert_eq!(frames.controller().backend().stats().frames_rendered, 1);
    }

    fn run_until_font_resolves(frames: &mut FrameLoop<HeadlessBackend, StdRng>) {
        let deadline = Instant::now() + Duration::from_secs(5);
        while frames.font_pending() {
            assert!(Instant::now() < deadline, "font load never resolved");
            frames.frame();
            std::thread::sleep(Duration::from_millis(1));
        }
    }

    #[test]
    fn test_bundled_font_generates_initial_word() {
        let loader = FontLoader::spawn(crate::text::DEFAULT_FONT_PATH).unwrap();
        let mut frames = frame_loop(Some(loader));
        frames.start();
        run_until_font_resolves(&mut frames);

        assert!(frames.controller().font_state().is_ready());
        assert_eq!(frames.controller().word(), "PPGEEC");
        let scene = frames.controller().scene();
        assert_eq!(scene.len(), 6);
        assert!(scene.groups().iter().all(|g| g.particle_count() > 0));

        let first: Vec<Vec<f32>> = scene.groups().iter().map(|g| g.target().to_vec()).collect();
        let controller = frames.controller_mut();
        assert!(matches!(controller.generate(), GenerateOutcome::Generated { groups: 6, .. }));
        let second: Vec<Vec<f32>> = controller.scene().groups().iter().map(|g| g.target().to_vec()).collect();
        assert_eq!(first, second);
    }

    #[test]
    fn test_failed_font_load_surfaces_unavailable() {
        let loader = FontLoader::spawn("no/such/font.ttf").unwrap();
        let mut frames = frame_loop(Some(loader));
        frames.start();
        run_until_font_resolves(&mut frames);

        assert!(matches!(frames.controller().font_state(), FontState::Unavailable(_)));
        assert!(frames.controller().scene().is_empty());
        assert!(frames.frame());
    }
}
