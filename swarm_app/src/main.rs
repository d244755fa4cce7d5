//! Headless glyph swarm demo
//!
//! Loads the bundled font in the background, swarms the configured initial
//! word and then reads submissions from stdin, one per line:
//!
//! - any text: replace the word
//! - `/resize W H`: simulate a viewport resize
//! - `/quit` or end of input: shut down

use std::io::BufRead;
use std::path::Path;
use std::sync::mpsc::{self, Receiver, TryRecvError};
use std::thread;
use std::time::{Duration, Instant};

use glyph_swarm::foundation::logging;
use glyph_swarm::foundation::time::FramePacer;
use glyph_swarm::prelude::*;
use rand::rngs::StdRng;
use rand::SeedableRng;

const CONFIG_PATH: &str = "glyph_swarm.toml";
const STATS_INTERVAL: Duration = Duration::from_secs(2);

/// Input from the stand-in UI
#[derive(Debug, Clone, PartialEq, Eq)]
enum UiEvent {
    Submit(String),
    Resize { width: u32, height: u32 },
    Quit,
}

fn parse_line(line: &str) -> Option<UiEvent> {
    let line = line.trim();
    if line == "/quit" {
        return Some(UiEvent::Quit);
    }
    if let Some(rest) = line.strip_prefix("/resize") {
        let mut parts = rest.split_whitespace().map(str::parse::<u32>);
        return match (parts.next(), parts.next()) {
            (Some(Ok(width)), Some(Ok(height))) => Some(UiEvent::Resize { width, height }),
            _ => {
                log::warn!("Usage: /resize WIDTH HEIGHT");
                None
            }
        };
    }
    Some(UiEvent::Submit(line.to_string()))
}

fn spawn_stdin_reader() -> std::io::Result<Receiver<UiEvent>> {
    let (sender, receiver) = mpsc::channel();
    thread::Builder::new().name("stdin-reader".to_string()).spawn(move || {
        for line in std::io::stdin().lock().lines() {
            let Ok(line) = line else { break };
            if let Some(event) = parse_line(&line) {
                if sender.send(event).is_err() {
                    return;
                }
            }
        }
        let _ = sender.send(UiEvent::Quit);
    })?;
    Ok(receiver)
}

fn load_config() -> Result<SwarmConfig, SwarmError> {
    let config = if Path::new(CONFIG_PATH).exists() {
        log::info!("Loading configuration from {CONFIG_PATH}");
        SwarmConfig::load_from_file(CONFIG_PATH)?
    } else {
        SwarmConfig::default()
    };
    config.validate()?;
    Ok(config)
}

fn run() -> Result<(), Box<dyn std::error::Error>> {
    let config = load_config()?;

    let backend = HeadlessBackend::new(config.viewport.width, config.viewport.height);
    let controller = WordController::new(&config, backend, StdRng::from_entropy());
    let loader = FontLoader::spawn(DEFAULT_FONT_PATH)?;
    let mut frames = FrameLoop::new(controller, Some(loader), config.initial_word.clone());

    let events = spawn_stdin_reader()?;
    let mut pacer = FramePacer::new(config.frame_rate);
    let mut last_stats = Instant::now();

    frames.start();
    'frames: loop {
        pacer.begin_frame();

        loop {
            match events.try_recv() {
                Ok(UiEvent::Submit(word)) => {
                    let controller = frames.controller_mut();
                    controller.set_word(word);
                    match controller.generate() {
                        GenerateOutcome::Skipped(reason) => log::info!("Word queued, generation skipped: {reason:?}"),
                        outcome => log::debug!("Generation outcome: {outcome:?}"),
                    }
                }
                Ok(UiEvent::Resize { width, height }) => frames.controller_mut().resize(width, height),
                Ok(UiEvent::Quit) | Err(TryRecvError::Disconnected) => break 'frames,
                Err(TryRecvError::Empty) => break,
            }
        }

        frames.frame();
        let idle = pacer.end_frame();

        if last_stats.elapsed() >= STATS_INTERVAL {
            let stats = frames.controller().stats();
            log::info!(
                "{:.1} fps | {} groups | {} particles | mean distance {:.3}",
                pacer.average_fps(),
                stats.group_count,
                stats.particle_count,
                stats.mean_distance_to_target
            );
            last_stats = Instant::now();
        }

        if !idle.is_zero() {
            thread::sleep(idle);
        }
    }

    frames.shutdown();
    log::info!("Rendered {} frames", pacer.frame_count());
    Ok(())
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    logging::init();
    log::info!("Starting glyph swarm demo");

    match run() {
        Ok(()) => {
            log::info!("Glyph swarm demo exited cleanly");
            Ok(())
        }
        Err(e) => {
            log::error!("Glyph swarm demo failed: {e}");
            Err(e)
        }
    }
}
