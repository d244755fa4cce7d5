//! Frame pacing and the animation clock

use std::time::{Duration, Instant};

/// Paces a frame loop to a target rate and reports the rate achieved
pub struct FramePacer {
    budget: Duration,
    started: Instant,
    frame_start: Instant,
    frame_count: u64,
}

impl FramePacer {
    /// Pacer for `frame_rate` frames per second; zero is treated as one
    pub fn new(frame_rate: u32) -> Self {
        let now = Instant::now();
        Self {
            budget: Duration::from_secs(1) / frame_rate.max(1),
            started: now,
            frame_start: now,
            frame_count: 0,
        }
    }

    /// Mark the start of a frame
    pub fn begin_frame(&mut self) {
        self.frame_start = Instant::now();
    }

    /// Count the frame and return how long to sleep to hold the target rate
    pub fn end_frame(&mut self) -> Duration {
        self.frame_count += 1;
        self.budget.saturating_sub(self.frame_start.elapsed())
    }

    /// Time allotted to one frame
    pub fn budget(&self) -> Duration {
        self.budget
    }

    /// Frames completed so far
    pub fn frame_count(&self) -> u64 {
        self.frame_count
    }

    /// Average frames per second since the pacer was created
    pub fn average_fps(&self) -> f64 {
        let seconds = self.started.elapsed().as_secs_f64();
        if seconds > 0.0 {
            self.frame_count as f64 / seconds
        } else {
            0.0
        }
    }
}

/// Stopwatch providing the animation clock
///
/// Jitter is driven by wall time rather than frame count, so the frame loop
/// reads `elapsed_millis` from a running stopwatch every tick.
pub struct Stopwatch {
    start_time: Option<Instant>,
    elapsed: Duration,
}

impl Default for Stopwatch {
    fn default() -> Self {
        Self::new()
    }
}

impl Stopwatch {
    /// Create a new stopped stopwatch
    pub fn new() -> Self {
        Self {
            start_time: None,
            elapsed: Duration::ZERO,
        }
    }

    /// Start the stopwatch
    pub fn start(&mut self) {
        if self.start_time.is_none() {
            self.start_time = Some(Instant::now());
        }
    }

    /// Stop the stopwatch and accumulate elapsed time
    pub fn stop(&mut self) {
        if let Some(start) = self.start_time.take() {
            self.elapsed += start.elapsed();
        }
    }

    /// Get the elapsed time
    pub fn elapsed(&self) -> Duration {
        let running = self.start_time.map_or(Duration::ZERO, |start| start.elapsed());
        self.elapsed + running
    }

    /// Get the elapsed time in milliseconds
    pub fn elapsed_millis(&self) -> f64 {
        self.elapsed().as_secs_f64() * 1000.0
    }

    /// Check if the stopwatch is currently running
    pub fn is_running(&self) -> bool {
        self.start_time.is_some()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_stopwatch_stopped_does_not_advance() {
        let mut stopwatch = Stopwatch::new();
        assert!(!stopwatch.is_running());
        stopwatch.start();
        stopwatch.stop();
        let frozen = stopwatch.elapsed();
        std::thread::sleep(Duration::from_millis(2));
        assert_eq!(stopwatch.elapsed(), frozen);
    }

    #[test]
    fn test_pacer_budget_and_sleep() {
        let mut pacer = FramePacer::new(50);
        assert_eq!(pacer.budget(), Duration::from_millis(20));

        pacer.begin_frame();
        assert!(pacer.end_frame() <= Duration::from_millis(20));

        pacer.begin_frame();
        std::thread::sleep(Duration::from_millis(25));
        assert_eq!(pacer.end_frame(), Duration::ZERO);
        assert_eq!(pacer.frame_count(), 2);
    }

    #[test]
    fn test_pacer_zero_rate_falls_back_to_one() {
        assert_eq!(FramePacer::new(0).budget(), Duration::from_secs(1));
    }
}
