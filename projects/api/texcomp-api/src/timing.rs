//! Wall clock timing of compression runs.

use std::time::{Duration, Instant};

/// Accumulates elapsed time between [`StopWatch::start`] and [`StopWatch::stop`] calls.
#[derive(Debug, Clone, Copy, Default)]
pub struct StopWatch {
    started: Option<Instant>,
    elapsed: Duration,
}

impl StopWatch {
    /// Creates a stopped stopwatch with no time on it.
    pub fn new() -> Self {
        Self::default()
    }

    /// Clears accumulated time and stops the stopwatch.
    pub fn reset(&mut self) {
        *self = Self::default();
    }

    /// Starts timing. Has no effect if already running.
    pub fn start(&mut self) {
        if self.started.is_none() {
            self.started = Some(Instant::now());
        }
    }

    /// Stops timing and adds the time since [`StopWatch::start`].
    pub fn stop(&mut self) {
        if let Some(started) = self.started.take() {
            self.elapsed += started.elapsed();
        }
    }

    /// Accumulated time, including the current run if still running.
    pub fn elapsed(&self) -> Duration {
        match self.started {
            Some(started) => self.elapsed + started.elapsed(),
            None => self.elapsed,
        }
    }

    /// Accumulated time in milliseconds.
    pub fn time_in_milliseconds(&self) -> f64 {
        self.elapsed().as_secs_f64() * 1000.0
    }
}
