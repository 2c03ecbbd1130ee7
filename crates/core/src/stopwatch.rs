//! Wall-clock frame timer.

use std::time::{Duration, Instant};

/// Measures time since the last [`Stopwatch::start`].
#[derive(Debug, Clone, Copy)]
pub struct Stopwatch {
    start: Instant,
}

impl Default for Stopwatch {
    fn default() -> Self {
        Self::new()
    }
}

impl Stopwatch {
    /// Creates a running stopwatch.
    pub fn new() -> Self {
        Self {
            start: Instant::now(),
        }
    }

    /// Restarts the measurement from now.
    pub fn start(&mut self) {
        self.start = Instant::now();
    }

    pub fn elapsed(&self) -> Duration {
        self.start.elapsed()
    }

    pub fn elapsed_us(&self) -> u128 {
        self.elapsed().as_micros()
    }

    /// Elapsed time in fractional milliseconds.
    pub fn elapsed_ms(&self) -> f32 {
        self.elapsed_us() as f32 / 1000.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::thread::sleep;

    #[test]
    fn elapsed_grows_after_sleep() {
        let sw = Stopwatch::new();
        sleep(Duration::from_millis(2));
        assert!(sw.elapsed_us() >= 2000);
        assert!(sw.elapsed_ms() >= 2.0);
    }

    #[test]
    fn start_resets_measurement() {
        let mut sw = Stopwatch::new();
        sleep(Duration::from_millis(5));
        sw.start();
        assert!(sw.elapsed() < Duration::from_millis(5));
    }
}
