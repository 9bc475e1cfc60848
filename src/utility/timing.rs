// ============================================
// TIMING UTILITY - Performance Measurement
// ============================================
// Usage:
//   let timer = Timer::start_with_threshold("download", 2000);
//   ... work ...
//   timer.stop();   // or let it drop
// ============================================

use std::time::{Duration, Instant};
use tracing::{info, warn};

/// Timer for measuring execution time, logged once on stop or drop
pub struct Timer {
    name: String,
    start: Instant,
    threshold_ms: u128,
    logged: bool,
}

impl Timer {
    pub fn start(name: impl Into<String>) -> Self {
        Self::start_with_threshold(name, 0)
    }

    /// Only log when execution reaches `threshold_ms`
    pub fn start_with_threshold(name: impl Into<String>, threshold_ms: u128) -> Self {
        Self {
            name: name.into(),
            start: Instant::now(),
            threshold_ms,
            logged: false,
        }
    }

    pub fn elapsed(&self) -> Duration {
        self.start.elapsed()
    }

    pub fn elapsed_ms(&self) -> u128 {
        self.start.elapsed().as_millis()
    }

    /// Stop the timer and log the result
    pub fn stop(mut self) -> Duration {
        let duration = self.start.elapsed();
        self.log_duration(duration);
        duration
    }

    fn log_duration(&mut self, duration: Duration) {
        if self.logged {
            return;
        }
        self.logged = true;

        let ms = duration.as_millis();
        if ms < self.threshold_ms {
            return;
        }

        if self.threshold_ms > 0 {
            warn!(operation = %self.name, elapsed_ms = ms as u64, "slow operation");
        } else {
            info!(operation = %self.name, elapsed_ms = ms as u64, "timed operation");
        }
    }
}

impl Drop for Timer {
    fn drop(&mut self) {
        let duration = self.start.elapsed();
        self.log_duration(duration);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_stop_returns_elapsed() {
        let timer = Timer::start("noop");
        std::thread::sleep(Duration::from_millis(5));
        assert!(timer.elapsed_ms() >= 5);
        assert!(timer.stop() >= Duration::from_millis(5));
    }

    #[test]
    fn test_threshold_timer_is_quiet_when_fast() {
        let timer = Timer::start_with_threshold("fast", 60_000);
        assert!(timer.elapsed() < Duration::from_secs(60));
        drop(timer);
    }
}
