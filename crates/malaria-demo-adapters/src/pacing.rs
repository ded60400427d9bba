//! Pacer adapters.

use std::time::Duration;

use malaria_demo_core::Pacer;
use tracing::trace;

/// Blocks the calling thread for each pause.
#[derive(Debug, Clone, Copy, Default)]
pub struct ThreadPacer;

impl Pacer for ThreadPacer {
    fn pause(&self, delay: Duration) {
        if delay.is_zero() {
            return;
        }
        trace!(delay_ms = delay.as_millis(), "Pausing before next step");
        std::thread::sleep(delay);
    }
}

/// Never waits. Used when the step delay is disabled and in tests.
#[derive(Debug, Clone, Copy, Default)]
pub struct InstantPacer;

impl Pacer for InstantPacer {
    fn pause(&self, _delay: Duration) {}
}

#[cfg(test)]
mod tests {
    use std::time::Instant;

    use super::*;

    #[test]
    fn test_thread_pacer_waits() {
        let start = Instant::now();
        ThreadPacer.pause(Duration::from_millis(20));
        assert!(start.elapsed() >= Duration::from_millis(20));
    }

    #[test]
    fn test_instant_pacer_returns_immediately() {
        let start = Instant::now();
        InstantPacer.pause(Duration::from_secs(60));
        assert!(start.elapsed() < Duration::from_secs(1));
    }
}
