//! Pacing port for the timed progress loop.

use std::time::Duration;

/// Suspends the caller between progress steps.
pub trait Pacer: Send + Sync {
    /// Blocks for `delay` (or pretends to).
    fn pause(&self, delay: Duration);
}
