//! Step source port for progress increments.

/// Yields the increments the progress loop advances by.
///
/// Values outside the engine's step range are clamped by the caller.
pub trait StepSource: Send {
    /// Returns the next increment.
    fn next_step(&mut self) -> u8;
}
