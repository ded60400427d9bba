//! Bounded progress value.

use std::fmt;

use serde::{Deserialize, Serialize};

/// Simulated analysis advancement, always within `0..=100`.
#[derive(
    Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize,
)]
#[serde(from = "u8", into = "u8")]
pub struct Progress(u8);

impl Progress {
    /// Progress at the start of a run.
    pub const ZERO: Self = Self(0);
    /// Terminal progress value.
    pub const COMPLETE: Self = Self(100);

    /// Creates a progress value, clamping anything above 100.
    #[must_use]
    pub const fn new(value: u8) -> Self {
        if value > Self::COMPLETE.0 {
            Self::COMPLETE
        } else {
            Self(value)
        }
    }

    /// Returns the percentage.
    #[must_use]
    pub const fn value(self) -> u8 {
        self.0
    }

    /// Returns true once the value has reached 100.
    #[must_use]
    pub const fn is_complete(self) -> bool {
        self.0 >= Self::COMPLETE.0
    }

    /// Advances by `step`, never exceeding 100.
    #[must_use]
    pub const fn advance(self, step: u8) -> Self {
        Self::new(self.0.saturating_add(step))
    }
}

impl From<u8> for Progress {
    fn from(value: u8) -> Self {
        Self::new(value)
    }
}

impl From<Progress> for u8 {
    fn from(progress: Progress) -> Self {
        progress.0
    }
}

impl fmt::Display for Progress {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}%", self.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_clamps() {
        assert_eq!(Progress::new(42).value(), 42);
        assert_eq!(Progress::new(250), Progress::COMPLETE);
    }

    #[test]
    fn test_advance_clamps_at_complete() {
        let progress = Progress::new(90).advance(19);
        assert_eq!(progress, Progress::COMPLETE);
        assert!(progress.is_complete());

        let progress = Progress::new(250).advance(u8::MAX);
        assert_eq!(progress.value(), 100);
    }

    #[test]
    fn test_display() {
        assert_eq!(Progress::new(35).to_string(), "35%");
    }
}
