//! Builders for references, results and engines used in tests.

use std::sync::Arc;
use std::time::Duration;

use malaria_demo_core::domain::{AnalysisResult, SampleReference};
use malaria_demo_core::engine::AnalysisEngine;
use time::OffsetDateTime;

use crate::mocks::{MockPacer, ScriptedSteps};

/// References that match neither built-in sample.
pub const UNKNOWN_REFERENCES: &[&str] = &[
    "mystery.png",
    "abc",
    "Sample.PNG",
    "blood-smear-042.tiff",
    "/static/infected.png",
    "https://example.test/slides/field-7.jpeg",
    "infected_jpg",
    "🦟.jpg",
];

/// Creates a reference, panicking on an empty string.
///
/// # Panics
///
/// Panics if `value` is empty.
#[must_use]
#[allow(clippy::expect_used)]
pub fn reference(value: &str) -> SampleReference {
    SampleReference::new(value).expect("test reference must not be empty")
}

/// Builder for engines that never sleep.
///
/// Steps default to a fixed 10 per tick, so a run emits ten stepped values
/// and the final repeat of 100.
pub struct EngineBuilder {
    steps: Vec<u8>,
    pacer: MockPacer,
    delay: Option<Duration>,
}

impl EngineBuilder {
    /// Creates a builder with default settings.
    #[must_use]
    pub fn new() -> Self {
        Self {
            steps: vec![10],
            pacer: MockPacer::new(),
            delay: None,
        }
    }

    /// Cycles through `script` for progress steps.
    #[must_use]
    pub fn steps(mut self, script: impl IntoIterator<Item = u8>) -> Self {
        self.steps = script.into_iter().collect();
        self
    }

    /// Records pauses into `pacer` (clones share their record).
    #[must_use]
    pub fn pacer(mut self, pacer: MockPacer) -> Self {
        self.pacer = pacer;
        self
    }

    /// Overrides the step delay passed to the pacer.
    #[must_use]
    pub const fn step_delay(mut self, delay: Duration) -> Self {
        self.delay = Some(delay);
        self
    }

    /// Builds the engine.
    #[must_use]
    pub fn build(self) -> AnalysisEngine {
        let engine = AnalysisEngine::new(
            Box::new(self.pacer),
            Box::new(ScriptedSteps::new(self.steps)),
        );
        match self.delay {
            Some(delay) => engine.with_step_delay(delay),
            None => engine,
        }
    }

    /// Builds the engine behind an `Arc`, ready for a `DemoSession`.
    #[must_use]
    pub fn build_shared(self) -> Arc<AnalysisEngine> {
        Arc::new(self.build())
    }
}

impl Default for EngineBuilder {
    fn default() -> Self {
        Self::new()
    }
}

/// Builder for analysis results with a fixed timestamp.
pub struct ResultBuilder {
    result: AnalysisResult,
}

impl ResultBuilder {
    /// Starts from a negative result at the Unix epoch.
    #[must_use]
    pub const fn new() -> Self {
        Self {
            result: AnalysisResult {
                parasite_detected: false,
                confidence: 0.0,
                processed_at: OffsetDateTime::UNIX_EPOCH,
            },
        }
    }

    /// Sets the detection flag.
    #[must_use]
    pub const fn detected(mut self, detected: bool) -> Self {
        self.result.parasite_detected = detected;
        self
    }

    /// Sets the confidence.
    #[must_use]
    pub const fn confidence(mut self, confidence: f64) -> Self {
        self.result.confidence = confidence;
        self
    }

    /// Sets the timestamp.
    #[must_use]
    pub const fn processed_at(mut self, at: OffsetDateTime) -> Self {
        self.result.processed_at = at;
        self
    }

    /// Returns the built result.
    #[must_use]
    pub const fn build(self) -> AnalysisResult {
        self.result
    }
}

impl Default for ResultBuilder {
    fn default() -> Self {
        Self::new()
    }
}
