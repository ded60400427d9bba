//! Mock implementations of core port traits.

use std::sync::{Arc, Mutex, PoisonError};
use std::time::Duration;

use malaria_demo_core::domain::{AnalysisReport, AnalysisResult};
use malaria_demo_core::ports::{Pacer, ProgressEvent, ProgressSink, ResultOutput, StepSource};

/// Mock implementation of `ResultOutput` for testing.
///
/// Captures reports for later assertions.
pub struct MockResultOutput {
    reports: Arc<Mutex<Vec<AnalysisReport>>>,
    flush_count: Arc<Mutex<usize>>,
}

impl MockResultOutput {
    /// Creates a new mock output.
    #[must_use]
    pub fn new() -> Self {
        Self {
            reports: Arc::new(Mutex::new(Vec::new())),
            flush_count: Arc::new(Mutex::new(0)),
        }
    }

    /// Returns all captured reports.
    #[must_use]
    pub fn reports(&self) -> Vec<AnalysisReport> {
        self.reports
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }

    /// Returns the number of times `flush()` was called.
    #[must_use]
    pub fn flush_count(&self) -> usize {
        *self
            .flush_count
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
    }
}

impl Default for MockResultOutput {
    fn default() -> Self {
        Self::new()
    }
}

impl ResultOutput for MockResultOutput {
    fn write(&self, report: &AnalysisReport) -> anyhow::Result<()> {
        self.reports
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .push(report.clone());
        Ok(())
    }

    fn flush(&self) -> anyhow::Result<()> {
        if let Ok(mut c) = self.flush_count.lock() {
            *c += 1;
        }
        Ok(())
    }
}

/// Mock implementation of `ProgressSink` for testing.
///
/// Captures events for later assertions.
pub struct MockProgressSink {
    events: Arc<Mutex<Vec<ProgressEvent>>>,
}

impl MockProgressSink {
    /// Creates a new mock progress sink.
    #[must_use]
    pub fn new() -> Self {
        Self {
            events: Arc::new(Mutex::new(Vec::new())),
        }
    }

    /// Returns all captured events.
    #[must_use]
    pub fn events(&self) -> Vec<ProgressEvent> {
        self.events
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }

    /// Returns the emitted progress values, in order.
    #[must_use]
    pub fn progress_values(&self) -> Vec<u8> {
        self.events()
            .iter()
            .filter_map(|e| match e {
                ProgressEvent::Advanced { progress } => Some(progress.value()),
                _ => None,
            })
            .collect()
    }

    /// Returns the number of `Started` events.
    #[must_use]
    pub fn started_count(&self) -> usize {
        self.events()
            .iter()
            .filter(|e| matches!(e, ProgressEvent::Started { .. }))
            .count()
    }

    /// Returns the results carried by `Completed` events.
    #[must_use]
    pub fn completed(&self) -> Vec<AnalysisResult> {
        self.events()
            .into_iter()
            .filter_map(|e| match e {
                ProgressEvent::Completed { result } => Some(result),
                _ => None,
            })
            .collect()
    }

    /// Discards captured events.
    pub fn clear(&self) {
        self.events
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .clear();
    }
}

impl Default for MockProgressSink {
    fn default() -> Self {
        Self::new()
    }
}

impl ProgressSink for MockProgressSink {
    fn on_event(&self, event: ProgressEvent) {
        self.events
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .push(event);
    }
}

/// Mock implementation of `Pacer` that records pauses instead of sleeping.
#[derive(Clone, Default)]
pub struct MockPacer {
    pauses: Arc<Mutex<Vec<Duration>>>,
}

impl MockPacer {
    /// Creates a new mock pacer.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns the requested pauses, in order.
    #[must_use]
    pub fn pauses(&self) -> Vec<Duration> {
        self.pauses
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }
}

impl Pacer for MockPacer {
    fn pause(&self, delay: Duration) {
        self.pauses
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .push(delay);
    }
}

/// Step source that cycles through a fixed script.
#[derive(Debug, Clone)]
pub struct ScriptedSteps {
    script: Vec<u8>,
    position: usize,
}

impl ScriptedSteps {
    /// Creates a source yielding `script` in a loop. An empty script yields 0.
    #[must_use]
    pub fn new(script: impl IntoIterator<Item = u8>) -> Self {
        Self {
            script: script.into_iter().collect(),
            position: 0,
        }
    }
}

impl StepSource for ScriptedSteps {
    fn next_step(&mut self) -> u8 {
        if self.script.is_empty() {
            return 0;
        }
        let step = self.script[self.position % self.script.len()];
        self.position += 1;
        step
    }
}
