//! Analysis engine with its single-run guard.

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Mutex, PoisonError};
use std::time::Duration;

use time::OffsetDateTime;
use tracing::{debug, info};

use super::classify::classify;
use super::stream::{ProgressStream, DEFAULT_STEP_DELAY};
use crate::domain::{AnalysisResult, Progress, SampleReference};
use crate::ports::{Pacer, ProgressEvent, ProgressSink, StepSource};

/// Runs simulated analyses, one at a time.
///
/// The engine owns the "running" flag: while a run is in flight, further
/// calls to [`AnalysisEngine::run`] return `None` without emitting anything.
pub struct AnalysisEngine {
    pacer: Box<dyn Pacer>,
    steps: Mutex<Box<dyn StepSource>>,
    step_delay: Duration,
    running: AtomicBool,
}

impl AnalysisEngine {
    /// Creates an engine pacing with `pacer` and stepping with `steps`.
    #[must_use]
    pub fn new(pacer: Box<dyn Pacer>, steps: Box<dyn StepSource>) -> Self {
        Self {
            pacer,
            steps: Mutex::new(steps),
            step_delay: DEFAULT_STEP_DELAY,
            running: AtomicBool::new(false),
        }
    }

    /// Overrides the pause before each progress step.
    #[must_use]
    pub const fn with_step_delay(mut self, step_delay: Duration) -> Self {
        self.step_delay = step_delay;
        self
    }

    /// Returns the pause before each progress step.
    #[must_use]
    pub const fn step_delay(&self) -> Duration {
        self.step_delay
    }

    /// Returns true while a run is in flight.
    #[must_use]
    pub fn is_running(&self) -> bool {
        self.running.load(Ordering::Acquire)
    }

    /// Runs one analysis of `reference`, reporting to `sink`.
    ///
    /// Emits `Started`, then every progress value (ending at 100), then
    /// `Completed`. The result is stamped after the progress finishes.
    ///
    /// Returns `None`, and emits nothing, if another run is in flight.
    pub fn run(
        &self,
        reference: &SampleReference,
        sink: &dyn ProgressSink,
    ) -> Option<AnalysisResult> {
        let Some(_guard) = RunGuard::acquire(&self.running) else {
            debug!(%reference, "Analysis already running, ignoring request");
            return None;
        };

        info!(%reference, "Starting analysis");
        sink.on_event(ProgressEvent::Started {
            reference: reference.clone(),
        });

        let mut last = Progress::ZERO;
        {
            let mut steps = self.steps.lock().unwrap_or_else(PoisonError::into_inner);
            for progress in ProgressStream::new(&mut **steps, &*self.pacer, self.step_delay) {
                last = progress;
                sink.on_event(ProgressEvent::Advanced { progress });
            }
        }
        debug_assert!(last.is_complete());

        let classification = classify(reference);
        let result = classification.into_result(OffsetDateTime::now_utc());
        debug!(
            %reference,
            rule = ?classification.rule,
            parasite_detected = result.parasite_detected,
            confidence = result.confidence,
            "Analysis finished"
        );

        sink.on_event(ProgressEvent::Completed {
            result: result.clone(),
        });
        Some(result)
    }
}

/// Holds the running flag for the duration of a run.
struct RunGuard<'a>(&'a AtomicBool);

impl<'a> RunGuard<'a> {
    fn acquire(flag: &'a AtomicBool) -> Option<Self> {
        flag.compare_exchange(false, true, Ordering::AcqRel, Ordering::Acquire)
            .ok()
            .map(|_| Self(flag))
    }
}

impl Drop for RunGuard<'_> {
    fn drop(&mut self) {
        self.0.store(false, Ordering::Release);
    }
}
