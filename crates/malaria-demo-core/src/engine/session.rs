//! Demo session: the state a UI collaborator drives.

use std::sync::atomic::{AtomicU8, Ordering};
use std::sync::Arc;

use tracing::debug;

use super::runner::AnalysisEngine;
use crate::domain::{AnalysisResult, KnownSample, Progress, SampleReference};
use crate::ports::{ProgressEvent, ProgressSink};

/// Action text while idle.
pub const ANALYZE_LABEL: &str = "Analyze";
/// Action text while a run is in flight.
pub const ANALYZING_LABEL: &str = "Analyzing...";

/// Selection, progress and result of one user's demo.
///
/// Choosing a sample clears the previous result and resets progress.
/// Analysis is only invocable once a sample has been chosen.
pub struct DemoSession {
    engine: Arc<AnalysisEngine>,
    selected: Option<SampleReference>,
    progress: Progress,
    result: Option<AnalysisResult>,
}

impl DemoSession {
    /// Creates an empty session backed by `engine`.
    #[must_use]
    pub const fn new(engine: Arc<AnalysisEngine>) -> Self {
        Self {
            engine,
            selected: None,
            progress: Progress::ZERO,
            result: None,
        }
    }

    /// Returns the engine backing this session.
    #[must_use]
    pub const fn engine(&self) -> &Arc<AnalysisEngine> {
        &self.engine
    }

    /// Chooses the sample to analyze next.
    pub fn select(&mut self, reference: SampleReference) {
        debug!(%reference, "Sample selected");
        self.selected = Some(reference);
        self.result = None;
        self.progress = Progress::ZERO;
    }

    /// Chooses one of the built-in samples published under `base`.
    pub fn select_sample(&mut self, sample: KnownSample, base: &str) {
        self.select(sample.reference(base));
    }

    /// Currently selected sample, if any.
    #[must_use]
    pub const fn selected(&self) -> Option<&SampleReference> {
        self.selected.as_ref()
    }

    /// Last progress observed for the current selection.
    #[must_use]
    pub const fn progress(&self) -> Progress {
        self.progress
    }

    /// Result of the last completed run for the current selection.
    #[must_use]
    pub const fn result(&self) -> Option<&AnalysisResult> {
        self.result.as_ref()
    }

    /// Returns true while the engine is running.
    #[must_use]
    pub fn is_running(&self) -> bool {
        self.engine.is_running()
    }

    /// Returns true when a sample is selected and nothing is running.
    #[must_use]
    pub fn can_analyze(&self) -> bool {
        self.selected.is_some() && !self.is_running()
    }

    /// Text for the analyze action in its current state.
    #[must_use]
    pub fn action_label(&self) -> &'static str {
        if self.is_running() {
            ANALYZING_LABEL
        } else {
            ANALYZE_LABEL
        }
    }

    /// Analyzes the selected sample, forwarding progress to `sink`.
    ///
    /// Does nothing and returns `None` when no sample is selected or a run
    /// is already in flight.
    pub fn analyze(&mut self, sink: &dyn ProgressSink) -> Option<&AnalysisResult> {
        if !self.can_analyze() {
            debug!(
                selected = self.selected.is_some(),
                running = self.is_running(),
                "Analyze not available"
            );
            return None;
        }
        let reference = self.selected.clone()?;

        self.result = None;
        self.progress = Progress::ZERO;

        let tracker = ProgressTracker {
            inner: sink,
            last: AtomicU8::new(Progress::ZERO.value()),
        };
        let result = self.engine.run(&reference, &tracker)?;

        self.progress = tracker.last();
        self.result = Some(result);
        self.result.as_ref()
    }
}

/// Forwards events while remembering the latest progress.
struct ProgressTracker<'a> {
    inner: &'a dyn ProgressSink,
    last: AtomicU8,
}

impl ProgressTracker<'_> {
    fn last(&self) -> Progress {
        Progress::new(self.last.load(Ordering::Acquire))
    }
}

impl ProgressSink for ProgressTracker<'_> {
    fn on_event(&self, event: ProgressEvent) {
        if let ProgressEvent::Advanced { progress } = &event {
            self.last.store(progress.value(), Ordering::Release);
        }
        self.inner.on_event(event);
    }
}
