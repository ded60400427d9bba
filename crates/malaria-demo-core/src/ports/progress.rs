//! Progress reporting port for UI integration.

use crate::domain::{AnalysisResult, Progress, SampleReference};

/// Events emitted during a run for progress tracking.
#[derive(Debug, Clone, PartialEq)]
pub enum ProgressEvent {
    /// A run started for a sample.
    Started {
        /// The sample being analyzed.
        reference: SampleReference,
    },
    /// The progress value moved.
    Advanced {
        /// New progress value.
        progress: Progress,
    },
    /// The run produced its result.
    Completed {
        /// The analysis result.
        result: AnalysisResult,
    },
}

/// Port for receiving progress events.
pub trait ProgressSink: Send + Sync {
    /// Called when a progress event occurs.
    fn on_event(&self, event: ProgressEvent);
}
