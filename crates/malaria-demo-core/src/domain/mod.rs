//! Core domain types for the simulated analysis.

mod progress;
mod reference;
mod result;

pub use progress::Progress;
pub use reference::{KnownSample, SampleReference, DEFAULT_SAMPLE_BASE};
pub use result::{format_timestamp, AnalysisReport, AnalysisResult};
