//! The simulated analysis engine.
//!
//! A run animates a bounded progress value and then classifies the selected
//! reference deterministically. No image is ever decoded.

mod classify;
mod runner;
mod session;
mod stream;

pub use classify::{
    classify, reference_hash, Classification, ClassificationRule, INFECTED_CONFIDENCE,
    UNINFECTED_CONFIDENCE,
};
pub use runner::AnalysisEngine;
pub use session::{DemoSession, ANALYZE_LABEL, ANALYZING_LABEL};
pub use stream::{ProgressStream, DEFAULT_STEP_DELAY, MAX_STEP, MIN_STEP};
