//! Malaria Demo Core - Domain logic and the simulated analysis engine
//!
//! This crate contains the core domain types, the port traits the engine talks
//! through, and the simulated analysis engine with its demo session.

pub mod domain;
pub mod engine;
pub mod ports;

pub use domain::{
    format_timestamp, AnalysisReport, AnalysisResult, KnownSample, Progress, SampleReference,
    DEFAULT_SAMPLE_BASE,
};
pub use engine::{
    classify, reference_hash, AnalysisEngine, Classification, ClassificationRule, DemoSession,
    ProgressStream, DEFAULT_STEP_DELAY,
};
pub use ports::{Pacer, ProgressEvent, ProgressSink, ResultOutput, StepSource};
