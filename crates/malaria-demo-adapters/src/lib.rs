//! Malaria Demo Adapters - External adapters for the analysis engine.
//!
//! This crate provides adapters for:
//! - Pacing the progress loop (real sleeps or none)
//! - Drawing progress steps (thread RNG or a seeded RNG)

pub mod pacing;
pub mod steps;

pub use pacing::{InstantPacer, ThreadPacer};
pub use steps::{RandomSteps, SeededSteps};
