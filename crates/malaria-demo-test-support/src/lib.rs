//! Test support utilities for malaria-demo.
//!
//! Provides mocks of the engine ports and builders for references, results
//! and engines that run without real delays.
//!
//! # Example
//!
//! ```
//! use malaria_demo_core::DemoSession;
//! use malaria_demo_test_support::{EngineBuilder, MockProgressSink};
//!
//! let mut session = DemoSession::new(EngineBuilder::new().steps([10]).build_shared());
//! session.select(malaria_demo_test_support::reference("mystery.png"));
//!
//! let sink = MockProgressSink::new();
//! session.analyze(&sink);
//! assert_eq!(sink.progress_values().last(), Some(&100));
//! ```

mod builders;
mod mocks;

pub use builders::{reference, EngineBuilder, ResultBuilder, UNKNOWN_REFERENCES};
pub use mocks::{MockPacer, MockProgressSink, MockResultOutput, ScriptedSteps};
