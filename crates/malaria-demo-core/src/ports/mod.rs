//! Port definitions for hexagonal architecture.
//!
//! These traits define the boundaries between the engine and external adapters.

mod pacer;
mod progress;
mod result_output;
mod step_source;

pub use pacer::Pacer;
pub use progress::{ProgressEvent, ProgressSink};
pub use result_output::ResultOutput;
pub use step_source::StepSource;
