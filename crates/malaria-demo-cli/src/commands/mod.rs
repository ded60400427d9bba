//! CLI command definitions and handlers.

pub mod analyze;
pub mod samples;

use clap::{Parser, Subcommand};

/// Malaria Demo - Simulated blood smear analysis
#[derive(Parser)]
#[command(name = "malaria-demo")]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    /// Shared analyze arguments (references, samples, output flags).
    #[command(flatten)]
    pub analyze: analyze::AnalyzeArgs,

    /// Increase verbosity (-v, -vv, -vvv)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,

    #[command(subcommand)]
    pub command: Option<Commands>,
}

/// Available subcommands
#[derive(Subcommand)]
pub enum Commands {
    /// Run the simulated analysis on one or more samples
    Analyze(analyze::AnalyzeArgs),
    /// List the built-in samples
    Samples(samples::SamplesArgs),
}

/// Process exit codes.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ExitCode {
    /// No parasites reported.
    Success = 0,
    /// At least one sample was reported as infected.
    ParasiteDetected = 1,
    /// The command failed.
    Error = 2,
}

impl From<ExitCode> for std::process::ExitCode {
    fn from(code: ExitCode) -> Self {
        Self::from(code as u8)
    }
}
