//! Analyze command - run the simulated analysis on samples.

use std::io::IsTerminal;
use std::sync::Arc;
use std::time::Duration;

use anyhow::{bail, Result};
use clap::{Args, ValueEnum};
use malaria_demo_adapters::{InstantPacer, RandomSteps, SeededSteps, ThreadPacer};
use malaria_demo_core::{
    AnalysisEngine, AnalysisReport, DemoSession, KnownSample, Pacer, ProgressSink, ResultOutput,
    SampleReference, StepSource, DEFAULT_SAMPLE_BASE, DEFAULT_STEP_DELAY,
};
use tracing::{debug, info, warn};

use super::ExitCode;
use crate::config::{AppConfig, MAX_STEP_DELAY_MS};
use crate::output::{JsonOutput, ProgressBar, TextOutput};

/// Output format for results.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    /// JSON Lines (one JSON object per line)
    #[default]
    Jsonl,
    /// Single JSON array
    Json,
    /// Human-readable summary
    Text,
}

/// Built-in sample selectable on the command line.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum SampleArg {
    /// Smear with parasites
    Infected,
    /// Clean smear
    Uninfected,
}

impl From<SampleArg> for KnownSample {
    fn from(arg: SampleArg) -> Self {
        match arg {
            SampleArg::Infected => Self::Infected,
            SampleArg::Uninfected => Self::Uninfected,
        }
    }
}

/// Parse a sample reference, rejecting empty strings.
fn parse_reference(s: &str) -> Result<SampleReference, String> {
    SampleReference::new(s).map_err(|e| e.to_string())
}

/// Parse and validate a step delay in milliseconds.
fn parse_step_delay(s: &str) -> Result<u64, String> {
    let value: u64 = s
        .parse()
        .map_err(|_| format!("'{s}' is not a valid number of milliseconds"))?;
    if value <= MAX_STEP_DELAY_MS {
        Ok(value)
    } else {
        Err(format!("{value} is not in 0..={MAX_STEP_DELAY_MS}"))
    }
}

/// Shared arguments for running analyses.
#[derive(Args, Clone, Default)]
pub struct AnalyzeArgs {
    /// Sample references (URLs or filenames) to analyze
    #[arg(value_parser = parse_reference)]
    pub references: Vec<SampleReference>,

    /// Analyze a built-in sample (repeatable, runs before REFERENCES)
    #[arg(short, long, value_enum)]
    pub sample: Vec<SampleArg>,

    /// Prefix the built-in samples are published under
    #[arg(long, value_name = "PREFIX")]
    pub base: Option<String>,

    /// Seed for reproducible progress steps
    #[arg(long)]
    pub seed: Option<u64>,

    /// Pause before each progress step, in milliseconds
    #[arg(long, value_parser = parse_step_delay)]
    pub step_delay_ms: Option<u64>,

    /// Show progress bar
    #[arg(long)]
    pub progress: bool,

    /// Suppress progress output
    #[arg(short, long)]
    pub quiet: bool,

    /// Output format
    #[arg(long, value_enum)]
    pub format: Option<OutputFormat>,

    /// Pretty-print JSON output (only affects --format json)
    #[arg(long)]
    pub pretty: bool,
}

impl AnalyzeArgs {
    /// Apply configuration file values, respecting CLI precedence.
    ///
    /// Layering priority (lowest to highest):
    /// 1. Hardcoded defaults (in accessor methods)
    /// 2. Config file values (XDG, then project-local)
    /// 3. CLI arguments (already set on self)
    pub fn with_config(mut args: Self, config: &AppConfig) -> Self {
        args.seed = args.seed.or(config.engine.seed);
        args.step_delay_ms = args.step_delay_ms.or_else(|| {
            config
                .engine
                .step_delay_ms
                .filter(|ms| *ms <= MAX_STEP_DELAY_MS)
        });

        if args.base.is_none() {
            args.base = config
                .samples
                .base
                .clone()
                .filter(|b| !b.trim().is_empty());
        }

        if args.format.is_none() {
            args.format = config
                .output
                .format
                .as_ref()
                .and_then(|s| OutputFormat::from_str(s, true).ok());
        }

        // Boolean output options: CLI flag wins, then config
        if !args.pretty {
            args.pretty = config.output.pretty.unwrap_or(false);
        }
        if !args.progress {
            args.progress = config.output.progress.unwrap_or(false);
        }

        args
    }

    /// Get step delay with fallback to the engine default.
    fn step_delay(&self) -> Duration {
        self.step_delay_ms
            .map_or(DEFAULT_STEP_DELAY, Duration::from_millis)
    }

    /// Get sample prefix with fallback to the default.
    fn base(&self) -> &str {
        self.base.as_deref().unwrap_or(DEFAULT_SAMPLE_BASE)
    }

    /// Get output format with fallback to JSONL.
    fn format(&self) -> OutputFormat {
        self.format.unwrap_or_default()
    }

    /// References to analyze: built-in samples first, then explicit references.
    fn selection(&self) -> Vec<SampleReference> {
        self.sample
            .iter()
            .map(|s| KnownSample::from(*s).reference(self.base()))
            .chain(self.references.iter().cloned())
            .collect()
    }
}

/// Result of running the analyze command.
#[derive(Debug)]
pub struct AnalyzeResult {
    /// Number of samples analyzed.
    pub analyzed: usize,
    /// Number of samples reported as infected.
    pub detected: usize,
    /// Exit code.
    pub exit_code: ExitCode,
}

/// Run the analyze command.
///
/// Expects `args` to have been processed through `with_config()` first
/// to apply configuration file settings.
pub fn run(args: &AnalyzeArgs) -> Result<AnalyzeResult> {
    let selection = args.selection();
    if selection.is_empty() {
        bail!("No sample selected. Pass a reference or --sample.");
    }
    info!("Running analyze command on {} samples", selection.len());

    let engine = Arc::new(build_engine(args));
    let mut session = DemoSession::new(engine);

    let show_progress = !args.quiet && (args.progress || std::io::stderr().is_terminal());
    let progress_bar = ProgressBar::new(args.quiet, show_progress);

    let output: Box<dyn ResultOutput> = match args.format() {
        OutputFormat::Jsonl => Box::new(JsonOutput::stdout()),
        OutputFormat::Json => Box::new(JsonOutput::stdout_array(args.pretty)),
        OutputFormat::Text => Box::new(TextOutput::stdout()),
    };

    let outcome = analyze_batch(&mut session, selection, &progress_bar, output.as_ref())?;
    info!(
        analyzed = outcome.analyzed,
        detected = outcome.detected,
        "Analyze command finished"
    );
    Ok(outcome)
}

/// Analyzes each reference in turn through `session`.
///
/// Every completed run is written to `output` as soon as it finishes;
/// `output` is flushed once, after the last reference.
fn analyze_batch(
    session: &mut DemoSession,
    selection: Vec<SampleReference>,
    sink: &dyn ProgressSink,
    output: &dyn ResultOutput,
) -> Result<AnalyzeResult> {
    let mut analyzed = 0usize;
    let mut detected = 0usize;

    for reference in selection {
        session.select(reference.clone());
        let Some(result) = session.analyze(sink).cloned() else {
            warn!("Analysis of {reference} did not run");
            continue;
        };

        analyzed += 1;
        if result.parasite_detected {
            detected += 1;
        }
        output.write(&AnalysisReport::new(reference, result))?;
    }

    output.flush()?;

    let exit_code = if detected > 0 {
        ExitCode::ParasiteDetected
    } else {
        ExitCode::Success
    };

    Ok(AnalyzeResult {
        analyzed,
        detected,
        exit_code,
    })
}

/// Build the engine from merged args (CLI + config).
fn build_engine(args: &AnalyzeArgs) -> AnalysisEngine {
    let delay = args.step_delay();
    let pacer: Box<dyn Pacer> = if delay.is_zero() {
        debug!("Step delay disabled");
        Box::new(InstantPacer)
    } else {
        Box::new(ThreadPacer)
    };

    let steps: Box<dyn StepSource> = match args.seed {
        Some(seed) => {
            debug!("Using seeded steps: {seed}");
            Box::new(SeededSteps::new(seed))
        }
        None => Box::new(RandomSteps),
    };

    AnalysisEngine::new(pacer, steps).with_step_delay(delay)
}
