//! Samples command - list the built-in samples.

use anyhow::Result;
use clap::Args;
use malaria_demo_core::{KnownSample, DEFAULT_SAMPLE_BASE};
use serde::Serialize;

use crate::config::AppConfig;
use crate::output::JsonOutput;

/// Arguments for the samples command
#[derive(Args)]
pub struct SamplesArgs {
    /// Prefix the built-in samples are published under
    #[arg(long, value_name = "PREFIX")]
    pub base: Option<String>,

    /// Print as a JSON array
    #[arg(long)]
    pub json: bool,
}

/// One row of the sample listing.
#[derive(Debug, Serialize)]
struct SampleEntry {
    name: &'static str,
    label: &'static str,
    reference: String,
}

/// Run the samples command.
pub fn run(args: &SamplesArgs, config: &AppConfig) -> Result<()> {
    let base = args
        .base
        .as_deref()
        .or(config.samples.base.as_deref().filter(|b| !b.trim().is_empty()))
        .unwrap_or(DEFAULT_SAMPLE_BASE);

    let entries = entries(base);
    if args.json {
        return JsonOutput::stdout().write_array(&entries, false);
    }

    for entry in &entries {
        println!("{:<12} {:<14} {}", entry.name, entry.label, entry.reference);
    }
    Ok(())
}

/// Built-in samples in the order they are offered to users.
fn entries(base: &str) -> Vec<SampleEntry> {
    [KnownSample::Infected, KnownSample::Uninfected]
        .into_iter()
        .map(|sample| SampleEntry {
            name: sample.name(),
            label: sample.label(),
            reference: sample.reference(base).into(),
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_entries_use_base() {
        let entries = entries("/static/");
        assert_eq!(entries.len(), 2);
        assert_eq!(entries[0].name, "infected");
        assert_eq!(entries[0].label, "Infected");
        assert_eq!(entries[0].reference, "/static/infected.jpg");
        assert_eq!(entries[1].name, "uninfected");
        assert_eq!(entries[1].label, "Not infected");
        assert_eq!(entries[1].reference, "/static/uninfected.jpg");
    }
}
