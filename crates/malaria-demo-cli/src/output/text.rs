//! Human-readable output adapter.

use std::io::{self, Write};
use std::sync::Mutex;

use anyhow::Result;
use malaria_demo_core::{format_timestamp, AnalysisReport, ResultOutput};

/// Writes one short block per report.
pub struct TextOutput {
    writer: Mutex<Box<dyn Write + Send>>,
}

impl TextOutput {
    /// Creates a new text output writing to stdout.
    #[must_use]
    pub fn stdout() -> Self {
        Self::new(Box::new(io::stdout()))
    }

    /// Creates a new text output writing to the given writer.
    #[must_use]
    pub fn new(writer: Box<dyn Write + Send>) -> Self {
        Self {
            writer: Mutex::new(writer),
        }
    }
}

/// Renders a report as the lines shown to the user.
pub fn render(report: &AnalysisReport) -> Result<String> {
    let result = &report.result;
    let detected = if result.parasite_detected { "yes" } else { "no" };
    Ok(format!(
        "{}\n  Parasite detected: {detected}\n  Confidence: {:.1}%\n  Processed at: {}",
        report.reference,
        result.confidence * 100.0,
        format_timestamp(result.processed_at)?,
    ))
}

impl ResultOutput for TextOutput {
    #[allow(clippy::significant_drop_tightening)]
    fn write(&self, report: &AnalysisReport) -> Result<()> {
        let block = render(report)?;
        let mut writer = self
            .writer
            .lock()
            .map_err(|e| anyhow::anyhow!("Lock poisoned: {e}"))?;
        writeln!(writer, "{block}")?;
        Ok(())
    }

    #[allow(clippy::significant_drop_tightening)]
    fn flush(&self) -> Result<()> {
        let mut writer = self
            .writer
            .lock()
            .map_err(|e| anyhow::anyhow!("Lock poisoned: {e}"))?;
        writer.flush()?;
        Ok(())
    }
}
