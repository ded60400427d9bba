//! JSON output adapter.

use std::io::{self, Write};
use std::mem;
use std::sync::Mutex;

use anyhow::Result;
use malaria_demo_core::{AnalysisReport, ResultOutput};
use serde::Serialize;

/// JSON output adapter.
///
/// In lines mode each report is written as soon as it arrives. In array mode
/// reports are held until `flush()`, which writes them as one JSON array.
pub struct JsonOutput {
    writer: Mutex<Box<dyn Write + Send>>,
    array: Option<ArrayMode>,
}

struct ArrayMode {
    pretty: bool,
    pending: Mutex<Vec<AnalysisReport>>,
}

impl JsonOutput {
    /// Creates a new JSON Lines output writing to stdout.
    #[must_use]
    pub fn stdout() -> Self {
        Self::new(Box::new(io::stdout()))
    }

    /// Creates a new JSON array output writing to stdout.
    #[must_use]
    pub fn stdout_array(pretty: bool) -> Self {
        Self::array(Box::new(io::stdout()), pretty)
    }

    /// Creates a new JSON Lines output writing to the given writer.
    #[must_use]
    pub fn new(writer: Box<dyn Write + Send>) -> Self {
        Self {
            writer: Mutex::new(writer),
            array: None,
        }
    }

    /// Creates a new JSON array output writing to the given writer.
    #[must_use]
    pub fn array(writer: Box<dyn Write + Send>, pretty: bool) -> Self {
        Self {
            writer: Mutex::new(writer),
            array: Some(ArrayMode {
                pretty,
                pending: Mutex::new(Vec::new()),
            }),
        }
    }

    /// Writes a batch of values as a JSON array.
    pub fn write_array<T: Serialize>(&self, items: &[T], pretty: bool) -> Result<()> {
        let json = if pretty {
            serde_json::to_string_pretty(items)?
        } else {
            serde_json::to_string(items)?
        };
        self.write_line(&json)
    }

    #[allow(clippy::significant_drop_tightening)]
    fn write_line(&self, line: &str) -> Result<()> {
        let mut writer = self
            .writer
            .lock()
            .map_err(|e| anyhow::anyhow!("Lock poisoned: {e}"))?;
        writeln!(writer, "{line}")?;
        Ok(())
    }
}

impl ResultOutput for JsonOutput {
    fn write(&self, report: &AnalysisReport) -> Result<()> {
        if let Some(array) = &self.array {
            array
                .pending
                .lock()
                .map_err(|e| anyhow::anyhow!("Lock poisoned: {e}"))?
                .push(report.clone());
            return Ok(());
        }
        let json = serde_json::to_string(report)?;
        self.write_line(&json)
    }

    #[allow(clippy::significant_drop_tightening)]
    fn flush(&self) -> Result<()> {
        if let Some(array) = &self.array {
            let reports = mem::take(
                &mut *array
                    .pending
                    .lock()
                    .map_err(|e| anyhow::anyhow!("Lock poisoned: {e}"))?,
            );
            self.write_array(&reports, array.pretty)?;
        }
        let mut writer = self
            .writer
            .lock()
            .map_err(|e| anyhow::anyhow!("Lock poisoned: {e}"))?;
        writer.flush()?;
        Ok(())
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use std::sync::Arc;

    use super::*;
    use malaria_demo_test_support::{reference, ResultBuilder};
    use serde_json::Value;

    /// Writer whose bytes stay readable after being boxed.
    #[derive(Clone, Default)]
    struct Captured(Arc<Mutex<Vec<u8>>>);

    impl Write for Captured {
        fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
            self.0.lock().unwrap().extend_from_slice(buf);
            Ok(buf.len())
        }

        fn flush(&mut self) -> io::Result<()> {
            Ok(())
        }
    }

    impl Captured {
        fn text(&self) -> String {
            String::from_utf8(self.0.lock().unwrap().clone()).unwrap()
        }
    }

    fn report(value: &str, detected: bool) -> AnalysisReport {
        AnalysisReport::new(
            reference(value),
            ResultBuilder::new()
                .detected(detected)
                .confidence(0.9)
                .build(),
        )
    }

    #[test]
    fn test_lines_mode_writes_immediately() {
        let buf = Captured::default();
        let output = JsonOutput::new(Box::new(buf.clone()));

        output.write(&report("a.png", true)).unwrap();
        assert_eq!(buf.text().lines().count(), 1);
        output.write(&report("b.png", false)).unwrap();
        output.flush().unwrap();

        let lines: Vec<Value> = buf
            .text()
            .lines()
            .map(|l| serde_json::from_str(l).unwrap())
            .collect();
        assert_eq!(lines.len(), 2);
        assert_eq!(lines[0]["reference"], "a.png");
        assert_eq!(lines[1]["parasiteDetected"], false);
        assert_eq!(lines[1]["processedAt"], "1970-01-01T00:00:00.000Z");
    }

    #[test]
    fn test_array_mode_waits_for_flush() {
        let buf = Captured::default();
        let output = JsonOutput::array(Box::new(buf.clone()), false);

        output.write(&report("a.png", true)).unwrap();
        output.write(&report("b.png", false)).unwrap();
        assert!(buf.text().is_empty());

        output.flush().unwrap();
        let text = buf.text();
        assert_eq!(text.lines().count(), 1);

        let parsed: Value = serde_json::from_str(&text).unwrap();
        let items = parsed.as_array().unwrap();
        assert_eq!(items.len(), 2);
        assert_eq!(items[0]["reference"], "a.png");
        assert_eq!(items[1]["reference"], "b.png");
    }

    #[test]
    fn test_array_mode_pretty() {
        let buf = Captured::default();
        let output = JsonOutput::array(Box::new(buf.clone()), true);

        output.write(&report("a.png", true)).unwrap();
        output.flush().unwrap();

        let text = buf.text();
        assert!(text.lines().count() > 1);
        assert!(text.contains("\n  {"));
    }
}
