//! Progress bar adapter using indicatif.

use std::sync::{Mutex, PoisonError};

use indicatif::{ProgressBar as IndicatifBar, ProgressStyle};
use malaria_demo_core::engine::ANALYZING_LABEL;
use malaria_demo_core::{Progress, ProgressEvent, ProgressSink};

/// Progress bar adapter for CLI output.
///
/// Draws one bar per run. Without a bar, positive results are noted on stderr.
pub struct ProgressBar {
    bar: Mutex<Option<IndicatifBar>>,
    show_bar: bool,
    quiet: bool,
}

impl ProgressBar {
    /// Creates a new progress bar.
    ///
    /// # Arguments
    ///
    /// * `quiet` - If true, suppress all output
    /// * `show_bar` - If true, show progress bar; otherwise show per-run status
    #[must_use]
    pub const fn new(quiet: bool, show_bar: bool) -> Self {
        Self {
            bar: Mutex::new(None),
            show_bar: show_bar && !quiet,
            quiet,
        }
    }

    fn new_bar() -> IndicatifBar {
        let bar = IndicatifBar::new(u64::from(Progress::COMPLETE.value()));
        if let Ok(style) = ProgressStyle::default_bar()
            .template("{spinner:.green} [{elapsed_precise}] [{bar:40.cyan/blue}] {pos:>3}% {msg}")
        {
            bar.set_style(style.progress_chars("#>-"));
        }
        bar
    }
}

impl ProgressSink for ProgressBar {
    fn on_event(&self, event: ProgressEvent) {
        if self.quiet {
            return;
        }

        let mut slot = self.bar.lock().unwrap_or_else(PoisonError::into_inner);
        match event {
            ProgressEvent::Started { reference } => {
                if self.show_bar {
                    let bar = Self::new_bar();
                    bar.set_message(format!("{ANALYZING_LABEL} {reference}"));
                    *slot = Some(bar);
                }
            }
            ProgressEvent::Advanced { progress } => {
                if let Some(bar) = slot.as_ref() {
                    bar.set_position(u64::from(progress.value()));
                }
            }
            ProgressEvent::Completed { result } => {
                if let Some(bar) = slot.take() {
                    let verdict = if result.parasite_detected {
                        "parasites detected"
                    } else {
                        "no parasites detected"
                    };
                    bar.finish_with_message(format!(
                        "Done: {verdict} ({:.1}%)",
                        result.confidence * 100.0
                    ));
                } else if result.parasite_detected {
                    eprintln!(
                        "parasites detected ({:.1}% confidence)",
                        result.confidence * 100.0
                    );
                }
            }
        }
    }
}
