//! UI/Progress presentation layer
//!
//! This module handles:
//! - Download progress reporting using indicatif
//! - Silent progress for tests and non-terminal output
//! - Styled status lines (see [`display`])
//!
//! All progress reporting goes through the ProgressReporter trait, so the
//! transport never needs to know whether a terminal is attached.

pub mod display;

use console::Term;
use indicatif::{ProgressBar, ProgressStyle};

/// Progress reporter trait for downloads
pub trait ProgressReporter {
    /// Start a transfer; `total` is the content length when the server sent one
    fn start(&mut self, label: &str, total: Option<u64>);

    /// Report the number of bytes received so far
    fn advance(&mut self, downloaded: u64);

    /// Transfer completed
    fn finish(&mut self);

    /// Abandon on error
    fn abandon(&mut self);
}

/// Interactive progress reporter with a byte progress bar
#[derive(Default)]
pub struct InteractiveProgressReporter {
    bar: Option<ProgressBar>,
}

impl InteractiveProgressReporter {
    pub fn new() -> Self {
        Self::default()
    }
}

impl ProgressReporter for InteractiveProgressReporter {
    fn start(&mut self, label: &str, total: Option<u64>) {
        let bar = match total {
            Some(len) => {
                let bar = ProgressBar::new(len);
                if let Ok(style) = ProgressStyle::default_bar().template(
                    "  [{bar:40.cyan/blue}] {bytes}/{total_bytes} ({bytes_per_sec}, {eta}) {msg}",
                ) {
                    bar.set_style(style.progress_chars("#>-"));
                }
                bar
            }
            None => {
                let bar = ProgressBar::new_spinner();
                if let Ok(style) =
                    ProgressStyle::default_spinner().template("  {spinner} {bytes} {msg}")
                {
                    bar.set_style(style);
                }
                bar
            }
        };
        bar.set_message(label.to_string());
        self.bar = Some(bar);
    }

    fn advance(&mut self, downloaded: u64) {
        if let Some(ref bar) = self.bar {
            bar.set_position(downloaded);
        }
    }

    fn finish(&mut self) {
        if let Some(bar) = self.bar.take() {
            bar.finish();
        }
    }

    fn abandon(&mut self) {
        if let Some(bar) = self.bar.take() {
            bar.abandon();
        }
    }
}

/// Silent progress reporter for tests and piped output
pub struct SilentProgressReporter;

impl ProgressReporter for SilentProgressReporter {
    fn start(&mut self, _label: &str, _total: Option<u64>) {}

    fn advance(&mut self, _downloaded: u64) {}

    fn finish(&mut self) {}

    fn abandon(&mut self) {}
}

/// Pick a reporter for the current stdout
pub fn progress_reporter() -> Box<dyn ProgressReporter> {
    if Term::stdout().is_term() {
        Box::new(InteractiveProgressReporter::new())
    } else {
        Box::new(SilentProgressReporter)
    }
}
