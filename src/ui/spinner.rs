//! Probe spinners.

use indicatif::{ProgressBar, ProgressStyle};
use std::time::Duration;

use super::theme::BspconfTheme;
use super::SpinnerHandle;

/// A spinner shown while a probe compiles.
pub struct ProgressSpinner {
    bar: ProgressBar,
    theme: BspconfTheme,
}

impl ProgressSpinner {
    pub fn new(message: &str, theme: BspconfTheme) -> Self {
        let bar = ProgressBar::new_spinner();
        if let Ok(style) = ProgressStyle::default_spinner()
            .tick_chars("⠋⠙⠹⠸⠼⠴⠦⠧⠇⠏")
            .template("{spinner:.cyan} {msg}")
        {
            bar.set_style(style);
        }
        bar.set_message(message.to_string());
        bar.enable_steady_tick(Duration::from_millis(80));

        Self { bar, theme }
    }

    /// Create a spinner that doesn't show (for silent mode).
    pub fn hidden() -> Self {
        Self {
            bar: ProgressBar::hidden(),
            theme: BspconfTheme::plain(),
        }
    }

    fn finish_with(&mut self, line: String) {
        if let Ok(style) = ProgressStyle::default_spinner().template("{msg}") {
            self.bar.set_style(style);
        }
        self.bar.finish_with_message(line);
    }

    fn line(&self, status: String) -> String {
        format!("{} {}", self.bar.message(), status)
    }
}

impl SpinnerHandle for ProgressSpinner {
    fn finish_success(&mut self, msg: &str) {
        let line = self.line(self.theme.format_success(msg));
        self.finish_with(line);
    }

    fn finish_error(&mut self, msg: &str) {
        let line = self.line(self.theme.format_error(msg));
        self.finish_with(line);
    }

    fn finish_skipped(&mut self, msg: &str) {
        let line = self.line(self.theme.format_skipped(msg));
        self.finish_with(line);
    }
}
