//! Plain line-oriented UI for pipes and CI logs.

use super::theme::BspconfTheme;
use super::{OutputMode, SpinnerHandle, UserInterface};

/// UI implementation for non-interactive output.
///
/// Spinners become a single `message result` line printed when the
/// operation finishes, the way configure scripts report their checks.
pub struct NonInteractiveUI {
    mode: OutputMode,
    theme: BspconfTheme,
}

impl NonInteractiveUI {
    pub fn new(mode: OutputMode) -> Self {
        Self {
            mode,
            theme: BspconfTheme::plain(),
        }
    }
}

impl UserInterface for NonInteractiveUI {
    fn output_mode(&self) -> OutputMode {
        self.mode
    }

    fn message(&mut self, msg: &str) {
        if self.mode.shows_status() {
            println!("{}", msg);
        }
    }

    fn output(&mut self, text: &str) {
        println!("{}", text);
    }

    fn success(&mut self, msg: &str) {
        if self.mode.shows_status() {
            println!("{}", self.theme.format_success(msg));
        }
    }

    fn warning(&mut self, msg: &str) {
        if self.mode.shows_status() {
            println!("{}", self.theme.format_warning(msg));
        }
    }

    fn error(&mut self, msg: &str) {
        eprintln!("{}", self.theme.format_error(msg));
    }

    fn start_spinner(&mut self, message: &str) -> Box<dyn SpinnerHandle> {
        Box::new(LineSpinner {
            message: message.to_string(),
            visible: self.mode.shows_spinners(),
        })
    }

    fn show_header(&mut self, title: &str) {
        if self.mode.shows_status() {
            println!("{}", self.theme.format_header(title));
        }
    }

    fn show_field(&mut self, key: &str, value: &str) {
        if self.mode.shows_status() {
            println!("{}", self.theme.format_field(key, value));
        }
    }
}

struct LineSpinner {
    message: String,
    visible: bool,
}

impl LineSpinner {
    fn finish(&self, status: &str) {
        if self.visible {
            println!("{} {}", self.message, status);
        }
    }
}

impl SpinnerHandle for LineSpinner {
    fn finish_success(&mut self, msg: &str) {
        self.finish(msg);
    }

    fn finish_error(&mut self, msg: &str) {
        self.finish(msg);
    }

    fn finish_skipped(&mut self, msg: &str) {
        self.finish(msg);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn spinner_visibility_follows_mode() {
        let mut silent = NonInteractiveUI::new(OutputMode::Silent);
        let mut spinner = silent.start_spinner("Checking CBLAS...");
        spinner.finish_skipped("no");

        let mut normal = NonInteractiveUI::new(OutputMode::Normal);
        let mut spinner = normal.start_spinner("Checking CBLAS...");
        spinner.finish_success("ok");
    }
}
