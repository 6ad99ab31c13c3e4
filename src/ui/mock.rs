//! Mock UI implementation for testing.
//!
//! `MockUI` implements the `UserInterface` trait and captures all
//! interactions for later assertion, including how each spinner finished.
//!
//! # Example
//!
//! ```
//! use bspconf::ui::{MockUI, SpinnerStatus, UserInterface};
//!
//! let mut ui = MockUI::new();
//! ui.message("Configuring for Linux/x86_64");
//! ui.start_spinner("Checking CBLAS...").finish_skipped("no");
//!
//! assert!(ui.has_message("Linux/x86_64"));
//! assert_eq!(
//!     ui.spinner_outcomes(),
//!     vec![("Checking CBLAS...".to_string(), SpinnerStatus::Skipped, "no".to_string())]
//! );
//! ```

use std::cell::RefCell;
use std::rc::Rc;

use super::{OutputMode, SpinnerHandle, UserInterface};

/// Status of a mock spinner when finished.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SpinnerStatus {
    Success,
    Error,
    Skipped,
}

type Outcomes = Rc<RefCell<Vec<(String, SpinnerStatus, String)>>>;

/// Mock UI implementation for testing.
#[derive(Debug, Default)]
pub struct MockUI {
    mode: OutputMode,
    messages: Vec<String>,
    outputs: Vec<String>,
    successes: Vec<String>,
    warnings: Vec<String>,
    errors: Vec<String>,
    headers: Vec<String>,
    fields: Vec<(String, String)>,
    spinners: Vec<String>,
    outcomes: Outcomes,
}

impl MockUI {
    /// Create a new MockUI with Normal output mode.
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_mode(mode: OutputMode) -> Self {
        Self {
            mode,
            ..Default::default()
        }
    }

    pub fn messages(&self) -> &[String] {
        &self.messages
    }

    /// Everything passed to [`UserInterface::output`].
    pub fn outputs(&self) -> &[String] {
        &self.outputs
    }

    pub fn successes(&self) -> &[String] {
        &self.successes
    }

    pub fn warnings(&self) -> &[String] {
        &self.warnings
    }

    pub fn errors(&self) -> &[String] {
        &self.errors
    }

    pub fn headers(&self) -> &[String] {
        &self.headers
    }

    pub fn fields(&self) -> &[(String, String)] {
        &self.fields
    }

    /// Messages of every spinner started, in order.
    pub fn spinners(&self) -> &[String] {
        &self.spinners
    }

    /// `(message, status, result)` for every finished spinner.
    pub fn spinner_outcomes(&self) -> Vec<(String, SpinnerStatus, String)> {
        self.outcomes.borrow().clone()
    }

    pub fn has_message(&self, msg: &str) -> bool {
        self.messages.iter().any(|m| m.contains(msg))
    }

    pub fn has_output(&self, text: &str) -> bool {
        self.outputs.iter().any(|o| o.contains(text))
    }

    pub fn has_success(&self, msg: &str) -> bool {
        self.successes.iter().any(|m| m.contains(msg))
    }

    pub fn has_warning(&self, msg: &str) -> bool {
        self.warnings.iter().any(|m| m.contains(msg))
    }

    pub fn has_error(&self, msg: &str) -> bool {
        self.errors.iter().any(|m| m.contains(msg))
    }

    pub fn field(&self, key: &str) -> Option<&str> {
        self.fields
            .iter()
            .find(|(k, _)| k == key)
            .map(|(_, v)| v.as_str())
    }
}

impl UserInterface for MockUI {
    fn output_mode(&self) -> OutputMode {
        self.mode
    }

    fn message(&mut self, msg: &str) {
        self.messages.push(msg.to_string());
    }

    fn output(&mut self, text: &str) {
        self.outputs.push(text.to_string());
    }

    fn success(&mut self, msg: &str) {
        self.successes.push(msg.to_string());
    }

    fn warning(&mut self, msg: &str) {
        self.warnings.push(msg.to_string());
    }

    fn error(&mut self, msg: &str) {
        self.errors.push(msg.to_string());
    }

    fn start_spinner(&mut self, message: &str) -> Box<dyn SpinnerHandle> {
        self.spinners.push(message.to_string());
        Box::new(MockSpinner {
            message: message.to_string(),
            outcomes: Rc::clone(&self.outcomes),
        })
    }

    fn show_header(&mut self, title: &str) {
        self.headers.push(title.to_string());
    }

    fn show_field(&mut self, key: &str, value: &str) {
        self.fields.push((key.to_string(), value.to_string()));
    }
}

/// Spinner handed out by [`MockUI`]; reports its outcome back to the UI.
#[derive(Debug)]
pub struct MockSpinner {
    message: String,
    outcomes: Outcomes,
}

impl MockSpinner {
    fn finish(&mut self, status: SpinnerStatus, msg: &str) {
        self.outcomes
            .borrow_mut()
            .push((self.message.clone(), status, msg.to_string()));
    }
}

impl SpinnerHandle for MockSpinner {
    fn finish_success(&mut self, msg: &str) {
        self.finish(SpinnerStatus::Success, msg);
    }

    fn finish_error(&mut self, msg: &str) {
        self.finish(SpinnerStatus::Error, msg);
    }

    fn finish_skipped(&mut self, msg: &str) {
        self.finish(SpinnerStatus::Skipped, msg);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn captures_messages_by_kind() {
        let mut ui = MockUI::new();
        ui.message("hello");
        ui.output("#define X");
        ui.success("done");
        ui.warning("careful");
        ui.error("broken");
        ui.show_header("bspconf");
        ui.show_field("Toolset", "gnu");

        assert!(ui.has_message("hello"));
        assert!(ui.has_output("#define X"));
        assert!(!ui.has_message("#define X"));
        assert!(ui.has_success("done"));
        assert!(ui.has_warning("careful"));
        assert!(ui.has_error("broken"));
        assert_eq!(ui.headers(), ["bspconf"]);
        assert_eq!(ui.field("Toolset"), Some("gnu"));
        assert_eq!(ui.field("Mode"), None);
    }

    #[test]
    fn records_spinner_outcomes_in_order() {
        let mut ui = MockUI::new();
        ui.start_spinner("a").finish_success("ok");
        ui.start_spinner("b").finish_error("failed");

        assert_eq!(ui.spinners(), ["a", "b"]);
        assert_eq!(
            ui.spinner_outcomes(),
            vec![
                ("a".to_string(), SpinnerStatus::Success, "ok".to_string()),
                ("b".to_string(), SpinnerStatus::Error, "failed".to_string()),
            ]
        );
    }

    #[test]
    fn with_mode_sets_output_mode() {
        let ui = MockUI::with_mode(OutputMode::Verbose);
        assert_eq!(ui.output_mode(), OutputMode::Verbose);
    }
}
