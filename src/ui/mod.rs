//! Terminal output for configuration runs.
//!
//! This module provides:
//! - [`UserInterface`] trait for UI abstraction
//! - [`TerminalUI`] for interactive terminals, with probe spinners
//! - [`NonInteractiveUI`] for pipes, CI logs and redirected output
//! - [`MockUI`] for tests
//!
//! # Example
//!
//! ```
//! use bspconf::ui::{create_ui, OutputMode};
//!
//! let mut ui = create_ui(false, OutputMode::Silent);
//! ui.show_header("bspconf");
//! let mut spinner = ui.start_spinner("Checking CBLAS...");
//! spinner.finish_success("ok");
//! ```

pub mod mock;
pub mod non_interactive;
pub mod output;
pub mod spinner;
pub mod terminal;
pub mod theme;

pub use mock::{MockSpinner, MockUI, SpinnerStatus};
pub use non_interactive::NonInteractiveUI;
pub use output::OutputMode;
pub use spinner::ProgressSpinner;
pub use terminal::{create_ui, TerminalUI};
pub use theme::{should_use_colors, BspconfTheme};

/// Trait for user interface interactions.
///
/// This trait allows mocking the UI in tests.
pub trait UserInterface {
    /// Get the current output mode.
    fn output_mode(&self) -> OutputMode;

    /// Display a message to the user.
    fn message(&mut self, msg: &str);

    /// Print data the user asked for (a header, a flags report). Shown in
    /// every output mode.
    fn output(&mut self, text: &str);

    /// Display a success message.
    fn success(&mut self, msg: &str);

    /// Display a warning message.
    fn warning(&mut self, msg: &str);

    /// Display an error message. Shown in every output mode.
    fn error(&mut self, msg: &str);

    /// Start a spinner for an operation.
    fn start_spinner(&mut self, message: &str) -> Box<dyn SpinnerHandle>;

    /// Show a header/banner.
    fn show_header(&mut self, title: &str);

    /// Show a `key: value` line.
    fn show_field(&mut self, key: &str, value: &str);
}

/// Handle for controlling a spinner.
pub trait SpinnerHandle {
    /// Mark the operation as successful.
    fn finish_success(&mut self, msg: &str);

    /// Mark the operation as failed: it could not be carried out at all.
    fn finish_error(&mut self, msg: &str);

    /// Mark as skipped: it ran, and what it looked for is not available.
    fn finish_skipped(&mut self, msg: &str);
}
