//! Command dispatching.
//!
//! This module provides the core command infrastructure:
//! - [`Command`] trait for implementing commands
//! - [`CommandResult`] for uniform result reporting
//! - [`CommandContext`] for the project and options every command shares
//! - [`CommandDispatcher`] for routing CLI subcommands

use std::path::{Path, PathBuf};

use crate::cli::args::{Cli, Commands, ConfigureArgs, OptionOverrides};
use crate::config::{load_options, BuildOptions};
use crate::environment::EnvironmentDescriptor;
use crate::error::Result;
use crate::ui::UserInterface;

/// Trait for command implementations.
///
/// Each CLI subcommand implements this trait to provide its execution logic.
pub trait Command {
    /// Execute the command, reporting through `ui`.
    fn execute(&self, ui: &mut dyn UserInterface) -> Result<CommandResult>;
}

/// Result of command execution.
#[derive(Debug)]
pub struct CommandResult {
    /// Whether the command succeeded.
    pub success: bool,

    /// Exit code to use (0 for success, non-zero for failure).
    pub exit_code: i32,
}

impl CommandResult {
    pub fn success() -> Self {
        Self {
            success: true,
            exit_code: 0,
        }
    }

    pub fn failure(exit_code: i32) -> Self {
        Self {
            success: false,
            exit_code,
        }
    }
}

/// Project location and option sources shared by the probing commands.
#[derive(Debug, Clone)]
pub struct CommandContext {
    pub project_root: PathBuf,
    /// Explicit options file replacing the project's own.
    pub options_file: Option<PathBuf>,
    pub overrides: OptionOverrides,
}

impl CommandContext {
    pub fn new(project_root: &Path) -> Self {
        Self {
            project_root: project_root.to_path_buf(),
            options_file: None,
            overrides: OptionOverrides::default(),
        }
    }

    pub fn with_options_file(mut self, path: Option<PathBuf>) -> Self {
        self.options_file = path;
        self
    }

    pub fn with_overrides(mut self, overrides: OptionOverrides) -> Self {
        self.overrides = overrides;
        self
    }

    /// Options files merged, overrides applied, output anchored at the project root.
    pub fn options(&self) -> Result<BuildOptions> {
        let mut options = load_options(&self.project_root, self.options_file.as_deref())?;
        self.overrides.apply_to(&mut options);
        if options.output.is_relative() {
            options.output = self.project_root.join(&options.output);
        }
        Ok(options)
    }

    /// Descriptor for the host with the resolved options.
    pub fn environment(&self) -> Result<EnvironmentDescriptor> {
        EnvironmentDescriptor::for_host(self.options()?)
    }
}

/// Dispatches CLI commands to their implementations.
pub struct CommandDispatcher {
    project_root: PathBuf,
}

impl CommandDispatcher {
    pub fn new(project_root: PathBuf) -> Self {
        Self { project_root }
    }

    pub fn project_root(&self) -> &Path {
        &self.project_root
    }

    /// Route the CLI subcommand to its implementation and execute it.
    pub fn dispatch(&self, cli: &Cli, ui: &mut dyn UserInterface) -> Result<CommandResult> {
        let context = CommandContext::new(&self.project_root)
            .with_options_file(cli.config.clone())
            .with_overrides(cli.overrides.clone());

        match &cli.command {
            Some(Commands::Configure(args)) => {
                super::configure::ConfigureCommand::new(context, args.clone()).execute(ui)
            }
            Some(Commands::Check(args)) => {
                super::check::CheckCommand::new(context, args.clone()).execute(ui)
            }
            Some(Commands::Flags(args)) => {
                super::flags::FlagsCommand::new(context, args.clone()).execute(ui)
            }
            Some(Commands::Completions(args)) => {
                super::completions::CompletionsCommand::new(args.clone()).execute(ui)
            }
            None => super::configure::ConfigureCommand::new(context, ConfigureArgs::default())
                .execute(ui),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::TempDir;

    #[test]
    fn command_result_success() {
        let result = CommandResult::success();
        assert!(result.success);
        assert_eq!(result.exit_code, 0);
    }

    #[test]
    fn command_result_failure() {
        let result = CommandResult::failure(2);
        assert!(!result.success);
        assert_eq!(result.exit_code, 2);
    }

    #[test]
    fn dispatcher_creation() {
        let dispatcher = CommandDispatcher::new(PathBuf::from("/test"));
        assert_eq!(dispatcher.project_root(), Path::new("/test"));
    }

    #[test]
    fn context_layers_overrides_over_file() {
        let temp = TempDir::new().unwrap();
        fs::write(
            temp.path().join("bspconf.yml"),
            "cblas: atlas\nsequential: true\n",
        )
        .unwrap();

        let overrides = OptionOverrides {
            cblas: Some("openblas".to_string()),
            ..Default::default()
        };
        let options = CommandContext::new(temp.path())
            .with_overrides(overrides)
            .options()
            .unwrap();

        assert_eq!(options.cblas, "openblas");
        assert!(options.sequential);
        assert_eq!(options.output, temp.path().join("include/bsp_config.h"));
    }

    #[test]
    fn context_keeps_absolute_output() {
        let temp = TempDir::new().unwrap();
        let elsewhere = temp.path().join("out").join("config.h");
        let overrides = OptionOverrides {
            output: Some(elsewhere.clone()),
            ..Default::default()
        };
        let options = CommandContext::new(temp.path())
            .with_overrides(overrides)
            .options()
            .unwrap();
        assert_eq!(options.output, elsewhere);
    }

    #[test]
    fn explicit_options_file_must_exist() {
        let temp = TempDir::new().unwrap();
        let result = CommandContext::new(temp.path())
            .with_options_file(Some(temp.path().join("missing.yml")))
            .options();
        assert!(matches!(
            result,
            Err(crate::error::BspconfError::ConfigNotFound { .. })
        ));
    }
}
