//! Command-line interface for bspconf.
//!
//! - [`args`] - Argument definitions using clap derive macros
//! - [`commands`] - Command implementations

pub mod args;
pub mod commands;

pub use args::{
    CheckArgs, Cli, Commands, CompletionsArgs, ConfigureArgs, FlagsArgs, OptionOverrides,
};
pub use commands::{Command, CommandContext, CommandDispatcher, CommandResult};
