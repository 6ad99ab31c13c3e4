//! CLI command implementations.
//!
//! Each command implements the [`Command`] trait, which provides a uniform
//! interface for executing commands and reporting results.
//!
//! # Architecture
//!
//! Commands are dispatched via [`CommandDispatcher`], which routes CLI
//! subcommands to their implementations. The probing commands share a
//! [`CommandContext`] carrying the project root and option overrides, and
//! accept any [`Compiler`](crate::probe::Compiler) through `with_compiler`.

pub mod check;
pub mod completions;
pub mod configure;
pub mod dispatcher;
pub mod flags;

pub use check::CheckCommand;
pub use completions::CompletionsCommand;
pub use configure::ConfigureCommand;
pub use dispatcher::{Command, CommandContext, CommandDispatcher, CommandResult};
pub use flags::FlagsCommand;
