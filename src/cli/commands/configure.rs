//! Configure command implementation.
//!
//! The `bspconf configure` command runs every enabled probe and writes the
//! configuration header. The output is locked before the first probe runs
//! and stays locked until the header is written.

use crate::bindings::RealFs;
use crate::cli::args::ConfigureArgs;
use crate::error::{BspconfError, Result};
use crate::header::{write_locked, OutputLock, WriteOutcome};
use crate::probe::{Compiler, ProcessCompiler};
use crate::prober::Prober;
use crate::ui::UserInterface;

use super::dispatcher::{Command, CommandContext, CommandResult};

/// The configure command implementation.
pub struct ConfigureCommand {
    context: CommandContext,
    args: ConfigureArgs,
    compiler: Box<dyn Compiler>,
}

impl ConfigureCommand {
    pub fn new(context: CommandContext, args: ConfigureArgs) -> Self {
        Self {
            context,
            args,
            compiler: Box::new(ProcessCompiler),
        }
    }

    /// Use `compiler` instead of spawning the real toolchain.
    pub fn with_compiler(mut self, compiler: Box<dyn Compiler>) -> Self {
        self.compiler = compiler;
        self
    }
}

impl Command for ConfigureCommand {
    fn execute(&self, ui: &mut dyn UserInterface) -> Result<CommandResult> {
        let env = match self.context.environment() {
            Ok(env) => env,
            Err(BspconfError::ConfigNotFound { path }) => {
                ui.error(&format!("Options file not found: {}", path.display()));
                return Ok(CommandResult::failure(2));
            }
            Err(e) => return Err(e),
        };

        let lock = if self.args.dry_run {
            None
        } else {
            match OutputLock::acquire(&env.options().output) {
                Ok(lock) => Some(lock),
                Err(e @ BspconfError::OutputLocked { .. }) => {
                    ui.error(&e.to_string());
                    return Ok(CommandResult::failure(1));
                }
                Err(e) => return Err(e),
            }
        };

        ui.show_header(&format!("Configuring BSPonMPI for {}", env.label()));
        ui.show_field("Toolset", env.toolset().name());
        ui.show_field("Mode", &env.options().mode);

        let configuration = Prober::new(&env, self.compiler.as_ref(), &RealFs).run(ui)?;

        let features = configuration.features();
        ui.show_field(
            "Features",
            &if features.is_empty() {
                "none".to_string()
            } else {
                features.join(" ")
            },
        );

        let artifact = &configuration.artifact;
        let Some(lock) = lock else {
            ui.output(&artifact.contents);
            return Ok(CommandResult::success());
        };

        match write_locked(artifact, &lock)? {
            WriteOutcome::Written => {
                ui.success(&format!("Wrote {}", artifact.path.display()));
            }
            WriteOutcome::Unchanged => {
                ui.success(&format!("{} is up to date", artifact.path.display()));
            }
        }

        Ok(CommandResult::success())
    }
}
