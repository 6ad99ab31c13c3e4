//! Check command implementation.
//!
//! The `bspconf check` command runs the probes and reports what was found
//! without touching the generated header.

use crate::bindings::RealFs;
use crate::cli::args::CheckArgs;
use crate::error::{BspconfError, Result};
use crate::probe::{Compiler, ProcessCompiler};
use crate::prober::Prober;
use crate::ui::UserInterface;

use super::dispatcher::{Command, CommandContext, CommandResult};

/// The check command implementation.
pub struct CheckCommand {
    context: CommandContext,
    args: CheckArgs,
    compiler: Box<dyn Compiler>,
}

impl CheckCommand {
    pub fn new(context: CommandContext, args: CheckArgs) -> Self {
        Self {
            context,
            args,
            compiler: Box::new(ProcessCompiler),
        }
    }

    pub fn with_compiler(mut self, compiler: Box<dyn Compiler>) -> Self {
        self.compiler = compiler;
        self
    }
}

impl Command for CheckCommand {
    fn execute(&self, ui: &mut dyn UserInterface) -> Result<CommandResult> {
        let env = match self.context.environment() {
            Ok(env) => env,
            Err(BspconfError::ConfigNotFound { path }) => {
                ui.error(&format!("Options file not found: {}", path.display()));
                return Ok(CommandResult::failure(2));
            }
            Err(e) => return Err(e),
        };

        ui.show_header(&format!("Checking {}", env.label()));
        let configuration = Prober::new(&env, self.compiler.as_ref(), &RealFs).run(ui)?;

        let total = configuration.results.len();
        let failed: Vec<&str> = configuration
            .results
            .iter()
            .filter(|r| !r.is_passed())
            .map(|r| r.probe())
            .collect();
        let passed = total - failed.len();

        if failed.is_empty() {
            ui.success(&format!("{} of {} probes passed", passed, total));
            return Ok(CommandResult::success());
        }

        ui.warning(&format!(
            "{} of {} probes passed (failed: {})",
            passed,
            total,
            failed.join(", ")
        ));
        if self.args.strict {
            Ok(CommandResult::failure(1))
        } else {
            Ok(CommandResult::success())
        }
    }
}
