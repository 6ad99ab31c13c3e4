//! Flags command implementation.
//!
//! The `bspconf flags` command prints the compiler drivers and the combined
//! compile, link and archive flags the downstream build should use.

use serde::Serialize;

use crate::bindings::{Bindings, LibraryBinding, RealFs};
use crate::cli::args::FlagsArgs;
use crate::environment::EnvironmentDescriptor;
use crate::error::{BspconfError, Result};
use crate::probe::{Compiler, ProcessCompiler};
use crate::prober::Prober;
use crate::ui::UserInterface;

use super::dispatcher::{Command, CommandContext, CommandResult};

/// The flags command implementation.
pub struct FlagsCommand {
    context: CommandContext,
    args: FlagsArgs,
    compiler: Box<dyn Compiler>,
}

/// A named binding in the JSON report.
#[derive(Debug, Serialize)]
struct NamedBinding<'a> {
    name: &'a str,
    #[serde(flatten)]
    binding: &'a LibraryBinding,
}

/// JSON shape of `bspconf flags --json`.
#[derive(Debug, Serialize)]
struct FlagsReport<'a> {
    platform: &'a str,
    arch: &'a str,
    toolset: &'a str,
    mode: &'a str,
    cc: String,
    cxx: String,
    link: String,
    bindings: Vec<NamedBinding<'a>>,
    compile_args: Vec<String>,
    link_args: Vec<String>,
    ar_flags: Vec<String>,
}

impl<'a> FlagsReport<'a> {
    fn new(
        env: &'a EnvironmentDescriptor,
        bindings: &'a Bindings,
        combined: &LibraryBinding,
    ) -> Self {
        let toolset = env.toolset();
        let cc = combined.tools.cc.clone().unwrap_or_else(|| env.c_compiler());
        let cxx = combined.tools.cxx.clone().unwrap_or_else(|| env.cxx_compiler());
        let link = combined.tools.link.clone().unwrap_or_else(|| cxx.clone());

        Self {
            platform: env.platform().name(),
            arch: env.arch().name(),
            toolset: toolset.name(),
            mode: &env.options().mode,
            cc,
            cxx,
            link,
            bindings: bindings
                .iter()
                .map(|(name, binding)| NamedBinding { name, binding })
                .collect(),
            compile_args: combined.compile_args(toolset),
            link_args: combined.link_args(toolset),
            ar_flags: combined.ar_flags.clone(),
        }
    }

    fn lines(&self) -> Vec<String> {
        vec![
            format!("CC={}", self.cc),
            format!("CXX={}", self.cxx),
            format!("LINK={}", self.link),
            format!("CFLAGS={}", self.compile_args.join(" ")),
            format!("LDFLAGS={}", self.link_args.join(" ")),
            format!("ARFLAGS={}", self.ar_flags.join(" ")),
        ]
    }
}

impl FlagsCommand {
    pub fn new(context: CommandContext, args: FlagsArgs) -> Self {
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

    fn bindings(
        &self,
        env: &EnvironmentDescriptor,
        ui: &mut dyn UserInterface,
    ) -> Result<Bindings> {
        let prober = Prober::new(env, self.compiler.as_ref(), &RealFs);
        if self.args.probe {
            Ok(prober.run(ui)?.exported)
        } else {
            prober.resolve_bindings()
        }
    }
}

impl Command for FlagsCommand {
    fn execute(&self, ui: &mut dyn UserInterface) -> Result<CommandResult> {
        let env = match self.context.environment() {
            Ok(env) => env,
            Err(BspconfError::ConfigNotFound { path }) => {
                ui.error(&format!("Options file not found: {}", path.display()));
                return Ok(CommandResult::failure(2));
            }
            Err(e) => return Err(e),
        };

        let bindings = self.bindings(&env, ui)?;
        let combined = bindings.combined();
        let report = FlagsReport::new(&env, &bindings, &combined);

        if self.args.json {
            let json = serde_json::to_string_pretty(&report)
                .map_err(|e| BspconfError::Other(e.into()))?;
            ui.output(&json);
        } else {
            for line in report.lines() {
                ui.output(&line);
            }
        }

        Ok(CommandResult::success())
    }
}
