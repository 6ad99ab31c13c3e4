//! Compiler invocation.
//!
//! [`build_invocation`] turns a probe into a concrete command line for the
//! environment's toolset. The [`Compiler`] trait runs it; the real
//! implementation spawns the process, tests substitute canned answers.

use std::io;
use std::path::{Path, PathBuf};
use std::process::Command;
use std::time::Instant;

use crate::environment::EnvironmentDescriptor;

use super::definition::{Language, Probe, ProbeMode};

/// A fully resolved compiler command.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Invocation {
    pub program: String,
    pub args: Vec<String>,
    /// Directory the command runs in; holds the probe source.
    pub workdir: PathBuf,
    /// Probe source file, relative to `workdir`.
    pub source: PathBuf,
}

impl Invocation {
    /// The command as a single display string.
    pub fn display(&self) -> String {
        std::iter::once(self.program.as_str())
            .chain(self.args.iter().map(String::as_str))
            .collect::<Vec<_>>()
            .join(" ")
    }
}

/// Result of running the compiler.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CompileOutcome {
    /// Whether the compiler exited successfully.
    pub success: bool,
    /// Combined compiler output.
    pub diagnostics: String,
}

/// Runs compiler invocations.
pub trait Compiler {
    /// Run `invocation` to completion.
    ///
    /// Returns `Err` only when the compiler could not be started.
    fn invoke(&self, invocation: &Invocation) -> io::Result<CompileOutcome>;
}

/// [`Compiler`] that spawns the real toolchain.
#[derive(Debug, Clone, Copy, Default)]
pub struct ProcessCompiler;

impl Compiler for ProcessCompiler {
    fn invoke(&self, invocation: &Invocation) -> io::Result<CompileOutcome> {
        let start = Instant::now();
        tracing::debug!("Running {}", invocation.display());

        let output = Command::new(&invocation.program)
            .args(&invocation.args)
            .current_dir(&invocation.workdir)
            .output()?;

        let mut diagnostics = String::from_utf8_lossy(&output.stderr).to_string();
        let stdout = String::from_utf8_lossy(&output.stdout);
        if !stdout.trim().is_empty() {
            if !diagnostics.is_empty() {
                diagnostics.push('\n');
            }
            diagnostics.push_str(&stdout);
        }

        tracing::debug!(
            "{} exited with {:?} after {:?}",
            invocation.program,
            output.status.code(),
            start.elapsed()
        );

        Ok(CompileOutcome {
            success: output.status.success(),
            diagnostics,
        })
    }
}

/// Build the command line that compiles (or links) `probe` in `workdir`.
///
/// The probe's binding supplies defines, include paths, libraries and any
/// compiler wrapper overriding the toolset default.
pub fn build_invocation(probe: &Probe, env: &EnvironmentDescriptor, workdir: &Path) -> Invocation {
    let binding = &probe.binding;
    let toolset = env.toolset();
    let source = probe.file_name();

    let compiler = match probe.language {
        Language::C => binding.tools.cc.clone().unwrap_or_else(|| env.c_compiler()),
        Language::Cxx => binding.tools.cxx.clone().unwrap_or_else(|| env.cxx_compiler()),
    };

    let mut args = binding.compile_args(toolset);
    let program = if toolset.is_msvc_family() {
        match probe.mode {
            ProbeMode::Compile => {
                args.extend(["/c".to_string(), source.clone(), "/Foconftest.obj".to_string()]);
            }
            ProbeMode::Link => {
                args.extend([source.clone(), "/Feconftest.exe".to_string(), "/link".to_string()]);
                args.extend(binding.link_args(toolset));
            }
        }
        compiler
    } else {
        match probe.mode {
            ProbeMode::Compile => {
                args.extend([
                    "-c".to_string(),
                    source.clone(),
                    "-o".to_string(),
                    "conftest.o".to_string(),
                ]);
                compiler
            }
            ProbeMode::Link => {
                let executable = if env.is_windows() { "conftest.exe" } else { "conftest" };
                args.extend([source.clone(), "-o".to_string(), executable.to_string()]);
                args.extend(binding.link_args(toolset));
                binding.tools.link.clone().unwrap_or(compiler)
            }
        }
    };

    Invocation {
        program,
        args,
        workdir: workdir.to_path_buf(),
        source: PathBuf::from(source),
    }
}
