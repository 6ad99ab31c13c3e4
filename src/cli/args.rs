//! CLI argument definitions.
//!
//! This module defines all CLI arguments using clap's derive macros.
//! The main entry point is the [`Cli`] struct.

use clap::{Parser, Subcommand};
use clap_complete::Shell;
use std::path::PathBuf;

use crate::config::BuildOptions;
use crate::ui::OutputMode;

/// bspconf - Feature-probe configuration for BSPonMPI builds.
#[derive(Debug, Parser)]
#[command(name = "bspconf")]
#[command(author, version, about, long_about = None)]
#[command(propagate_version = true)]
pub struct Cli {
    /// Path to options file (overrides bspconf.yml + bspconf.local.yml)
    #[arg(short, long, global = true)]
    pub config: Option<PathBuf>,

    /// Path to project root (overrides discovery from the current directory)
    #[arg(short, long, global = true)]
    pub project: Option<PathBuf>,

    /// Show verbose output, including compiler diagnostics of failed probes
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Minimal output
    #[arg(short, long, global = true)]
    pub quiet: bool,

    /// No output except errors and requested data (headers, flags)
    #[arg(long, global = true, conflicts_with_all = ["verbose", "quiet"])]
    pub silent: bool,

    /// Disable colored output
    #[arg(long, global = true)]
    pub no_color: bool,

    /// Enable debug logging
    #[arg(long, global = true)]
    pub debug: bool,

    #[command(flatten)]
    pub overrides: OptionOverrides,

    #[command(subcommand)]
    pub command: Option<Commands>,
}

impl Cli {
    /// Output mode selected by `--silent`, `--quiet` and `--verbose`.
    pub fn output_mode(&self) -> OutputMode {
        if self.silent {
            OutputMode::Silent
        } else if self.quiet {
            OutputMode::Quiet
        } else if self.verbose {
            OutputMode::Verbose
        } else {
            OutputMode::Normal
        }
    }
}

/// Available subcommands.
#[derive(Debug, Subcommand)]
pub enum Commands {
    /// Run the probes and write the configuration header (default)
    Configure(ConfigureArgs),

    /// Run the probes and report results without writing anything
    Check(CheckArgs),

    /// Print the compile and link flags for the downstream build
    Flags(FlagsArgs),

    /// Generate shell completions
    Completions(CompletionsArgs),
}

/// Arguments for the `configure` command.
#[derive(Debug, Clone, Default, clap::Args)]
pub struct ConfigureArgs {
    /// Render the header and print it instead of writing it
    #[arg(long)]
    pub dry_run: bool,
}

/// Arguments for the `check` command.
#[derive(Debug, Clone, Default, clap::Args)]
pub struct CheckArgs {
    /// Exit non-zero when any probe fails
    #[arg(long)]
    pub strict: bool,
}

/// Arguments for the `flags` command.
#[derive(Debug, Clone, Default, clap::Args)]
pub struct FlagsArgs {
    /// Output as JSON
    #[arg(long)]
    pub json: bool,

    /// Run the probes first and leave out libraries whose probe failed
    #[arg(long)]
    pub probe: bool,
}

/// Arguments for the `completions` command.
#[derive(Debug, Clone, clap::Args)]
pub struct CompletionsArgs {
    /// Shell to generate completions for
    #[arg(value_enum)]
    pub shell: Shell,
}

/// Build options given on the command line or through `BSPCONF_*` variables.
///
/// Each one overrides the value from the options files.
#[derive(Debug, Clone, Default, clap::Args)]
pub struct OptionOverrides {
    /// Build without MPI (`--sequential=false` forces a distributed build)
    #[arg(
        long,
        global = true,
        env = "BSPCONF_SEQUENTIAL",
        num_args = 0..=1,
        require_equals = true,
        default_missing_value = "true",
        value_name = "BOOL"
    )]
    pub sequential: Option<bool>,

    /// CBLAS flavour: none, blas, atlas, openblas, accelerate
    #[arg(long, global = true, env = "BSPCONF_CBLAS", value_name = "NAME")]
    pub cblas: Option<String>,

    /// Toolset: gnu, msvc, intel_windows
    #[arg(long, global = true, env = "BSPCONF_TOOLSET", value_name = "NAME")]
    pub toolset: Option<String>,

    /// Build mode: debug or release
    #[arg(long, global = true, env = "BSPCONF_MODE", value_name = "MODE")]
    pub mode: Option<String>,

    /// Keep debug info in release builds
    #[arg(
        long,
        global = true,
        env = "BSPCONF_DEBUGINFO",
        num_args = 0..=1,
        require_equals = true,
        default_missing_value = "true",
        value_name = "BOOL"
    )]
    pub debuginfo: Option<bool>,

    /// Enable profiling support
    #[arg(
        long,
        global = true,
        env = "BSPCONF_PROFILE",
        num_args = 0..=1,
        require_equals = true,
        default_missing_value = "true",
        value_name = "BOOL"
    )]
    pub profile: Option<bool>,

    /// TBB root directory
    #[arg(long, global = true, env = "BSPCONF_TBBDIR", value_name = "DIR")]
    pub tbbdir: Option<String>,

    /// Directory holding versioned Boost include trees
    #[arg(long, global = true, env = "BSPCONF_BOOSTDIR", value_name = "DIR")]
    pub boostdir: Option<String>,

    /// MPI root directory (Windows)
    #[arg(long, global = true, env = "BSPCONF_MPIDIR", value_name = "DIR")]
    pub mpidir: Option<String>,

    /// MPI C compiler wrapper
    #[arg(long, global = true, env = "BSPCONF_MPICC", value_name = "PROGRAM")]
    pub mpicc: Option<String>,

    /// MPI C++ compiler wrapper
    #[arg(long, global = true, env = "BSPCONF_MPICXX", value_name = "PROGRAM")]
    pub mpicxx: Option<String>,

    /// MPI linker wrapper
    #[arg(long, global = true, env = "BSPCONF_MPILINK", value_name = "PROGRAM")]
    pub mpilink: Option<String>,

    /// Minimum MPI standard to probe for
    #[arg(long, global = true, env = "BSPCONF_MPI_VERSION", value_name = "N")]
    pub mpi_version: Option<u32>,

    /// Minimum TBB version; enables the TBB probe
    #[arg(long, global = true, env = "BSPCONF_TBB_VERSION", value_name = "VERSION")]
    pub tbb_version: Option<String>,

    /// Minimum Boost version; enables the Boost probe
    #[arg(long, global = true, env = "BSPCONF_BOOST_VERSION", value_name = "VERSION")]
    pub boost_version: Option<String>,

    /// MSVC version, used to locate TBB libraries on Windows
    #[arg(long, global = true, env = "BSPCONF_MSVC_VERSION", value_name = "VERSION")]
    pub msvc_version: Option<String>,

    /// Base C compiler
    #[arg(long, global = true, env = "BSPCONF_CC", value_name = "PROGRAM")]
    pub cc: Option<String>,

    /// Base C++ compiler
    #[arg(long, global = true, env = "BSPCONF_CXX", value_name = "PROGRAM")]
    pub cxx: Option<String>,

    /// Generated header path, relative to the project root
    #[arg(short, long, global = true, env = "BSPCONF_OUTPUT", value_name = "PATH")]
    pub output: Option<PathBuf>,
}

impl OptionOverrides {
    /// Apply every override that was given to `options`.
    pub fn apply_to(&self, options: &mut BuildOptions) {
        let switches = [
            (self.sequential, &mut options.sequential),
            (self.debuginfo, &mut options.debuginfo),
            (self.profile, &mut options.profile),
        ];
        for (given, target) in switches {
            if let Some(value) = given {
                *target = value;
            }
        }
        if let Some(mpi_version) = self.mpi_version {
            options.mpi_version = mpi_version;
        }
        if let Some(output) = &self.output {
            options.output = output.clone();
        }

        let strings = [
            (&self.cblas, &mut options.cblas),
            (&self.mode, &mut options.mode),
            (&self.mpicc, &mut options.mpicc),
            (&self.mpicxx, &mut options.mpicxx),
            (&self.mpilink, &mut options.mpilink),
        ];
        for (given, target) in strings {
            if let Some(value) = given {
                *target = value.clone();
            }
        }

        let optional = [
            (&self.toolset, &mut options.toolset),
            (&self.tbbdir, &mut options.tbbdir),
            (&self.boostdir, &mut options.boostdir),
            (&self.mpidir, &mut options.mpidir),
            (&self.tbb_version, &mut options.tbb_version),
            (&self.boost_version, &mut options.boost_version),
            (&self.msvc_version, &mut options.msvc_version),
            (&self.cc, &mut options.cc),
            (&self.cxx, &mut options.cxx),
        ];
        for (given, target) in optional {
            if given.is_some() {
                *target = given.clone();
            }
        }
    }
}
