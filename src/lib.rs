//! bspconf - Feature-probe configuration for BSPonMPI builds.
//!
//! bspconf decides which optional libraries (MPI, TBB, Boost, CBLAS) a build
//! can use by compiling and linking small test programs, then writes
//! `include/bsp_config.h` so the library sources can select their code paths
//! with the preprocessor.
//!
//! # Modules
//!
//! - [`bindings`] - Library bindings: include paths, libraries and flags
//! - [`cli`] - Command-line interface and argument parsing
//! - [`config`] - Options file loading and merging
//! - [`environment`] - Platform, architecture and toolset description
//! - [`error`] - Error types and result aliases
//! - [`header`] - Configuration set rendering and atomic header output
//! - [`probe`] - Probe definitions and the compiler seam
//! - [`prober`] - One configuration run from options to artifact
//! - [`ui`] - Spinners and terminal output
//! - [`version`] - Version floors for TBB and Boost
//!
//! # Example
//!
//! ```
//! use bspconf::config::BuildOptions;
//! use bspconf::environment::{Arch, EnvironmentDescriptor, Platform};
//! use bspconf::header::emit_configuration;
//! use bspconf::bindings::Bindings;
//!
//! let options = BuildOptions {
//!     sequential: true,
//!     ..Default::default()
//! };
//! let env = EnvironmentDescriptor::new(Platform::Linux, Arch::X86_64, options).unwrap();
//! let artifact = emit_configuration(&[], &Bindings::new(), &env);
//! assert!(artifact.contents.contains("#define _NO_MPI"));
//! ```

pub mod bindings;
pub mod cli;
pub mod config;
pub mod environment;
pub mod error;
pub mod header;
pub mod probe;
pub mod prober;
pub mod ui;
pub mod version;

pub use error::{BspconfError, Result};
