//! The generated configuration header.
//!
//! Probe results and resolved bindings are collected into a
//! [`ConfigurationSet`], rendered once into an [`Artifact`] and written under
//! an exclusive lock.
//!
//! # Example
//!
//! ```
//! use bspconf::bindings::Bindings;
//! use bspconf::config::BuildOptions;
//! use bspconf::environment::{Arch, EnvironmentDescriptor, Platform};
//! use bspconf::header::emit_configuration;
//!
//! let options = BuildOptions {
//!     sequential: true,
//!     ..Default::default()
//! };
//! let env = EnvironmentDescriptor::new(Platform::Linux, Arch::X86_64, options).unwrap();
//! let artifact = emit_configuration(&[], &Bindings::new(), &env);
//! assert!(artifact.contents.contains("#define BSP_CALLING\n"));
//! assert!(artifact.contents.contains("#define _BSP_INIT BSP_INIT_SEQ\n"));
//! ```

pub mod render;
pub mod set;
pub mod writer;

pub use render::{
    build_configuration, emit_configuration, fingerprint, render, Artifact, INCLUDE_GUARD,
};
pub use set::{Condition, ConfigurationSet, Definition, Section};
pub use writer::{write_artifact, write_locked, OutputLock, WriteOutcome};
