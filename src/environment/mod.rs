//! Target environment description.
//!
//! Every configuration operation receives an explicit
//! [`EnvironmentDescriptor`] instead of reading platform globals, so a
//! Windows configuration can be produced (and tested) on a Linux host.
//!
//! The descriptor is resolved from:
//!
//! 1. `BSPCONF_PLATFORM` / `BSPCONF_ARCH` overrides (cross configuration)
//! 2. The host the binary was compiled for
//! 3. The user's [`BuildOptions`](crate::config::BuildOptions)

pub mod descriptor;
pub mod detection;

pub use descriptor::{Arch, BuildMode, EnvironmentDescriptor, Platform, Toolset};
pub use detection::{detect_host, detect_host_with_env, HostIdentity};
