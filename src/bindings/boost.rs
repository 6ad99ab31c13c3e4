//! Boost binding.
//!
//! Boost installs one include tree per version under a common root
//! (`C:\Boost\include\boost-1_55`). The last tree in sorted order is used,
//! with libraries expected in the sibling `lib` directory.

use crate::environment::EnvironmentDescriptor;

use super::{HostFs, LibraryBinding};

/// Library needed by the command-line parsing in the C++ interface.
pub const PROGRAM_OPTIONS: &str = "boost_program_options";

pub fn boost_binding(env: &EnvironmentDescriptor, fs: &dyn HostFs) -> LibraryBinding {
    let platform = env.platform();
    let mut include = None;
    let mut lib = None;

    if let Some(boostdir) = env.options().boostdir_for(platform) {
        if let Some(newest) = fs.subdirectories(&boostdir).last() {
            tracing::debug!("Using Boost include tree {}", newest);
            include = Some(newest.clone());
            lib = Some(platform.join(&boostdir, &["..", "lib"]));
        }
    }

    let mut binding = LibraryBinding::new();
    if let Some(include) = &include {
        binding = binding.include_path(include);
    }
    if let Some(lib) = &lib {
        binding = binding.lib_path(lib);
    }

    // MSVC links Boost through auto-linking pragmas.
    if !env.toolset().is_msvc_family() {
        binding = binding.lib(PROGRAM_OPTIONS);
    }
    binding
}
