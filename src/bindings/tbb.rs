//! TBB binding.

use regex::Regex;
use std::sync::LazyLock;

use crate::environment::{Arch, BuildMode, EnvironmentDescriptor, Toolset};

use super::{HostFs, LibraryBinding};

/// Leading major component of an MSVC version such as `14.29`.
static MSVC_MAJOR_REGEX: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^\s*(\d+)").expect("MSVC_MAJOR_REGEX must compile"));

/// Resolve include paths, library paths and libraries for TBB.
///
/// Without a TBB root only the libraries are added, relying on the
/// compiler's default search paths.
pub fn tbb_binding(env: &EnvironmentDescriptor, fs: &dyn HostFs) -> LibraryBinding {
    let platform = env.platform();
    let mut binding = LibraryBinding::new();

    if let Some(tbbdir) = env.options().tbbdir_for(platform) {
        binding = binding.include_path(&platform.join(&tbbdir, &["include"]));

        let lib_dir = if env.is_windows() {
            windows_lib_dir(env, &tbbdir, fs)
        } else {
            platform.join(&tbbdir, &["lib"])
        };
        binding = binding.lib_path(&lib_dir);
    }

    if env.is_windows() && env.mode() == BuildMode::Debug {
        binding.lib("tbb_debug").lib("tbbmalloc_debug")
    } else {
        binding.lib("tbb").lib("tbbmalloc")
    }
}

/// TBB ships per-compiler library directories on Windows
/// (`lib\<ia32|intel64>\vc<major>`); anything else uses `lib`.
fn windows_lib_dir(env: &EnvironmentDescriptor, tbbdir: &str, fs: &dyn HostFs) -> String {
    let platform = env.platform();
    let fallback = platform.join(tbbdir, &["lib"]);

    if env.toolset() != Toolset::Msvc {
        tracing::warn!(
            "When not using MSVC on Windows, place TBB libraries for your compiler in {}",
            fallback
        );
        return fallback;
    }

    let Some(major) = env
        .options()
        .msvc_version
        .as_deref()
        .and_then(|v| MSVC_MAJOR_REGEX.captures(v))
        .map(|caps| caps[1].to_string())
    else {
        tracing::warn!(
            "MSVC version unknown; place TBB libraries for your compiler in {}",
            fallback
        );
        return fallback;
    };

    let arch_dir = match env.arch() {
        Arch::X86_64 => "intel64",
        _ => "ia32",
    };
    let search = platform.join(tbbdir, &["lib", arch_dir, &format!("vc{}", major)]);
    if fs.exists(&search) {
        search
    } else {
        tracing::warn!(
            "Your version of MSVC isn't supported by your version of TBB, \
             place TBB libraries for your compiler in {}",
            fallback
        );
        fallback
    }
}
