//! Per-toolset compile, link and archive flags.

use crate::environment::{Arch, BuildMode, EnvironmentDescriptor, Toolset};

use super::LibraryBinding;

/// Flags for the environment's own toolset.
pub fn toolset_binding(env: &EnvironmentDescriptor) -> LibraryBinding {
    flags_for(env.toolset(), env)
}

/// Flags for `toolset` under the mode and architecture of `env`.
pub fn flags_for(toolset: Toolset, env: &EnvironmentDescriptor) -> LibraryBinding {
    match toolset {
        Toolset::Gnu => gnu(env),
        Toolset::Msvc | Toolset::IntelWindows => msvc(env),
    }
}

fn gnu(env: &EnvironmentDescriptor) -> LibraryBinding {
    let options = env.options();
    let binding = LibraryBinding::new();

    match env.mode() {
        BuildMode::Debug => binding.compile_flags(&["-g", "-O0"]),
        BuildMode::Release => {
            let binding = if options.debuginfo {
                binding.compile_flags(&["-g"]).link_flags(&["-g"])
            } else {
                binding
            };
            if options.profile {
                binding.compile_flags(&["-pg", "-O2"]).link_flags(&["-pg"])
            } else {
                binding.compile_flags(&["-O2"])
            }
        }
    }
}

fn msvc(env: &EnvironmentDescriptor) -> LibraryBinding {
    let options = env.options();
    let debuginfo = options.debuginfo || options.profile || env.mode() == BuildMode::Debug;

    let mut binding = LibraryBinding::new()
        .compile_flags(&[
            "/EHsc",
            "/nologo",
            "/W3",
            "/wd4099",
            "/D_CRT_SECURE_NO_DEPRECATE",
            "/WL",
            "/Zi",
        ])
        .link_flags(&["/LARGEADDRESSAWARE:NO"]);

    binding = match env.mode() {
        BuildMode::Debug => binding.compile_flags(&["/MDd", "/Od", "/RTC1", "/RTCu", "/RTCs"]),
        BuildMode::Release => binding.compile_flags(&["/MD", "/O2"]),
    };
    if debuginfo {
        binding = binding.link_flags(&["/DEBUG"]);
    }

    let machine = match env.arch() {
        Arch::X86_64 => "/MACHINE:X64",
        _ => "/MACHINE:X86",
    };
    binding.ar_flags(&[machine]).link_flags(&[machine])
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::BuildOptions;
    use crate::environment::Platform;

    fn env(platform: Platform, arch: Arch, options: BuildOptions) -> EnvironmentDescriptor {
        EnvironmentDescriptor::new(platform, arch, options).unwrap()
    }

    fn debug() -> BuildOptions {
        BuildOptions {
            mode: "debug".to_string(),
            ..Default::default()
        }
    }

    #[test]
    fn gnu_debug_disables_optimisation() {
        let binding = toolset_binding(&env(Platform::Linux, Arch::X86_64, debug()));
        assert_eq!(binding.compile_flags, vec!["-g", "-O0"]);
        assert!(binding.link_flags.is_empty());
    }

    #[test]
    fn gnu_release_optimises() {
        let binding = toolset_binding(&env(Platform::Linux, Arch::X86_64, BuildOptions::default()));
        assert_eq!(binding.compile_flags, vec!["-O2"]);
    }

    #[test]
    fn gnu_release_with_debuginfo_and_profile() {
        let options = BuildOptions {
            debuginfo: true,
            profile: true,
            ..Default::default()
        };
        let binding = toolset_binding(&env(Platform::Linux, Arch::X86_64, options));
        assert_eq!(binding.compile_flags, vec!["-g", "-pg", "-O2"]);
        assert_eq!(binding.link_flags, vec!["-g", "-pg"]);
    }

    #[test]
    fn msvc_debug_uses_debug_runtime() {
        let binding = toolset_binding(&env(Platform::Windows, Arch::X86_64, debug()));
        assert!(binding.compile_flags.contains(&"/MDd".to_string()));
        assert!(!binding.compile_flags.contains(&"/MD".to_string()));
        assert!(binding.link_flags.contains(&"/DEBUG".to_string()));
    }

    #[test]
    fn msvc_release_never_mixes_runtime_checks_with_optimisation() {
        let options = BuildOptions {
            debuginfo: true,
            ..Default::default()
        };
        let binding = toolset_binding(&env(Platform::Windows, Arch::X86_64, options));
        assert!(binding.compile_flags.contains(&"/O2".to_string()));
        assert!(!binding.compile_flags.contains(&"/RTC1".to_string()));
        assert!(binding.link_flags.contains(&"/DEBUG".to_string()));
    }

    #[test]
    fn msvc_machine_follows_architecture() {
        let x64 = toolset_binding(&env(Platform::Windows, Arch::X86_64, BuildOptions::default()));
        assert_eq!(x64.ar_flags, vec!["/MACHINE:X64"]);
        assert!(x64.link_flags.contains(&"/MACHINE:X64".to_string()));

        let x86 = toolset_binding(&env(Platform::Windows, Arch::X86, BuildOptions::default()));
        assert_eq!(x86.ar_flags, vec!["/MACHINE:X86"]);
    }

    #[test]
    fn explicit_toolset_overrides_environment() {
        let gnu_on_windows = flags_for(
            Toolset::Gnu,
            &env(Platform::Windows, Arch::X86_64, BuildOptions::default()),
        );
        assert_eq!(gnu_on_windows.compile_flags, vec!["-O2"]);
    }
}
