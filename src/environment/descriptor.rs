//! The explicit environment descriptor passed to every operation.

use std::fmt;

use serde::Serialize;

use crate::config::BuildOptions;
use crate::error::{BspconfError, Result};

/// Target operating system, named the way `uname -s` reports it.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize)]
pub enum Platform {
    Linux,
    Darwin,
    Windows,
    Other(String),
}

impl Platform {
    /// Parse a platform from a `uname`-style or Rust `target_os` name.
    pub fn from_name(name: &str) -> Self {
        match name.to_ascii_lowercase().as_str() {
            "linux" => Platform::Linux,
            "darwin" | "macos" => Platform::Darwin,
            "windows" => Platform::Windows,
            _ => Platform::Other(name.to_string()),
        }
    }

    /// The `uname`-style name of this platform.
    pub fn name(&self) -> &str {
        match self {
            Platform::Linux => "Linux",
            Platform::Darwin => "Darwin",
            Platform::Windows => "Windows",
            Platform::Other(name) => name,
        }
    }

    /// Path separator used when building paths for this platform.
    pub fn separator(&self) -> char {
        match self {
            Platform::Windows => '\\',
            _ => '/',
        }
    }

    /// Join path components with this platform's separator.
    ///
    /// A trailing separator on `base` is not duplicated.
    pub fn join(&self, base: &str, parts: &[&str]) -> String {
        let sep = self.separator();
        let mut joined = base.trim_end_matches(sep).to_string();
        for part in parts {
            if !joined.is_empty() {
                joined.push(sep);
            }
            joined.push_str(part);
        }
        joined
    }
}

impl fmt::Display for Platform {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Target CPU architecture.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize)]
pub enum Arch {
    X86_64,
    X86,
    Aarch64,
    Other(String),
}

impl Arch {
    /// Parse an architecture from a `uname -m`, Windows or Rust `target_arch` name.
    pub fn from_name(name: &str) -> Self {
        match name.to_ascii_lowercase().as_str() {
            "x86_64" | "amd64" | "x64" => Arch::X86_64,
            "x86" | "i386" | "i486" | "i586" | "i686" => Arch::X86,
            "aarch64" | "arm64" => Arch::Aarch64,
            _ => Arch::Other(name.to_string()),
        }
    }

    /// The canonical name of this architecture.
    pub fn name(&self) -> &str {
        match self {
            Arch::X86_64 => "x86_64",
            Arch::X86 => "x86",
            Arch::Aarch64 => "aarch64",
            Arch::Other(name) => name,
        }
    }

    /// Whether this is a 64-bit x86 target.
    pub fn is_x86_64(&self) -> bool {
        matches!(self, Arch::X86_64)
    }
}

impl fmt::Display for Arch {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Compiler family used for the build.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub enum Toolset {
    /// GCC, Clang and anything else accepting GNU-style flags.
    Gnu,
    /// Microsoft Visual C++.
    Msvc,
    /// Intel compiler on Windows (MSVC-style flags).
    IntelWindows,
}

impl Toolset {
    pub const ALLOWED: &'static [&'static str] = &["gnu", "msvc", "intel_windows"];

    /// Parse a toolset name.
    pub fn from_name(name: &str) -> Result<Self> {
        match name {
            "gnu" => Ok(Toolset::Gnu),
            "msvc" => Ok(Toolset::Msvc),
            "intel_windows" => Ok(Toolset::IntelWindows),
            other => Err(BspconfError::unrecognized("toolset", other, Self::ALLOWED)),
        }
    }

    /// Default toolset for a platform.
    pub fn default_for(platform: &Platform) -> Self {
        match platform {
            Platform::Windows => Toolset::Msvc,
            _ => Toolset::Gnu,
        }
    }

    pub fn name(&self) -> &'static str {
        match self {
            Toolset::Gnu => "gnu",
            Toolset::Msvc => "msvc",
            Toolset::IntelWindows => "intel_windows",
        }
    }

    /// Whether this toolset takes MSVC-style (`/flag`) arguments.
    pub fn is_msvc_family(&self) -> bool {
        matches!(self, Toolset::Msvc | Toolset::IntelWindows)
    }

    /// Default C and C++ compiler drivers.
    pub fn default_compilers(&self) -> (&'static str, &'static str) {
        match self {
            Toolset::Gnu => ("cc", "c++"),
            Toolset::Msvc => ("cl", "cl"),
            Toolset::IntelWindows => ("icl", "icl"),
        }
    }
}

/// Build flavour.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub enum BuildMode {
    Debug,
    Release,
}

impl BuildMode {
    pub const ALLOWED: &'static [&'static str] = &["debug", "release"];

    pub fn from_name(name: &str) -> Result<Self> {
        match name {
            "debug" => Ok(BuildMode::Debug),
            "release" => Ok(BuildMode::Release),
            other => Err(BspconfError::unrecognized("mode", other, Self::ALLOWED)),
        }
    }
}

/// Everything a configuration run may depend on.
///
/// Two runs given equal descriptors (and an unchanged set of installed
/// libraries) produce identical artifacts.
#[derive(Debug, Clone)]
pub struct EnvironmentDescriptor {
    platform: Platform,
    arch: Arch,
    toolset: Toolset,
    mode: BuildMode,
    options: BuildOptions,
}

impl EnvironmentDescriptor {
    /// Build a descriptor, validating the symbolic options it depends on.
    pub fn new(platform: Platform, arch: Arch, options: BuildOptions) -> Result<Self> {
        let toolset = match options.toolset.as_deref() {
            Some(name) => Toolset::from_name(name)?,
            None => Toolset::default_for(&platform),
        };
        let mode = BuildMode::from_name(&options.mode)?;

        Ok(Self {
            platform,
            arch,
            toolset,
            mode,
            options,
        })
    }

    /// Describe the host this binary runs on.
    pub fn for_host(options: BuildOptions) -> Result<Self> {
        let host = super::detect_host();
        Self::new(host.platform, host.arch, options)
    }

    pub fn platform(&self) -> &Platform {
        &self.platform
    }

    pub fn arch(&self) -> &Arch {
        &self.arch
    }

    pub fn toolset(&self) -> Toolset {
        self.toolset
    }

    pub fn mode(&self) -> BuildMode {
        self.mode
    }

    pub fn options(&self) -> &BuildOptions {
        &self.options
    }

    pub fn is_windows(&self) -> bool {
        self.platform == Platform::Windows
    }

    /// The base C compiler driver, before any library wrapper overrides it.
    pub fn c_compiler(&self) -> String {
        self.options
            .cc
            .clone()
            .unwrap_or_else(|| self.toolset.default_compilers().0.to_string())
    }

    /// The base C++ compiler driver, before any library wrapper overrides it.
    pub fn cxx_compiler(&self) -> String {
        self.options
            .cxx
            .clone()
            .unwrap_or_else(|| self.toolset.default_compilers().1.to_string())
    }

    /// Short `platform/arch` label used in log and UI output.
    pub fn label(&self) -> String {
        format!("{}/{}", self.platform, self.arch)
    }
}
