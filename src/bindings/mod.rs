//! Library bindings: what the downstream build must add to compile and link.
//!
//! Each optional library resolves to a [`LibraryBinding`] from the user's
//! options and the [`EnvironmentDescriptor`]. Bindings are immutable values;
//! the prober collects them into [`Bindings`] and merges them only when the
//! downstream build asks for the combined flag set.
//!
//! - [`blas`] - CBLAS variant selection
//! - [`mpi`] - MPI wrappers or Windows MPI libraries
//! - [`tbb`] - TBB include and library paths
//! - [`boost`] - Boost include tree discovery
//! - [`toolset`] - per-toolset compile and link flags

pub mod blas;
pub mod boost;
pub mod host;
pub mod mpi;
pub mod tbb;
pub mod toolset;

pub use blas::CblasVariant;
pub use boost::boost_binding;
pub use host::{HostFs, RealFs};
pub use mpi::mpi_binding;
pub use tbb::tbb_binding;
pub use toolset::toolset_binding;

use serde::Serialize;

use crate::environment::{EnvironmentDescriptor, Toolset};
use crate::error::{BspconfError, Result};

/// Options that select a library variant by name.
pub const VARIANT_OPTIONS: &[&str] = &["cblas", "toolset"];

/// Compiler drivers that replace the toolset defaults (MPI wrappers).
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct ToolOverrides {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub cc: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub cxx: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub link: Option<String>,
}

impl ToolOverrides {
    pub fn is_empty(&self) -> bool {
        self.cc.is_none() && self.cxx.is_none() && self.link.is_none()
    }
}

/// Concrete build inputs for one library or toolset.
///
/// Every list keeps insertion order and holds no duplicates.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct LibraryBinding {
    /// Library names without prefix or extension (`tbb`, not `libtbb.so`).
    pub libs: Vec<String>,
    /// macOS frameworks, linked with `-framework <name>`.
    pub frameworks: Vec<String>,
    pub include_paths: Vec<String>,
    pub lib_paths: Vec<String>,
    /// Preprocessor definitions passed on the command line.
    pub defines: Vec<String>,
    pub compile_flags: Vec<String>,
    pub link_flags: Vec<String>,
    pub ar_flags: Vec<String>,
    #[serde(skip_serializing_if = "ToolOverrides::is_empty")]
    pub tools: ToolOverrides,
}

impl LibraryBinding {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn is_empty(&self) -> bool {
        self == &Self::default()
    }

    pub fn lib(mut self, name: &str) -> Self {
        push_unique(&mut self.libs, name);
        self
    }

    pub fn framework(mut self, name: &str) -> Self {
        push_unique(&mut self.frameworks, name);
        self
    }

    pub fn include_path(mut self, path: &str) -> Self {
        push_unique(&mut self.include_paths, path);
        self
    }

    pub fn lib_path(mut self, path: &str) -> Self {
        push_unique(&mut self.lib_paths, path);
        self
    }

    pub fn define(mut self, name: &str) -> Self {
        push_unique(&mut self.defines, name);
        self
    }

    pub fn compile_flags(mut self, flags: &[&str]) -> Self {
        for flag in flags {
            push_unique(&mut self.compile_flags, flag);
        }
        self
    }

    pub fn link_flags(mut self, flags: &[&str]) -> Self {
        for flag in flags {
            push_unique(&mut self.link_flags, flag);
        }
        self
    }

    pub fn ar_flags(mut self, flags: &[&str]) -> Self {
        for flag in flags {
            push_unique(&mut self.ar_flags, flag);
        }
        self
    }

    /// Append `other`; its tool overrides win where set.
    pub fn merge(&mut self, other: &LibraryBinding) {
        let lists = [
            (&mut self.libs, &other.libs),
            (&mut self.frameworks, &other.frameworks),
            (&mut self.include_paths, &other.include_paths),
            (&mut self.lib_paths, &other.lib_paths),
            (&mut self.defines, &other.defines),
            (&mut self.compile_flags, &other.compile_flags),
            (&mut self.link_flags, &other.link_flags),
            (&mut self.ar_flags, &other.ar_flags),
        ];
        for (mine, theirs) in lists {
            for value in theirs {
                push_unique(mine, value);
            }
        }

        if other.tools.cc.is_some() {
            self.tools.cc = other.tools.cc.clone();
        }
        if other.tools.cxx.is_some() {
            self.tools.cxx = other.tools.cxx.clone();
        }
        if other.tools.link.is_some() {
            self.tools.link = other.tools.link.clone();
        }
    }

    /// Return a copy of `self` with `other` merged in.
    pub fn merged(&self, other: &LibraryBinding) -> LibraryBinding {
        let mut combined = self.clone();
        combined.merge(other);
        combined
    }

    /// Preprocessor and include arguments in the toolset's syntax.
    pub fn compile_args(&self, toolset: Toolset) -> Vec<String> {
        let mut args = self.compile_flags.clone();
        if toolset.is_msvc_family() {
            args.extend(self.defines.iter().map(|d| format!("/D{}", d)));
            args.extend(self.include_paths.iter().map(|p| format!("/I{}", p)));
        } else {
            args.extend(self.defines.iter().map(|d| format!("-D{}", d)));
            args.extend(self.include_paths.iter().map(|p| format!("-I{}", p)));
        }
        args
    }

    /// Library search path and library arguments in the toolset's syntax.
    ///
    /// For MSVC-family toolsets these belong after `/link`.
    pub fn link_args(&self, toolset: Toolset) -> Vec<String> {
        let mut args = self.link_flags.clone();
        if toolset.is_msvc_family() {
            args.extend(self.lib_paths.iter().map(|p| format!("/LIBPATH:{}", p)));
            args.extend(self.libs.iter().map(|l| msvc_lib_name(l)));
        } else {
            args.extend(self.lib_paths.iter().map(|p| format!("-L{}", p)));
            args.extend(self.libs.iter().map(|l| format!("-l{}", l)));
            for framework in &self.frameworks {
                args.push("-framework".to_string());
                args.push(framework.clone());
            }
        }
        args
    }
}

fn msvc_lib_name(lib: &str) -> String {
    if lib.ends_with(".lib") {
        lib.to_string()
    } else {
        format!("{}.lib", lib)
    }
}

fn push_unique(list: &mut Vec<String>, value: &str) {
    if !list.iter().any(|existing| existing == value) {
        list.push(value.to_string());
    }
}

/// Named bindings in resolution order.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct Bindings {
    entries: Vec<(String, LibraryBinding)>,
}

impl Bindings {
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert or replace the binding called `name`, keeping its first position.
    pub fn insert(&mut self, name: &str, binding: LibraryBinding) {
        match self.entries.iter_mut().find(|(n, _)| n == name) {
            Some((_, existing)) => *existing = binding,
            None => self.entries.push((name.to_string(), binding)),
        }
    }

    pub fn get(&self, name: &str) -> Option<&LibraryBinding> {
        self.entries
            .iter()
            .find(|(n, _)| n == name)
            .map(|(_, binding)| binding)
    }

    pub fn remove(&mut self, name: &str) -> Option<LibraryBinding> {
        let idx = self.entries.iter().position(|(n, _)| n == name)?;
        Some(self.entries.remove(idx).1)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &LibraryBinding)> {
        self.entries.iter().map(|(name, b)| (name.as_str(), b))
    }

    pub fn names(&self) -> Vec<&str> {
        self.entries.iter().map(|(name, _)| name.as_str()).collect()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Whether any binding defines `name` on the command line.
    pub fn defines(&self, name: &str) -> bool {
        self.entries
            .iter()
            .any(|(_, b)| b.defines.iter().any(|d| d == name))
    }

    /// All bindings merged in order.
    pub fn combined(&self) -> LibraryBinding {
        let mut combined = LibraryBinding::new();
        for (_, binding) in &self.entries {
            combined.merge(binding);
        }
        combined
    }
}

/// Map a symbolic option value to a concrete binding.
///
/// Fails with [`BspconfError::UnrecognizedOption`] if either the option or
/// its value is outside the supported set.
///
/// # Example
///
/// ```
/// use bspconf::bindings::select_library_variant;
/// use bspconf::config::BuildOptions;
/// use bspconf::environment::{Arch, EnvironmentDescriptor, Platform};
///
/// let env = EnvironmentDescriptor::new(Platform::Linux, Arch::X86_64, BuildOptions::default())
///     .unwrap();
/// let binding = select_library_variant("cblas", "openblas", &env).unwrap();
/// assert_eq!(binding.libs, vec!["openblas".to_string()]);
/// assert!(select_library_variant("cblas", "mkl", &env).is_err());
/// ```
pub fn select_library_variant(
    option: &str,
    value: &str,
    env: &EnvironmentDescriptor,
) -> Result<LibraryBinding> {
    match option {
        "cblas" => Ok(CblasVariant::from_name(value)?.binding(env)),
        "toolset" => Ok(toolset::flags_for(Toolset::from_name(value)?, env)),
        other => Err(BspconfError::unrecognized("option", other, VARIANT_OPTIONS)),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::BuildOptions;
    use crate::environment::{Arch, Platform};

    fn linux() -> EnvironmentDescriptor {
        EnvironmentDescriptor::new(Platform::Linux, Arch::X86_64, BuildOptions::default()).unwrap()
    }

    #[test]
    fn builder_deduplicates() {
        let binding = LibraryBinding::new().lib("tbb").lib("tbb").lib("tbbmalloc");
        assert_eq!(binding.libs, vec!["tbb", "tbbmalloc"]);
    }

    #[test]
    fn merge_keeps_order_and_overrides_tools() {
        let mut base = LibraryBinding::new().lib("a").compile_flags(&["-O2"]);
        let mut wrapper = LibraryBinding::new().lib("b").lib("a");
        wrapper.tools.cxx = Some("mpicxx".to_string());

        base.merge(&wrapper);
        assert_eq!(base.libs, vec!["a", "b"]);
        assert_eq!(base.compile_flags, vec!["-O2"]);
        assert_eq!(base.tools.cxx.as_deref(), Some("mpicxx"));
    }

    #[test]
    fn gnu_args_use_dash_syntax() {
        let binding = LibraryBinding::new()
            .define("_HAVE_MPI")
            .include_path("/opt/tbb/include")
            .lib_path("/opt/tbb/lib")
            .lib("tbb")
            .framework("Accelerate");
        assert_eq!(
            binding.compile_args(Toolset::Gnu),
            vec!["-D_HAVE_MPI", "-I/opt/tbb/include"]
        );
        assert_eq!(
            binding.link_args(Toolset::Gnu),
            vec!["-L/opt/tbb/lib", "-ltbb", "-framework", "Accelerate"]
        );
    }

    #[test]
    fn msvc_args_use_slash_syntax() {
        let binding = LibraryBinding::new()
            .include_path("C:\\tbb\\include")
            .lib_path("C:\\tbb\\lib")
            .lib("tbb")
            .lib("msmpi.lib");
        assert_eq!(binding.compile_args(Toolset::Msvc), vec!["/IC:\\tbb\\include"]);
        assert_eq!(
            binding.link_args(Toolset::Msvc),
            vec!["/LIBPATH:C:\\tbb\\lib", "tbb.lib", "msmpi.lib"]
        );
    }

    #[test]
    fn bindings_insert_replaces_in_place() {
        let mut bindings = Bindings::new();
        bindings.insert("toolset", LibraryBinding::new().compile_flags(&["-O2"]));
        bindings.insert("mpi", LibraryBinding::new().define("_HAVE_MPI"));
        bindings.insert("toolset", LibraryBinding::new().compile_flags(&["-O0"]));

        assert_eq!(bindings.names(), vec!["toolset", "mpi"]);
        assert_eq!(bindings.get("toolset").unwrap().compile_flags, vec!["-O0"]);
        assert!(bindings.defines("_HAVE_MPI"));
        assert!(!bindings.defines("_NO_MPI"));
    }

    #[test]
    fn combined_merges_in_order() {
        let mut bindings = Bindings::new();
        bindings.insert("tbb", LibraryBinding::new().lib("tbb"));
        bindings.insert("cblas", LibraryBinding::new().lib("openblas"));
        assert_eq!(bindings.combined().libs, vec!["tbb", "openblas"]);
    }

    #[test]
    fn select_library_variant_dispatches_on_option() {
        let env = linux();
        let toolset = select_library_variant("toolset", "gnu", &env).unwrap();
        assert!(toolset.compile_flags.contains(&"-O2".to_string()));

        let err = select_library_variant("lapack", "mkl", &env).unwrap_err();
        assert!(matches!(err, BspconfError::UnrecognizedOption { .. }));
    }

    #[test]
    fn select_library_variant_rejects_unknown_cblas() {
        let err = select_library_variant("cblas", "mkl", &linux()).unwrap_err();
        match err {
            BspconfError::UnrecognizedOption { option, value, .. } => {
                assert_eq!(option, "cblas");
                assert_eq!(value, "mkl");
            }
            other => panic!("unexpected error: {other}"),
        }
    }
}
