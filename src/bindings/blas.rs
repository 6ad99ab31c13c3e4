//! CBLAS variant selection.

use std::fmt;

use crate::environment::{EnvironmentDescriptor, Platform};
use crate::error::{BspconfError, Result};

use super::LibraryBinding;

/// Supported CBLAS providers.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum CblasVariant {
    /// No CBLAS; the CBLAS probe is skipped.
    None,
    /// Reference BLAS with the netlib CBLAS wrapper.
    Blas,
    /// ATLAS with its CBLAS interface.
    Atlas,
    /// OpenBLAS, which bundles CBLAS.
    OpenBlas,
    /// Apple's Accelerate framework.
    Accelerate,
}

impl CblasVariant {
    pub const ALLOWED: &'static [&'static str] =
        &["none", "blas", "atlas", "openblas", "accelerate"];

    /// Parse the `cblas` option. Matching is exact.
    pub fn from_name(name: &str) -> Result<Self> {
        match name {
            "none" => Ok(CblasVariant::None),
            "blas" => Ok(CblasVariant::Blas),
            "atlas" => Ok(CblasVariant::Atlas),
            "openblas" => Ok(CblasVariant::OpenBlas),
            "accelerate" => Ok(CblasVariant::Accelerate),
            other => Err(BspconfError::unrecognized("cblas", other, Self::ALLOWED)),
        }
    }

    pub fn name(&self) -> &'static str {
        match self {
            CblasVariant::None => "none",
            CblasVariant::Blas => "blas",
            CblasVariant::Atlas => "atlas",
            CblasVariant::OpenBlas => "openblas",
            CblasVariant::Accelerate => "accelerate",
        }
    }

    pub fn is_none(&self) -> bool {
        matches!(self, CblasVariant::None)
    }

    /// The link inputs this variant needs.
    pub fn binding(&self, env: &EnvironmentDescriptor) -> LibraryBinding {
        match self {
            CblasVariant::None => LibraryBinding::new(),
            CblasVariant::Blas => LibraryBinding::new().lib("cblas").lib("blas"),
            CblasVariant::Atlas => LibraryBinding::new().lib("cblas").lib("atlas"),
            CblasVariant::OpenBlas => LibraryBinding::new().lib("openblas"),
            CblasVariant::Accelerate => {
                if env.platform() != &Platform::Darwin {
                    tracing::warn!(
                        "cblas=accelerate selects a macOS framework but the target is {}",
                        env.platform()
                    );
                }
                LibraryBinding::new().framework("Accelerate")
            }
        }
    }
}

impl fmt::Display for CblasVariant {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::BuildOptions;
    use crate::environment::{Arch, Toolset};

    fn env(platform: Platform) -> EnvironmentDescriptor {
        EnvironmentDescriptor::new(platform, Arch::X86_64, BuildOptions::default()).unwrap()
    }

    #[test]
    fn openblas_binds_exactly_openblas() {
        let binding = CblasVariant::OpenBlas.binding(&env(Platform::Linux));
        assert_eq!(binding.libs, vec!["openblas".to_string()]);
        assert!(binding.frameworks.is_empty());
        assert!(binding.link_flags.is_empty());
    }

    #[test]
    fn accelerate_binds_a_framework_not_a_library() {
        let binding = CblasVariant::Accelerate.binding(&env(Platform::Darwin));
        assert!(binding.libs.is_empty());
        assert_eq!(binding.frameworks, vec!["Accelerate".to_string()]);
        assert_eq!(
            binding.link_args(Toolset::Gnu),
            vec!["-framework".to_string(), "Accelerate".to_string()]
        );
    }

    #[test]
    fn blas_and_atlas_pair_with_cblas() {
        assert_eq!(
            CblasVariant::Blas.binding(&env(Platform::Linux)).libs,
            vec!["cblas", "blas"]
        );
        assert_eq!(
            CblasVariant::Atlas.binding(&env(Platform::Linux)).libs,
            vec!["cblas", "atlas"]
        );
    }

    #[test]
    fn none_binds_nothing() {
        assert!(CblasVariant::None.binding(&env(Platform::Linux)).is_empty());
        assert!(CblasVariant::None.is_none());
    }

    #[test]
    fn every_allowed_name_round_trips() {
        for name in CblasVariant::ALLOWED {
            assert_eq!(CblasVariant::from_name(name).unwrap().name(), *name);
        }
    }

    #[test]
    fn matching_is_case_sensitive() {
        assert!(CblasVariant::from_name("OpenBLAS").is_err());
        assert!(CblasVariant::from_name("mkl").is_err());
    }
}
