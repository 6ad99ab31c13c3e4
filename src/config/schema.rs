//! Options file schema.
//!
//! Maps `bspconf.yml` onto [`BuildOptions`]. Every field has a default, so an
//! empty file (or no file at all) configures a distributed release build with
//! no optional libraries.

use serde::{Deserialize, Serialize};
use std::path::PathBuf;

use crate::environment::Platform;

/// Default location of the generated header, relative to the project root.
pub const DEFAULT_OUTPUT: &str = "include/bsp_config.h";

/// User-facing build options.
///
/// Symbolic options (`cblas`, `toolset`, `mode`) are kept as strings and
/// validated when they are used, so an unsupported value is reported as an
/// unrecognized option naming the allowed set.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct BuildOptions {
    /// Compile the library without MPI.
    pub sequential: bool,

    /// CBLAS flavour: none, blas, atlas, openblas, accelerate.
    pub cblas: String,

    /// Toolset name; defaults to msvc on Windows and gnu elsewhere.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub toolset: Option<String>,

    /// Build mode: debug or release.
    pub mode: String,

    /// Keep debug info in release builds.
    pub debuginfo: bool,

    /// Enable profiling support.
    pub profile: bool,

    /// Root of the TBB distribution.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub tbbdir: Option<String>,

    /// Directory holding versioned Boost include trees.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub boostdir: Option<String>,

    /// MPI installation root (Windows only).
    #[serde(skip_serializing_if = "Option::is_none")]
    pub mpidir: Option<String>,

    /// MPI C compiler wrapper (Unix only).
    pub mpicc: String,

    /// MPI C++ compiler wrapper (Unix only).
    pub mpicxx: String,

    /// MPI linker wrapper (Unix only).
    pub mpilink: String,

    /// Minimum MPI standard to probe for (1 or 2).
    pub mpi_version: u32,

    /// Minimum TBB major version; TBB is not probed when unset.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub tbb_version: Option<String>,

    /// Minimum Boost version (`major.minor.patch`); Boost is not probed when unset.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub boost_version: Option<String>,

    /// MSVC version (e.g. `14.2`), used to locate TBB libraries on Windows.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub msvc_version: Option<String>,

    /// C compiler driver override.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub cc: Option<String>,

    /// C++ compiler driver override.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub cxx: Option<String>,

    /// Generated header path, relative to the project root.
    pub output: PathBuf,
}

impl Default for BuildOptions {
    fn default() -> Self {
        Self {
            sequential: false,
            cblas: "none".to_string(),
            toolset: None,
            mode: "release".to_string(),
            debuginfo: false,
            profile: false,
            tbbdir: None,
            boostdir: None,
            mpidir: None,
            mpicc: "mpicc".to_string(),
            mpicxx: "mpicxx".to_string(),
            mpilink: "mpicxx".to_string(),
            mpi_version: 2,
            tbb_version: None,
            boost_version: None,
            msvc_version: None,
            cc: None,
            cxx: None,
            output: PathBuf::from(DEFAULT_OUTPUT),
        }
    }
}

impl BuildOptions {
    /// TBB root, falling back to the conventional Windows install location.
    pub fn tbbdir_for(&self, platform: &Platform) -> Option<String> {
        non_empty(&self.tbbdir).or_else(|| match platform {
            Platform::Windows => Some("C:\\tbb".to_string()),
            _ => None,
        })
    }

    /// Boost root, falling back to the conventional Windows install location.
    pub fn boostdir_for(&self, platform: &Platform) -> Option<String> {
        non_empty(&self.boostdir).or_else(|| match platform {
            Platform::Windows => Some("C:\\Boost\\include".to_string()),
            _ => None,
        })
    }

    /// MPI root on Windows, falling back to the Compute Cluster Pack location.
    pub fn mpidir_for(&self, platform: &Platform) -> Option<String> {
        non_empty(&self.mpidir).or_else(|| match platform {
            Platform::Windows => {
                Some("C:\\Program Files\\Microsoft Compute Cluster Pack".to_string())
            }
            _ => None,
        })
    }
}

fn non_empty(value: &Option<String>) -> Option<String> {
    value.as_ref().filter(|v| !v.is_empty()).cloned()
}
