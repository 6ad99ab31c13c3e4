//! Options file discovery and loading.
//!
//! Options are read from `bspconf.yml` in the project root, with
//! `bspconf.local.yml` layered on top for machine-specific paths. Command-line
//! overrides are applied by the caller afterwards.

use crate::config::schema::BuildOptions;
use crate::error::{BspconfError, Result};
use std::fs;
use std::path::{Path, PathBuf};

/// Project options file name.
pub const OPTIONS_FILE: &str = "bspconf.yml";

/// Machine-local overrides file name.
pub const LOCAL_OPTIONS_FILE: &str = "bspconf.local.yml";

/// Paths to options files in merge order (later overrides earlier).
#[derive(Debug, Clone)]
pub struct OptionsPaths {
    /// Project options: bspconf.yml
    pub project: Option<PathBuf>,

    /// Local overrides: bspconf.local.yml
    pub project_local: Option<PathBuf>,
}

impl OptionsPaths {
    /// Discover options files for the given project root.
    pub fn discover(project_root: &Path) -> Self {
        Self {
            project: existing(project_root.join(OPTIONS_FILE)),
            project_local: existing(project_root.join(LOCAL_OPTIONS_FILE)),
        }
    }

    /// Returns all existing options paths in merge order.
    pub fn all_existing(&self) -> Vec<&PathBuf> {
        self.project.iter().chain(self.project_local.iter()).collect()
    }
}

fn existing(path: PathBuf) -> Option<PathBuf> {
    if path.exists() {
        Some(path)
    } else {
        None
    }
}

/// Find the project root by walking up from `start`.
///
/// Looks for, in order at each level:
/// 1. `bspconf.yml`
/// 2. `SConstruct` (the build this header feeds)
/// 3. `.git` directory (fallback)
pub fn find_project_root(start: &Path) -> Option<PathBuf> {
    let mut current = start.to_path_buf();

    loop {
        if current.join(OPTIONS_FILE).is_file()
            || current.join("SConstruct").is_file()
            || current.join(".git").exists()
        {
            return Some(current);
        }

        if !current.pop() {
            return None;
        }
    }
}

/// Parse YAML content into [`BuildOptions`].
pub fn parse_options(content: &str, source_path: &Path) -> Result<BuildOptions> {
    if content.trim().is_empty() {
        return Ok(BuildOptions::default());
    }
    serde_yaml::from_str(content).map_err(|e| BspconfError::ConfigParseError {
        path: source_path.to_path_buf(),
        message: e.to_string(),
    })
}

/// Load a single options file.
///
/// # Errors
///
/// Returns `ConfigNotFound` if the file doesn't exist.
/// Returns `ConfigParseError` if the YAML is invalid.
pub fn load_options_file(path: &Path) -> Result<BuildOptions> {
    let content = read(path)?;
    parse_options(&content, path)
}

/// Load and merge the options files of a project.
///
/// A project without any options file gets [`BuildOptions::default`].
pub fn load_merged_options(project_root: &Path) -> Result<BuildOptions> {
    let paths = OptionsPaths::discover(project_root);
    let mut merged = serde_yaml::Mapping::new();

    for path in paths.all_existing() {
        let content = read(path)?;
        if content.trim().is_empty() {
            continue;
        }
        let value: serde_yaml::Value =
            serde_yaml::from_str(&content).map_err(|e| BspconfError::ConfigParseError {
                path: path.clone(),
                message: e.to_string(),
            })?;
        match value {
            serde_yaml::Value::Mapping(map) => {
                tracing::debug!("Loaded options from {}", path.display());
                merged.extend(map);
            }
            serde_yaml::Value::Null => {}
            _ => {
                return Err(BspconfError::ConfigParseError {
                    path: path.clone(),
                    message: "expected a mapping of option names to values".to_string(),
                })
            }
        }
    }

    serde_yaml::from_value(serde_yaml::Value::Mapping(merged)).map_err(|e| {
        BspconfError::ConfigParseError {
            path: project_root.join(OPTIONS_FILE),
            message: format!("Failed to parse merged options: {}", e),
        }
    })
}

/// Load options with an optional explicit file.
///
/// If `options_override` is provided, loads only that file without merging.
pub fn load_options(project_root: &Path, options_override: Option<&Path>) -> Result<BuildOptions> {
    match options_override {
        Some(path) => load_options_file(path),
        None => load_merged_options(project_root),
    }
}

fn read(path: &Path) -> Result<String> {
    fs::read_to_string(path).map_err(|e| {
        if e.kind() == std::io::ErrorKind::NotFound {
            BspconfError::ConfigNotFound {
                path: path.to_path_buf(),
            }
        } else {
            BspconfError::Io(e)
        }
    })
}
