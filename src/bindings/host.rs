//! Filesystem lookups used while resolving bindings.
//!
//! Binding resolution only needs to ask whether a path exists and what
//! directories live under a root. Going through [`HostFs`] lets tests
//! describe a Windows install tree without one being present.

use std::collections::BTreeSet;
use std::fs;
use std::path::Path;

/// Read-only view of the host filesystem.
pub trait HostFs {
    /// Whether `path` exists.
    fn exists(&self, path: &str) -> bool;

    /// Full paths of the directories directly under `path`, sorted.
    fn subdirectories(&self, path: &str) -> Vec<String>;
}

/// [`HostFs`] backed by the real filesystem.
#[derive(Debug, Clone, Copy, Default)]
pub struct RealFs;

impl HostFs for RealFs {
    fn exists(&self, path: &str) -> bool {
        Path::new(path).exists()
    }

    fn subdirectories(&self, path: &str) -> Vec<String> {
        let Ok(entries) = fs::read_dir(path) else {
            return Vec::new();
        };
        let dirs: BTreeSet<String> = entries
            .filter_map(|entry| entry.ok())
            .filter(|entry| entry.path().is_dir())
            .map(|entry| entry.path().to_string_lossy().to_string())
            .collect();
        dirs.into_iter().collect()
    }
}
