//! Build options loading and parsing.
//!
//! - Schema definitions in [`schema`]
//! - File discovery and loading in [`loader`]
//!
//! # Example
//!
//! ```
//! use bspconf::config::load_merged_options;
//! use tempfile::TempDir;
//! use std::fs;
//!
//! let temp = TempDir::new().unwrap();
//! fs::write(temp.path().join("bspconf.yml"), "cblas: atlas").unwrap();
//!
//! let options = load_merged_options(temp.path()).unwrap();
//! assert_eq!(options.cblas, "atlas");
//! ```
//!
//! # Options File Locations
//!
//! Options are merged in this order:
//! 1. Project options (`bspconf.yml`)
//! 2. Local overrides (`bspconf.local.yml`)
//! 3. Command-line flags and `BSPCONF_*` environment variables

pub mod loader;
pub mod schema;

pub use loader::{
    find_project_root, load_merged_options, load_options, load_options_file, parse_options,
    OptionsPaths, LOCAL_OPTIONS_FILE, OPTIONS_FILE,
};
pub use schema::{BuildOptions, DEFAULT_OUTPUT};
