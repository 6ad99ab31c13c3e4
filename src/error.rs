//! Error types for bspconf operations.
//!
//! This module defines [`BspconfError`], the primary error type used throughout
//! the crate, and a [`Result`] type alias for convenience.
//!
//! # Error Handling Strategy
//!
//! - A failing probe is not an error: it produces a failed
//!   [`ProbeResult`](crate::probe::ProbeResult) and the feature is left out
//! - Option values outside their allowed set abort configuration
//! - Failures to lock or write the generated header abort configuration
//! - Use `anyhow::Error` (via `BspconfError::Other`) for unexpected errors

use std::path::PathBuf;
use thiserror::Error;

/// Core error type for bspconf operations.
#[derive(Debug, Error)]
pub enum BspconfError {
    /// An option was given a value outside its allowed set.
    #[error("Unrecognized value '{value}' for option '{option}' (allowed: {allowed})")]
    UnrecognizedOption {
        option: String,
        value: String,
        allowed: String,
    },

    /// Options file not found at expected location.
    #[error("Options file not found: {path}")]
    ConfigNotFound { path: PathBuf },

    /// Failed to parse the options file.
    #[error("Failed to parse options at {path}: {message}")]
    ConfigParseError { path: PathBuf, message: String },

    /// Another configuration run holds the output artifact.
    #[error("Output {path} is locked by another configuration run")]
    OutputLocked { path: PathBuf },

    /// IO error wrapper.
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Generic wrapped error for anyhow interop.
    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

impl BspconfError {
    /// Build an [`BspconfError::UnrecognizedOption`] from an allowed value list.
    pub fn unrecognized(option: &str, value: &str, allowed: &[&str]) -> Self {
        Self::UnrecognizedOption {
            option: option.to_string(),
            value: value.to_string(),
            allowed: allowed.join("|"),
        }
    }
}

/// Result type alias for bspconf operations.
pub type Result<T> = std::result::Result<T, BspconfError>;
