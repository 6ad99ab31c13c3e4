//! Integer-encoded version floors.
//!
//! Library version checks compare a single integer against the macro the
//! library's own header exposes (`BOOST_VERSION`, `TBB_VERSION_MAJOR`), so a
//! floor is encoded once here and spliced into the probe source.

use regex::Regex;
use std::fmt;
use std::sync::LazyLock;

use crate::error::{BspconfError, Result};

/// Dotted version with up to three numeric components.
static VERSION_REGEX: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^(\d+)(?:\.(\d+))?(?:\.(\d+))?$").expect("VERSION_REGEX must compile")
});

/// A minimum required library version.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct VersionFloor {
    pub major: u32,
    pub minor: u32,
    pub patch: u32,
}

impl VersionFloor {
    pub fn new(major: u32, minor: u32, patch: u32) -> Self {
        Self {
            major,
            minor,
            patch,
        }
    }

    /// Parse `major[.minor[.patch]]`; missing components are zero.
    ///
    /// `option` names the option the value came from, for error reporting.
    pub fn parse(option: &str, value: &str) -> Result<Self> {
        let invalid = || BspconfError::UnrecognizedOption {
            option: option.to_string(),
            value: value.to_string(),
            allowed: "major[.minor[.patch]]".to_string(),
        };

        let caps = VERSION_REGEX.captures(value.trim()).ok_or_else(invalid)?;
        let component = |idx: usize| -> Result<u32> {
            match caps.get(idx) {
                Some(m) => m.as_str().parse().map_err(|_| invalid()),
                None => Ok(0),
            }
        };

        Ok(Self::new(component(1)?, component(2)?, component(3)?))
    }

    /// `major * 100000 + minor * 100 + patch`, the `BOOST_VERSION` encoding.
    ///
    /// Minor and patch components are not range-checked: a minor of 1000
    /// carries into the major digit, matching the library's own macro.
    pub fn encoded(&self) -> u64 {
        u64::from(self.major) * 100_000 + u64::from(self.minor) * 100 + u64::from(self.patch)
    }
}

impl fmt::Display for VersionFloor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}.{}.{}", self.major, self.minor, self.patch)
    }
}
