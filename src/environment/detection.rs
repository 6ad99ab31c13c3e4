//! Host platform detection.
//!
//! Reads the platform and architecture the binary was built for, unless
//! `BSPCONF_PLATFORM` or `BSPCONF_ARCH` name a different target.

use super::descriptor::{Arch, Platform};

/// Environment variable overriding the detected platform.
pub const PLATFORM_VAR: &str = "BSPCONF_PLATFORM";

/// Environment variable overriding the detected architecture.
pub const ARCH_VAR: &str = "BSPCONF_ARCH";

/// Platform and architecture of the configuration target.
#[derive(Debug, Clone, PartialEq)]
pub struct HostIdentity {
    pub platform: Platform,
    pub arch: Arch,
}

/// Detect the target identity from the real process environment.
pub fn detect_host() -> HostIdentity {
    detect_host_with_env(|key| std::env::var(key))
}

/// Detect with a custom env var lookup (for testing).
pub fn detect_host_with_env<F>(env_fn: F) -> HostIdentity
where
    F: Fn(&str) -> Result<String, std::env::VarError>,
{
    let platform = match env_fn(PLATFORM_VAR) {
        Ok(name) if !name.is_empty() => Platform::from_name(&name),
        _ => Platform::from_name(std::env::consts::OS),
    };
    let arch = match env_fn(ARCH_VAR) {
        Ok(name) if !name.is_empty() => Arch::from_name(&name),
        _ => Arch::from_name(std::env::consts::ARCH),
    };

    tracing::debug!("Detected target {}/{}", platform, arch);
    HostIdentity { platform, arch }
}
