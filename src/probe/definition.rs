//! Probe and result types.

use serde::Serialize;

use crate::bindings::LibraryBinding;

/// Source language of a probe.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum Language {
    C,
    Cxx,
}

impl Language {
    /// File extension for the probe source.
    pub fn extension(&self) -> &'static str {
        match self {
            Language::C => "c",
            Language::Cxx => "cpp",
        }
    }
}

/// What a probe must achieve to pass.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum ProbeMode {
    /// The source compiles to an object file.
    Compile,
    /// The source compiles and links into an executable.
    Link,
}

/// A capability check.
#[derive(Debug, Clone)]
pub struct Probe {
    /// Short identifier (`tbb`, `cblas`).
    pub name: String,
    /// Progress message shown while the probe runs.
    pub message: String,
    /// Feature macro defined in the header when the probe passes.
    pub feature: Option<String>,
    pub language: Language,
    pub mode: ProbeMode,
    pub source: String,
    /// Build inputs the probe is compiled with.
    pub binding: LibraryBinding,
    /// Binding that is only exported to the downstream build if this probe passes.
    pub gates: Option<String>,
}

impl Probe {
    pub fn new(
        name: &str,
        message: &str,
        language: Language,
        mode: ProbeMode,
        source: &str,
    ) -> Self {
        Self {
            name: name.to_string(),
            message: message.to_string(),
            feature: None,
            language,
            mode,
            source: source.to_string(),
            binding: LibraryBinding::new(),
            gates: None,
        }
    }

    pub fn with_feature(mut self, feature: &str) -> Self {
        self.feature = Some(feature.to_string());
        self
    }

    pub fn with_binding(mut self, binding: LibraryBinding) -> Self {
        self.binding = binding;
        self
    }

    pub fn gating(mut self, binding_name: &str) -> Self {
        self.gates = Some(binding_name.to_string());
        self
    }

    /// Scratch file name for the probe source.
    pub fn file_name(&self) -> String {
        format!("conftest.{}", self.language.extension())
    }
}

/// Outcome of one probe in one configuration run.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ProbeResult {
    probe: String,
    feature: Option<String>,
    gates: Option<String>,
    passed: bool,
    /// The compiler never ran, so the result says nothing about the library.
    aborted: bool,
    message: String,
}

impl ProbeResult {
    /// A passing result for `probe`.
    pub fn passed(probe: &Probe) -> Self {
        Self::new(probe, true, "ok".to_string())
    }

    /// A failing result for `probe`, carrying the reason.
    pub fn failed(probe: &Probe, message: impl Into<String>) -> Self {
        Self::new(probe, false, message.into())
    }

    /// A failing result for a probe whose compiler could not be run at all.
    pub fn aborted(probe: &Probe, message: impl Into<String>) -> Self {
        Self {
            aborted: true,
            ..Self::new(probe, false, message.into())
        }
    }

    fn new(probe: &Probe, passed: bool, message: String) -> Self {
        Self {
            probe: probe.name.clone(),
            feature: probe.feature.clone(),
            gates: probe.gates.clone(),
            passed,
            aborted: false,
            message,
        }
    }

    pub fn probe(&self) -> &str {
        &self.probe
    }

    pub fn feature(&self) -> Option<&str> {
        self.feature.as_deref()
    }

    pub fn gates(&self) -> Option<&str> {
        self.gates.as_deref()
    }

    pub fn is_passed(&self) -> bool {
        self.passed
    }

    pub fn is_aborted(&self) -> bool {
        self.aborted
    }

    pub fn message(&self) -> &str {
        &self.message
    }
}
