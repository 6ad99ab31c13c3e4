//! Probe execution.

use std::fs;

use crate::environment::EnvironmentDescriptor;

use super::compiler::{build_invocation, Compiler};
use super::definition::{Probe, ProbeResult};

/// Compile (and for link probes, link) `probe` in a scratch directory.
///
/// Never fails. A compiler that exits non-zero produces a failed result; a
/// compiler that cannot be started or a scratch directory that cannot be
/// created produce an aborted one.
pub fn run_probe(
    probe: &Probe,
    env: &EnvironmentDescriptor,
    compiler: &dyn Compiler,
) -> ProbeResult {
    let scratch = match tempfile::Builder::new().prefix("bspconf-").tempdir() {
        Ok(dir) => dir,
        Err(e) => {
            tracing::warn!(
                "Probe {}: cannot create scratch directory: {}",
                probe.name,
                e
            );
            let message = format!("cannot create scratch directory: {}", e);
            return ProbeResult::aborted(probe, message);
        }
    };

    let invocation = build_invocation(probe, env, scratch.path());
    if let Err(e) = fs::write(scratch.path().join(&invocation.source), &probe.source) {
        tracing::warn!("Probe {}: cannot write source: {}", probe.name, e);
        return ProbeResult::aborted(probe, format!("cannot write probe source: {}", e));
    }

    match compiler.invoke(&invocation) {
        Ok(outcome) if outcome.success => {
            tracing::debug!("Probe {} passed", probe.name);
            ProbeResult::passed(probe)
        }
        Ok(outcome) => {
            tracing::debug!("Probe {} failed:\n{}", probe.name, outcome.diagnostics);
            ProbeResult::failed(probe, first_diagnostic(&outcome.diagnostics))
        }
        Err(e) => {
            tracing::warn!(
                "Probe {}: cannot run {}: {}",
                probe.name,
                invocation.program,
                e
            );
            ProbeResult::aborted(probe, format!("cannot run {}: {}", invocation.program, e))
        }
    }
}

fn first_diagnostic(diagnostics: &str) -> String {
    diagnostics
        .lines()
        .map(str::trim)
        .find(|line| !line.is_empty())
        .unwrap_or("no")
        .to_string()
}
