//! One configuration run.
//!
//! [`Prober`] resolves the library bindings the options ask for, runs the
//! probes those bindings enable, drops the bindings whose probe failed and
//! renders the header from what remains.

use crate::bindings::{
    boost_binding, mpi_binding, select_library_variant, tbb_binding, toolset_binding, Bindings,
    HostFs,
};
use crate::environment::EnvironmentDescriptor;
use crate::error::Result;
use crate::header::{emit_configuration, Artifact};
use crate::probe::{
    boost_probe, cblas_probe, mpi_probe, run_probe, tbb_probe, Compiler, Probe, ProbeResult,
};
use crate::ui::UserInterface;
use crate::version::VersionFloor;

/// Everything one run produced.
#[derive(Debug, Clone)]
pub struct Configuration {
    /// Probe results in probe order.
    pub results: Vec<ProbeResult>,
    /// Every binding the options resolved to.
    pub resolved: Bindings,
    /// Bindings handed to the downstream build; excludes those whose probe failed.
    pub exported: Bindings,
    pub artifact: Artifact,
}

impl Configuration {
    /// Feature macros that made it into the header.
    pub fn features(&self) -> Vec<&str> {
        self.results
            .iter()
            .filter(|r| r.is_passed())
            .filter_map(|r| r.feature())
            .collect()
    }
}

/// Runs probes for one environment.
pub struct Prober<'a> {
    env: &'a EnvironmentDescriptor,
    compiler: &'a dyn Compiler,
    fs: &'a dyn HostFs,
}

impl<'a> Prober<'a> {
    pub fn new(
        env: &'a EnvironmentDescriptor,
        compiler: &'a dyn Compiler,
        fs: &'a dyn HostFs,
    ) -> Self {
        Self { env, compiler, fs }
    }

    /// Resolve the bindings selected by the options, in a fixed order:
    /// toolset, mpi, tbb, boost, cblas.
    ///
    /// Fails on an unrecognized `cblas` value or malformed version floor.
    pub fn resolve_bindings(&self) -> Result<Bindings> {
        let options = self.env.options();
        let mut bindings = Bindings::new();

        bindings.insert("toolset", toolset_binding(self.env));
        bindings.insert("mpi", mpi_binding(self.env, self.fs));

        if let Some(version) = &options.tbb_version {
            VersionFloor::parse("tbb_version", version)?;
            bindings.insert("tbb", tbb_binding(self.env, self.fs));
        }
        if let Some(version) = &options.boost_version {
            VersionFloor::parse("boost_version", version)?;
            bindings.insert("boost", boost_binding(self.env, self.fs));
        }

        let cblas = select_library_variant("cblas", &options.cblas, self.env)?;
        if !cblas.is_empty() {
            bindings.insert("cblas", cblas);
        }

        tracing::debug!("Resolved bindings: {:?}", bindings.names());
        Ok(bindings)
    }

    /// The probes enabled by `bindings`, each compiled against the toolset
    /// flags plus its own library binding only.
    pub fn probes(&self, bindings: &Bindings) -> Result<Vec<Probe>> {
        let options = self.env.options();
        let base = bindings.get("toolset").cloned().unwrap_or_default();
        let with = |name: &str| match bindings.get(name) {
            Some(binding) => base.merged(binding),
            None => base.clone(),
        };

        let mut probes = Vec::new();
        if !options.sequential {
            probes.push(mpi_probe(options.mpi_version).with_binding(with("mpi")));
        }
        if let Some(version) = &options.tbb_version {
            let floor = VersionFloor::parse("tbb_version", version)?;
            probes.push(tbb_probe(floor).with_binding(with("tbb")));
        }
        if let Some(version) = &options.boost_version {
            let floor = VersionFloor::parse("boost_version", version)?;
            probes.push(boost_probe(floor).with_binding(with("boost")));
        }
        if bindings.get("cblas").is_some() {
            probes.push(cblas_probe().with_binding(with("cblas")));
        }
        Ok(probes)
    }

    /// Resolve bindings, run every probe and render the header.
    ///
    /// Probe failures only remove the probe's feature macro and the binding
    /// it gates; they never fail the run.
    pub fn run(&self, ui: &mut dyn UserInterface) -> Result<Configuration> {
        let resolved = self.resolve_bindings()?;
        let probes = self.probes(&resolved)?;

        tracing::info!(
            "Configuring for {} with {} ({} probes)",
            self.env.label(),
            self.env.toolset().name(),
            probes.len()
        );

        let mut results = Vec::with_capacity(probes.len());
        for probe in &probes {
            let mut spinner = ui.start_spinner(&probe.message);
            let result = run_probe(probe, self.env, self.compiler);
            if result.is_passed() {
                spinner.finish_success(result.message());
            } else if result.is_aborted() {
                spinner.finish_error("error");
                ui.warning(result.message());
            } else {
                spinner.finish_skipped("no");
                if ui.output_mode().shows_diagnostics() {
                    ui.message(&format!("  {}", result.message()));
                }
            }
            results.push(result);
        }

        let mut exported = resolved.clone();
        for result in results.iter().filter(|r| !r.is_passed()) {
            if let Some(gate) = result.gates() {
                if exported.remove(gate).is_some() {
                    tracing::info!(
                        "Probe {} failed; not exporting {} flags",
                        result.probe(),
                        gate
                    );
                }
            }
        }

        let artifact = emit_configuration(&results, &exported, self.env);
        Ok(Configuration {
            results,
            resolved,
            exported,
            artifact,
        })
    }
}
