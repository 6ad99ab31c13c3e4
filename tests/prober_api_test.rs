//! Integration tests for the prober public API.

use std::cell::RefCell;
use std::fs;
use std::io;

use bspconf::bindings::RealFs;
use bspconf::config::BuildOptions;
use bspconf::environment::{Arch, EnvironmentDescriptor, Platform};
use bspconf::header::{write_artifact, WriteOutcome};
use bspconf::probe::{CompileOutcome, Compiler, Invocation};
use bspconf::prober::Prober;
use bspconf::ui::MockUI;
use tempfile::TempDir;

/// Fails any probe whose source mentions `reject`, and records every call.
struct ScriptedCompiler {
    reject: &'static str,
    calls: RefCell<Vec<Invocation>>,
}

impl ScriptedCompiler {
    fn rejecting(reject: &'static str) -> Self {
        Self {
            reject,
            calls: RefCell::new(Vec::new()),
        }
    }
}

impl Compiler for ScriptedCompiler {
    fn invoke(&self, invocation: &Invocation) -> io::Result<CompileOutcome> {
        self.calls.borrow_mut().push(invocation.clone());
        let source = fs::read_to_string(invocation.workdir.join(&invocation.source))?;
        if source.contains(self.reject) {
            Ok(CompileOutcome {
                success: false,
                diagnostics: format!("conftest: {} not found", self.reject),
            })
        } else {
            Ok(CompileOutcome {
                success: true,
                diagnostics: String::new(),
            })
        }
    }
}

fn linux(options: BuildOptions) -> EnvironmentDescriptor {
    EnvironmentDescriptor::new(Platform::Linux, Arch::X86_64, options).unwrap()
}

#[test]
fn custom_compiler_drives_the_run() {
    let env = linux(BuildOptions {
        cblas: "atlas".to_string(),
        ..Default::default()
    });
    let compiler = ScriptedCompiler::rejecting("cblas.h");
    let config = Prober::new(&env, &compiler, &RealFs)
        .run(&mut MockUI::new())
        .unwrap();

    assert_eq!(config.features(), vec!["_HAVE_MPI2"]);
    assert!(config.exported.get("cblas").is_none());

    let calls = compiler.calls.borrow();
    assert_eq!(calls.len(), 2);
    assert_eq!(calls[0].program, "mpicxx");
    assert!(calls[1].args.iter().any(|a| a == "-lcblas" || a == "-latlas"));
}

#[test]
fn probe_sources_live_in_their_own_directory() {
    let env = linux(BuildOptions::default());
    let compiler = ScriptedCompiler::rejecting("nothing-rejected");
    Prober::new(&env, &compiler, &RealFs)
        .run(&mut MockUI::new())
        .unwrap();

    let calls = compiler.calls.borrow();
    assert_eq!(calls.len(), 1);
    assert!(!calls[0].workdir.exists());
}

#[test]
fn artifact_round_trips_through_the_writer() {
    let temp = TempDir::new().unwrap();
    let env = linux(BuildOptions {
        output: temp.path().join("include").join("bsp_config.h"),
        ..Default::default()
    });
    let compiler = ScriptedCompiler::rejecting("mpi.h");
    let config = Prober::new(&env, &compiler, &RealFs)
        .run(&mut MockUI::new())
        .unwrap();

    assert_eq!(write_artifact(&config.artifact).unwrap(), WriteOutcome::Written);
    assert_eq!(write_artifact(&config.artifact).unwrap(), WriteOutcome::Unchanged);

    let on_disk = fs::read_to_string(&config.artifact.path).unwrap();
    assert_eq!(on_disk, config.artifact.contents);
    assert!(!on_disk.contains("_HAVE_MPI2"));
}
