//! MPI binding.
//!
//! Distributed builds compile through the MPI compiler wrappers on Unix. On
//! Windows there are no wrappers, so the MPI root is inspected for MS-MPI
//! and its include and library paths are added directly.

use crate::environment::{Arch, EnvironmentDescriptor};

use super::{HostFs, LibraryBinding};

/// Command-line define selecting the distributed code paths.
pub const HAVE_MPI: &str = "_HAVE_MPI";

/// Command-line define selecting the sequential code paths.
pub const NO_MPI: &str = "_NO_MPI";

/// Resolve the MPI binding, or the sequential marker when `sequential` is set.
pub fn mpi_binding(env: &EnvironmentDescriptor, fs: &dyn HostFs) -> LibraryBinding {
    let options = env.options();
    if options.sequential {
        return LibraryBinding::new().define(NO_MPI);
    }

    let binding = if env.is_windows() {
        windows_mpi(env, fs)
    } else {
        let mut binding = LibraryBinding::new();
        binding.tools.cc = Some(options.mpicc.clone());
        binding.tools.cxx = Some(options.mpicxx.clone());
        binding.tools.link = Some(options.mpilink.clone());
        binding
    };

    binding.define(HAVE_MPI)
}

fn windows_mpi(env: &EnvironmentDescriptor, fs: &dyn HostFs) -> LibraryBinding {
    let platform = env.platform();
    let Some(mpidir) = env.options().mpidir_for(platform) else {
        return LibraryBinding::new();
    };

    if fs.exists(&platform.join(&mpidir, &["lib", "msmpi.lib"])) {
        tracing::info!("Found MS-MPI in {}", mpidir);
        let arch_dir = match env.arch() {
            Arch::X86_64 => "amd64",
            _ => "i386",
        };
        LibraryBinding::new()
            .include_path(&platform.join(&mpidir, &["Include"]))
            .lib_path(&platform.join(&mpidir, &["Lib", arch_dir]))
            .lib("msmpi")
            .lib("msmpe")
    } else {
        tracing::info!("Using generic MPI layout in {}", mpidir);
        LibraryBinding::new()
            .include_path(&platform.join(&mpidir, &["include"]))
            .lib_path(&platform.join(&mpidir, &["lib"]))
            .lib("mpi")
            .lib("mpi_cxx")
    }
}
