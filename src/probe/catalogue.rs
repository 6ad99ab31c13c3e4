//! Built-in probes.

use crate::version::VersionFloor;

use super::definition::{Language, Probe, ProbeMode};

/// Defined when MPI-2 one-sided communication is available.
pub const HAVE_MPI2: &str = "_HAVE_MPI2";

/// Defined when TBB meets the requested version floor.
pub const HAVE_TBB: &str = "_HAVE_TBB";

/// Defined when Boost meets the requested version floor.
pub const HAVE_BOOST: &str = "_HAVE_BOOST";

/// Defined when a CBLAS implementation links.
pub const HAVE_CBLAS: &str = "_HAVE_CBLAS";

const MPI1_SOURCE: &str = r#"#include <mpi.h>

int main(int argc, char ** argv) {
	MPI_Init(&argc, &argv);
	MPI_Finalize();
	return 0;
}
"#;

const MPI2_SOURCE: &str = r#"#include <mpi.h>

int main(int argc, char ** argv) {
	MPI_Init(&argc, &argv);
	MPI_Win w;
	MPI_Get(NULL, 1, MPI_BYTE, 0, 0, 1, MPI_BYTE, w);
	MPI_Finalize();
	return 0;
}
"#;

const CBLAS_SOURCE: &str = r#"#include <cblas.h>

int main(void) {
	double a[2] = { 1.0, 2.0 };
	double b[2] = { 3.0, 4.0 };
	return cblas_ddot(2, a, 1, b, 1) > 0.0 ? 0 : 1;
}
"#;

/// MPI availability. Version 2 and above checks for `MPI_Get` and sets
/// [`HAVE_MPI2`]; earlier versions only report whether MPI compiles.
pub fn mpi_probe(version: u32) -> Probe {
    if version < 2 {
        Probe::new(
            "mpi",
            &format!("Checking for MPI version >= {}...", version.max(1)),
            Language::Cxx,
            ProbeMode::Compile,
            MPI1_SOURCE,
        )
    } else {
        Probe::new(
            "mpi",
            "Checking for MPI-2 one-sided communication...",
            Language::Cxx,
            ProbeMode::Compile,
            MPI2_SOURCE,
        )
        .with_feature(HAVE_MPI2)
    }
}

/// TBB with `TBB_VERSION_MAJOR >= floor.major`.
pub fn tbb_probe(floor: VersionFloor) -> Probe {
    let source = format!(
        r#"#include <tbb/tbb_stddef.h>

#if TBB_VERSION_MAJOR < {}
#error Installed TBB is too old!
#endif
int main()
{{
    return 0;
}}
"#,
        floor.major
    );
    Probe::new(
        "tbb",
        &format!("Checking for TBB version >= {}.0...", floor.major),
        Language::Cxx,
        ProbeMode::Link,
        &source,
    )
    .with_feature(HAVE_TBB)
    .gating("tbb")
}

/// Boost with `BOOST_VERSION >= floor`.
pub fn boost_probe(floor: VersionFloor) -> Probe {
    let source = format!(
        r#"#include <boost/version.hpp>

#if BOOST_VERSION < {}
#error Installed boost is too old!
#endif
int main()
{{
    return 0;
}}
"#,
        floor.encoded()
    );
    Probe::new(
        "boost",
        &format!("Checking for Boost version >= {}...", floor),
        Language::Cxx,
        ProbeMode::Compile,
        &source,
    )
    .with_feature(HAVE_BOOST)
    .gating("boost")
}

/// A CBLAS implementation providing `cblas_ddot`.
pub fn cblas_probe() -> Probe {
    Probe::new(
        "cblas",
        "Checking CBLAS...",
        Language::C,
        ProbeMode::Link,
        CBLAS_SOURCE,
    )
    .with_feature(HAVE_CBLAS)
    .gating("cblas")
}
