//! Feature probes.
//!
//! A [`Probe`] is a minimal source file that compiles (or links) only when a
//! capability is present. [`run_probe`] builds it in a scratch directory
//! through the [`Compiler`] seam and reports a [`ProbeResult`]; a build
//! failure is the expected "not available" answer, never an error.
//!
//! - [`definition`] - probe and result types
//! - [`catalogue`] - the built-in MPI, TBB, Boost and CBLAS probes
//! - [`compiler`] - command lines per toolset and the process-backed compiler
//! - [`runner`] - scratch directory handling and result construction

pub mod catalogue;
pub mod compiler;
pub mod definition;
pub mod runner;

pub use catalogue::{
    boost_probe, cblas_probe, mpi_probe, tbb_probe, HAVE_BOOST, HAVE_CBLAS, HAVE_MPI2, HAVE_TBB,
};
pub use compiler::{build_invocation, CompileOutcome, Compiler, Invocation, ProcessCompiler};
pub use definition::{Language, Probe, ProbeMode, ProbeResult};
pub use runner::run_probe;
