//! Building and rendering `bsp_config.h`.

use std::path::PathBuf;

use sha2::{Digest, Sha256};

use crate::bindings::mpi::{HAVE_MPI, NO_MPI};
use crate::bindings::Bindings;
use crate::environment::EnvironmentDescriptor;
use crate::probe::ProbeResult;

use super::set::{ConfigurationSet, Definition, Section};

/// Include guard of the generated header.
pub const INCLUDE_GUARD: &str = "__BSPCONFIG_H__";

/// Macro selecting the unit-test harness instead of a runtime.
pub const UNITTESTING: &str = "UNITTESTING";

const TEST_HEADER: &str = "\"../tests/bsp_test.h\"";

const PREAMBLE: &str = "/*
 * This file is generated automatically by bspconf and will be overwritten
 * whenever BSPonMPI is configured.
 */";

const DISTRIBUTED_RUNTIME: [(&str, &str); 5] = [
    ("_BSP_INIT", "BSP_INIT_MPI"),
    ("_BSP_EXIT", "BSP_EXIT_MPI"),
    ("_BSP_ABORT", "BSP_ABORT_MPI"),
    ("_BSP_COMM0", "BSP_MPI_ALLTOALL_COMM"),
    ("_BSP_COMM1", "BSP_MPI_ALLTOALLV_COMM"),
];

const SEQUENTIAL_RUNTIME: [(&str, &str); 5] = [
    ("_BSP_INIT", "BSP_INIT_SEQ"),
    ("_BSP_EXIT", "BSP_EXIT_SEQ"),
    ("_BSP_ABORT", "BSP_ABORT_SEQ"),
    ("_BSP_COMM0", "BSP_SEQ_ALLTOALL_COMM"),
    ("_BSP_COMM1", "BSP_SEQ_ALLTOALLV_COMM"),
];

/// A rendered header ready to be written.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Artifact {
    pub path: PathBuf,
    pub contents: String,
    /// Hex SHA-256 of `contents`.
    pub digest: String,
}

impl Artifact {
    pub fn new(path: PathBuf, contents: String) -> Self {
        let digest = fingerprint(contents.as_bytes());
        Self {
            path,
            contents,
            digest,
        }
    }
}

/// Hex SHA-256 of `bytes`.
pub fn fingerprint(bytes: &[u8]) -> String {
    hex::encode(Sha256::digest(bytes))
}

/// Collect every definition implied by the environment, the resolved
/// bindings and the probe results.
///
/// The runtime mode follows the environment's `sequential` option. The
/// bindings, when given, must agree with it.
pub fn build_configuration(
    results: &[ProbeResult],
    bindings: &Bindings,
    env: &EnvironmentDescriptor,
) -> ConfigurationSet {
    let distributed = !env.options().sequential;
    debug_assert!(
        bindings.is_empty() || bindings.defines(HAVE_MPI) == distributed,
        "bindings disagree with sequential = {}",
        env.options().sequential
    );

    let mut set = ConfigurationSet::new();
    platform_section(&mut set, env);
    calling_convention_section(&mut set, env);
    mode_section(&mut set, distributed);
    diagnostics_section(&mut set);

    for result in results.iter().filter(|r| r.is_passed()) {
        if let Some(feature) = result.feature() {
            set.define(Section::Features, feature);
        }
    }
    set
}

fn platform_section(set: &mut ConfigurationSet, env: &EnvironmentDescriptor) {
    set.set(Section::Platform, "__cdecl", Definition::fallback("__cdecl", None));
    set.set(
        Section::Platform,
        "_SCL_SECURE_NO_WARNINGS",
        Definition::if_defined(
            "_MSC_VER",
            vec![Definition::define("_SCL_SECURE_NO_WARNINGS")],
            Vec::new(),
        ),
    );
    if env.arch().is_x86_64() {
        set.define(Section::Platform, "_X86_64");
    }
    if env.is_windows() {
        set.set(
            Section::Platform,
            "inline",
            Definition::if_not_defined("__cplusplus", vec![Definition::define("inline")]),
        );
        set.define_as(Section::Platform, "__func__", "__FUNCTION__");
    }
}

fn calling_convention_section(set: &mut ConfigurationSet, env: &EnvironmentDescriptor) {
    if env.is_windows() {
        set.define_as(Section::CallingConvention, "BSP_CALLING", "__cdecl");
    } else {
        set.define(Section::CallingConvention, "BSP_CALLING");
    }
    set.define(Section::CallingConvention, "RESTRICT");
}

fn mode_section(set: &mut ConfigurationSet, distributed: bool) {
    let mut runtime = Vec::new();
    let table = if distributed {
        runtime.push(Definition::fallback(HAVE_MPI, None));
        runtime.push(Definition::include("<mpi.h>"));
        &DISTRIBUTED_RUNTIME
    } else {
        runtime.push(Definition::fallback(NO_MPI, None));
        &SEQUENTIAL_RUNTIME
    };
    runtime.extend(table.iter().map(|(name, value)| Definition::define_as(name, value)));

    set.set(
        Section::Mode,
        "runtime",
        Definition::if_defined(
            UNITTESTING,
            vec![Definition::include(TEST_HEADER)],
            runtime,
        ),
    );
}

fn diagnostics_section(set: &mut ConfigurationSet) {
    set.set(
        Section::Diagnostics,
        "ASSERT",
        Definition::if_defined(
            "_DEBUG",
            vec![
                Definition::include("<assert.h>"),
                Definition::define_as("ASSERT", "assert"),
            ],
            vec![Definition::define("ASSERT(x)")],
        ),
    );
}

/// Render `set` as header text.
pub fn render(set: &ConfigurationSet, env: &EnvironmentDescriptor) -> String {
    let mut lines = vec![
        PREAMBLE.to_string(),
        format!("/* Configured for {} ({}) */", env.label(), env.toolset().name()),
        String::new(),
        format!("#ifndef {}", INCLUDE_GUARD),
        format!("#define {}", INCLUDE_GUARD),
    ];

    for section in Section::ALL {
        let mut body = Vec::new();
        for (_, definition) in set.section(section) {
            definition.render(&mut body);
        }
        if body.is_empty() {
            continue;
        }
        lines.push(String::new());
        lines.push(format!("/* {} */", section.title()));
        lines.extend(body);
    }

    lines.push(String::new());
    lines.push(format!("#endif /* {} */", INCLUDE_GUARD));

    let mut text = lines.join("\n");
    text.push('\n');
    text
}

/// Render the header for one configuration run.
///
/// The result depends only on its inputs; rendering the same results,
/// bindings and environment twice yields byte-identical artifacts.
pub fn emit_configuration(
    results: &[ProbeResult],
    bindings: &Bindings,
    env: &EnvironmentDescriptor,
) -> Artifact {
    let set = build_configuration(results, bindings, env);
    Artifact::new(env.options().output.clone(), render(&set, env))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::bindings::LibraryBinding;
    use crate::config::BuildOptions;
    use crate::environment::{Arch, Platform};
    use crate::probe::{cblas_probe, mpi_probe, HAVE_CBLAS, HAVE_MPI2};

    fn env(platform: Platform, arch: Arch) -> EnvironmentDescriptor {
        EnvironmentDescriptor::new(platform, arch, BuildOptions::default()).unwrap()
    }

    fn linux() -> EnvironmentDescriptor {
        env(Platform::Linux, Arch::X86_64)
    }

    fn sequential_linux() -> EnvironmentDescriptor {
        let options = BuildOptions {
            sequential: true,
            ..Default::default()
        };
        EnvironmentDescriptor::new(Platform::Linux, Arch::X86_64, options).unwrap()
    }

    fn distributed() -> Bindings {
        let mut bindings = Bindings::new();
        bindings.insert("mpi", LibraryBinding::new().define(HAVE_MPI));
        bindings
    }

    fn sequential() -> Bindings {
        let mut bindings = Bindings::new();
        bindings.insert("mpi", LibraryBinding::new().define(NO_MPI));
        bindings
    }

    fn count(text: &str, line: &str) -> usize {
        text.lines()
            .filter(|l| *l == line || l.starts_with(&format!("{} ", line)))
            .count()
    }

    #[test]
    fn one_calling_convention_and_restrict_per_platform() {
        let platforms = [Platform::Linux, Platform::Darwin, Platform::Windows];
        let arches = [Arch::X86_64, Arch::X86, Arch::Aarch64];
        for platform in &platforms {
            for arch in &arches {
                let env = env(platform.clone(), arch.clone());
                let set = build_configuration(&[], &distributed(), &env);
                assert_eq!(set.count_defines("BSP_CALLING"), 1, "{}", env.label());
                assert_eq!(set.count_defines("RESTRICT"), 1, "{}", env.label());

                let text = render(&set, &env);
                assert_eq!(count(&text, "#define BSP_CALLING"), 1);
                assert_eq!(count(&text, "#define RESTRICT"), 1);
            }
        }
    }

    #[test]
    fn windows_uses_cdecl_calling_convention() {
        let windows = env(Platform::Windows, Arch::X86_64);
        let text = emit_configuration(&[], &distributed(), &windows).contents;
        assert!(text.contains("#define BSP_CALLING __cdecl\n"));
        assert!(text.contains("#define __func__ __FUNCTION__\n"));
        assert!(text.contains("#ifndef __cplusplus\n#define inline\n#endif\n"));

        let text = emit_configuration(&[], &distributed(), &linux()).contents;
        assert!(text.contains("#define BSP_CALLING\n"));
        assert!(!text.contains("__FUNCTION__"));
    }

    #[test]
    fn x86_64_marker_only_on_64_bit_x86() {
        let x64 = emit_configuration(&[], &distributed(), &linux()).contents;
        assert!(x64.contains("#define _X86_64\n"));

        let aarch64 = env(Platform::Linux, Arch::Aarch64);
        let arm = emit_configuration(&[], &distributed(), &aarch64).contents;
        assert!(!arm.contains("_X86_64"));
    }

    #[test]
    fn distributed_and_sequential_blocks_are_exclusive() {
        let mpi = emit_configuration(&[], &distributed(), &linux()).contents;
        assert!(mpi.contains("#define _HAVE_MPI\n"));
        assert!(mpi.contains("#include <mpi.h>\n"));
        assert!(mpi.contains("#define _BSP_INIT BSP_INIT_MPI\n"));
        assert!(mpi.contains("#define _BSP_COMM1 BSP_MPI_ALLTOALLV_COMM\n"));
        assert!(!mpi.contains("_NO_MPI"));
        assert!(!mpi.contains("_SEQ"));

        let seq = emit_configuration(&[], &sequential(), &sequential_linux()).contents;
        assert!(seq.contains("#define _NO_MPI\n"));
        assert!(seq.contains("#define _BSP_INIT BSP_INIT_SEQ\n"));
        assert!(seq.contains("#define _BSP_COMM0 BSP_SEQ_ALLTOALL_COMM\n"));
        assert!(!seq.contains("_HAVE_MPI"));
        assert!(!seq.contains("mpi.h"));
        assert!(!seq.contains("_MPI_"));
    }

    #[test]
    fn mode_follows_the_environment_without_bindings() {
        let mpi = emit_configuration(&[], &Bindings::new(), &linux()).contents;
        assert!(mpi.contains("#define _BSP_INIT BSP_INIT_MPI\n"));
        assert!(!mpi.contains("_SEQ"));

        let seq = emit_configuration(&[], &Bindings::new(), &sequential_linux()).contents;
        assert!(seq.contains("#define _BSP_INIT BSP_INIT_SEQ\n"));
        assert!(!seq.contains("_HAVE_MPI"));
    }

    #[test]
    #[cfg(debug_assertions)]
    #[should_panic(expected = "bindings disagree")]
    fn contradicting_bindings_are_rejected() {
        emit_configuration(&[], &sequential(), &linux());
    }

    #[test]
    fn runtime_sits_behind_unit_test_switch() {
        let text = emit_configuration(&[], &sequential(), &sequential_linux()).contents;
        assert!(text.contains("#ifdef UNITTESTING\n#include \"../tests/bsp_test.h\"\n#else\n"));
    }

    #[test]
    fn assert_macro_follows_debug() {
        let text = emit_configuration(&[], &sequential(), &sequential_linux()).contents;
        assert!(text.contains(concat!(
            "#ifdef _DEBUG\n#include <assert.h>\n#define ASSERT assert\n",
            "#else\n#define ASSERT(x)\n#endif\n"
        )));
    }

    #[test]
    fn sections_appear_in_fixed_order() {
        let results = vec![ProbeResult::passed(&cblas_probe())];
        let text = emit_configuration(&results, &distributed(), &linux()).contents;

        let positions: Vec<usize> = [
            "#ifndef __BSPCONFIG_H__",
            "/* Platform */",
            "/* Calling convention */",
            "/* Runtime mode */",
            "/* Diagnostics */",
            "/* Detected features */",
            "#endif /* __BSPCONFIG_H__ */",
        ]
        .iter()
        .map(|marker| text.find(marker).unwrap())
        .collect();
        assert!(positions.windows(2).all(|w| w[0] < w[1]));
        assert!(text.ends_with("#endif /* __BSPCONFIG_H__ */\n"));
    }

    #[test]
    fn failing_probe_drops_only_its_feature() {
        let results = vec![
            ProbeResult::passed(&mpi_probe(2)),
            ProbeResult::failed(&cblas_probe(), "cblas.h: No such file or directory"),
        ];
        let text = emit_configuration(&results, &distributed(), &linux()).contents;
        assert!(text.contains(&format!("#define {}\n", HAVE_MPI2)));
        assert!(!text.contains(HAVE_CBLAS));
    }

    #[test]
    fn features_follow_probe_order() {
        let results = vec![
            ProbeResult::passed(&mpi_probe(2)),
            ProbeResult::passed(&cblas_probe()),
        ];
        let text = emit_configuration(&results, &distributed(), &linux()).contents;
        assert!(text.find(HAVE_MPI2).unwrap() < text.find(HAVE_CBLAS).unwrap());
    }

    #[test]
    fn identical_inputs_render_identical_bytes() {
        let results = vec![ProbeResult::passed(&mpi_probe(2))];
        let env = linux();
        let first = emit_configuration(&results, &distributed(), &env);
        let second = emit_configuration(&results, &distributed(), &env);
        assert_eq!(first, second);
        assert_eq!(first.digest, fingerprint(second.contents.as_bytes()));
        assert_eq!(first.path, PathBuf::from("include/bsp_config.h"));
    }
}
