//! Integration tests for the bspconf binary.
// The cargo_bin function is marked deprecated in favor of cargo_bin! macro,
// but both work correctly. Suppressing until assert_cmd stabilizes the new API.
#![allow(deprecated)]

use assert_cmd::cargo::cargo_bin;
use assert_cmd::Command;
use predicates::prelude::*;
use std::fs;
use std::path::Path;
use tempfile::TempDir;

const MISSING: &str = "/nonexistent/bspconf-test-compiler";

/// A command rooted at `project` whose compilers can never be spawned.
fn bspconf(project: &Path) -> Command {
    let mut cmd = Command::new(cargo_bin("bspconf"));
    cmd.current_dir(project)
        .arg("--project")
        .arg(project)
        .args(["--toolset", "gnu"])
        .args(["--cc", MISSING, "--cxx", MISSING])
        .args(["--mpicc", MISSING, "--mpicxx", MISSING, "--mpilink", MISSING])
        .env("NO_COLOR", "1");
    cmd
}

#[test]
fn cli_shows_help() -> Result<(), Box<dyn std::error::Error>> {
    let mut cmd = Command::new(cargo_bin("bspconf"));
    cmd.arg("--help");
    cmd.assert()
        .success()
        .stdout(predicate::str::contains("BSPonMPI"))
        .stdout(predicate::str::contains("configure"));
    Ok(())
}

#[test]
fn cli_shows_version() -> Result<(), Box<dyn std::error::Error>> {
    let mut cmd = Command::new(cargo_bin("bspconf"));
    cmd.arg("--version");
    cmd.assert()
        .success()
        .stdout(predicate::str::contains(env!("CARGO_PKG_VERSION")));
    Ok(())
}

#[test]
fn configure_writes_header_when_probes_fail() -> Result<(), Box<dyn std::error::Error>> {
    let temp = TempDir::new()?;
    bspconf(temp.path()).arg("configure").assert().success();

    let header = fs::read_to_string(temp.path().join("include/bsp_config.h"))?;
    assert!(header.contains("#ifndef __BSPCONFIG_H__"));
    assert!(header.contains("#define BSP_CALLING"));
    assert!(header.contains("#define _HAVE_MPI\n"));
    assert!(!header.contains("_HAVE_MPI2"));
    assert!(!header.contains("_HAVE_CBLAS"));
    let leftovers: Vec<_> = fs::read_dir(temp.path().join("include"))?
        .filter_map(|entry| entry.ok())
        .filter(|entry| entry.file_name().to_string_lossy().ends_with(".tmp"))
        .collect();
    assert!(leftovers.is_empty());
    Ok(())
}

#[test]
fn leftover_lock_file_does_not_block_configure() -> Result<(), Box<dyn std::error::Error>> {
    let temp = TempDir::new()?;
    fs::create_dir_all(temp.path().join("include"))?;
    fs::write(temp.path().join("include/bsp_config.h.lock"), "")?;

    bspconf(temp.path()).arg("configure").assert().success();
    assert!(temp.path().join("include/bsp_config.h").exists());
    Ok(())
}

#[test]
fn switches_accept_an_explicit_false() -> Result<(), Box<dyn std::error::Error>> {
    let temp = TempDir::new()?;
    fs::write(temp.path().join("bspconf.yml"), "sequential: true\n")?;

    bspconf(temp.path())
        .args(["--sequential=false", "configure"])
        .assert()
        .success();
    let header = fs::read_to_string(temp.path().join("include/bsp_config.h"))?;
    assert!(header.contains("#define _HAVE_MPI\n"));
    assert!(!header.contains("_NO_MPI"));
    Ok(())
}

#[test]
fn silent_configure_prints_nothing() -> Result<(), Box<dyn std::error::Error>> {
    let temp = TempDir::new()?;
    bspconf(temp.path())
        .args(["--silent", "configure"])
        .assert()
        .success()
        .stdout(predicate::str::is_empty());
    assert!(temp.path().join("include/bsp_config.h").exists());
    Ok(())
}

#[test]
fn default_command_is_configure() -> Result<(), Box<dyn std::error::Error>> {
    let temp = TempDir::new()?;
    bspconf(temp.path()).assert().success();
    assert!(temp.path().join("include/bsp_config.h").exists());
    Ok(())
}

#[test]
fn second_run_reports_up_to_date() -> Result<(), Box<dyn std::error::Error>> {
    let temp = TempDir::new()?;
    bspconf(temp.path()).arg("configure").assert().success();
    bspconf(temp.path())
        .arg("configure")
        .assert()
        .success()
        .stdout(predicate::str::contains("is up to date"));
    Ok(())
}

#[test]
fn sequential_from_options_file() -> Result<(), Box<dyn std::error::Error>> {
    let temp = TempDir::new()?;
    fs::write(temp.path().join("bspconf.yml"), "sequential: true\n")?;
    bspconf(temp.path()).arg("configure").assert().success();

    let header = fs::read_to_string(temp.path().join("include/bsp_config.h"))?;
    assert!(header.contains("#define _NO_MPI\n"));
    assert!(!header.contains("_HAVE_MPI"));
    Ok(())
}

#[test]
fn output_override_moves_header() -> Result<(), Box<dyn std::error::Error>> {
    let temp = TempDir::new()?;
    bspconf(temp.path())
        .args(["configure", "--output", "gen/config.h"])
        .assert()
        .success();
    assert!(temp.path().join("gen/config.h").exists());
    assert!(!temp.path().join("include").exists());
    Ok(())
}

#[test]
fn dry_run_prints_header() -> Result<(), Box<dyn std::error::Error>> {
    let temp = TempDir::new()?;
    bspconf(temp.path())
        .args(["configure", "--dry-run"])
        .assert()
        .success()
        .stdout(predicate::str::contains("#endif /* __BSPCONFIG_H__ */"));
    assert!(!temp.path().join("include").exists());
    Ok(())
}

#[test]
fn unknown_cblas_fails_before_writing() -> Result<(), Box<dyn std::error::Error>> {
    let temp = TempDir::new()?;
    bspconf(temp.path())
        .args(["configure", "--cblas", "mkl"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Unrecognized value 'mkl' for option 'cblas'"));
    assert!(!temp.path().join("include/bsp_config.h").exists());
    Ok(())
}

#[test]
fn flags_json_lists_cblas_binding() -> Result<(), Box<dyn std::error::Error>> {
    let temp = TempDir::new()?;
    bspconf(temp.path())
        .args(["flags", "--json", "--cblas", "openblas"])
        .assert()
        .success()
        .stdout(predicate::str::contains("\"name\": \"cblas\""))
        .stdout(predicate::str::contains("-lopenblas"));
    Ok(())
}

#[test]
fn flags_text_names_the_wrappers() -> Result<(), Box<dyn std::error::Error>> {
    let temp = TempDir::new()?;
    bspconf(temp.path())
        .arg("flags")
        .assert()
        .success()
        .stdout(predicate::str::contains(format!("CC={}", MISSING)));
    Ok(())
}

#[test]
fn strict_check_fails_when_probes_fail() -> Result<(), Box<dyn std::error::Error>> {
    let temp = TempDir::new()?;
    bspconf(temp.path())
        .args(["check", "--strict"])
        .assert()
        .code(1)
        .stdout(predicate::str::contains("0 of 1 probes passed"));
    Ok(())
}

#[test]
fn missing_options_file_exits_two() -> Result<(), Box<dyn std::error::Error>> {
    let temp = TempDir::new()?;
    bspconf(temp.path())
        .args(["configure", "--config", "absent.yml"])
        .assert()
        .code(2);
    Ok(())
}

#[test]
fn completions_for_bash() -> Result<(), Box<dyn std::error::Error>> {
    let mut cmd = Command::new(cargo_bin("bspconf"));
    cmd.args(["completions", "bash"]);
    cmd.assert()
        .success()
        .stdout(predicate::str::contains("bspconf"));
    Ok(())
}
