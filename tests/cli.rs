//! CLI integration tests for the bundler binary.

use std::fs;
use std::process::Command;

use assert_cmd::prelude::*;
use predicates::prelude::*;
use tempfile::TempDir;

/// Get the bundler binary command.
fn bundler() -> Command {
    let mut cmd = Command::cargo_bin("invest_bundler").unwrap();
    cmd.env_remove("INVEST_ANALYZER").env_remove("RUST_LOG");
    cmd
}

/// Creates `invest/exe/cli.py` with an empty hooks directory.
fn project() -> TempDir {
    let tmp = TempDir::new().unwrap();
    let exe = tmp.path().join("invest/exe");
    fs::create_dir_all(exe.join("hooks")).unwrap();
    fs::write(exe.join("cli.py"), "print('invest')\n").unwrap();
    tmp
}

#[test]
fn test_missing_entry_script_fails() {
    let tmp = project();

    bundler()
        .arg("exe/missing.py")
        .current_dir(tmp.path().join("invest"))
        .assert()
        .failure()
        .code(1)
        .stderr(predicate::str::contains("missing entry script"));

    assert!(!tmp.path().join("invest/dist").exists());
}

#[test]
fn test_missing_hooks_dir_fails() {
    let tmp = project();

    bundler()
        .args(["exe/cli.py", "--hooks-dir", "exe/nowhere"])
        .current_dir(tmp.path().join("invest"))
        .assert()
        .failure()
        .stderr(predicate::str::contains("missing hooks directory"));
}

#[test]
fn test_rejects_unknown_platform() {
    let tmp = project();

    bundler()
        .args(["exe/cli.py", "--platform", "amiga"])
        .current_dir(tmp.path().join("invest"))
        .assert()
        .failure();
}

#[test]
fn test_missing_explicit_config_fails() {
    let tmp = project();

    bundler()
        .args(["exe/cli.py", "--config", "nope.toml"])
        .current_dir(tmp.path().join("invest"))
        .assert()
        .failure()
        .stderr(predicate::str::contains("Configuration file not found"));
}

#[cfg(unix)]
#[test]
fn test_bundles_with_external_analyzer() {
    let tmp = project();
    let project_dir = tmp.path().join("invest");
    let script = project_dir.join("exe/cli.py");

    let analyzer = tmp.path().join("analyzer.sh");
    fs::write(
        &analyzer,
        format!(
            "cat > /dev/null\nprintf '%s' '{{\"scripts\":[{{\"name\":\"cli\",\"source\":\"{}\",\"kind\":\"PYSOURCE\"}}]}}'\n",
            script.display()
        ),
    )
    .unwrap();

    bundler()
        .arg("exe/cli.py")
        .args(["--platform", "linux", "--interpreter", "/nonexistent/python"])
        .args(["--analyzer", "/bin/sh", "--analyzer-arg"])
        .arg(&analyzer)
        .current_dir(&project_dir)
        .assert()
        .success()
        .stdout(predicate::str::contains("Extra search paths: none"));

    let dist = project_dir.join("dist/invest_dist");
    assert!(dist.join("invest").is_file());
    assert!(project_dir.join("build/invest.pyz").is_file());
}

#[cfg(unix)]
#[test]
fn test_failing_analyzer_reports_stderr() {
    let tmp = project();
    let project_dir = tmp.path().join("invest");

    let analyzer = tmp.path().join("analyzer.sh");
    fs::write(
        &analyzer,
        "cat > /dev/null\necho 'ImportError: No module named rtree' >&2\nexit 3\n",
    )
    .unwrap();

    bundler()
        .arg("exe/cli.py")
        .args(["--platform", "linux", "--interpreter", "/nonexistent/python"])
        .args(["--analyzer", "/bin/sh", "--analyzer-arg"])
        .arg(&analyzer)
        .current_dir(&project_dir)
        .assert()
        .failure()
        .stderr(predicate::str::contains("No module named rtree"));

    assert!(!project_dir.join("dist/invest_dist").exists());
}
