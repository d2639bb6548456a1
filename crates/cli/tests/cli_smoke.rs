//! CLI smoke tests for solconf.
//!
//! These tests verify that all CLI commands run without panicking and
//! return appropriate exit codes.

use assert_cmd::Command;
use assert_cmd::cargo::cargo_bin_cmd;
use predicates::prelude::*;
use serial_test::serial;
use tempfile::TempDir;

/// Get a Command for the solconf binary.
fn solconf_cmd() -> Command {
  let mut cmd = cargo_bin_cmd!("solconf");
  cmd.env_remove("SOLCONF_NETWORK");
  cmd
}

/// Create a temp directory with a `solconf.lua`.
fn temp_config(content: &str) -> TempDir {
  let temp = TempDir::new().unwrap();
  std::fs::write(temp.path().join("solconf.lua"), content).unwrap();
  temp
}

/// Smallest valid config: one compiler, the built-in network.
const MINIMAL_CONFIG: &str = r#"
return {
  solidity = "0.8.20",
}
"#;

/// Config declared entirely through the `solconf` global.
const DECLARATIVE_CONFIG: &str = r#"
solconf.compiler("0.8.20")
solconf.compiler({ version = "0.6.6", settings = { optimizer = { enabled = true, runs = 200 } } })
solconf.network("hardhat", { chainId = 11155111, allowUnlimitedContractSize = true })
"#;

// =============================================================================
// Help & Version
// =============================================================================

#[test]
fn help_flag_works() {
  solconf_cmd()
    .arg("--help")
    .assert()
    .success()
    .stdout(predicate::str::contains("Usage"));
}

#[test]
fn version_flag_works() {
  solconf_cmd()
    .arg("--version")
    .assert()
    .success()
    .stdout(predicate::str::contains("solconf"));
}

#[test]
fn subcommand_help_works() {
  for cmd in &["check", "show", "compiler", "networks", "init", "info"] {
    solconf_cmd()
      .arg(cmd)
      .arg("--help")
      .assert()
      .success()
      .stdout(predicate::str::contains("Usage"));
  }
}

#[test]
fn unknown_subcommand_fails() {
  solconf_cmd().arg("deploy").assert().failure();
}

// =============================================================================
// init
// =============================================================================

#[test]
fn init_creates_config_files() {
  let temp = TempDir::new().unwrap();
  let project = temp.path().join("project");

  solconf_cmd().arg("init").arg(&project).assert().success();

  assert!(project.join("solconf.lua").exists());
  assert!(project.join(".luarc.json").exists());
  assert!(project.join(".solconf").join("solconf.d.lua").exists());
}

#[test]
fn init_json_creates_json_config() {
  let temp = TempDir::new().unwrap();

  solconf_cmd().arg("init").arg(temp.path()).arg("--json").assert().success();

  assert!(temp.path().join("solconf.json").exists());
  assert!(!temp.path().join(".luarc.json").exists());
}

#[test]
fn init_fails_if_config_exists() {
  let temp = temp_config(MINIMAL_CONFIG);

  solconf_cmd()
    .arg("init")
    .arg(temp.path())
    .assert()
    .failure()
    .stderr(predicate::str::contains("already exists"));
}

#[test]
fn init_then_check_succeeds() {
  let temp = TempDir::new().unwrap();

  solconf_cmd().arg("init").arg(temp.path()).assert().success();

  solconf_cmd()
    .current_dir(temp.path())
    .arg("check")
    .assert()
    .success()
    .stdout(predicate::str::contains("Compilers: 5"));
}

// =============================================================================
// check
// =============================================================================

#[test]
fn check_minimal_config() {
  let temp = temp_config(MINIMAL_CONFIG);

  solconf_cmd()
    .arg("-c")
    .arg(temp.path().join("solconf.lua"))
    .arg("check")
    .assert()
    .success()
    .stdout(predicate::str::contains("Compilers: 1"));
}

#[test]
fn check_declarative_config() {
  let temp = temp_config(DECLARATIVE_CONFIG);

  solconf_cmd()
    .current_dir(temp.path())
    .arg("check")
    .assert()
    .success()
    .stdout(predicate::str::contains("Compilers: 2"));
}

#[test]
fn check_nonexistent_config_fails() {
  solconf_cmd()
    .args(["-c", "/nonexistent/path/solconf.lua", "check"])
    .assert()
    .failure();
}

#[test]
fn check_unsupported_extension_fails() {
  let temp = TempDir::new().unwrap();
  let path = temp.path().join("solconf.toml");
  std::fs::write(&path, "").unwrap();

  solconf_cmd()
    .arg("-c")
    .arg(&path)
    .arg("check")
    .assert()
    .failure()
    .stderr(predicate::str::contains("unsupported config format"));
}

#[test]
#[serial]
fn verbose_logs_load_to_stderr() {
  let temp = temp_config(MINIMAL_CONFIG);

  solconf_cmd()
    .current_dir(temp.path())
    .args(["--verbose", "check"])
    .assert()
    .success()
    .stderr(predicate::str::contains("loaded configuration"));
}

// =============================================================================
// info
// =============================================================================

#[test]
fn info_reports_version_and_config() {
  let temp = temp_config(MINIMAL_CONFIG);

  solconf_cmd()
    .current_dir(temp.path())
    .arg("info")
    .assert()
    .success()
    .stdout(predicate::str::contains(env!("CARGO_PKG_VERSION")))
    .stdout(predicate::str::contains("solconf.lua"));
}

#[test]
fn info_without_config_succeeds() {
  let temp = TempDir::new().unwrap();

  solconf_cmd()
    .current_dir(temp.path())
    .arg("info")
    .assert()
    .success()
    .stdout(predicate::str::contains("not found"));
}
