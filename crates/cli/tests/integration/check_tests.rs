//! Check command integration tests.

use predicates::prelude::*;

use super::common::TestEnv;

#[test]
fn check_reference_lua_config() {
  let env = TestEnv::from_fixture("reference.lua");

  env
    .solconf_cmd()
    .arg("check")
    .assert()
    .success()
    .stdout(predicate::str::contains("is valid"))
    .stdout(predicate::str::contains("Compilers: 5"))
    .stdout(predicate::str::contains("Default network: hardhat"));
}

#[test]
fn check_reference_json_config() {
  let env = TestEnv::from_fixture("reference.json");

  env
    .solconf_cmd()
    .arg("check")
    .assert()
    .success()
    .stdout(predicate::str::contains("Compilers: 5"));
}

#[test]
fn lua_and_json_reference_share_fingerprint() {
  let lua = TestEnv::from_fixture("reference.lua");
  let json = TestEnv::from_fixture("reference.json");

  let fingerprint = |env: &TestEnv| {
    let output = env.solconf_cmd().arg("check").output().unwrap();
    let stdout = String::from_utf8(output.stdout).unwrap();
    stdout
      .lines()
      .find(|line| line.contains("Fingerprint"))
      .map(str::to_string)
      .unwrap()
  };

  assert_eq!(fingerprint(&lua), fingerprint(&json));
}

#[test]
fn check_rejects_duplicate_networks() {
  let env = TestEnv::from_fixture("duplicate_networks.json");

  env
    .solconf_cmd()
    .arg("check")
    .assert()
    .failure()
    .stderr(predicate::str::contains("networks.hardhat: declared more than once"));
}

#[test]
fn check_reports_every_bad_runs_value() {
  let env = TestEnv::from_fixture("zero_runs.lua");

  env
    .solconf_cmd()
    .arg("check")
    .assert()
    .failure()
    .stderr(predicate::str::contains("got 0"))
    .stderr(predicate::str::contains("got -5"))
    .stderr(predicate::str::contains("2 problem(s)"));
}

#[test]
fn check_reports_lua_syntax_error() {
  let env = TestEnv::from_fixture("syntax_error.lua");

  env
    .solconf_cmd()
    .arg("check")
    .assert()
    .failure()
    .stderr(predicate::str::contains("lua error"));
}

#[test]
fn check_with_unknown_network_fails() {
  let env = TestEnv::from_fixture("reference.json");

  env
    .solconf_cmd()
    .args(["--network", "mainnet", "check"])
    .assert()
    .failure()
    .stderr(predicate::str::contains("'mainnet' is not a declared network"));
}

#[test]
fn check_network_from_environment() {
  let env = TestEnv::from_fixture("multi_network.json");

  env
    .solconf_cmd()
    .env("SOLCONF_NETWORK", "sepolia")
    .arg("check")
    .assert()
    .success()
    .stdout(predicate::str::contains("Default network: sepolia"));
}

#[test]
fn check_without_config_fails() {
  let env = TestEnv::empty();

  env
    .solconf_cmd()
    .arg("check")
    .assert()
    .failure()
    .stderr(predicate::str::contains("No solconf.lua or solconf.json found"));
}

#[test]
fn check_discovers_config_from_subdirectory() {
  let env = TestEnv::from_fixture("reference.lua");
  let nested = env.temp.path().join("contracts").join("tokens");
  std::fs::create_dir_all(&nested).unwrap();

  env
    .solconf_cmd()
    .current_dir(&nested)
    .arg("check")
    .assert()
    .success()
    .stdout(predicate::str::contains("is valid"));
}
