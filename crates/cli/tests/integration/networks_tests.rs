//! Networks command integration tests.

use predicates::prelude::*;

use super::common::TestEnv;

#[test]
fn lists_networks_with_size_limits() {
  let env = TestEnv::from_fixture("multi_network.json");

  env
    .solconf_cmd()
    .arg("networks")
    .assert()
    .success()
    .stdout(predicate::str::contains("* hardhat"))
    .stdout(predicate::str::contains("sepolia"))
    .stdout(predicate::str::contains("https://rpc.sepolia.example"))
    .stdout(predicate::str::contains("24576 bytes"));
}

#[test]
fn unlimited_contract_size_is_shown() {
  let env = TestEnv::from_fixture("reference.lua");

  env
    .solconf_cmd()
    .arg("networks")
    .assert()
    .success()
    .stdout(predicate::str::contains("unlimited"));
}

#[test]
fn network_flag_moves_default_marker() {
  let env = TestEnv::from_fixture("multi_network.json");

  env
    .solconf_cmd()
    .args(["--network", "sepolia", "networks"])
    .assert()
    .success()
    .stdout(predicate::str::contains("* sepolia"));
}
