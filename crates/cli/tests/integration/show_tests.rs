//! Show command integration tests.

use predicates::prelude::*;

use super::common::TestEnv;

#[test]
fn show_json_exposes_reference_values() {
  let env = TestEnv::from_fixture("reference.lua");

  let output = env.solconf_cmd().args(["show", "--format", "json"]).output().unwrap();
  assert!(output.status.success());

  let value: serde_json::Value = serde_json::from_slice(&output.stdout).unwrap();
  let compilers = value["solidity"]["compilers"].as_array().unwrap();
  let versions: Vec<_> = compilers.iter().map(|c| c["version"].as_str().unwrap()).collect();
  assert_eq!(versions, ["0.8.20", "0.8.13", "0.8.9", "0.6.6", "0.5.16"]);
  for compiler in compilers {
    assert_eq!(compiler["settings"]["optimizer"]["enabled"], true);
    assert_eq!(compiler["settings"]["optimizer"]["runs"], 200);
  }
  assert_eq!(value["networks"]["hardhat"]["chainId"], 11155111);
  assert_eq!(value["networks"]["hardhat"]["allowUnlimitedContractSize"], true);
  assert_eq!(value["mocha"]["timeout"], 100000000);
  assert_eq!(value["defaultNetwork"], "hardhat");
}

#[test]
fn show_text_lists_compilers_and_overrides() {
  let env = TestEnv::from_fixture("multi_network.json");

  env
    .solconf_cmd()
    .arg("show")
    .assert()
    .success()
    .stdout(predicate::str::contains("0.8.20 (optimizer: 200 runs)"))
    .stdout(predicate::str::contains("contracts/Pinned.sol"))
    .stdout(predicate::str::contains("deployer"));
}

#[test]
fn show_text_lists_network_details() {
  let env = TestEnv::from_fixture("multi_network.json");

  env
    .solconf_cmd()
    .arg("show")
    .assert()
    .success()
    .stdout(predicate::str::contains("sepolia (chainId 11155111)"))
    .stdout(predicate::str::contains("url: https://rpc.sepolia.example"))
    .stdout(predicate::str::contains("allowUnlimitedContractSize: false"));
}

#[test]
fn show_text_reports_unlimited_contract_size() {
  let env = TestEnv::from_fixture("reference.lua");

  env
    .solconf_cmd()
    .arg("show")
    .assert()
    .success()
    .stdout(predicate::str::contains("allowUnlimitedContractSize: true"));
}

#[test]
fn show_with_explicit_config_path() {
  let env = TestEnv::from_fixture("reference.json");
  let elsewhere = TestEnv::empty();

  elsewhere
    .solconf_cmd()
    .arg("-c")
    .arg(&env.config_path)
    .arg("show")
    .assert()
    .success()
    .stdout(predicate::str::contains("0.5.16"));
}
