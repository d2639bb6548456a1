//! Compiler selection integration tests.

use predicates::prelude::*;

use super::common::TestEnv;

#[test]
fn picks_highest_matching_compiler() {
  let env = TestEnv::from_fixture("reference.lua");
  env.write_file("contracts/Token.sol", "// SPDX-License-Identifier: MIT\npragma solidity ^0.8.0;\n");

  env
    .solconf_cmd()
    .args(["compiler", "contracts/Token.sol"])
    .assert()
    .success()
    .stdout(predicate::str::starts_with("0.8.20"));
}

#[test]
fn picks_legacy_compiler_for_old_pragma() {
  let env = TestEnv::from_fixture("reference.lua");
  env.write_file("contracts/Pair.sol", "pragma solidity =0.6.6;\n");

  env
    .solconf_cmd()
    .args(["compiler", "contracts/Pair.sol"])
    .assert()
    .success()
    .stdout(predicate::str::starts_with("0.6.6"));
}

#[test]
fn override_wins_for_pinned_source() {
  let env = TestEnv::from_fixture("multi_network.json");
  env.write_file("contracts/Pinned.sol", "pragma solidity ^0.8.0;\n");

  env
    .solconf_cmd()
    .args(["compiler", "contracts/Pinned.sol"])
    .assert()
    .success()
    .stdout(predicate::str::contains("0.8.13 (optimizer: 1000 runs)"));
}

#[test]
fn no_matching_compiler_fails() {
  let env = TestEnv::from_fixture("reference.lua");
  env.write_file("contracts/Future.sol", "pragma solidity ^0.9.0;\n");

  env
    .solconf_cmd()
    .args(["compiler", "contracts/Future.sol"])
    .assert()
    .failure()
    .stderr(predicate::str::contains("no declared compiler satisfies"));
}
