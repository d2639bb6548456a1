//! The configuration template written by `init` is itself the reference
//! configuration, so loading it pins the documented values.

use std::path::PathBuf;

use semver::Version;
use serial_test::serial;
use solconf_lib::BuildConfig;
use solconf_lib::consts::NETWORK_ENV_VAR;
use solconf_lib::eval::{LoadOptions, load_config, load_config_with};

fn template_path() -> PathBuf {
  PathBuf::from(env!("CARGO_MANIFEST_DIR")).join("../../lua/template.lua")
}

/// Load the template with `SOLCONF_NETWORK` cleared.
fn load_template() -> BuildConfig {
  temp_env::with_var_unset(NETWORK_ENV_VAR, || load_config(&template_path())).unwrap()
}

#[test]
#[serial]
fn template_exposes_reference_compilers() {
  let config = load_template();

  let versions: Vec<_> = config.compilers().iter().map(|c| c.version().clone()).collect();
  let expected: Vec<_> = ["0.8.20", "0.8.13", "0.8.9", "0.6.6", "0.5.16"]
    .iter()
    .map(|v| Version::parse(v).unwrap())
    .collect();
  assert_eq!(versions, expected);

  for compiler in config.compilers() {
    assert!(compiler.optimizer().enabled());
    assert_eq!(compiler.optimizer().runs(), 200);
  }
}

#[test]
#[serial]
fn template_exposes_reference_network_and_timeout() {
  let config = temp_env::with_var_unset(NETWORK_ENV_VAR, || {
    load_config_with(&template_path(), &LoadOptions { network: None })
  })
  .unwrap();

  assert_eq!(config.default_network(), "hardhat");
  let hardhat = config.network("hardhat").unwrap();
  assert_eq!(hardhat.chain_id(), 11155111);
  assert!(hardhat.allow_unlimited_contract_size());
  assert_eq!(hardhat.contract_size_limit(), None);
  assert_eq!(config.mocha().timeout(), 100000000);
}

#[test]
#[serial]
fn template_loads_identically_twice() {
  let first = load_template();
  let second = load_template();
  assert_eq!(first, second);
  assert_eq!(first.fingerprint().unwrap(), second.fingerprint().unwrap());
}
