//! Validated configuration types.
//!
//! A [`BuildConfig`] is the evaluated and checked form of a declared
//! configuration. It is only produced by [`validate`](super::validate), so every
//! value of this type already satisfies the configuration constraints. Fields
//! are crate-private and read through accessors; nothing outside the loader
//! can change a configuration once it exists.
//!
//! # Serialization
//!
//! Serializes with the external toolchain's camelCase key names, which makes
//! the JSON form directly consumable as the hand-off format:
//!
//! ```json
//! {
//!   "defaultNetwork": "hardhat",
//!   "solidity": {
//!     "compilers": [
//!       { "version": "0.8.20", "settings": { "optimizer": { "enabled": true, "runs": 200 } } }
//!     ],
//!     "overrides": {}
//!   },
//!   "networks": {
//!     "hardhat": { "chainId": 11155111, "allowUnlimitedContractSize": true }
//!   },
//!   "mocha": { "timeout": 100000000 }
//! }
//! ```

use std::collections::BTreeMap;
use std::fmt;
use std::time::Duration;

use semver::Version;
use serde::Serialize;
use thiserror::Error;

use crate::consts::{
  BUILTIN_CHAIN_ID, DEFAULT_ARTIFACTS_DIR, DEFAULT_CACHE_DIR, DEFAULT_OPTIMIZER_RUNS, DEFAULT_SOURCES_DIR,
  DEFAULT_TESTS_DIR, DEFAULT_TEST_TIMEOUT_MS, DEFAULT_TYPECHAIN_OUT_DIR, DEFAULT_TYPECHAIN_TARGET, MAX_CONTRACT_SIZE,
};
use crate::util::hash::{ConfigHash, HashError, Hashable};

/// The complete build configuration handed to the external toolchain.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct BuildConfig {
  pub(crate) default_network: String,
  pub(crate) solidity: SolidityConfig,
  pub(crate) networks: BTreeMap<String, NetworkSpec>,
  pub(crate) mocha: TestRunnerSettings,
  pub(crate) paths: ProjectPaths,
  pub(crate) named_accounts: BTreeMap<String, AccountRef>,
  pub(crate) typechain: TypechainSettings,
}

impl Hashable for BuildConfig {}

impl BuildConfig {
  /// Name of the network used when none is selected explicitly.
  pub fn default_network(&self) -> &str {
    &self.default_network
  }

  /// Settings of the default network.
  ///
  /// Always present: validation rejects a default that names no network.
  pub fn default_network_spec(&self) -> &NetworkSpec {
    &self.networks[&self.default_network]
  }

  /// Declared compilers in declaration order.
  pub fn compilers(&self) -> &[CompilerSpec] {
    &self.solidity.compilers
  }

  /// Compilers pinned to individual source paths.
  pub fn overrides(&self) -> &BTreeMap<String, CompilerSpec> {
    &self.solidity.overrides
  }

  pub fn solidity(&self) -> &SolidityConfig {
    &self.solidity
  }

  pub fn networks(&self) -> &BTreeMap<String, NetworkSpec> {
    &self.networks
  }

  pub fn network(&self, name: &str) -> Option<&NetworkSpec> {
    self.networks.get(name)
  }

  pub fn mocha(&self) -> &TestRunnerSettings {
    &self.mocha
  }

  /// Test runner timeout as a duration.
  pub fn test_timeout(&self) -> Duration {
    Duration::from_millis(self.mocha.timeout)
  }

  pub fn paths(&self) -> &ProjectPaths {
    &self.paths
  }

  pub fn named_accounts(&self) -> &BTreeMap<String, AccountRef> {
    &self.named_accounts
  }

  pub fn typechain(&self) -> &TypechainSettings {
    &self.typechain
  }

  /// Stable fingerprint of the whole configuration.
  ///
  /// Equal configurations produce equal fingerprints; external tools use it
  /// to decide whether cached compiler output is still valid.
  pub fn fingerprint(&self) -> Result<ConfigHash, HashError> {
    self.compute_hash()
  }
}

/// Compiler selection for the project.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SolidityConfig {
  pub(crate) compilers: Vec<CompilerSpec>,
  pub(crate) overrides: BTreeMap<String, CompilerSpec>,
}

/// One external compiler invocation: a version and its settings.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CompilerSpec {
  pub(crate) version: Version,
  pub(crate) settings: CompilerSettings,
}

impl CompilerSpec {
  pub fn version(&self) -> &Version {
    &self.version
  }

  pub fn settings(&self) -> &CompilerSettings {
    &self.settings
  }

  pub fn optimizer(&self) -> &OptimizerSettings {
    &self.settings.optimizer
  }
}

impl fmt::Display for CompilerSpec {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    write!(f, "{}", self.version)?;
    if self.settings.optimizer.enabled {
      write!(f, " (optimizer: {} runs)", self.settings.optimizer.runs)?;
    } else {
      write!(f, " (optimizer: off)")?;
    }
    if let Some(evm) = &self.settings.evm_version {
      write!(f, " [evm: {}]", evm)?;
    }
    Ok(())
  }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CompilerSettings {
  pub(crate) optimizer: OptimizerSettings,
  #[serde(skip_serializing_if = "Option::is_none")]
  pub(crate) evm_version: Option<String>,
}

impl CompilerSettings {
  pub fn optimizer(&self) -> &OptimizerSettings {
    &self.optimizer
  }

  pub fn evm_version(&self) -> Option<&str> {
    self.evm_version.as_deref()
  }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct OptimizerSettings {
  pub(crate) enabled: bool,
  pub(crate) runs: u32,
}

impl OptimizerSettings {
  pub fn enabled(&self) -> bool {
    self.enabled
  }

  pub fn runs(&self) -> u32 {
    self.runs
  }
}

impl Default for OptimizerSettings {
  fn default() -> Self {
    Self {
      enabled: false,
      runs: DEFAULT_OPTIMIZER_RUNS,
    }
  }
}

/// Parameters of a target network.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct NetworkSpec {
  pub(crate) chain_id: u64,
  pub(crate) allow_unlimited_contract_size: bool,
  #[serde(skip_serializing_if = "Option::is_none")]
  pub(crate) url: Option<String>,
}

/// Deployed bytecode exceeds the network's size limit.
#[derive(Debug, Error, PartialEq, Eq)]
#[error("contract is {size} bytes, exceeding the {limit} byte limit")]
pub struct ContractSizeError {
  pub size: usize,
  pub limit: usize,
}

impl NetworkSpec {
  /// The in-process network used when a config does not declare one.
  pub(crate) fn builtin() -> Self {
    Self {
      chain_id: BUILTIN_CHAIN_ID,
      allow_unlimited_contract_size: false,
      url: None,
    }
  }

  pub fn chain_id(&self) -> u64 {
    self.chain_id
  }

  pub fn allow_unlimited_contract_size(&self) -> bool {
    self.allow_unlimited_contract_size
  }

  pub fn url(&self) -> Option<&str> {
    self.url.as_deref()
  }

  /// Maximum deployed bytecode size, or `None` when the check is disabled.
  pub fn contract_size_limit(&self) -> Option<usize> {
    if self.allow_unlimited_contract_size {
      None
    } else {
      Some(MAX_CONTRACT_SIZE)
    }
  }

  pub fn check_contract_size(&self, size: usize) -> Result<(), ContractSizeError> {
    match self.contract_size_limit() {
      Some(limit) if size > limit => Err(ContractSizeError { size, limit }),
      _ => Ok(()),
    }
  }
}

/// Settings passed through to the external test runner.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct TestRunnerSettings {
  /// Milliseconds.
  pub(crate) timeout: u64,
}

impl TestRunnerSettings {
  pub fn timeout(&self) -> u64 {
    self.timeout
  }
}

impl Default for TestRunnerSettings {
  fn default() -> Self {
    Self {
      timeout: DEFAULT_TEST_TIMEOUT_MS,
    }
  }
}

/// Project layout, relative to the config file's directory.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ProjectPaths {
  pub(crate) sources: String,
  pub(crate) tests: String,
  pub(crate) cache: String,
  pub(crate) artifacts: String,
}

impl ProjectPaths {
  pub fn sources(&self) -> &str {
    &self.sources
  }

  pub fn tests(&self) -> &str {
    &self.tests
  }

  pub fn cache(&self) -> &str {
    &self.cache
  }

  pub fn artifacts(&self) -> &str {
    &self.artifacts
  }
}

impl Default for ProjectPaths {
  fn default() -> Self {
    Self {
      sources: DEFAULT_SOURCES_DIR.to_string(),
      tests: DEFAULT_TESTS_DIR.to_string(),
      cache: DEFAULT_CACHE_DIR.to_string(),
      artifacts: DEFAULT_ARTIFACTS_DIR.to_string(),
    }
  }
}

/// A deployment account referenced by name.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(untagged)]
pub enum AccountRef {
  /// Index into the network's signer list.
  Index(u32),
  /// Literal `0x`-prefixed address, lowercased.
  Address(String),
}

impl fmt::Display for AccountRef {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    match self {
      AccountRef::Index(i) => write!(f, "signer #{}", i),
      AccountRef::Address(addr) => f.write_str(addr),
    }
  }
}

/// Type binding generation settings.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TypechainSettings {
  pub(crate) out_dir: String,
  pub(crate) target: String,
}

impl TypechainSettings {
  pub fn out_dir(&self) -> &str {
    &self.out_dir
  }

  pub fn target(&self) -> &str {
    &self.target
  }
}

impl Default for TypechainSettings {
  fn default() -> Self {
    Self {
      out_dir: DEFAULT_TYPECHAIN_OUT_DIR.to_string(),
      target: DEFAULT_TYPECHAIN_TARGET.to_string(),
    }
  }
}
