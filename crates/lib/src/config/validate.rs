//! Constraint checking for declared configurations.
//!
//! [`validate`] turns a [`RawConfig`] into a [`BuildConfig`] or reports every
//! violated constraint at once, each tagged with the field it concerns.

use std::collections::{BTreeMap, BTreeSet};
use std::fmt;

use semver::Version;
use thiserror::Error;
use url::Url;

use super::raw::{RawAccount, RawCompiler, RawConfig, RawNetwork, RawNumber};
use super::types::{
  AccountRef, BuildConfig, CompilerSettings, CompilerSpec, NetworkSpec, OptimizerSettings, ProjectPaths,
  SolidityConfig, TestRunnerSettings, TypechainSettings,
};
use crate::consts::{BUILTIN_NETWORK, EVM_VERSIONS};

/// A single violated constraint.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValidationError {
  #[error("solidity: at least one compiler must be declared")]
  EmptyCompilers,

  #[error("{location}.version: invalid compiler version '{version}': {reason}")]
  InvalidVersion {
    location: String,
    version: String,
    reason: String,
  },

  #[error("{location}.settings.optimizer.runs: must be a positive integer, got {runs}")]
  NonPositiveRuns { location: String, runs: i64 },

  #[error("{location}.settings.optimizer.runs: {runs} is too large")]
  RunsOutOfRange { location: String, runs: i64 },

  #[error("{location}.settings.evmVersion: unknown EVM version '{value}'")]
  UnknownEvmVersion { location: String, value: String },

  #[error("solidity.overrides: source path must not be empty")]
  EmptyOverridePath,

  #[error("networks.{name}: declared more than once")]
  DuplicateNetwork { name: String },

  #[error("networks.{network}.chainId: must be a positive integer, got {chain_id}")]
  NonPositiveChainId { network: String, chain_id: i64 },

  #[error("networks.{network}.chainId: required for networks other than 'hardhat'")]
  MissingChainId { network: String },

  #[error("networks.{network}.url: required for networks other than 'hardhat'")]
  MissingUrl { network: String },

  #[error("networks.{network}.url: '{url}' is not an http(s) URL")]
  InvalidUrl { network: String, url: String },

  #[error("networks.hardhat.url: the in-process network does not take a url")]
  UrlOnBuiltinNetwork,

  #[error("defaultNetwork: '{name}' is not a declared network (available: {})", available.join(", "))]
  UnknownDefaultNetwork { name: String, available: Vec<String> },

  #[error("mocha.timeout: must be a positive number of milliseconds, got {timeout}")]
  NonPositiveTimeout { timeout: i64 },

  #[error("{field}: must be a whole number, got {value}")]
  NotWholeNumber { field: String, value: String },

  #[error("{field}: must not be empty")]
  EmptyValue { field: String },

  #[error("namedAccounts.{name}: {reason}")]
  InvalidAccount { name: String, reason: String },
}

/// Every constraint violated by a declared configuration.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ValidationErrors(pub Vec<ValidationError>);

impl ValidationErrors {
  pub fn iter(&self) -> impl Iterator<Item = &ValidationError> {
    self.0.iter()
  }

  pub fn len(&self) -> usize {
    self.0.len()
  }

  pub fn is_empty(&self) -> bool {
    self.0.is_empty()
  }

  pub fn contains(&self, error: &ValidationError) -> bool {
    self.0.contains(error)
  }
}

impl fmt::Display for ValidationErrors {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    let count = self.0.len();
    write!(f, "{} problem{}", count, if count == 1 { "" } else { "s" })?;
    for error in &self.0 {
      write!(f, "\n  - {}", error)?;
    }
    Ok(())
  }
}

impl std::error::Error for ValidationErrors {}

/// Check a declared configuration and build the validated form.
pub fn validate(raw: RawConfig) -> Result<BuildConfig, ValidationErrors> {
  let mut errors = Vec::new();

  let compiler_set = raw.solidity.map(|s| s.into_compiler_set()).unwrap_or_default();
  if compiler_set.compilers.is_empty() {
    errors.push(ValidationError::EmptyCompilers);
  }

  let compilers: Vec<_> = compiler_set
    .compilers
    .into_iter()
    .enumerate()
    .filter_map(|(i, c)| compiler_spec(c, &format!("solidity.compilers[{}]", i), &mut errors))
    .collect();

  let mut overrides = BTreeMap::new();
  for (path, compiler) in compiler_set.overrides {
    if path.trim().is_empty() {
      errors.push(ValidationError::EmptyOverridePath);
      continue;
    }
    let location = format!("solidity.overrides[\"{}\"]", path);
    if let Some(spec) = compiler_spec(compiler, &location, &mut errors) {
      overrides.insert(path, spec);
    }
  }

  let networks = networks(raw.networks.0, &mut errors);

  let default_network = raw.default_network.unwrap_or_else(|| BUILTIN_NETWORK.to_string());
  if !networks.contains_key(&default_network) {
    errors.push(ValidationError::UnknownDefaultNetwork {
      name: default_network.clone(),
      available: networks.keys().cloned().collect(),
    });
  }

  let mut mocha = TestRunnerSettings::default();
  let timeout = raw.mocha.and_then(|m| m.timeout);
  if let Some(timeout) = timeout.and_then(|t| whole_number(t, "mocha.timeout", &mut errors)) {
    if timeout <= 0 {
      errors.push(ValidationError::NonPositiveTimeout { timeout });
    } else {
      mocha.timeout = timeout as u64;
    }
  }

  let mut paths = ProjectPaths::default();
  if let Some(raw_paths) = raw.paths {
    set_non_empty(&mut paths.sources, raw_paths.sources, "paths.sources", &mut errors);
    set_non_empty(&mut paths.tests, raw_paths.tests, "paths.tests", &mut errors);
    set_non_empty(&mut paths.cache, raw_paths.cache, "paths.cache", &mut errors);
    set_non_empty(&mut paths.artifacts, raw_paths.artifacts, "paths.artifacts", &mut errors);
  }

  let mut typechain = TypechainSettings::default();
  if let Some(raw_typechain) = raw.typechain {
    set_non_empty(&mut typechain.out_dir, raw_typechain.out_dir, "typechain.outDir", &mut errors);
    set_non_empty(&mut typechain.target, raw_typechain.target, "typechain.target", &mut errors);
  }

  let mut named_accounts = BTreeMap::new();
  for (name, account) in raw.named_accounts {
    match account_ref(account) {
      Ok(account) => {
        named_accounts.insert(name, account);
      }
      Err(reason) => errors.push(ValidationError::InvalidAccount { name, reason }),
    }
  }

  if !errors.is_empty() {
    return Err(ValidationErrors(errors));
  }

  Ok(BuildConfig {
    default_network,
    solidity: SolidityConfig { compilers, overrides },
    networks,
    mocha,
    paths,
    named_accounts,
    typechain,
  })
}

fn compiler_spec(raw: RawCompiler, location: &str, errors: &mut Vec<ValidationError>) -> Option<CompilerSpec> {
  let before = errors.len();

  let version = match parse_release_version(&raw.version) {
    Ok(v) => Some(v),
    Err(reason) => {
      errors.push(ValidationError::InvalidVersion {
        location: location.to_string(),
        version: raw.version.clone(),
        reason,
      });
      None
    }
  };

  let settings = raw.settings.unwrap_or_default();
  let mut optimizer = OptimizerSettings::default();
  if let Some(raw_optimizer) = settings.optimizer {
    optimizer.enabled = raw_optimizer.enabled.unwrap_or(false);
    let runs_field = format!("{}.settings.optimizer.runs", location);
    if let Some(runs) = raw_optimizer.runs.and_then(|r| whole_number(r, &runs_field, errors)) {
      if runs <= 0 {
        errors.push(ValidationError::NonPositiveRuns {
          location: location.to_string(),
          runs,
        });
      } else {
        match u32::try_from(runs) {
          Ok(runs) => optimizer.runs = runs,
          Err(_) => errors.push(ValidationError::RunsOutOfRange {
            location: location.to_string(),
            runs,
          }),
        }
      }
    }
  }

  if let Some(evm) = &settings.evm_version {
    if !EVM_VERSIONS.contains(&evm.as_str()) {
      errors.push(ValidationError::UnknownEvmVersion {
        location: location.to_string(),
        value: evm.clone(),
      });
    }
  }

  if errors.len() > before {
    return None;
  }

  version.map(|version| CompilerSpec {
    version,
    settings: CompilerSettings {
      optimizer,
      evm_version: settings.evm_version,
    },
  })
}

/// Parse a compiler version, accepting only plain `MAJOR.MINOR.PATCH` releases.
fn parse_release_version(input: &str) -> Result<Version, String> {
  let version = Version::parse(input.trim()).map_err(|e| e.to_string())?;
  if !version.pre.is_empty() || !version.build.is_empty() {
    return Err("only release versions are supported".to_string());
  }
  Ok(version)
}

fn networks(declared: Vec<(String, RawNetwork)>, errors: &mut Vec<ValidationError>) -> BTreeMap<String, NetworkSpec> {
  let mut networks = BTreeMap::new();
  let mut duplicates = BTreeSet::new();

  for (name, raw) in declared {
    if networks.contains_key(&name) {
      if duplicates.insert(name.clone()) {
        errors.push(ValidationError::DuplicateNetwork { name });
      }
      continue;
    }
    if let Some(spec) = network_spec(&name, raw, errors) {
      networks.insert(name, spec);
    } else {
      // Keep the name reserved so later duplicates are still caught.
      networks.insert(name, NetworkSpec::builtin());
    }
  }

  networks
    .entry(BUILTIN_NETWORK.to_string())
    .or_insert_with(NetworkSpec::builtin);

  networks
}

fn network_spec(name: &str, raw: RawNetwork, errors: &mut Vec<ValidationError>) -> Option<NetworkSpec> {
  let before = errors.len();
  let builtin = name == BUILTIN_NETWORK;

  let chain_id = match raw.chain_id {
    Some(RawNumber::Fractional(value)) => {
      errors.push(ValidationError::NotWholeNumber {
        field: format!("networks.{}.chainId", name),
        value: value.to_string(),
      });
      0
    }
    Some(RawNumber::Whole(id)) if id <= 0 => {
      errors.push(ValidationError::NonPositiveChainId {
        network: name.to_string(),
        chain_id: id,
      });
      0
    }
    Some(RawNumber::Whole(id)) => id as u64,
    None if builtin => NetworkSpec::builtin().chain_id,
    None => {
      errors.push(ValidationError::MissingChainId {
        network: name.to_string(),
      });
      0
    }
  };

  match (&raw.url, builtin) {
    (Some(_), true) => errors.push(ValidationError::UrlOnBuiltinNetwork),
    (None, false) => errors.push(ValidationError::MissingUrl {
      network: name.to_string(),
    }),
    (Some(url), false) if !is_http_url(url) => errors.push(ValidationError::InvalidUrl {
      network: name.to_string(),
      url: url.clone(),
    }),
    _ => {}
  }

  if errors.len() > before {
    return None;
  }

  Some(NetworkSpec {
    chain_id,
    allow_unlimited_contract_size: raw.allow_unlimited_contract_size.unwrap_or(false),
    url: raw.url,
  })
}

fn whole_number(value: RawNumber, field: &str, errors: &mut Vec<ValidationError>) -> Option<i64> {
  match value {
    RawNumber::Whole(n) => Some(n),
    RawNumber::Fractional(v) => {
      errors.push(ValidationError::NotWholeNumber {
        field: field.to_string(),
        value: v.to_string(),
      });
      None
    }
  }
}

fn is_http_url(url: &str) -> bool {
  match Url::parse(url) {
    Ok(parsed) => {
      matches!(parsed.scheme(), "http" | "https") && parsed.host_str().is_some_and(|host| !host.is_empty())
    }
    Err(_) => false,
  }
}

fn account_ref(raw: RawAccount) -> Result<AccountRef, String> {
  match raw {
    RawAccount::Index(i) => u32::try_from(i)
      .map(AccountRef::Index)
      .map_err(|_| format!("account index {} is out of range", i)),
    RawAccount::Address(addr) => {
      let hex = addr
        .strip_prefix("0x")
        .or_else(|| addr.strip_prefix("0X"))
        .ok_or_else(|| format!("address '{}' must start with 0x", addr))?;
      if hex.len() != 40 || !hex.chars().all(|c| c.is_ascii_hexdigit()) {
        return Err(format!("address '{}' must be 20 bytes of hex", addr));
      }
      Ok(AccountRef::Address(format!("0x{}", hex.to_ascii_lowercase())))
    }
  }
}

fn set_non_empty(target: &mut String, value: Option<String>, field: &str, errors: &mut Vec<ValidationError>) {
  if let Some(value) = value {
    if value.trim().is_empty() {
      errors.push(ValidationError::EmptyValue {
        field: field.to_string(),
      });
    } else {
      *target = value;
    }
  }
}
