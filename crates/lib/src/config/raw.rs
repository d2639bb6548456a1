//! Declared configuration shapes.
//!
//! These types mirror what a user writes in `solconf.lua` or `solconf.json`
//! before any constraint is checked. Integers are signed so that negative
//! values reach validation instead of failing as opaque type errors, and
//! network entries are kept as an ordered list so duplicated names survive
//! deserialization and can be reported.

use std::collections::BTreeMap;
use std::fmt;

use serde::de::value::MapAccessDeserializer;
use serde::de::{self, MapAccess, Visitor};
use serde::{Deserialize, Deserializer};

/// Top-level declared configuration.
#[derive(Debug, Default, Clone, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase", deny_unknown_fields)]
pub struct RawConfig {
  #[serde(default)]
  pub default_network: Option<String>,
  #[serde(default)]
  pub solidity: Option<RawSolidity>,
  #[serde(default)]
  pub networks: RawNetworks,
  #[serde(default)]
  pub mocha: Option<RawMocha>,
  #[serde(default)]
  pub paths: Option<RawPaths>,
  #[serde(default)]
  pub named_accounts: BTreeMap<String, RawAccount>,
  #[serde(default)]
  pub typechain: Option<RawTypechain>,
}

/// The `solidity` entry in any of its accepted forms.
#[derive(Debug, Clone, PartialEq)]
pub enum RawSolidity {
  /// `solidity = "0.8.20"`
  Version(String),
  /// `solidity = { version = "0.8.20", settings = {...} }`
  Single(RawCompiler),
  /// `solidity = { compilers = {...}, overrides = {...} }`
  Multiple(RawCompilerSet),
}

impl RawSolidity {
  /// Normalise every shorthand into the full compilers/overrides form.
  pub fn into_compiler_set(self) -> RawCompilerSet {
    match self {
      RawSolidity::Version(version) => RawCompilerSet {
        compilers: vec![RawCompiler { version, settings: None }],
        overrides: BTreeMap::new(),
      },
      RawSolidity::Single(compiler) => RawCompilerSet {
        compilers: vec![compiler],
        overrides: BTreeMap::new(),
      },
      RawSolidity::Multiple(set) => set,
    }
  }
}

/// Object form of `solidity` before it is split into single/multiple.
#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
struct RawSolidityTable {
  #[serde(default)]
  version: Option<String>,
  #[serde(default)]
  settings: Option<RawSettings>,
  #[serde(default)]
  compilers: Option<Vec<RawCompiler>>,
  #[serde(default)]
  overrides: Option<BTreeMap<String, RawCompiler>>,
}

impl<'de> Deserialize<'de> for RawSolidity {
  fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
    struct SolidityVisitor;

    impl<'de> Visitor<'de> for SolidityVisitor {
      type Value = RawSolidity;

      fn expecting(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("a compiler version string or a table with `version` or `compilers`")
      }

      fn visit_str<E: de::Error>(self, v: &str) -> Result<Self::Value, E> {
        Ok(RawSolidity::Version(v.to_string()))
      }

      fn visit_map<A: MapAccess<'de>>(self, map: A) -> Result<Self::Value, A::Error> {
        let table = RawSolidityTable::deserialize(MapAccessDeserializer::new(map))?;
        match (table.version, table.compilers) {
          (Some(_), Some(_)) => Err(de::Error::custom(
            "`solidity` cannot declare both `version` and `compilers`",
          )),
          (Some(version), None) => {
            if table.overrides.is_some() {
              return Err(de::Error::custom(
                "`solidity.overrides` requires the `compilers` form",
              ));
            }
            Ok(RawSolidity::Single(RawCompiler {
              version,
              settings: table.settings,
            }))
          }
          (None, Some(compilers)) => {
            if table.settings.is_some() {
              return Err(de::Error::custom(
                "`solidity.settings` belongs inside each entry of `compilers`",
              ));
            }
            Ok(RawSolidity::Multiple(RawCompilerSet {
              compilers,
              overrides: table.overrides.unwrap_or_default(),
            }))
          }
          (None, None) => Err(de::Error::missing_field("compilers")),
        }
      }
    }

    deserializer.deserialize_any(SolidityVisitor)
  }
}

#[derive(Debug, Default, Clone, PartialEq)]
pub struct RawCompilerSet {
  pub compilers: Vec<RawCompiler>,
  pub overrides: BTreeMap<String, RawCompiler>,
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct RawCompiler {
  pub version: String,
  #[serde(default)]
  pub settings: Option<RawSettings>,
}

#[derive(Debug, Default, Clone, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase", deny_unknown_fields)]
pub struct RawSettings {
  #[serde(default)]
  pub optimizer: Option<RawOptimizer>,
  #[serde(default)]
  pub evm_version: Option<String>,
}

#[derive(Debug, Default, Clone, PartialEq, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct RawOptimizer {
  #[serde(default)]
  pub enabled: Option<bool>,
  #[serde(default)]
  pub runs: Option<RawNumber>,
}

/// Network declarations in declaration order, duplicates included.
#[derive(Debug, Default, Clone, PartialEq)]
pub struct RawNetworks(pub Vec<(String, RawNetwork)>);

impl RawNetworks {
  pub fn push(&mut self, name: String, network: RawNetwork) {
    self.0.push((name, network));
  }

  pub fn contains(&self, name: &str) -> bool {
    self.0.iter().any(|(n, _)| n == name)
  }

  pub fn len(&self) -> usize {
    self.0.len()
  }

  pub fn is_empty(&self) -> bool {
    self.0.is_empty()
  }
}

impl<'de> Deserialize<'de> for RawNetworks {
  fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
    struct NetworksVisitor;

    impl<'de> Visitor<'de> for NetworksVisitor {
      type Value = RawNetworks;

      fn expecting(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("a table of network name to network settings")
      }

      fn visit_map<A: MapAccess<'de>>(self, mut map: A) -> Result<Self::Value, A::Error> {
        let mut networks = RawNetworks::default();
        while let Some((name, network)) = map.next_entry::<String, RawNetwork>()? {
          networks.push(name, network);
        }
        Ok(networks)
      }

      // An empty Lua table may arrive as a sequence.
      fn visit_seq<A: de::SeqAccess<'de>>(self, mut seq: A) -> Result<Self::Value, A::Error> {
        if seq.next_element::<de::IgnoredAny>()?.is_some() {
          return Err(de::Error::custom("`networks` must be keyed by network name"));
        }
        Ok(RawNetworks::default())
      }
    }

    deserializer.deserialize_map(NetworksVisitor)
  }
}

#[derive(Debug, Default, Clone, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase", deny_unknown_fields)]
pub struct RawNetwork {
  #[serde(default)]
  pub chain_id: Option<RawNumber>,
  #[serde(default)]
  pub allow_unlimited_contract_size: Option<bool>,
  #[serde(default)]
  pub url: Option<String>,
}

#[derive(Debug, Default, Clone, PartialEq, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct RawMocha {
  #[serde(default)]
  pub timeout: Option<RawNumber>,
}

#[derive(Debug, Default, Clone, PartialEq, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct RawPaths {
  #[serde(default)]
  pub sources: Option<String>,
  #[serde(default)]
  pub tests: Option<String>,
  #[serde(default)]
  pub cache: Option<String>,
  #[serde(default)]
  pub artifacts: Option<String>,
}

#[derive(Debug, Default, Clone, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase", deny_unknown_fields)]
pub struct RawTypechain {
  #[serde(default)]
  pub out_dir: Option<String>,
  #[serde(default)]
  pub target: Option<String>,
}

/// A declared integer.
///
/// Lua evaluates `2^8` and `1e8` to floats, so whole floats are accepted as
/// integers. Fractional values are kept for validation to report.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum RawNumber {
  Whole(i64),
  Fractional(f64),
}

impl<'de> Deserialize<'de> for RawNumber {
  fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
    struct NumberVisitor;

    impl Visitor<'_> for NumberVisitor {
      type Value = RawNumber;

      fn expecting(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("a number")
      }

      fn visit_i64<E: de::Error>(self, v: i64) -> Result<Self::Value, E> {
        Ok(RawNumber::Whole(v))
      }

      fn visit_u64<E: de::Error>(self, v: u64) -> Result<Self::Value, E> {
        i64::try_from(v)
          .map(RawNumber::Whole)
          .map_err(|_| E::custom(format!("{} is out of range", v)))
      }

      fn visit_f64<E: de::Error>(self, v: f64) -> Result<Self::Value, E> {
        // i64::MAX as f64 rounds up to 2^63, which no longer fits.
        if v.fract() == 0.0 && v >= i64::MIN as f64 && v < i64::MAX as f64 {
          Ok(RawNumber::Whole(v as i64))
        } else {
          Ok(RawNumber::Fractional(v))
        }
      }
    }

    deserializer.deserialize_any(NumberVisitor)
  }
}

/// A named account: a signer index or a literal address.
#[derive(Debug, Clone, PartialEq)]
pub enum RawAccount {
  Index(i64),
  Address(String),
}

impl<'de> Deserialize<'de> for RawAccount {
  fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
    struct AccountVisitor;

    impl Visitor<'_> for AccountVisitor {
      type Value = RawAccount;

      fn expecting(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("an account index or a 0x-prefixed address")
      }

      fn visit_i64<E: de::Error>(self, v: i64) -> Result<Self::Value, E> {
        Ok(RawAccount::Index(v))
      }

      fn visit_u64<E: de::Error>(self, v: u64) -> Result<Self::Value, E> {
        i64::try_from(v)
          .map(RawAccount::Index)
          .map_err(|_| E::custom(format!("account index {} is out of range", v)))
      }

      fn visit_str<E: de::Error>(self, v: &str) -> Result<Self::Value, E> {
        Ok(RawAccount::Address(v.to_string()))
      }
    }

    deserializer.deserialize_any(AccountVisitor)
  }
}
