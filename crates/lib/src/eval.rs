//! Configuration loading.
//!
//! This module provides [`load_config`], which takes a path to a `solconf.lua`
//! or `solconf.json` file and returns the validated [`BuildConfig`]. Loading is
//! a one-shot, fail-fast operation: the first malformed shape aborts, and all
//! constraint violations are reported together.

use std::cell::RefCell;
use std::fmt;
use std::path::{Path, PathBuf};
use std::rc::Rc;

use mlua::prelude::*;
use tracing::{debug, info};

use crate::config::raw::{RawCompilerSet, RawSolidity};
use crate::config::{BuildConfig, RawConfig, ValidationErrors, validate};
use crate::consts::{DOTENV_FILE, NETWORK_ENV_VAR};
use crate::lua::{Declarations, loaders, runtime};

/// Errors that can occur while loading a configuration.
#[derive(Debug, thiserror::Error)]
pub enum LoadError {
  #[error("failed to read {}: {source}", path.display())]
  Read { path: PathBuf, source: std::io::Error },

  #[error("unsupported config format for {} (expected .lua or .json)", path.display())]
  UnsupportedFormat { path: PathBuf },

  /// The `.env` file next to the config could not be parsed.
  #[error("failed to load environment file {}: {source}", path.display())]
  Env { path: PathBuf, source: dotenvy::Error },

  /// Lua syntax or runtime error while evaluating the config.
  #[error("lua error in {}: {message}", path.display())]
  Lua { path: PathBuf, message: String },

  /// The declared value does not have the configuration's shape.
  #[error("malformed configuration {}: {message}", path.display())]
  Shape { path: PathBuf, message: String },

  #[error("invalid configuration {}: {errors}", path.display())]
  Invalid { path: PathBuf, errors: ValidationErrors },
}

impl LoadError {
  /// Constraint violations, when loading failed validation.
  pub fn validation_errors(&self) -> Option<&ValidationErrors> {
    match self {
      LoadError::Invalid { errors, .. } => Some(errors),
      _ => None,
    }
  }
}

/// Source format of a configuration.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ConfigFormat {
  Lua,
  Json,
}

impl ConfigFormat {
  /// Pick the format from a file extension.
  pub fn from_path(path: &Path) -> Option<Self> {
    match path.extension().and_then(|e| e.to_str()) {
      Some("lua") => Some(ConfigFormat::Lua),
      Some("json") => Some(ConfigFormat::Json),
      _ => None,
    }
  }
}

impl fmt::Display for ConfigFormat {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    match self {
      ConfigFormat::Lua => f.write_str("lua"),
      ConfigFormat::Json => f.write_str("json"),
    }
  }
}

/// Options that adjust a load.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct LoadOptions {
  /// Network to use instead of `defaultNetwork`. Takes precedence over
  /// the `SOLCONF_NETWORK` environment variable.
  pub network: Option<String>,
}

/// Load and validate the configuration at `path`.
///
/// # Example
/// ```ignore
/// use std::path::Path;
/// use solconf_lib::eval::load_config;
///
/// let config = load_config(Path::new("solconf.lua"))?;
/// println!("Compilers: {}", config.compilers().len());
/// ```
pub fn load_config(path: &Path) -> Result<BuildConfig, LoadError> {
  load_config_with(path, &LoadOptions::default())
}

/// Load and validate the configuration at `path` with explicit options.
pub fn load_config_with(path: &Path, options: &LoadOptions) -> Result<BuildConfig, LoadError> {
  let format = ConfigFormat::from_path(path).ok_or_else(|| LoadError::UnsupportedFormat {
    path: path.to_path_buf(),
  })?;
  debug!(path = %path.display(), %format, "loading configuration");

  let config_dir = config_dir(path);
  if let Some(dir) = &config_dir {
    load_dotenv(dir)?;
  }

  let raw = match format {
    ConfigFormat::Lua => {
      let dir = config_dir.unwrap_or_else(|| PathBuf::from("."));
      evaluate_lua(path, &dir, |lua| loaders::load_file_with_dir(lua, path))?
    }
    ConfigFormat::Json => {
      let source = std::fs::read_to_string(path).map_err(|source| LoadError::Read {
        path: path.to_path_buf(),
        source,
      })?;
      parse_json(&source, path)?
    }
  };

  finish(raw, path, options)
}

/// Load a configuration from an in-memory source.
///
/// Lua sources are evaluated relative to the current directory.
pub fn load_str(source: &str, format: ConfigFormat, options: &LoadOptions) -> Result<BuildConfig, LoadError> {
  let path = Path::new("<memory>");
  let raw = match format {
    ConfigFormat::Lua => evaluate_lua(path, Path::new("."), |lua| {
      lua.load(source).set_name("=<memory>").eval::<LuaValue>()
    })?,
    ConfigFormat::Json => parse_json(source, path)?,
  };
  finish(raw, path, options)
}

fn finish(mut raw: RawConfig, path: &Path, options: &LoadOptions) -> Result<BuildConfig, LoadError> {
  if let Some(network) = selected_network(options) {
    debug!(%network, "overriding default network");
    raw.default_network = Some(network);
  }

  let config = validate(raw).map_err(|errors| LoadError::Invalid {
    path: path.to_path_buf(),
    errors,
  })?;

  info!(
    path = %path.display(),
    compilers = config.compilers().len(),
    networks = config.networks().len(),
    default_network = config.default_network(),
    "loaded configuration"
  );
  Ok(config)
}

fn selected_network(options: &LoadOptions) -> Option<String> {
  options
    .network
    .clone()
    .or_else(|| std::env::var(NETWORK_ENV_VAR).ok().filter(|n| !n.is_empty()))
}

fn parse_json(source: &str, path: &Path) -> Result<RawConfig, LoadError> {
  serde_json::from_str(source).map_err(|e| LoadError::Shape {
    path: path.to_path_buf(),
    message: e.to_string(),
  })
}

fn config_dir(path: &Path) -> Option<PathBuf> {
  dunce::canonicalize(path)
    .ok()
    .and_then(|p| p.parent().map(Path::to_path_buf))
}

/// Load `<config_dir>/.env` into the process environment. Variables that are
/// already set keep their values.
fn load_dotenv(config_dir: &Path) -> Result<(), LoadError> {
  let env_file = config_dir.join(DOTENV_FILE);
  if !env_file.is_file() {
    return Ok(());
  }
  dotenvy::from_path(&env_file).map_err(|source| LoadError::Env {
    path: env_file.clone(),
    source,
  })?;
  debug!(path = %env_file.display(), "loaded environment file");
  Ok(())
}

/// Run a Lua config and merge what it returned with its `solconf.*` declarations.
fn evaluate_lua<F>(path: &Path, config_dir: &Path, eval: F) -> Result<RawConfig, LoadError>
where
  F: FnOnce(&Lua) -> LuaResult<LuaValue>,
{
  let declarations = Rc::new(RefCell::new(Declarations::default()));
  let lua_err = |e: LuaError| LoadError::Lua {
    path: path.to_path_buf(),
    message: e.to_string(),
  };

  let mut raw = {
    let lua = runtime::create_runtime(config_dir, declarations.clone()).map_err(lua_err)?;
    let value = eval(&lua).map_err(lua_err)?;

    match value {
      LuaValue::Table(_) => lua.from_value::<RawConfig>(value).map_err(|e| LoadError::Shape {
        path: path.to_path_buf(),
        message: e.to_string(),
      })?,
      LuaValue::Nil => RawConfig::default(),
      other => {
        return Err(LoadError::Shape {
          path: path.to_path_buf(),
          message: format!("config must return a table, got {}", other.type_name()),
        });
      }
    }
    // lua is dropped here, releasing its references to the declarations
  };

  let declarations = declarations.take();
  merge_declarations(&mut raw, declarations);
  Ok(raw)
}

/// Append `solconf.network`/`solconf.compiler` declarations after the
/// returned table's own entries.
fn merge_declarations(raw: &mut RawConfig, declarations: Declarations) {
  raw.networks.0.extend(declarations.networks.0);

  if declarations.compilers.is_empty() {
    return;
  }
  let mut set = raw
    .solidity
    .take()
    .map(RawSolidity::into_compiler_set)
    .unwrap_or_else(RawCompilerSet::default);
  set.compilers.extend(declarations.compilers);
  raw.solidity = Some(RawSolidity::Multiple(set));
}
