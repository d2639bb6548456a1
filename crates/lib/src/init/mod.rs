//! Scaffold a new configuration.
//!
//! This module provides the core logic for the `solconf init` command, which
//! writes into a project directory:
//! - `solconf.lua` (or `solconf.json`) populated with a working configuration
//! - `.luarc.json` and `.solconf/solconf.d.lua` for LuaLS IDE integration (Lua only)

mod templates;

use std::fs;
use std::path::{Path, PathBuf};

use thiserror::Error;
use tracing::info;

use crate::eval::ConfigFormat;

pub use templates::{CONFIG_JSON_TEMPLATE, CONFIG_LUA_TEMPLATE, LUARC_JSON_TEMPLATE, SOLCONF_D_LUA};

/// Errors that can occur during initialization.
#[derive(Debug, Error)]
pub enum InitError {
  #[error("file already exists: {}", path.display())]
  PathExists { path: PathBuf },

  #[error("failed to create directory {}: {source}", path.display())]
  CreateDir { path: PathBuf, source: std::io::Error },

  #[error("failed to write file {}: {source}", path.display())]
  WriteFile { path: PathBuf, source: std::io::Error },

  #[error("failed to canonicalize path {}: {source}", path.display())]
  Canonicalize { path: PathBuf, source: std::io::Error },
}

/// Options for initializing a configuration.
pub struct InitOptions {
  /// Project directory to write into (created if missing)
  pub project_dir: PathBuf,
  /// Format of the generated config file
  pub format: ConfigFormat,
}

/// Result of a successful initialization.
#[derive(Debug)]
pub struct InitResult {
  /// The project directory (canonicalized)
  pub project_dir: PathBuf,
  /// Path to the created config file
  pub config_file: PathBuf,
  /// Path to the created .luarc.json, for Lua configs
  pub luarc_json: Option<PathBuf>,
  /// Path to the LuaLS type definitions, for Lua configs
  pub types_file: Option<PathBuf>,
}

/// Write a new configuration into a project directory.
///
/// # Errors
///
/// Returns an error if:
/// - A config file or `.luarc.json` already exists
/// - Directory creation fails
/// - File writing fails
pub fn init(options: &InitOptions) -> Result<InitResult, InitError> {
  fs::create_dir_all(&options.project_dir).map_err(|e| InitError::CreateDir {
    path: options.project_dir.clone(),
    source: e,
  })?;

  let project_dir = dunce::canonicalize(&options.project_dir).map_err(|e| InitError::Canonicalize {
    path: options.project_dir.clone(),
    source: e,
  })?;

  // Refuse if either config format is present, not just the one being written.
  for name in crate::consts::CONFIG_FILENAMES {
    let existing = project_dir.join(name);
    if existing.exists() {
      return Err(InitError::PathExists { path: existing });
    }
  }

  let result = match options.format {
    ConfigFormat::Json => {
      let config_file = project_dir.join("solconf.json");
      write_file(&config_file, CONFIG_JSON_TEMPLATE)?;
      InitResult {
        project_dir,
        config_file,
        luarc_json: None,
        types_file: None,
      }
    }
    ConfigFormat::Lua => {
      let config_file = project_dir.join("solconf.lua");
      let luarc_json = project_dir.join(".luarc.json");
      if luarc_json.exists() {
        return Err(InitError::PathExists { path: luarc_json });
      }

      let types_dir = project_dir.join(".solconf");
      fs::create_dir_all(&types_dir).map_err(|e| InitError::CreateDir {
        path: types_dir.clone(),
        source: e,
      })?;
      let types_file = types_dir.join("solconf.d.lua");

      write_file(&config_file, CONFIG_LUA_TEMPLATE)?;
      write_file(&types_file, SOLCONF_D_LUA)?;

      let types_path_str = types_dir.to_string_lossy().replace('\\', "/");
      write_file(&luarc_json, &LUARC_JSON_TEMPLATE.replace("{types_path}", &types_path_str))?;

      InitResult {
        project_dir,
        config_file,
        luarc_json: Some(luarc_json),
        types_file: Some(types_file),
      }
    }
  };

  info!(path = %result.config_file.display(), "initialized configuration");
  Ok(result)
}

fn write_file(path: &Path, content: &str) -> Result<(), InitError> {
  fs::write(path, content).map_err(|e| InitError::WriteFile {
    path: path.to_path_buf(),
    source: e,
  })
}

#[cfg(test)]
mod tests {
  use super::*;
  use crate::eval::{LoadOptions, load_config_with};
  use tempfile::TempDir;

  fn hardhat() -> LoadOptions {
    LoadOptions {
      network: Some("hardhat".to_string()),
    }
  }

  #[test]
  fn lua_init_writes_loadable_config() {
    let temp_dir = TempDir::new().unwrap();
    let result = init(&InitOptions {
      project_dir: temp_dir.path().join("project"),
      format: ConfigFormat::Lua,
    })
    .unwrap();

    assert!(result.config_file.ends_with("solconf.lua"));
    assert!(result.types_file.as_ref().unwrap().exists());

    let luarc = fs::read_to_string(result.luarc_json.as_ref().unwrap()).unwrap();
    assert!(luarc.contains(".solconf"));
    assert!(!luarc.contains("{types_path}"));

    let config = load_config_with(&result.config_file, &hardhat()).unwrap();
    assert_eq!(config.compilers().len(), 5);
    assert_eq!(config.network("hardhat").unwrap().chain_id(), 11155111);
  }

  #[test]
  fn json_init_matches_lua_template() {
    let temp_dir = TempDir::new().unwrap();
    let lua = init(&InitOptions {
      project_dir: temp_dir.path().join("lua"),
      format: ConfigFormat::Lua,
    })
    .unwrap();
    let json = init(&InitOptions {
      project_dir: temp_dir.path().join("json"),
      format: ConfigFormat::Json,
    })
    .unwrap();

    assert!(json.luarc_json.is_none());
    let from_lua = load_config_with(&lua.config_file, &hardhat()).unwrap();
    let from_json = load_config_with(&json.config_file, &hardhat()).unwrap();
    assert_eq!(from_lua, from_json);
  }

  #[test]
  fn init_refuses_existing_config() {
    let temp_dir = TempDir::new().unwrap();
    fs::write(temp_dir.path().join("solconf.json"), "{}").unwrap();

    let err = init(&InitOptions {
      project_dir: temp_dir.path().to_path_buf(),
      format: ConfigFormat::Lua,
    })
    .unwrap_err();
    assert!(matches!(err, InitError::PathExists { .. }));
    assert!(err.to_string().contains("already exists"));
  }
}
