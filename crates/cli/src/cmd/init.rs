//! Implementation of the `solconf init` command.
//!
//! Scaffolds a configuration in a project directory, together with LuaLS
//! integration files for Lua configs.

use std::path::Path;

use anyhow::{Context, Result};
use owo_colors::OwoColorize;

use solconf_lib::eval::ConfigFormat;
use solconf_lib::init::{InitOptions, init};

use crate::output::symbols;

/// Execute the init command.
///
/// Writes into `path`:
/// - `solconf.lua` (or `solconf.json` with `--json`) holding a working configuration
/// - `.luarc.json` and `.solconf/solconf.d.lua` for LuaLS, for Lua configs
///
/// # Errors
///
/// Returns an error if a config already exists or if there are permission issues.
pub fn cmd_init(path: &Path, json: bool) -> Result<()> {
  let options = InitOptions {
    project_dir: path.to_path_buf(),
    format: if json { ConfigFormat::Json } else { ConfigFormat::Lua },
  };

  let result = init(&options).context("Failed to initialize configuration")?;

  println!(
    "{} {}",
    symbols::SUCCESS.green(),
    "Initialized solconf configuration!".green().bold()
  );
  println!();
  println!(
    "  {} Project directory: {}",
    symbols::INFO.cyan(),
    result.project_dir.display()
  );
  println!(
    "  {} Config file:       {}",
    symbols::INFO.cyan(),
    result.config_file.display()
  );
  if let Some(luarc) = &result.luarc_json {
    println!("  {} LuaLS config:      {}", symbols::INFO.cyan(), luarc.display());
  }
  if let Some(types) = &result.types_file {
    println!("  {} Type definitions:  {}", symbols::INFO.cyan(), types.display());
  }
  println!();
  println!("{}", "Next steps:".bold());
  println!(
    "  1. Edit {} to declare your compilers and networks",
    result.config_file.display().to_string().cyan()
  );
  println!(
    "  2. Run: {}",
    format!("solconf -c {} check", result.config_file.display()).cyan()
  );

  Ok(())
}
