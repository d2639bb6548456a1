//! Implementation of the `solconf compiler` command.

use std::path::Path;

use anyhow::{Context, Result};

use crate::cmd::ConfigArgs;

/// Print the compiler the configuration selects for `source`.
///
/// An override is looked up by the path relative to the config directory, so
/// `contracts/Token.sol` matches from anywhere inside the project.
pub fn cmd_compiler(args: &ConfigArgs, source: &Path) -> Result<()> {
  let (config_path, config) = args.load()?;

  let contents =
    std::fs::read_to_string(source).with_context(|| format!("Failed to read source: {}", source.display()))?;

  let key = override_key(&config_path, source);
  let compiler = config
    .compiler_for_source(&key, &contents)
    .with_context(|| format!("No compiler for {}", source.display()))?;

  println!("{}", compiler);

  Ok(())
}

fn override_key(config_path: &Path, source: &Path) -> String {
  let project_dir = config_path
    .parent()
    .and_then(|dir| dunce::canonicalize(dir).ok());
  let source_abs = dunce::canonicalize(source).ok();

  match (project_dir, source_abs) {
    (Some(dir), Some(abs)) => match abs.strip_prefix(&dir) {
      Ok(relative) => relative.to_string_lossy().into_owned(),
      Err(_) => source.to_string_lossy().into_owned(),
    },
    _ => source.to_string_lossy().into_owned(),
  }
}
