mod check;
mod compiler;
mod info;
mod init;
mod networks;
mod show;

pub use check::cmd_check;
pub use compiler::cmd_compiler;
pub use info::cmd_info;
pub use init::cmd_init;
pub use networks::cmd_networks;
pub use show::cmd_show;

use std::path::PathBuf;

use anyhow::{Context, Result, bail};
use tracing::debug;

use solconf_lib::BuildConfig;
use solconf_lib::discover::find_config;
use solconf_lib::eval::{LoadError, LoadOptions, load_config_with};

/// Global flags shared by every command that reads a configuration.
pub struct ConfigArgs {
  pub config: Option<PathBuf>,
  pub network: Option<String>,
}

impl ConfigArgs {
  /// The explicit `--config` path, or the nearest config above the working directory.
  pub fn resolve_path(&self) -> Result<PathBuf> {
    if let Some(path) = &self.config {
      return Ok(path.clone());
    }
    let cwd = std::env::current_dir().context("Failed to read current directory")?;
    match find_config(&cwd) {
      Some(path) => Ok(path),
      None => bail!(
        "No solconf.lua or solconf.json found in {} or any parent directory",
        cwd.display()
      ),
    }
  }

  fn options(&self) -> LoadOptions {
    LoadOptions {
      network: self.network.clone(),
    }
  }

  /// Load without wrapping the error, for commands that report validation problems themselves.
  pub fn try_load(&self) -> Result<(PathBuf, Result<BuildConfig, LoadError>)> {
    let path = self.resolve_path()?;
    debug!(path = %path.display(), network = ?self.network, "using configuration");
    let result = load_config_with(&path, &self.options());
    Ok((path, result))
  }

  pub fn load(&self) -> Result<(PathBuf, BuildConfig)> {
    let (path, result) = self.try_load()?;
    let config = result.with_context(|| format!("Failed to load config: {}", path.display()))?;
    Ok((path, config))
  }
}
