//! Implementation of the `solconf check` command.
//!
//! Loads the configuration, reports every violated constraint, and prints a
//! short summary when the configuration is valid.

use anyhow::{Context, Result, bail};

use crate::cmd::ConfigArgs;
use crate::output::{format_duration, print_error, print_stat, print_success};

pub fn cmd_check(args: &ConfigArgs) -> Result<()> {
  let (path, result) = args.try_load()?;

  let config = match result {
    Ok(config) => config,
    Err(err) => match err.validation_errors() {
      Some(errors) => {
        for error in errors.iter() {
          print_error(&error.to_string());
        }
        bail!("{} has {} problem(s)", path.display(), errors.len());
      }
      None => return Err(err).with_context(|| format!("Failed to load config: {}", path.display())),
    },
  };

  let fingerprint = config.fingerprint().context("Failed to compute fingerprint")?;

  print_success(&format!("{} is valid", path.display()));
  print_stat("Compilers", &config.compilers().len().to_string());
  print_stat("Overrides", &config.overrides().len().to_string());
  print_stat("Networks", &config.networks().len().to_string());
  print_stat("Default network", config.default_network());
  print_stat("Test timeout", &format_duration(config.test_timeout()));
  print_stat("Fingerprint", &fingerprint.to_string());

  Ok(())
}
