//! Implementation of the `solconf show` command.
//!
//! Prints the resolved configuration. The JSON form is what external tooling
//! reads, so it carries the configuration and nothing else.

use anyhow::Result;

use crate::cmd::ConfigArgs;
use crate::output::{OutputFormat, format_duration, print_json, print_stat, symbols};

pub fn cmd_show(args: &ConfigArgs, format: OutputFormat) -> Result<()> {
  let (path, config) = args.load()?;

  if format.is_json() {
    return print_json(&config);
  }

  println!("Config: {}", path.display());
  println!("Default network: {}", config.default_network());

  println!();
  println!("Compilers:");
  for compiler in config.compilers() {
    println!("  {} {}", symbols::INFO, compiler);
  }

  if !config.overrides().is_empty() {
    println!();
    println!("Overrides:");
    for (source, compiler) in config.overrides() {
      println!("  {} {} {} {}", symbols::INFO, source, symbols::ARROW, compiler);
    }
  }

  println!();
  println!("Networks:");
  for (name, network) in config.networks() {
    let marker = if name == config.default_network() {
      symbols::DEFAULT
    } else {
      symbols::INFO
    };
    println!("  {} {} (chainId {})", marker, name, network.chain_id());
    print_stat(
      "allowUnlimitedContractSize",
      &network.allow_unlimited_contract_size().to_string(),
    );
    if let Some(url) = network.url() {
      print_stat("url", url);
    }
  }

  println!();
  println!("Paths:");
  let paths = config.paths();
  print_stat("sources", paths.sources());
  print_stat("tests", paths.tests());
  print_stat("cache", paths.cache());
  print_stat("artifacts", paths.artifacts());

  if !config.named_accounts().is_empty() {
    println!();
    println!("Named accounts:");
    for (name, account) in config.named_accounts() {
      println!("  {} {} {} {}", symbols::INFO, name, symbols::ARROW, account);
    }
  }

  println!();
  println!("Typechain:");
  print_stat("outDir", config.typechain().out_dir());
  print_stat("target", config.typechain().target());

  println!();
  println!("Test timeout: {}", format_duration(config.test_timeout()));

  Ok(())
}
