use anyhow::Result;

use crate::cmd::ConfigArgs;
use crate::output::{format_size_limit, print_stat, symbols};

pub fn cmd_networks(args: &ConfigArgs) -> Result<()> {
  let (_, config) = args.load()?;

  for (name, network) in config.networks() {
    let marker = if name == config.default_network() {
      symbols::DEFAULT
    } else {
      symbols::INFO
    };
    println!("{} {}", marker, name);
    print_stat("chainId", &network.chain_id().to_string());
    if let Some(url) = network.url() {
      print_stat("url", url);
    }
    print_stat("contract size limit", &format_size_limit(network.contract_size_limit()));
  }

  Ok(())
}
