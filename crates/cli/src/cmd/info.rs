use anyhow::Result;

use crate::cmd::ConfigArgs;

pub fn cmd_info(args: &ConfigArgs) -> Result<()> {
  println!("solconf {}", env!("CARGO_PKG_VERSION"));
  match args.resolve_path() {
    Ok(path) => println!("Config: {}", path.display()),
    _ => println!("Config: not found"),
  }
  Ok(())
}
