mod cmd;
mod output;

use std::path::PathBuf;

use anyhow::Result;
use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;

use crate::cmd::ConfigArgs;
use crate::output::OutputFormat;

/// solconf - Build configuration for Solidity projects
#[derive(Parser)]
#[command(name = "solconf")]
#[command(author, version, about, long_about = None)]
struct Cli {
  /// Enable verbose output
  #[arg(short, long, global = true)]
  verbose: bool,

  /// Path to the configuration file (discovered from the current directory if omitted)
  #[arg(short, long, global = true, value_name = "PATH")]
  config: Option<PathBuf>,

  /// Network to use instead of `defaultNetwork`
  #[arg(long, global = true, value_name = "NAME")]
  network: Option<String>,

  #[command(subcommand)]
  command: Commands,
}

#[derive(Subcommand)]
enum Commands {
  /// Load and validate the configuration
  Check,

  /// Print the resolved configuration
  Show {
    /// Output format
    #[arg(short = 'o', long, value_enum, default_value = "text")]
    format: OutputFormat,
  },

  /// Print the compiler selected for a Solidity source file
  Compiler {
    /// Path to the source file
    source: PathBuf,
  },

  /// List the configured networks
  Networks,

  /// Scaffold a new configuration
  Init {
    /// Project directory
    #[arg(default_value = ".")]
    path: PathBuf,

    /// Write solconf.json instead of solconf.lua
    #[arg(long)]
    json: bool,
  },

  /// Show version and configuration location
  Info,
}

fn main() -> Result<()> {
  let cli = Cli::parse();

  let filter = if cli.verbose {
    EnvFilter::new("debug")
  } else {
    EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"))
  };
  tracing_subscriber::fmt()
    .with_env_filter(filter)
    .with_writer(std::io::stderr)
    .without_time()
    .init();

  let args = ConfigArgs {
    config: cli.config,
    network: cli.network,
  };

  match cli.command {
    Commands::Check => cmd::cmd_check(&args),
    Commands::Show { format } => cmd::cmd_show(&args, format),
    Commands::Compiler { source } => cmd::cmd_compiler(&args, &source),
    Commands::Networks => cmd::cmd_networks(&args),
    Commands::Init { path, json } => cmd::cmd_init(&path, json),
    Commands::Info => cmd::cmd_info(&args),
  }
}
