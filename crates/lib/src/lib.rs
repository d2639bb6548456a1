//! solconf-lib: Build configuration for a Solidity toolchain
//!
//! This crate loads the configuration a Solidity compile/test/deploy toolchain
//! runs with and checks it before any tool sees it:
//! - `BuildConfig`: the validated, immutable configuration value
//! - `eval`: loading from `solconf.lua` or `solconf.json`
//! - `discover`: locating the config from anywhere inside a project
//! - `compiler`: choosing the compiler for a source file from its pragma

pub mod compiler;
pub mod config;
pub mod consts;
pub mod discover;
pub mod eval;
pub mod init;
pub mod lua;
pub mod util;

pub use config::BuildConfig;
pub use eval::{LoadError, LoadOptions, load_config, load_config_with};
