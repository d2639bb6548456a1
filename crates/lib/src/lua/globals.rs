//! The `solconf` global table.
//!
//! This module registers the `solconf` global which provides:
//! - `solconf.version` - Version of the loader
//! - `solconf.dir` - Directory containing the config file
//! - `solconf.network(name, spec)` - Declare a network
//! - `solconf.compiler(spec)` - Declare a compiler (a version string or `{ version, settings }`)
//! - `solconf.env(name, default)` - Read an environment variable

use std::cell::RefCell;
use std::path::Path;
use std::rc::Rc;

use mlua::prelude::*;
use tracing::debug;

use crate::config::raw::{RawCompiler, RawNetwork, RawNetworks};

/// Networks and compilers declared through `solconf.*` calls.
///
/// Collected in call order and merged with the table the config returns.
#[derive(Debug, Default, Clone, PartialEq)]
pub struct Declarations {
  pub networks: RawNetworks,
  pub compilers: Vec<RawCompiler>,
}

/// Register the `solconf` global table in the Lua runtime.
pub fn register_globals(lua: &Lua, config_dir: &Path, declarations: Rc<RefCell<Declarations>>) -> LuaResult<()> {
  let solconf = lua.create_table()?;

  solconf.set("version", env!("CARGO_PKG_VERSION"))?;
  solconf.set("dir", config_dir.to_string_lossy().into_owned())?;

  let decls = declarations.clone();
  let network = lua.create_function(move |lua, (name, spec): (String, LuaValue)| {
    let network: RawNetwork = lua
      .from_value(spec)
      .map_err(|e| LuaError::external(format!("solconf.network('{}'): {}", name, e)))?;
    debug!(network = %name, "declared network");
    decls.borrow_mut().networks.push(name, network);
    Ok(())
  })?;
  solconf.set("network", network)?;

  let decls = declarations;
  let compiler = lua.create_function(move |lua, spec: LuaValue| {
    let compiler = match spec {
      LuaValue::String(version) => RawCompiler {
        version: version.to_str()?.to_string(),
        settings: None,
      },
      other => lua
        .from_value(other)
        .map_err(|e| LuaError::external(format!("solconf.compiler: {}", e)))?,
    };
    debug!(version = %compiler.version, "declared compiler");
    decls.borrow_mut().compilers.push(compiler);
    Ok(())
  })?;
  solconf.set("compiler", compiler)?;

  let env = lua.create_function(|_, (name, default): (String, Option<String>)| {
    Ok(std::env::var(&name).ok().or(default))
  })?;
  solconf.set("env", env)?;

  lua.globals().set("solconf", solconf)?;

  Ok(())
}
