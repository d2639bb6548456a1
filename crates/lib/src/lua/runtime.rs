use std::cell::RefCell;
use std::path::Path;
use std::rc::Rc;

use mlua::prelude::*;

use crate::lua::{globals, loaders};

/// Create a Lua runtime for evaluating a config in `config_dir`.
///
/// Modules next to the config are reachable through `require`, and every
/// `solconf.network{}`/`solconf.compiler{}` call records into `declarations`.
pub fn create_runtime(config_dir: &Path, declarations: Rc<RefCell<globals::Declarations>>) -> LuaResult<Lua> {
  let lua = Lua::new();

  let package = lua.globals().get::<LuaTable>("package")?;
  let package_path = package.get::<String>("path")?;
  let dir = config_dir.to_string_lossy().replace('\\', "/");
  package.set("path", format!("{dir}/?.lua;{dir}/?/init.lua;{}", package_path))?;

  globals::register_globals(&lua, config_dir, declarations)?;
  loaders::install_loaders(&lua)?;

  Ok(lua)
}
