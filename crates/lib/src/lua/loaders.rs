//! Config file loading with per-file `__dir` injection.
//!
//! Every file evaluated through [`load_file_with_dir`] sees a `__dir` variable
//! holding its own directory, and `solconf.dir` follows the same file while it
//! runs. `dofile` is replaced so that relative paths resolve against the
//! calling file, which lets a config split its network or compiler tables into
//! sibling files.

use std::fs;
use std::path::{Path, PathBuf};

use mlua::prelude::*;

/// Registry key for the directory of the file currently being evaluated.
const CURRENT_DIR_KEY: &str = "__solconf_current_dir";

/// Directory state saved on entering a file and put back on leaving it.
struct DirScope {
  registry: Option<String>,
  solconf: Option<(LuaTable, LuaValue)>,
}

impl DirScope {
  /// Point the registry entry and `solconf.dir` at `dir`.
  fn enter(lua: &Lua, dir: &str) -> LuaResult<Self> {
    let registry: Option<String> = lua.named_registry_value(CURRENT_DIR_KEY)?;
    lua.set_named_registry_value(CURRENT_DIR_KEY, dir)?;

    let solconf = match lua.globals().get::<LuaValue>("solconf")? {
      LuaValue::Table(table) => {
        let previous: LuaValue = table.get("dir")?;
        table.set("dir", dir)?;
        Some((table, previous))
      }
      _ => None,
    };

    Ok(Self { registry, solconf })
  }

  /// Errors are dropped so the evaluation error, if any, is the one reported.
  fn leave(self, lua: &Lua) {
    let _ = lua.set_named_registry_value(CURRENT_DIR_KEY, self.registry);
    if let Some((table, previous)) = self.solconf {
      let _ = table.set("dir", previous);
    }
  }
}

/// Environment for one file: `__dir`, with reads and writes falling through to `_G`.
fn file_env(lua: &Lua, dir: &str) -> LuaResult<LuaTable> {
  let env = lua.create_table()?;
  env.set("__dir", dir)?;

  let mt = lua.create_table()?;
  mt.set("__index", lua.globals())?;
  mt.set("__newindex", lua.globals())?;
  env.set_metatable(Some(mt))?;
  Ok(env)
}

/// Evaluate a config file, or a file it pulls in through `dofile`, with its
/// own directory in scope.
pub fn load_file_with_dir(lua: &Lua, path: &Path) -> LuaResult<LuaValue> {
  let canonical_path = dunce::canonicalize(path)
    .map_err(|e| LuaError::external(format!("cannot resolve '{}': {}", path.display(), e)))?;
  let content = fs::read_to_string(&canonical_path)
    .map_err(|e| LuaError::external(format!("cannot read '{}': {}", canonical_path.display(), e)))?;
  let dir = canonical_path
    .parent()
    .unwrap_or(Path::new("."))
    .to_string_lossy()
    .into_owned();

  let env = file_env(lua, &dir)?;
  let scope = DirScope::enter(lua, &dir)?;
  let result = lua
    .load(&content)
    .set_name(format!("@{}", canonical_path.display()))
    .set_environment(env)
    .eval::<LuaValue>();
  scope.leave(lua);

  result
}

/// Resolve a relative path against the directory of the file being evaluated.
fn resolve_path(lua: &Lua, path_str: &str) -> LuaResult<PathBuf> {
  let path = Path::new(path_str);
  if path.is_absolute() {
    return Ok(path.to_path_buf());
  }

  let current: Option<String> = lua.named_registry_value(CURRENT_DIR_KEY)?;
  match current {
    Some(dir) => Ok(Path::new(&dir).join(path)),
    None => Ok(path.to_path_buf()),
  }
}

fn create_dofile(lua: &Lua) -> LuaResult<LuaFunction> {
  lua.create_function(|lua, path: Option<String>| match path {
    Some(path_str) => {
      let resolved = resolve_path(lua, &path_str)?;
      load_file_with_dir(lua, &resolved)
    }
    None => Err(LuaError::external("dofile() without a path is not supported")),
  })
}

/// Replace `dofile` with the `__dir`-aware version.
pub fn install_loaders(lua: &Lua) -> LuaResult<()> {
  lua.globals().set("dofile", create_dofile(lua)?)?;
  Ok(())
}
