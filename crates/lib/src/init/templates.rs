//! Template content for `solconf init`.

/// Template for `solconf.lua`
pub const CONFIG_LUA_TEMPLATE: &str = include_str!(concat!(env!("CARGO_MANIFEST_DIR"), "/../../lua/template.lua"));

/// Embedded LuaLS definitions for the `solconf` global
pub const SOLCONF_D_LUA: &str = include_str!(concat!(env!("CARGO_MANIFEST_DIR"), "/../../lua/solconf.d.lua"));

/// Template for `solconf.json`
pub const CONFIG_JSON_TEMPLATE: &str = r#"{
  "defaultNetwork": "hardhat",
  "solidity": {
    "compilers": [
      { "version": "0.8.20", "settings": { "optimizer": { "enabled": true, "runs": 200 } } },
      { "version": "0.8.13", "settings": { "optimizer": { "enabled": true, "runs": 200 } } },
      { "version": "0.8.9", "settings": { "optimizer": { "enabled": true, "runs": 200 } } },
      { "version": "0.6.6", "settings": { "optimizer": { "enabled": true, "runs": 200 } } },
      { "version": "0.5.16", "settings": { "optimizer": { "enabled": true, "runs": 200 } } }
    ]
  },
  "networks": {
    "hardhat": { "chainId": 11155111, "allowUnlimitedContractSize": true }
  },
  "mocha": { "timeout": 100000000 }
}
"#;

/// Template for .luarc.json (LuaLS configuration)
/// Contains {types_path} placeholder for substitution
pub const LUARC_JSON_TEMPLATE: &str = r#"{
  "$schema": "https://raw.githubusercontent.com/LuaLS/vscode-lua/master/setting/schema.json",
  "runtime": {
    "version": "Lua 5.4"
  },
  "workspace": {
    "library": [
      "{types_path}"
    ],
    "checkThirdParty": false
  },
  "diagnostics": {
    "globals": ["solconf", "__dir"]
  }
}
"#;
