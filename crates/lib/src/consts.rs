pub const APP_NAME: &str = "solconf";

/// Config file names searched for during discovery, in priority order.
pub const CONFIG_FILENAMES: &[&str] = &["solconf.lua", "solconf.json"];

/// Environment variable that overrides `defaultNetwork`.
pub const NETWORK_ENV_VAR: &str = "SOLCONF_NETWORK";

/// Name of the in-process network that always exists.
pub const BUILTIN_NETWORK: &str = "hardhat";

/// Chain id of the in-process network when the config does not set one.
pub const BUILTIN_CHAIN_ID: u64 = 31337;

pub const DEFAULT_OPTIMIZER_RUNS: u32 = 200;

/// Test runner timeout in milliseconds.
pub const DEFAULT_TEST_TIMEOUT_MS: u64 = 40_000;

/// EIP-170 deployed bytecode limit.
pub const MAX_CONTRACT_SIZE: usize = 24_576;

pub const DEFAULT_SOURCES_DIR: &str = "contracts";
pub const DEFAULT_TESTS_DIR: &str = "test";
pub const DEFAULT_CACHE_DIR: &str = "cache";
pub const DEFAULT_ARTIFACTS_DIR: &str = "artifacts";

pub const DEFAULT_TYPECHAIN_OUT_DIR: &str = "typechain-types";
pub const DEFAULT_TYPECHAIN_TARGET: &str = "ethers-v6";

/// EVM hardforks accepted in `settings.evmVersion`.
pub const EVM_VERSIONS: &[&str] = &[
  "homestead",
  "tangerineWhistle",
  "spuriousDragon",
  "byzantium",
  "constantinople",
  "petersburg",
  "istanbul",
  "berlin",
  "london",
  "paris",
  "shanghai",
  "cancun",
  "prague",
];

/// Length of the truncated config fingerprint.
pub const FINGERPRINT_LEN: usize = 20;

/// Environment file loaded from the config directory before evaluation.
pub const DOTENV_FILE: &str = ".env";
