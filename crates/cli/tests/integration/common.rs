//! Shared test helpers for CLI integration tests.

use std::path::{Path, PathBuf};

use assert_cmd::Command;
use assert_cmd::cargo::cargo_bin_cmd;
use tempfile::TempDir;

/// Get path to a fixture file.
pub fn fixture_path(name: &str) -> PathBuf {
  PathBuf::from(env!("CARGO_MANIFEST_DIR"))
    .join("tests")
    .join("fixtures")
    .join(name)
}

/// Read fixture content.
pub fn fixture_content(name: &str) -> String {
  std::fs::read_to_string(fixture_path(name)).unwrap_or_else(|e| panic!("Failed to load fixture {}: {}", name, e))
}

/// Isolated project directory.
///
/// Each test gets its own temporary directory holding the config file.
pub struct TestEnv {
  pub temp: TempDir,
  pub config_path: PathBuf,
}

impl TestEnv {
  /// Create from a fixture file.
  ///
  /// Copies the fixture content to `solconf.lua` or `solconf.json`, keeping
  /// the fixture's extension so discovery finds it.
  pub fn from_fixture(name: &str) -> Self {
    let temp = TempDir::new().unwrap();
    let extension = Path::new(name).extension().and_then(|e| e.to_str()).unwrap();
    let config_path = temp.path().join(format!("solconf.{}", extension));
    std::fs::write(&config_path, fixture_content(name)).unwrap();
    Self { temp, config_path }
  }

  /// Create an empty project directory.
  pub fn empty() -> Self {
    let temp = TempDir::new().unwrap();
    let config_path = temp.path().join("solconf.lua");
    Self { temp, config_path }
  }

  /// Write a file relative to the project directory.
  pub fn write_file(&self, relative_path: &str, content: &str) -> PathBuf {
    let path = self.temp.path().join(relative_path);
    if let Some(parent) = path.parent() {
      std::fs::create_dir_all(parent).unwrap();
    }
    std::fs::write(&path, content).unwrap();
    path
  }

  /// Get a Command for the solconf binary running inside the project.
  ///
  /// `SOLCONF_NETWORK` is cleared so the caller's environment cannot change
  /// the selected network.
  pub fn solconf_cmd(&self) -> Command {
    let mut cmd: Command = cargo_bin_cmd!("solconf");
    cmd.current_dir(self.temp.path());
    cmd.env_remove("SOLCONF_NETWORK");
    cmd.env_remove("RUST_LOG");
    cmd
  }
}
