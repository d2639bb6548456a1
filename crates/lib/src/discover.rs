//! Config file discovery.
//!
//! Tools started anywhere inside a project find its configuration by walking
//! from the working directory towards the filesystem root and taking the
//! first directory that holds a `solconf.lua` or `solconf.json`.

use std::path::{Path, PathBuf};

use tracing::debug;

use crate::consts::CONFIG_FILENAMES;

/// Find the nearest config file at or above `start_dir`.
///
/// Within one directory `solconf.lua` wins over `solconf.json`.
pub fn find_config(start_dir: &Path) -> Option<PathBuf> {
  let start = dunce::canonicalize(start_dir).unwrap_or_else(|_| start_dir.to_path_buf());

  for dir in start.ancestors() {
    for name in CONFIG_FILENAMES {
      let candidate = dir.join(name);
      if candidate.is_file() {
        debug!(path = %candidate.display(), "found configuration");
        return Some(candidate);
      }
    }
  }

  debug!(start = %start.display(), "no configuration found");
  None
}
