//! Path utilities for determining data storage locations.
//!
//! Persistent state lives in `~/.todostash/`, one file per storage key.

use std::path::PathBuf;

/// The base directory name for todostash data.
const DATA_DIR_NAME: &str = ".todostash";

/// Get the data directory for persisted collections.
///
/// Returns `~/.todostash/` or `None` if the home directory cannot be
/// determined.
#[must_use]
pub fn storage_dir() -> Option<PathBuf> {
    dirs::home_dir().map(|home| home.join(DATA_DIR_NAME))
}
