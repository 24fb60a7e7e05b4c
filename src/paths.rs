//! Centralized path definitions for cla-signatures
//!
//! ## Storage Layout
//!
//! ```text
//! ~/.cla-signatures/
//! ├── config.toml               # Service configuration
//! └── store.json                # Default JSON store
//! ```

use std::path::PathBuf;

/// Global directory name
const GLOBAL_DIR: &str = ".cla-signatures";

/// Config filename
const CONFIG_FILE: &str = "config.toml";

/// Default store filename
const STORE_FILE: &str = "store.json";

/// Get the global cla-signatures directory.
///
/// Returns `~/.cla-signatures/`.
#[must_use]
pub fn global_dir() -> PathBuf {
    dirs::home_dir().unwrap_or_else(|| PathBuf::from("~")).join(GLOBAL_DIR)
}

/// Get the config file path.
///
/// Returns `~/.cla-signatures/config.toml`.
#[must_use]
pub fn config_file() -> PathBuf {
    global_dir().join(CONFIG_FILE)
}

/// Get the default store path.
///
/// Returns `~/.cla-signatures/store.json`.
#[must_use]
pub fn default_store() -> PathBuf {
    global_dir().join(STORE_FILE)
}
