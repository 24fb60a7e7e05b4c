//! Service configuration
//!
//! Loaded from `~/.cla-signatures/config.toml`, then overridden by
//! environment variables:
//!
//! - `CLA_STORE` - path of the JSON store
//! - `GITHUB_TOKEN` - token used for GitHub API calls
//! - `GH_ORG_VALIDATION` - `false` disables the GitHub organization check
//!   when editing organization approval lists

use std::fs;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::adapters::github::DEFAULT_API_URL;
use crate::core::services::ServiceSettings;
use crate::paths;

/// Environment variable naming the store file
pub const ENV_STORE: &str = "CLA_STORE";
/// Environment variable holding the GitHub token
pub const ENV_GITHUB_TOKEN: &str = "GITHUB_TOKEN";
/// Environment variable toggling GitHub organization validation
pub const ENV_ORG_VALIDATION: &str = "GH_ORG_VALIDATION";

/// Service configuration
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ServiceConfig {
    /// Store settings
    #[serde(default)]
    pub store: StoreConfig,
    /// GitHub settings
    #[serde(default)]
    pub github: GitHubConfig,
    /// Email settings
    #[serde(default)]
    pub email: EmailConfig,
}

/// Store settings
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct StoreConfig {
    /// JSON store path (defaults to `~/.cla-signatures/store.json`)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub path: Option<PathBuf>,
}

/// GitHub settings
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GitHubConfig {
    /// API root
    #[serde(default = "default_api_url")]
    pub api_url: String,
    /// API token
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub token: Option<String>,
    /// Require organization membership to edit organization approval lists
    #[serde(default = "default_true")]
    pub org_validation: bool,
}

fn default_api_url() -> String {
    DEFAULT_API_URL.to_string()
}

const fn default_true() -> bool {
    true
}

impl Default for GitHubConfig {
    fn default() -> Self {
        Self {
            api_url: default_api_url(),
            token: None,
            org_validation: true,
        }
    }
}

/// Email settings
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EmailConfig {
    /// Sender address
    #[serde(default = "default_sender")]
    pub sender: String,
    /// Spool file messages are appended to as JSON lines; when unset,
    /// messages are only logged
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub spool: Option<PathBuf>,
}

fn default_sender() -> String {
    "noreply@cla-signatures.local".to_string()
}

impl Default for EmailConfig {
    fn default() -> Self {
        Self {
            sender: default_sender(),
            spool: None,
        }
    }
}

impl ServiceConfig {
    /// Default config file path
    #[must_use]
    pub fn config_path() -> PathBuf {
        paths::config_file()
    }

    /// Load the config file at `path`, or defaults if it does not exist
    ///
    /// # Errors
    ///
    /// Returns an error if the file exists but is not valid TOML.
    pub fn load_from(path: &Path) -> anyhow::Result<Self> {
        if !path.exists() {
            return Ok(Self::default());
        }
        let content = fs::read_to_string(path)?;
        toml::from_str(&content).map_err(|e| anyhow::anyhow!("invalid config {}: {e}", path.display()))
    }

    /// Load config from `path` (or the default location) and apply
    /// environment overrides
    ///
    /// # Errors
    ///
    /// Returns an error if the config file is invalid.
    pub fn load(path: Option<&Path>) -> anyhow::Result<Self> {
        let default_path = Self::config_path();
        let mut config = Self::load_from(path.unwrap_or(&default_path))?;
        config.apply_env();
        Ok(config)
    }

    /// Apply environment variable overrides
    pub fn apply_env(&mut self) {
        if let Ok(store) = std::env::var(ENV_STORE)
            && !store.trim().is_empty()
        {
            self.store.path = Some(PathBuf::from(store));
        }
        if let Ok(token) = std::env::var(ENV_GITHUB_TOKEN)
            && !token.trim().is_empty()
        {
            self.github.token = Some(token);
        }
        if let Ok(value) = std::env::var(ENV_ORG_VALIDATION) {
            self.github.org_validation = parse_flag(&value).unwrap_or(self.github.org_validation);
        }
    }

    /// Save config to `path`
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be written.
    pub fn save(&self, path: &Path) -> anyhow::Result<()> {
        if let Some(dir) = path.parent() {
            fs::create_dir_all(dir)?;
        }
        fs::write(path, toml::to_string_pretty(self)?)?;
        Ok(())
    }

    /// Store path, falling back to the default location
    #[must_use]
    pub fn store_path(&self) -> PathBuf {
        self.store.path.clone().unwrap_or_else(paths::default_store)
    }

    /// Service behaviour switches
    #[must_use]
    pub const fn settings(&self) -> ServiceSettings {
        ServiceSettings {
            github_org_validation: self.github.org_validation,
        }
    }
}

fn parse_flag(value: &str) -> Option<bool> {
    match value.trim().to_lowercase().as_str() {
        "1" | "true" | "yes" | "on" => Some(true),
        "0" | "false" | "no" | "off" => Some(false),
        _ => None,
    }
}
