//! Configuration for the cleaner and its hosts
//!
//! Loaded from an optional TOML file, then overlaid by `KEYMAP_CLEANER_*`
//! environment variables:
//!
//! ```toml
//! app_folder = "Code - Insiders"
//! extensions_dirs = ["/home/me/.vscode-insiders/extensions"]
//! commands_file = "/home/me/commands.json"
//! log_level = "debug"
//! ```

use std::path::{Path, PathBuf};

use config::{Config, Environment, File};
use serde::{Deserialize, Serialize};

use crate::error::ConfigError;
use crate::target::default_keybindings_path;

/// Default label stamped on diagnostics
pub const DEFAULT_DIAGNOSTIC_SOURCE: &str = "keymap-cleaner";

/// Default folder name of the editor under the platform config dir
pub const DEFAULT_APP_FOLDER: &str = "Code";

/// Prefix of environment overrides
pub const ENV_PREFIX: &str = "KEYMAP_CLEANER";

/// Cleaner configuration
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct CleanerConfig {
    /// Editor folder under the platform config dir (`Code`, `Code - Insiders`, ...)
    pub app_folder: String,
    /// Explicit keybindings file, overriding the derived default
    pub keybindings_path: Option<PathBuf>,
    /// JSON snapshot of the host's command lists
    pub commands_file: Option<PathBuf>,
    /// Directories holding installed extensions
    pub extensions_dirs: Vec<PathBuf>,
    /// Label stamped on diagnostics
    pub diagnostic_source: String,
    pub log_level: String,
}

impl Default for CleanerConfig {
    fn default() -> Self {
        Self {
            app_folder: DEFAULT_APP_FOLDER.to_string(),
            keybindings_path: None,
            commands_file: None,
            extensions_dirs: default_extensions_dirs(),
            diagnostic_source: DEFAULT_DIAGNOSTIC_SOURCE.to_string(),
            log_level: "info".to_string(),
        }
    }
}

impl CleanerConfig {
    /// Default config file location
    pub fn default_path() -> PathBuf {
        dirs::config_dir()
            .unwrap_or_else(|| PathBuf::from("."))
            .join("keymap-cleaner")
            .join("config.toml")
    }

    /// Load from `path` (missing file is fine) plus environment overrides
    pub fn load_from(path: &Path) -> Result<Self, ConfigError> {
        let builder = Config::builder()
            .add_source(File::from(path.to_path_buf()).required(false))
            .add_source(Environment::with_prefix(ENV_PREFIX));

        let config = builder
            .build()
            .map_err(|e| ConfigError::Parse(e.to_string()))?;
        let loaded: CleanerConfig = config
            .try_deserialize()
            .map_err(|e| ConfigError::Parse(e.to_string()))?;

        loaded.validate()?;
        Ok(loaded)
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.app_folder.trim().is_empty() {
            return Err(ConfigError::Validation(
                "app_folder must not be empty".to_string(),
            ));
        }
        if self.diagnostic_source.trim().is_empty() {
            return Err(ConfigError::Validation(
                "diagnostic_source must not be empty".to_string(),
            ));
        }
        Ok(())
    }

    /// Keybindings file this configuration targets
    pub fn resolved_keybindings_path(&self) -> Option<PathBuf> {
        self.keybindings_path
            .clone()
            .or_else(|| default_keybindings_path(&self.app_folder))
    }

    /// Render as TOML
    pub fn to_toml_string(&self) -> Result<String, ConfigError> {
        toml::to_string_pretty(self).map_err(|e| ConfigError::Serialization(e.to_string()))
    }
}

fn default_extensions_dirs() -> Vec<PathBuf> {
    dirs::home_dir()
        .map(|home| vec![home.join(".vscode").join("extensions")])
        .unwrap_or_default()
}
