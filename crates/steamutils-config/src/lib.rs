//! Configuration management for steamutils
//!
//! A single TOML file under the user's config directory
//! (`~/.config/steamutils/config.toml` on Linux) holding the Steam location
//! and cleanup defaults.

mod steam_dirs;

pub use steam_dirs::{default_steam_dirs, resolve_steam_dir};

use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Configuration file not found: {0}")]
    NotFound(PathBuf),

    #[error("No Steam directory configured and none found in the default locations")]
    NoSteamDir,

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("TOML parse error: {0}")]
    TomlParse(#[from] toml::de::Error),

    #[error("TOML serialize error: {0}")]
    TomlSerialize(#[from] toml::ser::Error),
}

/// Application directory name under the platform config dir
pub const APP_DIR: &str = "steamutils";

/// Config file name
pub const CONFIG_FILE: &str = "config.toml";

/// Main steamutils configuration structure
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SteamUtilsConfig {
    #[serde(default)]
    pub library: LibraryConfig,

    #[serde(default)]
    pub cleanup: CleanupConfig,
}

/// Where the Steam installation lives
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct LibraryConfig {
    /// Installation root containing `steamapps/`
    pub steam_dir: Option<PathBuf>,
}

/// Defaults for the cleanup command
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct CleanupConfig {
    /// Report leftovers without deleting anything
    pub dry_run: bool,

    /// Offer to delete manifests whose install directory is gone
    pub manifests: bool,

    /// Offer to delete directories without a manifest
    pub directories: bool,
}

impl Default for CleanupConfig {
    fn default() -> Self {
        Self {
            dry_run: false,
            manifests: true,
            directories: true,
        }
    }
}

impl SteamUtilsConfig {
    /// Load configuration from a file
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        if !path.exists() {
            return Err(ConfigError::NotFound(path.to_path_buf()));
        }
        let contents = std::fs::read_to_string(path)?;
        let config: Self = toml::from_str(&contents)?;
        Ok(config)
    }

    /// Load configuration from the default location
    pub fn load_default() -> Result<Self, ConfigError> {
        Self::load_or_default(default_config_path())
    }

    /// Load `path` if it exists, otherwise fall back to defaults
    pub fn load_or_default(path: Option<PathBuf>) -> Result<Self, ConfigError> {
        if let Some(path) = path.filter(|p| p.exists()) {
            return Self::load(&path);
        }

        tracing::debug!("No configuration file found, using defaults");
        Ok(Self::default())
    }

    /// Save configuration to a file
    pub fn save(&self, path: &Path) -> Result<(), ConfigError> {
        let contents = toml::to_string_pretty(self)?;

        // Ensure parent directory exists
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }

        std::fs::write(path, contents)?;
        tracing::info!("Configuration saved to {}", path.display());
        Ok(())
    }
}

/// `<config dir>/steamutils/config.toml`, if the platform has a config dir
pub fn default_config_path() -> Option<PathBuf> {
    dirs::config_dir().map(|dir| dir.join(APP_DIR).join(CONFIG_FILE))
}
