//! Steam installation discovery

use crate::{ConfigError, SteamUtilsConfig};
use std::path::{Path, PathBuf};
use tracing::debug;

/// Usual Steam installation roots for the current platform, most likely first
pub fn default_steam_dirs() -> Vec<PathBuf> {
    let mut candidates = Vec::new();

    if let Some(home) = dirs::home_dir() {
        candidates.push(home.join(".steam").join("steam"));
        candidates.push(home.join(".local").join("share").join("Steam"));
        // Flatpak
        candidates.push(
            home.join(".var")
                .join("app")
                .join("com.valvesoftware.Steam")
                .join(".local")
                .join("share")
                .join("Steam"),
        );
        // macOS
        candidates.push(
            home.join("Library")
                .join("Application Support")
                .join("Steam"),
        );
    }

    if cfg!(windows) {
        candidates.push(PathBuf::from(r"C:\Program Files (x86)\Steam"));
        candidates.push(PathBuf::from(r"C:\Program Files\Steam"));
    }

    candidates
}

/// Pick the Steam directory to catalog
///
/// An explicit override wins, then `library.steam_dir` from the config, then
/// the first default location that contains `steamapps/`.
pub fn resolve_steam_dir(
    override_dir: Option<&Path>,
    config: &SteamUtilsConfig,
) -> Result<PathBuf, ConfigError> {
    resolve_from(override_dir, config, &default_steam_dirs())
}

fn resolve_from(
    override_dir: Option<&Path>,
    config: &SteamUtilsConfig,
    candidates: &[PathBuf],
) -> Result<PathBuf, ConfigError> {
    if let Some(dir) = override_dir {
        return Ok(dir.to_path_buf());
    }

    if let Some(dir) = &config.library.steam_dir {
        return Ok(dir.clone());
    }

    for candidate in candidates {
        if candidate.join("steamapps").is_dir() {
            debug!("Using Steam directory {}", candidate.display());
            return Ok(candidate.clone());
        }
    }

    Err(ConfigError::NoSteamDir)
}
