use std::path::PathBuf;

use anyhow::{Context, Result};

/// Directory name used under the platform configuration directory
pub const APP_DIR_NAME: &str = "eq-inventory-search";
/// File name of the persisted settings
pub const SETTINGS_FILE_NAME: &str = "settings.json";
/// Environment variable that overrides the settings file location
pub const CONFIG_ENV_VAR: &str = "EQ_INVENTORY_SEARCH_CONFIG";

/// Get the default settings file path
///
/// - Linux: `~/.config/eq-inventory-search/settings.json`
/// - macOS: `~/Library/Application Support/eq-inventory-search/settings.json`
/// - Windows: `%APPDATA%\eq-inventory-search\settings.json`
pub fn default_settings_path() -> Result<PathBuf> {
    let config_dir = dirs::config_dir().context("Failed to get platform config directory")?;
    Ok(config_dir.join(APP_DIR_NAME).join(SETTINGS_FILE_NAME))
}

/// Resolve the settings file path, preferring an explicit override
pub fn resolve_settings_path(override_path: Option<PathBuf>) -> Result<PathBuf> {
    match override_path {
        Some(path) => Ok(path),
        None => default_settings_path(),
    }
}
