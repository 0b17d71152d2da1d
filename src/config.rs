//! Configuration file loading.

use std::path::{Path, PathBuf};

use serde::Deserialize;

/// Top-level configuration.
#[derive(Debug, Default, Deserialize)]
pub struct Config {
    /// Prompt defaults.
    #[serde(default)]
    pub defaults: DefaultsConfig,
}

/// Values pre-filled in the prompts.
#[derive(Debug, Deserialize)]
#[serde(default)]
pub struct DefaultsConfig {
    /// Default answer to "What file do you want to mark?".
    pub input_file: String,
    /// Default answer to "Type your watermark name:".
    pub watermark_file: String,
}

impl Default for DefaultsConfig {
    fn default() -> Self {
        Self { input_file: "test.jpg".to_string(), watermark_file: "logo.png".to_string() }
    }
}

impl Config {
    /// Load configuration from the given path, or return defaults.
    ///
    /// # Errors
    ///
    /// Returns an error if the file exists but cannot be parsed.
    pub fn load(path: &Path) -> Result<Self, String> {
        if !path.exists() {
            return Ok(Self::default());
        }
        let contents = std::fs::read_to_string(path)
            .map_err(|e| format!("Failed to read config {}: {e}", path.display()))?;
        toml::from_str(&contents)
            .map_err(|e| format!("Failed to parse config {}: {e}", path.display()))
    }
}

/// Discover the config file path using the resolution order:
/// 1. Explicit path (from `--config` flag)
/// 2. `WATERMARK_CONFIG` environment variable
/// 3. `~/.config/watermark-manager/config.toml`
#[must_use]
pub fn discover_config_path(explicit: Option<&str>) -> PathBuf {
    if let Some(p) = explicit {
        return PathBuf::from(p);
    }

    if let Ok(p) = std::env::var("WATERMARK_CONFIG") {
        return PathBuf::from(p);
    }

    default_config_path()
}

/// Default config path: `~/.config/watermark-manager/config.toml`.
fn default_config_path() -> PathBuf {
    if let Ok(home) = std::env::var("HOME") {
        PathBuf::from(home).join(".config/watermark-manager/config.toml")
    } else {
        PathBuf::from("watermark-manager.toml")
    }
}
