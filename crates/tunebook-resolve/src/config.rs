use anyhow::{Context, Result};
use confyg::{env, Confygery};
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// Configuration for tunebook.
///
/// Configuration is loaded from multiple sources with the following priority:
/// 1. CLI arguments (highest priority)
/// 2. Environment variables (TUNEBOOK_* prefix)
/// 3. Config file (~/.config/tunebook/config.toml)
/// 4. Built-in defaults (lowest priority)
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    /// Directory for the cached Session data dump.
    ///
    /// Can be set via:
    /// - CLI: --data-dir /path
    /// - ENV: TUNEBOOK_DATA_DIR
    /// - Config: data_dir = "/path"
    /// - Default: platform data dir + "tunebook"
    #[serde(default = "default_data_dir")]
    pub data_dir: PathBuf,

    /// Never download: use only locally cached dump data and fail fast
    /// when it is missing.
    #[serde(default)]
    pub offline: bool,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            data_dir: default_data_dir(),
            offline: false,
        }
    }
}

impl Config {
    /// Load configuration from file and environment variables.
    ///
    /// Searches for config file at: ~/.config/tunebook/config.toml
    /// Reads environment variables with TUNEBOOK_ prefix.
    ///
    /// # Errors
    ///
    /// Returns an error if the config file exists but cannot be parsed.
    pub fn load() -> Result<Self> {
        let config_path = config_file_path();

        let mut builder = Confygery::new().context("Failed to create config builder")?;

        if config_path.exists() {
            let path_str = config_path
                .to_str()
                .ok_or_else(|| anyhow::anyhow!("Config path contains invalid UTF-8"))?;
            builder
                .add_file(path_str)
                .context("Failed to load config file")?;
        }

        let env_opts = env::Options::with_top_level("tunebook");
        builder
            .add_env(env_opts)
            .context("Failed to load environment variables")?;

        let config: Self = builder.build().context("Failed to build configuration")?;

        Ok(config)
    }
}

/// Get the default dump cache directory.
///
/// Returns: ~/.local/share/tunebook (or platform equivalent)
#[must_use]
pub fn default_data_dir() -> PathBuf {
    dirs::data_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join("tunebook")
}

/// Get the config file path.
///
/// Returns:
/// - Linux: ~/.config/tunebook/config.toml
/// - macOS: ~/Library/Application Support/tunebook/config.toml
/// - Windows: %APPDATA%\tunebook\config.toml
#[must_use]
pub fn config_file_path() -> PathBuf {
    dirs::config_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join("tunebook")
        .join("config.toml")
}

/// Get the example config file content.
#[must_use]
pub fn example_config() -> &'static str {
    r#"# Tunebook Configuration File
#
# Configuration is loaded from multiple sources with the following priority:
# 1. CLI arguments (highest priority)
# 2. Environment variables (TUNEBOOK_* prefix)
# 3. This config file
# 4. Built-in defaults (lowest priority)

# Directory for the cached Session data dump (tunes.json.gz, aliases.json.gz)
#
# Can also be set via:
# - CLI: tunebook --data-dir /path render setlist.txt
# - Environment: TUNEBOOK_DATA_DIR=/path
#
# Default: Platform-specific data directory
#data_dir = "/path/to/tunebook-data"

# Never download tune data; use only the local cache
#offline = true
"#
}

/// Create default config file if it doesn't exist.
///
/// Returns true if a new file was created, false if it already existed.
pub fn ensure_config_file() -> Result<bool> {
    let config_path = config_file_path();

    if config_path.exists() {
        return Ok(false);
    }
    if let Some(parent) = config_path.parent() {
        std::fs::create_dir_all(parent).context("Failed to create config directory")?;
    }
    std::fs::write(&config_path, example_config()).context("Failed to write config file")?;

    Ok(true)
}
