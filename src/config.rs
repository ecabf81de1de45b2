//! Configuration loading and validation.
//!
//! Settings live in `nowfetch.toml` under the XDG config directory. All
//! fields are optional; missing values fall back to the defaults in
//! [`crate::constants`]. A missing file is created with commented defaults
//! on first load.
//!
//! ```toml
//! #[Fetch]
//! max_delay_ms = 3000  # Upper bound for the simulated fetch delay (0-60000) ms
//!
//! #[Display]
//! format = "medium"    # Date/time preset: "short", "medium", "long", "full"
//! debug = false        # Trace successfully fetched timestamps
//! ```

use anyhow::{Context, Result};
use serde::Deserialize;
use std::fs;
use std::path::{Path, PathBuf};
use std::time::Duration;

use crate::constants::*;
use crate::format::FormatPreset;

const DEFAULT_CONFIG_CONTENTS: &str = r#"#[Fetch]
max_delay_ms = 3000  # Upper bound for the simulated fetch delay (0-60000) ms

#[Display]
format = "medium"    # Date/time preset: "short", "medium", "long", "full"
debug = false        # Trace successfully fetched timestamps
"#;

/// Application configuration with optional fields and validated ranges.
#[derive(Debug, Deserialize, Clone, Default)]
pub struct Config {
    /// Upper bound for the simulated fetch delay in milliseconds (0-60000)
    pub max_delay_ms: Option<u64>,
    /// Format preset for the displayed date/time
    pub format: Option<FormatPreset>,
    /// Trace successfully fetched timestamps
    pub debug: Option<bool>,
}

impl Config {
    /// Delay ceiling for the fetcher, defaulted.
    pub fn max_delay(&self) -> Duration {
        Duration::from_millis(self.max_delay_ms.unwrap_or(DEFAULT_MAX_DELAY_MS))
    }

    /// Display preset, defaulted to medium.
    pub fn format(&self) -> FormatPreset {
        self.format.unwrap_or_default()
    }

    /// Debug trace flag, defaulted off.
    pub fn debug(&self) -> bool {
        self.debug.unwrap_or(DEFAULT_DEBUG)
    }
}

/// Path of the configuration file under the XDG config directory.
pub fn get_config_path() -> Result<PathBuf> {
    let config_dir = dirs::config_dir().context("Could not determine config directory")?;
    Ok(config_dir.join("nowfetch").join(CONFIG_FILE))
}

/// Load the configuration, creating a default file if none exists.
pub fn load() -> Result<Config> {
    let path = get_config_path()?;
    if !path.exists() {
        create_default_config(&path)?;
        log_indented!("Created default configuration at {}", path.display());
    }
    load_from_path(&path)
}

/// Load and validate the configuration at a specific path.
pub fn load_from_path(path: &Path) -> Result<Config> {
    let contents = fs::read_to_string(path)
        .with_context(|| format!("Failed to read config file: {}", path.display()))?;

    let config: Config = toml::from_str(&contents)
        .with_context(|| format!("Failed to parse config file: {}", path.display()))?;

    validate(&config)?;
    Ok(config)
}

/// Write the commented default configuration to `path`.
pub fn create_default_config(path: &Path) -> Result<()> {
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent)
            .with_context(|| format!("Failed to create config directory: {}", parent.display()))?;
    }
    fs::write(path, DEFAULT_CONFIG_CONTENTS)
        .with_context(|| format!("Failed to write default config: {}", path.display()))
}

fn validate(config: &Config) -> Result<()> {
    if let Some(delay) = config.max_delay_ms
        && delay > MAX_DELAY_MS_LIMIT
    {
        anyhow::bail!(
            "max_delay_ms must be at most {MAX_DELAY_MS_LIMIT} (got {delay}). \
             Delays above one minute make the demo look permanently stuck."
        );
    }
    Ok(())
}
