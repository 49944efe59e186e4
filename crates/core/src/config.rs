//! Application configuration layered from defaults, a TOML file and the environment.

use std::{
    fs,
    path::{Path, PathBuf},
};

use anyhow::{Context, Result};
use ::config::{Config, Environment, File};
use serde::{Deserialize, Serialize};
use tracing::info;

/// Directory under the platform config/data roots used by the application.
pub const APP_DIR: &str = "rideshare";
/// Prefix for environment overrides, e.g. `RIDESHARE_FLEET_PATH`.
pub const ENV_PREFIX: &str = "RIDESHARE";

/// Runtime settings for the dashboard.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AppConfig {
    /// JSON document holding users, drivers and trips.
    pub fleet_path: PathBuf,
    /// Reload the fleet document when it changes on disk.
    pub watch_fleet: bool,
    /// Directory receiving the log file.
    pub log_dir: PathBuf,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            fleet_path: dirs::data_dir()
                .unwrap_or_else(|| PathBuf::from("."))
                .join(APP_DIR)
                .join("fleet.json"),
            watch_fleet: true,
            log_dir: PathBuf::from("logs"),
        }
    }
}

impl AppConfig {
    /// Load configuration from the default file location.
    pub fn load() -> Result<Self> {
        Self::load_from(default_config_path())
    }

    /// Load configuration from `path`, falling back to defaults for anything unset.
    pub fn load_from(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let defaults = Self::default();
        let settings = Config::builder()
            .set_default("fleet_path", defaults.fleet_path.to_string_lossy().into_owned())?
            .set_default("watch_fleet", defaults.watch_fleet)?
            .set_default("log_dir", defaults.log_dir.to_string_lossy().into_owned())?
            .add_source(File::from(path).required(false))
            .add_source(Environment::with_prefix(ENV_PREFIX).try_parsing(true))
            .build()
            .with_context(|| format!("failed to read config {}", path.display()))?;

        settings
            .try_deserialize()
            .with_context(|| format!("invalid config {}", path.display()))
    }
}

/// Location of the user's config file.
pub fn default_config_path() -> PathBuf {
    dirs::config_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join(APP_DIR)
        .join("config.toml")
}

/// Write a default config file if none exists yet, returning its path.
pub fn ensure_default_config() -> Result<PathBuf> {
    let path = default_config_path();
    write_default_config(&path)?;
    Ok(path)
}

fn write_default_config(path: &Path) -> Result<()> {
    if path.exists() {
        return Ok(());
    }
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent)
            .with_context(|| format!("failed to create config directory {}", parent.display()))?;
    }

    let defaults = AppConfig::default();
    let contents = format!(
        "# RideShare dashboard settings\n\
         # Every key can be overridden with a {ENV_PREFIX}_<KEY> environment variable.\n\
         \n\
         fleet_path = {:?}\n\
         watch_fleet = {}\n\
         log_dir = {:?}\n",
        defaults.fleet_path.to_string_lossy(),
        defaults.watch_fleet,
        defaults.log_dir.to_string_lossy(),
    );
    fs::write(path, contents)
        .with_context(|| format!("failed to write config {}", path.display()))?;
    info!(path = %path.display(), "wrote default config");
    Ok(())
}
