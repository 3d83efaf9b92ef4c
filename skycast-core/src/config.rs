use std::{fs, path::PathBuf, time::Duration};

use anyhow::{Context, Result, anyhow};
use directories::ProjectDirs;
use serde::{Deserialize, Serialize};

use crate::model::SelectedCity;
use crate::search;

/// A city pinned as the startup default.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CityConfig {
    pub name: String,
    pub latitude: f64,
    pub longitude: f64,
}

/// Top-level configuration stored on disk. Everything is optional; an
/// absent file means built-in defaults.
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct Config {
    /// Overrides the built-in startup city.
    pub default_city: Option<CityConfig>,

    /// Overrides the 300ms search debounce, in milliseconds.
    pub debounce_ms: Option<u64>,
}

impl Config {
    /// The city shown at startup: the configured one, or the built-in
    /// default when none is set.
    pub fn default_city(&self) -> SelectedCity {
        match &self.default_city {
            Some(city) => SelectedCity {
                name: city.name.clone(),
                lat: city.latitude,
                lon: city.longitude,
            },
            None => SelectedCity::default(),
        }
    }

    pub fn set_default_city(&mut self, city: &SelectedCity) {
        self.default_city = Some(CityConfig {
            name: city.name.clone(),
            latitude: city.lat,
            longitude: city.lon,
        });
    }

    pub fn debounce(&self) -> Duration {
        self.debounce_ms
            .map_or(search::DEBOUNCE, Duration::from_millis)
    }

    /// Load config from disk, or return an empty default if it doesn't exist yet.
    pub fn load() -> Result<Self> {
        let path = Self::config_file_path()?;
        if !path.exists() {
            // First run: no config file, return empty.
            return Ok(Self::default());
        }

        let contents = fs::read_to_string(&path)
            .with_context(|| format!("Failed to read config file: {}", path.display()))?;

        let cfg: Config = toml::from_str(&contents)
            .with_context(|| format!("Failed to parse config file: {}", path.display()))?;

        Ok(cfg)
    }

    /// Save config to disk, creating parent directories as needed.
    pub fn save(&self) -> Result<()> {
        let path = Self::config_file_path()?;

        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent).with_context(|| {
                format!("Failed to create config directory: {}", parent.display())
            })?;
        }

        let toml =
            toml::to_string_pretty(self).context("Failed to serialize configuration to TOML")?;

        fs::write(&path, toml)
            .with_context(|| format!("Failed to write config file: {}", path.display()))?;

        Ok(())
    }

    /// Path to the config file.
    pub fn config_file_path() -> Result<PathBuf> {
        let dirs = ProjectDirs::from("dev", "skycast", "skycast")
            .ok_or_else(|| anyhow!("Could not determine platform config directory"))?;

        Ok(dirs.config_dir().join("config.toml"))
    }
}
