use std::{env, path::PathBuf};

use chrono::{DateTime, FixedOffset};

use super::schema::Settings;
use crate::error::SettingsError;

/// Configuration loading helpers.
///
/// `Settings::load` tries environment variables first (prefix `VALENTINE__`), then an
/// optional config file and falls back to struct defaults.
impl Settings {
    /// Load settings from environment and optional config file.
    pub fn load() -> Result<Self, ::config::ConfigError> {
        let config_path = resolve_config_path();

        let mut builder = ::config::Config::builder();

        if let Some(path) = &config_path {
            builder = builder.add_source(::config::File::from(path.as_path()).required(false));
        }

        builder = builder.add_source(
            ::config::Environment::with_prefix("VALENTINE")
                .separator("__")
                .try_parsing(true),
        );

        let cfg = builder.build()?;
        let settings: Settings = cfg.try_deserialize()?;
        Ok(settings)
    }

    /// Perform basic validation checks on loaded settings.
    pub fn validate(&self) -> Result<(), SettingsError> {
        self.countdown_target()?;
        if self.countdown.tick_ms == 0 {
            return Err(SettingsError::OutOfRange {
                field: "countdown.tick_ms",
                expected: ">= 1",
            });
        }
        if self.loader.photo_cycle_ms == 0 {
            return Err(SettingsError::OutOfRange {
                field: "loader.photo_cycle_ms",
                expected: ">= 1",
            });
        }
        if self.grain.interval_ms == 0 {
            return Err(SettingsError::OutOfRange {
                field: "grain.interval_ms",
                expected: ">= 1",
            });
        }
        if !(0.0..=1.0).contains(&self.grain.density) {
            return Err(SettingsError::OutOfRange {
                field: "grain.density",
                expected: "between 0.0 and 1.0",
            });
        }
        Ok(())
    }

    /// The parsed countdown target.
    pub fn countdown_target(&self) -> Result<DateTime<FixedOffset>, SettingsError> {
        Ok(DateTime::parse_from_rfc3339(self.countdown.target.trim())?)
    }
}

/// Resolve the config path from `VALENTINE_CONFIG_PATH` or XDG defaults.
pub fn resolve_config_path() -> Option<PathBuf> {
    if let Some(p) = env::var_os("VALENTINE_CONFIG_PATH") {
        return Some(PathBuf::from(p));
    }
    default_config_path()
}

/// Compute the default config path under `$XDG_CONFIG_HOME/valentine/config.toml`
/// or `~/.config/valentine/config.toml` when `XDG_CONFIG_HOME` is not set.
pub fn default_config_path() -> Option<PathBuf> {
    let config_home = if let Some(xdg) = env::var_os("XDG_CONFIG_HOME") {
        Some(PathBuf::from(xdg))
    } else {
        env::var_os("HOME").map(|home| PathBuf::from(home).join(".config"))
    };

    config_home.map(|d| d.join("valentine").join("config.toml"))
}
