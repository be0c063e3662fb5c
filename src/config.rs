use std::{fs, path::Path};

use chrono_tz::Tz;
use serde::Deserialize;

use crate::{
    editor::{EditorOptions, StaleEntryPolicy},
    error::ConfigError,
    timing::weekday::Locale,
};

pub const DEFAULT_SCHEDULE_PATH: &str = "/prestations/{id}/schedule";

/// Application configuration, read from a JSON file. Every field is optional.
///
/// ```json
/// {
///     "locale": "fr",
///     "validate_ranges": true,
///     "timezone": "Europe/Paris",
///     "api": { "base_url": "https://api.example.com" }
/// }
/// ```
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct Config {
    pub locale: Locale,
    pub validate_ranges: bool,
    pub stale_entries: StaleEntryPolicy,
    pub timezone: String,
    pub log_level: String,
    pub api: Option<ApiConfig>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct ApiConfig {
    pub base_url: String,
    /// Path appended to `base_url`; `{id}` is replaced by the prestation id.
    #[serde(default = "default_schedule_path")]
    pub schedule_path: String,
    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,
}

fn default_schedule_path() -> String {
    DEFAULT_SCHEDULE_PATH.to_string()
}

fn default_timeout_secs() -> u64 {
    10
}

impl Default for Config {
    fn default() -> Self {
        Self {
            locale: Locale::default(),
            validate_ranges: false,
            stale_entries: StaleEntryPolicy::default(),
            timezone: "Europe/Paris".to_string(),
            log_level: "info".to_string(),
            api: None,
        }
    }
}

impl Config {
    pub fn from_config(config: &str) -> Result<Self, ConfigError> {
        let config: Self = serde_json::from_str(config)?;
        config.timezone()?;
        Ok(config)
    }

    pub fn from_file(path: &Path) -> Result<Self, ConfigError> {
        let text = fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_config(&text)
    }

    pub fn timezone(&self) -> Result<Tz, ConfigError> {
        self.timezone
            .parse()
            .map_err(|_| ConfigError::InvalidTimezone(self.timezone.clone()))
    }

    pub fn editor_options(&self) -> EditorOptions {
        EditorOptions {
            locale: self.locale,
            validate_ranges: self.validate_ranges,
            stale_entries: self.stale_entries,
        }
    }
}
