//! Process configuration and session data loading

mod data;

pub use data::SessionData;

use crate::condition::ConditionError;
use crate::weather::{DEFAULT_FORECAST_URL, DEFAULT_GEOCODING_URL};
use std::path::PathBuf;
use std::time::Duration;
use thiserror::Error;

pub const DEFAULT_DATA_DIR: &str = "./data";
pub const DEFAULT_TIMEOUT_SECS: u64 = 10;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read {}: {source}", .path.display())]
    Io {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("failed to parse {}: {source}", .path.display())]
    Json {
        path: PathBuf,
        source: serde_json::Error,
    },

    #[error("{path}: {reason}")]
    InvalidNode { path: String, reason: String },

    #[error("{path}: invalid condition '{condition}': {source}")]
    Condition {
        path: String,
        condition: String,
        source: ConditionError,
    },

    #[error("prompt tree has no entries")]
    EmptyTree,

    #[error("profile list is empty")]
    NoProfiles,

    #[error("{count} profiles listed; at most {max} can be offered")]
    TooManyProfiles { count: usize, max: usize },

    #[error("invalid value for {name}: '{value}'")]
    InvalidEnv { name: &'static str, value: String },
}

/// Settings read from the environment
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AppConfig {
    pub data_dir: PathBuf,
    pub forecast_url: String,
    pub geocoding_url: String,
    pub timeout: Duration,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            data_dir: PathBuf::from(DEFAULT_DATA_DIR),
            forecast_url: DEFAULT_FORECAST_URL.to_string(),
            geocoding_url: DEFAULT_GEOCODING_URL.to_string(),
            timeout: Duration::from_secs(DEFAULT_TIMEOUT_SECS),
        }
    }
}

impl AppConfig {
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|name| std::env::var(name).ok())
    }

    fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, ConfigError> {
        let defaults = Self::default();
        let set = |name: &str| lookup(name).filter(|v| !v.trim().is_empty());

        let timeout = match set("WEATHER_CHAT_TIMEOUT_SECS") {
            Some(value) => match value.trim().parse::<u64>() {
                Ok(secs) if secs > 0 => Duration::from_secs(secs),
                _ => {
                    return Err(ConfigError::InvalidEnv {
                        name: "WEATHER_CHAT_TIMEOUT_SECS",
                        value,
                    })
                }
            },
            None => defaults.timeout,
        };

        Ok(Self {
            data_dir: set("WEATHER_CHAT_DATA_DIR").map_or(defaults.data_dir, PathBuf::from),
            forecast_url: set("WEATHER_CHAT_FORECAST_URL").unwrap_or(defaults.forecast_url),
            geocoding_url: set("WEATHER_CHAT_GEOCODING_URL").unwrap_or(defaults.geocoding_url),
            timeout,
        })
    }
}
