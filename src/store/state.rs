//! Session state types

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Temperature unit preference
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum DegreeUnit {
    #[default]
    Celsius,
    Fahrenheit,
}

impl DegreeUnit {
    pub fn as_str(self) -> &'static str {
        match self {
            DegreeUnit::Celsius => "celsius",
            DegreeUnit::Fahrenheit => "fahrenheit",
        }
    }

    /// Short symbol used when a reading carries no unit label of its own
    pub fn symbol(self) -> &'static str {
        match self {
            DegreeUnit::Celsius => "°C",
            DegreeUnit::Fahrenheit => "°F",
        }
    }
}

impl fmt::Display for DegreeUnit {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A user profile loaded from the profile list
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Profile {
    pub full_name: String,
    #[serde(default)]
    pub city: String,
    #[serde(default)]
    pub country: String,
    pub timezone: String,
    #[serde(default)]
    pub default_degree: DegreeUnit,
    pub latitude: f64,
    pub longitude: f64,
}

impl Profile {
    /// `fullName, city, country` with empty parts skipped
    pub fn display_label(&self) -> String {
        [
            self.full_name.as_str(),
            self.city.as_str(),
            self.country.as_str(),
        ]
        .into_iter()
        .filter(|part| !part.is_empty())
        .collect::<Vec<_>>()
        .join(", ")
    }
}

/// Replacement home location for the active profile
#[derive(Debug, Clone, PartialEq)]
pub struct CityUpdate {
    pub city: String,
    pub country: String,
    pub latitude: f64,
    pub longitude: f64,
    pub timezone: String,
}

/// One successful weather lookup
#[derive(Debug, Clone, PartialEq)]
pub struct TransactionLogEntry {
    pub timestamp: DateTime<Utc>,
    pub weather_summary: String,
}

/// Everything the session knows. Only the store produces new values.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct SessionState {
    pub active_profile: Option<Profile>,
    pub transaction_log: Vec<TransactionLogEntry>,
}

impl SessionState {
    pub fn new() -> Self {
        Self::default()
    }
}
