//! Weather and geocoding services
//!
//! The session only sees the two client traits; `OpenMeteoClient` is the
//! production implementation of both.

mod error;
mod open_meteo;
mod report;

pub use error::{ServiceError, ServiceErrorKind};
pub use open_meteo::{OpenMeteoClient, DEFAULT_FORECAST_URL, DEFAULT_GEOCODING_URL};
pub use report::{Severity, WeatherReport};

use crate::store::DegreeUnit;
use async_trait::async_trait;
use chrono::NaiveDateTime;
use serde::Deserialize;
use std::sync::Arc;

/// Current apparent temperature at a location
#[derive(Debug, Clone, PartialEq)]
pub struct WeatherReading {
    /// Local time at the location
    pub observed_at: NaiveDateTime,
    pub apparent_temperature: f64,
    pub unit: DegreeUnit,
    /// Unit as labelled by the service, e.g. `°C`
    pub unit_label: String,
}

/// A geocoding candidate
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct GeoLocation {
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub country: String,
    #[serde(default)]
    pub latitude: f64,
    #[serde(default)]
    pub longitude: f64,
    #[serde(default)]
    pub timezone: String,
}

impl GeoLocation {
    /// Named, in a country, and at real non-zero coordinates
    pub fn is_selectable(&self) -> bool {
        !self.name.trim().is_empty()
            && !self.country.trim().is_empty()
            && valid_coordinate(self.latitude, 90.0)
            && valid_coordinate(self.longitude, 180.0)
    }

    pub fn display_label(&self) -> String {
        format!("{}, {}", self.name, self.country)
    }
}

fn valid_coordinate(value: f64, limit: f64) -> bool {
    value.is_finite() && value != 0.0 && value.abs() <= limit
}

/// Keep only candidates a user can meaningfully pick
pub fn selectable_locations(candidates: Vec<GeoLocation>) -> Vec<GeoLocation> {
    candidates
        .into_iter()
        .filter(GeoLocation::is_selectable)
        .collect()
}

/// Source of current weather readings
#[async_trait]
pub trait WeatherClient: Send + Sync {
    async fn fetch_current(
        &self,
        latitude: f64,
        longitude: f64,
        timezone: &str,
        unit: DegreeUnit,
    ) -> Result<WeatherReading, ServiceError>;
}

/// Name-to-location search
#[async_trait]
pub trait GeocodingClient: Send + Sync {
    /// An empty result is a valid answer, not an error
    async fn search(&self, name: &str) -> Result<Vec<GeoLocation>, ServiceError>;
}

// ============================================================================
// Arc implementations for shared clients
// ============================================================================

#[async_trait]
impl<T: WeatherClient + ?Sized> WeatherClient for Arc<T> {
    async fn fetch_current(
        &self,
        latitude: f64,
        longitude: f64,
        timezone: &str,
        unit: DegreeUnit,
    ) -> Result<WeatherReading, ServiceError> {
        (**self)
            .fetch_current(latitude, longitude, timezone, unit)
            .await
    }
}

#[async_trait]
impl<T: GeocodingClient + ?Sized> GeocodingClient for Arc<T> {
    async fn search(&self, name: &str) -> Result<Vec<GeoLocation>, ServiceError> {
        (**self).search(name).await
    }
}
