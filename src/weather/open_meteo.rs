//! Open-Meteo forecast and geocoding client

use super::{GeoLocation, GeocodingClient, ServiceError, WeatherClient, WeatherReading};
use crate::store::DegreeUnit;
use async_trait::async_trait;
use chrono::NaiveDateTime;
use reqwest::Client;
use serde::de::DeserializeOwned;
use serde::Deserialize;
use std::time::{Duration, Instant};

pub const DEFAULT_FORECAST_URL: &str = "https://api.open-meteo.com/v1/forecast";
pub const DEFAULT_GEOCODING_URL: &str = "https://geocoding-api.open-meteo.com/v1/search";

/// Number of candidates requested from the geocoding service
const SEARCH_RESULT_COUNT: &str = "5";

pub struct OpenMeteoClient {
    client: Client,
    forecast_url: String,
    geocoding_url: String,
}

impl OpenMeteoClient {
    pub fn new(
        forecast_url: impl Into<String>,
        geocoding_url: impl Into<String>,
        timeout: Duration,
    ) -> Result<Self, ServiceError> {
        let client = Client::builder().timeout(timeout).build()?;
        Ok(Self {
            client,
            forecast_url: forecast_url.into(),
            geocoding_url: geocoding_url.into(),
        })
    }

    async fn get_json<T: DeserializeOwned>(
        &self,
        url: &str,
        query: &[(&str, String)],
    ) -> Result<T, ServiceError> {
        let start = Instant::now();
        let result = self.send(url, query).await;
        let duration = start.elapsed();

        match &result {
            Ok(_) => tracing::info!(
                url,
                duration_ms = %duration.as_millis(),
                "Weather service request completed"
            ),
            Err(e) => tracing::warn!(
                url,
                duration_ms = %duration.as_millis(),
                kind = e.kind.as_str(),
                error = %e.message,
                "Weather service request failed"
            ),
        }

        result
    }

    async fn send<T: DeserializeOwned>(
        &self,
        url: &str,
        query: &[(&str, String)],
    ) -> Result<T, ServiceError> {
        let response = self.client.get(url).query(query).send().await?;
        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(ServiceError::status(format!("{status}: {body}")));
        }
        Ok(response.json::<T>().await?)
    }
}

#[async_trait]
impl WeatherClient for OpenMeteoClient {
    async fn fetch_current(
        &self,
        latitude: f64,
        longitude: f64,
        timezone: &str,
        unit: DegreeUnit,
    ) -> Result<WeatherReading, ServiceError> {
        let query = [
            ("latitude", latitude.to_string()),
            ("longitude", longitude.to_string()),
            ("current", "apparent_temperature".to_string()),
            ("timezone", timezone.to_string()),
            ("temperature_unit", unit.as_str().to_string()),
        ];
        let response: ForecastResponse = self.get_json(&self.forecast_url, &query).await?;
        parse_forecast(response, unit)
    }
}

#[async_trait]
impl GeocodingClient for OpenMeteoClient {
    async fn search(&self, name: &str) -> Result<Vec<GeoLocation>, ServiceError> {
        let query = [
            ("name", name.to_string()),
            ("count", SEARCH_RESULT_COUNT.to_string()),
        ];
        let response: SearchResponse = self.get_json(&self.geocoding_url, &query).await?;
        Ok(response.results.unwrap_or_default())
    }
}

// ============================================================================
// Wire types
// ============================================================================

#[derive(Debug, Deserialize)]
struct ForecastResponse {
    current: Option<CurrentWeather>,
    current_units: Option<CurrentUnits>,
}

#[derive(Debug, Deserialize)]
struct CurrentWeather {
    time: String,
    apparent_temperature: f64,
}

#[derive(Debug, Deserialize)]
struct CurrentUnits {
    apparent_temperature: String,
}

#[derive(Debug, Deserialize)]
struct SearchResponse {
    results: Option<Vec<GeoLocation>>,
}

/// `requested` stands in when the service leaves the unit label blank
fn parse_forecast(
    response: ForecastResponse,
    requested: DegreeUnit,
) -> Result<WeatherReading, ServiceError> {
    let (Some(current), Some(units)) = (response.current, response.current_units) else {
        return Err(ServiceError::decode("Data field is not present"));
    };

    let observed_at = NaiveDateTime::parse_from_str(&current.time, "%Y-%m-%dT%H:%M")
        .or_else(|_| NaiveDateTime::parse_from_str(&current.time, "%Y-%m-%dT%H:%M:%S"))
        .map_err(|e| ServiceError::decode(format!("bad time '{}': {e}", current.time)))?;

    // Labels look like "°C" / "°F"
    let label = units.apparent_temperature.trim();
    let (unit, unit_label) = if label.is_empty() {
        (requested, requested.symbol().to_string())
    } else if label.to_ascii_uppercase().contains('F') {
        (DegreeUnit::Fahrenheit, label.to_string())
    } else {
        (DegreeUnit::Celsius, label.to_string())
    };

    Ok(WeatherReading {
        observed_at,
        apparent_temperature: current.apparent_temperature,
        unit,
        unit_label,
    })
}
