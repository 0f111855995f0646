//! Mock implementations for testing
//!
//! These mocks let the engine and dispatcher run without a terminal or
//! network.

use crate::console::{Console, Style};
use crate::store::{DegreeUnit, Profile};
use crate::weather::{GeoLocation, GeocodingClient, ServiceError, WeatherClient, WeatherReading};
use async_trait::async_trait;
use chrono::NaiveDate;
use std::collections::VecDeque;
use std::sync::Mutex;

// ============================================================================
// Fixtures
// ============================================================================

pub fn sample_profile() -> Profile {
    Profile {
        full_name: "Grace Hopper".to_string(),
        city: "New York".to_string(),
        country: "United States".to_string(),
        timezone: "America/New_York".to_string(),
        default_degree: DegreeUnit::Fahrenheit,
        latitude: 40.71,
        longitude: -74.01,
    }
}

pub fn reading(apparent_temperature: f64, unit: DegreeUnit) -> WeatherReading {
    WeatherReading {
        observed_at: NaiveDate::from_ymd_opt(2024, 3, 9)
            .unwrap()
            .and_hms_opt(9, 30, 0)
            .unwrap(),
        apparent_temperature,
        unit,
        unit_label: unit.symbol().to_string(),
    }
}

pub fn paris() -> GeoLocation {
    GeoLocation {
        name: "Paris".to_string(),
        country: "FR".to_string(),
        latitude: 48.85,
        longitude: 2.35,
        timezone: "Europe/Paris".to_string(),
    }
}

// ============================================================================
// Scripted Console
// ============================================================================

/// Console fed from a fixed list of input lines; records everything emitted
pub struct ScriptedConsole {
    inputs: VecDeque<String>,
    /// Everything emitted, in order
    pub output: Vec<(Style, String)>,
    /// Every prompt shown to the user
    pub prompts: Vec<String>,
}

impl ScriptedConsole {
    pub fn new(inputs: &[&str]) -> Self {
        Self {
            inputs: inputs.iter().map(|s| (*s).to_string()).collect(),
            output: Vec::new(),
            prompts: Vec::new(),
        }
    }

    /// All emitted text joined by newlines
    pub fn transcript(&self) -> String {
        self.output
            .iter()
            .map(|(_, text)| text.as_str())
            .collect::<Vec<_>>()
            .join("\n")
    }

    pub fn count(&self, style: Style) -> usize {
        self.output.iter().filter(|(s, _)| *s == style).count()
    }

    pub fn last(&self, style: Style) -> Option<&str> {
        self.output
            .iter()
            .rev()
            .find(|(s, _)| *s == style)
            .map(|(_, text)| text.as_str())
    }

    pub fn remaining_inputs(&self) -> usize {
        self.inputs.len()
    }
}

#[async_trait]
impl Console for ScriptedConsole {
    fn emit(&mut self, style: Style, text: &str) {
        self.output.push((style, text.to_string()));
    }

    async fn ask_line(&mut self, prompt: &str) -> std::io::Result<Option<String>> {
        self.prompts.push(prompt.to_string());
        Ok(self.inputs.pop_front())
    }
}

// ============================================================================
// Mock Weather Client
// ============================================================================

/// Weather client that returns queued readings
pub struct MockWeatherClient {
    responses: Mutex<VecDeque<Result<WeatherReading, ServiceError>>>,
    /// Record of all requests made
    pub requests: Mutex<Vec<(f64, f64, String, DegreeUnit)>>,
}

impl MockWeatherClient {
    pub fn new() -> Self {
        Self {
            responses: Mutex::new(VecDeque::new()),
            requests: Mutex::new(Vec::new()),
        }
    }

    pub fn queue_reading(&self, reading: WeatherReading) {
        self.responses.lock().unwrap().push_back(Ok(reading));
    }

    pub fn queue_error(&self, error: ServiceError) {
        self.responses.lock().unwrap().push_back(Err(error));
    }

    pub fn recorded_requests(&self) -> Vec<(f64, f64, String, DegreeUnit)> {
        self.requests.lock().unwrap().clone()
    }
}

#[async_trait]
impl WeatherClient for MockWeatherClient {
    async fn fetch_current(
        &self,
        latitude: f64,
        longitude: f64,
        timezone: &str,
        unit: DegreeUnit,
    ) -> Result<WeatherReading, ServiceError> {
        self.requests
            .lock()
            .unwrap()
            .push((latitude, longitude, timezone.to_string(), unit));
        self.responses
            .lock()
            .unwrap()
            .pop_front()
            .unwrap_or_else(|| Err(ServiceError::network("No mock response queued")))
    }
}

// ============================================================================
// Mock Geocoding Client
// ============================================================================

/// Geocoding client that returns queued result sets
pub struct MockGeocodingClient {
    responses: Mutex<VecDeque<Result<Vec<GeoLocation>, ServiceError>>>,
    /// Record of all searched names
    pub searches: Mutex<Vec<String>>,
}

impl MockGeocodingClient {
    pub fn new() -> Self {
        Self {
            responses: Mutex::new(VecDeque::new()),
            searches: Mutex::new(Vec::new()),
        }
    }

    pub fn queue_results(&self, results: Vec<GeoLocation>) {
        self.responses.lock().unwrap().push_back(Ok(results));
    }

    pub fn queue_error(&self, error: ServiceError) {
        self.responses.lock().unwrap().push_back(Err(error));
    }

    pub fn recorded_searches(&self) -> Vec<String> {
        self.searches.lock().unwrap().clone()
    }
}

#[async_trait]
impl GeocodingClient for MockGeocodingClient {
    async fn search(&self, name: &str) -> Result<Vec<GeoLocation>, ServiceError> {
        self.searches.lock().unwrap().push(name.to_string());
        self.responses
            .lock()
            .unwrap()
            .pop_front()
            .unwrap_or_else(|| Ok(Vec::new()))
    }
}
