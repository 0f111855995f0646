//! Turning readings into user-facing text

use super::WeatherReading;
use crate::store::DegreeUnit;

/// Rough feel of a temperature, judged in Celsius
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Severity {
    Cold,
    Normal,
    Hot,
}

const COLD_BELOW_C: f64 = 10.0;
const HOT_ABOVE_C: f64 = 30.0;

pub fn fahrenheit_to_celsius(temp: f64) -> f64 {
    (temp - 32.0) * 5.0 / 9.0
}

pub fn severity(temp: f64, unit: DegreeUnit) -> Severity {
    let celsius = match unit {
        DegreeUnit::Celsius => temp,
        DegreeUnit::Fahrenheit => fahrenheit_to_celsius(temp),
    };
    if celsius > HOT_ABOVE_C {
        Severity::Hot
    } else if celsius < COLD_BELOW_C {
        Severity::Cold
    } else {
        Severity::Normal
    }
}

/// A reading for a named place, ready to show and log
#[derive(Debug, Clone, PartialEq)]
pub struct WeatherReport {
    pub place: String,
    pub timezone: String,
    pub reading: WeatherReading,
}

impl WeatherReport {
    pub fn severity(&self) -> Severity {
        severity(self.reading.apparent_temperature, self.reading.unit)
    }

    pub fn summary(&self) -> String {
        format!(
            "Temperature in {} was {}{} at {} {}",
            self.place,
            self.reading.apparent_temperature,
            self.reading.unit_label,
            self.reading.observed_at.format("%-I:%M:%S %p"),
            self.timezone
        )
    }
}
