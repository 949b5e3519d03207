use serde::Deserialize;

use crate::weather::{Location, MetricMap, WeatherEnvelope};

/// Response from `GET /v1/forecast`.
///
/// Only the blocks requested through `current=`, `hourly=` and `daily=` are present.
#[derive(Debug, Clone, Deserialize)]
pub struct ForecastResponse {
    #[serde(default)]
    pub timezone: Option<String>,
    #[serde(default)]
    pub timezone_abbreviation: Option<String>,
    #[serde(default)]
    pub elevation: Option<f64>,
    #[serde(default)]
    pub current: Option<MetricMap>,
    #[serde(default)]
    pub current_units: Option<MetricMap>,
    #[serde(default)]
    pub hourly: Option<MetricMap>,
    #[serde(default)]
    pub hourly_units: Option<MetricMap>,
    #[serde(default)]
    pub daily: Option<MetricMap>,
    #[serde(default)]
    pub daily_units: Option<MetricMap>,
}

/// Body Open-Meteo sends with 4xx responses, e.g. `{"error":true,"reason":"..."}`
#[derive(Debug, Clone, Deserialize)]
pub struct ErrorResponse {
    #[serde(default)]
    pub reason: Option<String>,
}

impl ForecastResponse {
    fn location(&self, latitude: f64, longitude: f64) -> Location {
        Location {
            latitude,
            longitude,
            timezone: self.timezone.clone(),
            timezone_abbreviation: self.timezone_abbreviation.clone(),
            elevation: self.elevation,
        }
    }

    /// Keep only the current-conditions block.
    #[must_use]
    pub fn into_current(self, latitude: f64, longitude: f64) -> WeatherEnvelope {
        WeatherEnvelope {
            location: Some(self.location(latitude, longitude)),
            current: self.current,
            current_units: self.current_units,
            ..WeatherEnvelope::default()
        }
    }

    /// Keep only the hourly and daily blocks.
    #[must_use]
    pub fn into_forecast(self, latitude: f64, longitude: f64) -> WeatherEnvelope {
        WeatherEnvelope {
            location: Some(self.location(latitude, longitude)),
            hourly: self.hourly,
            hourly_units: self.hourly_units,
            daily: self.daily,
            daily_units: self.daily_units,
            ..WeatherEnvelope::default()
        }
    }
}
