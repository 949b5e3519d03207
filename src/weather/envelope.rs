use serde::Serialize;
use serde_json::{Map, Value};
use utoipa::ToSchema;

use super::cities::MajorCity;

/// Metric name to value (current block), values array (hourly/daily) or unit string.
pub type MetricMap = Map<String, Value>;

#[derive(Debug, Clone, PartialEq, Serialize, ToSchema)]
pub struct Location {
    /// Latitude as requested (not the grid cell the provider snapped to)
    pub latitude: f64,
    /// Longitude as requested
    pub longitude: f64,
    pub timezone: Option<String>,
    pub timezone_abbreviation: Option<String>,
    /// Metres above sea level
    pub elevation: Option<f64>,
}

/// Normalized weather payload returned by every weather endpoint.
///
/// Blocks that a given query does not fetch are omitted from the JSON.
#[derive(Debug, Clone, Default, PartialEq, Serialize, ToSchema)]
pub struct WeatherEnvelope {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub city: Option<MajorCity>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub location: Option<Location>,
    #[serde(skip_serializing_if = "Option::is_none")]
    #[schema(value_type = Option<Object>)]
    pub current: Option<MetricMap>,
    #[serde(skip_serializing_if = "Option::is_none")]
    #[schema(value_type = Option<Object>)]
    pub current_units: Option<MetricMap>,
    #[serde(skip_serializing_if = "Option::is_none")]
    #[schema(value_type = Option<Object>)]
    pub hourly: Option<MetricMap>,
    #[serde(skip_serializing_if = "Option::is_none")]
    #[schema(value_type = Option<Object>)]
    pub hourly_units: Option<MetricMap>,
    #[serde(skip_serializing_if = "Option::is_none")]
    #[schema(value_type = Option<Object>)]
    pub daily: Option<MetricMap>,
    #[serde(skip_serializing_if = "Option::is_none")]
    #[schema(value_type = Option<Object>)]
    pub daily_units: Option<MetricMap>,
}

impl WeatherEnvelope {
    /// Combine a current-conditions envelope and a forecast envelope for a named city.
    #[must_use]
    pub fn for_city(city: MajorCity, current: Self, forecast: Self) -> Self {
        Self {
            city: Some(city),
            location: current.location.or(forecast.location),
            current: current.current,
            current_units: current.current_units,
            hourly: forecast.hourly,
            hourly_units: forecast.hourly_units,
            daily: forecast.daily,
            daily_units: forecast.daily_units,
        }
    }
}
