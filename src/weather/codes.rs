//! WMO weather interpretation codes as reported by Open-Meteo in the
//! `weather_code` fields of the current, hourly and daily blocks.

use serde::Serialize;
use utoipa::ToSchema;

/// Coarse condition bucket a code falls into.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, ToSchema)]
#[serde(rename_all = "snake_case")]
pub enum Condition {
    Clear,
    PartlyCloudy,
    Overcast,
    Fog,
    Drizzle,
    Rain,
    Snow,
    Thunderstorm,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, ToSchema)]
pub struct WeatherCode {
    pub code: u8,
    pub description: &'static str,
    pub condition: Condition,
}

const fn code(code: u8, description: &'static str, condition: Condition) -> WeatherCode {
    WeatherCode {
        code,
        description,
        condition,
    }
}

pub static WEATHER_CODES: [WeatherCode; 28] = [
    code(0, "Clear sky", Condition::Clear),
    code(1, "Mainly clear", Condition::PartlyCloudy),
    code(2, "Partly cloudy", Condition::PartlyCloudy),
    code(3, "Overcast", Condition::Overcast),
    code(45, "Fog", Condition::Fog),
    code(48, "Fog", Condition::Fog),
    code(51, "Light drizzle", Condition::Drizzle),
    code(53, "Moderate drizzle", Condition::Drizzle),
    code(55, "Dense drizzle", Condition::Drizzle),
    code(56, "Light freezing drizzle", Condition::Drizzle),
    code(57, "Dense freezing drizzle", Condition::Drizzle),
    code(61, "Slight rain", Condition::Rain),
    code(63, "Moderate rain", Condition::Rain),
    code(65, "Heavy rain", Condition::Rain),
    code(66, "Light freezing rain", Condition::Rain),
    code(67, "Heavy freezing rain", Condition::Rain),
    code(71, "Slight snow fall", Condition::Snow),
    code(73, "Moderate snow fall", Condition::Snow),
    code(75, "Heavy snow fall", Condition::Snow),
    code(77, "Snow grains", Condition::Snow),
    code(80, "Slight rain showers", Condition::Rain),
    code(81, "Moderate rain showers", Condition::Rain),
    code(82, "Violent rain showers", Condition::Rain),
    code(85, "Slight snow showers", Condition::Snow),
    code(86, "Heavy snow showers", Condition::Snow),
    code(95, "Thunderstorm", Condition::Thunderstorm),
    code(96, "Thunderstorm with hail", Condition::Thunderstorm),
    code(99, "Thunderstorm with hail", Condition::Thunderstorm),
];

/// Look up a single code. Codes outside the WMO table return `None`.
#[must_use]
pub fn describe(value: u8) -> Option<&'static WeatherCode> {
    WEATHER_CODES.iter().find(|c| c.code == value)
}
