use serde::Serialize;
use utoipa::ToSchema;

/// A city that can be looked up by name through `/api/weather/city`.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, ToSchema)]
pub struct MajorCity {
    pub name: &'static str,
    pub country: &'static str,
    pub latitude: f64,
    pub longitude: f64,
}

const fn city(
    name: &'static str,
    country: &'static str,
    latitude: f64,
    longitude: f64,
) -> MajorCity {
    MajorCity {
        name,
        country,
        latitude,
        longitude,
    }
}

pub static MAJOR_CITIES: [MajorCity; 20] = [
    city("New York", "USA", 40.7128, -74.0060),
    city("Los Angeles", "USA", 34.0522, -118.2437),
    city("Chicago", "USA", 41.8781, -87.6298),
    city("Houston", "USA", 29.7604, -95.3698),
    city("Phoenix", "USA", 33.4484, -112.0740),
    city("Philadelphia", "USA", 39.9526, -75.1652),
    city("San Antonio", "USA", 29.4241, -98.4936),
    city("San Diego", "USA", 32.7157, -117.1611),
    city("Dallas", "USA", 32.7767, -96.7970),
    city("San Francisco", "USA", 37.7749, -122.4194),
    city("London", "UK", 51.5074, -0.1278),
    city("Paris", "France", 48.8566, 2.3522),
    city("Tokyo", "Japan", 35.6762, 139.6503),
    city("Beijing", "China", 39.9042, 116.4074),
    city("Sydney", "Australia", -33.8688, 151.2093),
    city("Rio de Janeiro", "Brazil", -22.9068, -43.1729),
    city("Cairo", "Egypt", 30.0444, 31.2357),
    city("Moscow", "Russia", 55.7558, 37.6173),
    city("Mumbai", "India", 19.0760, 72.8777),
    city("Mexico City", "Mexico", 19.4326, -99.1332),
];

/// Resolve a city by name, ignoring letter case.
///
/// Whitespace and diacritics are compared as given, so `" London"` does not match.
#[must_use]
pub fn find_city(name: &str) -> Option<&'static MajorCity> {
    let wanted = name.to_lowercase();
    MAJOR_CITIES
        .iter()
        .find(|c| c.name.to_lowercase() == wanted)
}
