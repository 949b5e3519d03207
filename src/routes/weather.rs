use axum::{
    extract::{Path, Query, State},
    http::{header, HeaderValue},
    response::Response,
    Json,
};
use serde::Deserialize;
use utoipa::IntoParams;

use crate::common::AppState;
use crate::error::{AppError, AppResult};
use crate::routes::client::ClientId;
use crate::services::{Payload, SearchHistoryEntry};
use crate::weather::codes::{self, WeatherCode, WEATHER_CODES};
use crate::weather::DEFAULT_FORECAST_DAYS;

/// Open-Meteo serves at most 16 forecast days.
const MAX_FORECAST_DAYS: u8 = 16;

#[derive(Debug, Deserialize, IntoParams)]
pub struct CoordinatesQuery {
    /// Latitude in decimal degrees (-90 to 90)
    pub latitude: Option<String>,
    /// Longitude in decimal degrees (-180 to 180)
    pub longitude: Option<String>,
    /// Client identifier for search history (defaults to the caller's address)
    pub ip: Option<String>,
}

#[derive(Debug, Deserialize, IntoParams)]
pub struct ForecastQuery {
    /// Latitude in decimal degrees (-90 to 90)
    pub latitude: Option<String>,
    /// Longitude in decimal degrees (-180 to 180)
    pub longitude: Option<String>,
    /// Number of forecast days, 1-16 (default: 7)
    pub days: Option<String>,
    /// Client identifier for search history (defaults to the caller's address)
    pub ip: Option<String>,
}

#[derive(Debug, Deserialize, IntoParams)]
pub struct CityQuery {
    /// City name, matched case-insensitively against `/api/weather/cities`
    pub city: Option<String>,
    /// Client identifier for search history (defaults to the caller's address)
    pub ip: Option<String>,
}

#[derive(Debug, Deserialize, IntoParams)]
pub struct HistoryQuery {
    /// Client identifier (defaults to the caller's address)
    pub ip: Option<String>,
}

/// Treat absent and blank parameters alike.
fn present(value: Option<&String>) -> Option<&str> {
    value.map(String::as_str).filter(|v| !v.trim().is_empty())
}

/// Validate and parse a latitude/longitude pair.
///
/// # Errors
///
/// Returns `AppError::BadRequest` if either value is missing, not a number,
/// or outside the valid range.
pub fn parse_coordinates(
    latitude: Option<&String>,
    longitude: Option<&String>,
) -> AppResult<(f64, f64)> {
    let (Some(lat), Some(lon)) = (present(latitude), present(longitude)) else {
        return Err(AppError::BadRequest(
            "Latitude and longitude are required".to_string(),
        ));
    };

    let (Ok(lat), Ok(lon)) = (lat.trim().parse::<f64>(), lon.trim().parse::<f64>()) else {
        return Err(AppError::BadRequest(
            "Latitude and longitude must be numbers".to_string(),
        ));
    };

    if !(-90.0..=90.0).contains(&lat) {
        return Err(AppError::BadRequest(
            "Latitude must be between -90 and 90".to_string(),
        ));
    }
    if !(-180.0..=180.0).contains(&lon) {
        return Err(AppError::BadRequest(
            "Longitude must be between -180 and 180".to_string(),
        ));
    }

    Ok((lat, lon))
}

/// Parse the optional `days` parameter.
///
/// # Errors
///
/// Returns `AppError::BadRequest` unless the value is an integer in `1..=16`.
pub fn parse_days(days: Option<&String>) -> AppResult<u8> {
    let Some(raw) = present(days) else {
        return Ok(DEFAULT_FORECAST_DAYS);
    };

    raw.trim()
        .parse::<u8>()
        .ok()
        .filter(|d| (1..=MAX_FORECAST_DAYS).contains(d))
        .ok_or_else(|| {
            AppError::BadRequest(format!(
                "Days must be an integer between 1 and {MAX_FORECAST_DAYS}"
            ))
        })
}

/// Build a JSON response with an X-Cache header indicating hit/miss status.
fn json_response(payload: Payload) -> AppResult<Response> {
    let cache_header = if payload.cache_hit { "HIT" } else { "MISS" };
    Response::builder()
        .header(header::CONTENT_TYPE, HeaderValue::from_static("application/json"))
        .header("X-Cache", HeaderValue::from_static(cache_header))
        .body(axum::body::Body::from(payload.data))
        .map_err(|e| AppError::Internal(e.to_string()))
}

/// Current conditions at a coordinate
#[utoipa::path(
    get,
    path = "/api/weather/current",
    params(CoordinatesQuery),
    responses(
        (status = 200, description = "Current conditions", body = crate::weather::WeatherEnvelope),
        (status = 400, description = "Missing or invalid coordinates"),
        (status = 500, description = "Upstream provider failed"),
    ),
    tag = "weather"
)]
pub async fn get_current(
    State(state): State<AppState>,
    client: ClientId,
    Query(query): Query<CoordinatesQuery>,
) -> AppResult<Response> {
    let (latitude, longitude) =
        parse_coordinates(query.latitude.as_ref(), query.longitude.as_ref())?;

    let payload = state
        .weather
        .current(client.as_str(), latitude, longitude)
        .await?;

    json_response(payload)
}

/// Hourly and daily forecast at a coordinate
#[utoipa::path(
    get,
    path = "/api/weather/forecast",
    params(ForecastQuery),
    responses(
        (status = 200, description = "Forecast", body = crate::weather::WeatherEnvelope),
        (status = 400, description = "Missing or invalid parameters"),
        (status = 500, description = "Upstream provider failed"),
    ),
    tag = "weather"
)]
pub async fn get_forecast(
    State(state): State<AppState>,
    client: ClientId,
    Query(query): Query<ForecastQuery>,
) -> AppResult<Response> {
    let (latitude, longitude) =
        parse_coordinates(query.latitude.as_ref(), query.longitude.as_ref())?;
    let days = parse_days(query.days.as_ref())?;

    let payload = state
        .weather
        .forecast(client.as_str(), latitude, longitude, days)
        .await?;

    json_response(payload)
}

/// Current conditions and forecast for a major city
#[utoipa::path(
    get,
    path = "/api/weather/city",
    params(CityQuery),
    responses(
        (status = 200, description = "City weather", body = crate::weather::WeatherEnvelope),
        (status = 400, description = "Missing city name"),
        (status = 500, description = "Unknown city or upstream provider failed"),
    ),
    tag = "weather"
)]
pub async fn get_city(
    State(state): State<AppState>,
    client: ClientId,
    Query(query): Query<CityQuery>,
) -> AppResult<Response> {
    let Some(city) = present(query.city.as_ref()) else {
        return Err(AppError::BadRequest("City name is required".to_string()));
    };

    let payload = state.weather.city(client.as_str(), city).await?;

    json_response(payload)
}

/// List the cities available to `/api/weather/city`
#[utoipa::path(
    get,
    path = "/api/weather/cities",
    responses(
        (status = 200, description = "Major cities", body = Vec<crate::weather::MajorCity>),
    ),
    tag = "weather"
)]
pub async fn list_cities(State(state): State<AppState>) -> AppResult<Response> {
    let payload = state.weather.major_cities().await?;
    json_response(payload)
}

/// Most recent searches for a client, newest first
#[utoipa::path(
    get,
    path = "/api/weather/history",
    params(HistoryQuery),
    responses(
        (status = 200, description = "Up to 5 recent searches", body = Vec<SearchHistoryEntry>),
    ),
    tag = "history"
)]
pub async fn get_history(
    State(state): State<AppState>,
    client: ClientId,
) -> Json<Vec<SearchHistoryEntry>> {
    Json(state.weather.recent_searches(client.as_str()))
}

/// List WMO weather codes with descriptions
#[utoipa::path(
    get,
    path = "/api/weather/codes",
    responses(
        (status = 200, description = "Weather code table", body = Vec<WeatherCode>),
    ),
    tag = "weather"
)]
pub async fn list_codes() -> Json<Vec<WeatherCode>> {
    Json(WEATHER_CODES.to_vec())
}

/// Describe a single WMO weather code
#[utoipa::path(
    get,
    path = "/api/weather/codes/{code}",
    params(
        ("code" = u8, Path, description = "WMO weather code"),
    ),
    responses(
        (status = 200, description = "Weather code", body = WeatherCode),
        (status = 404, description = "Unknown code"),
    ),
    tag = "weather"
)]
pub async fn get_code(Path(code): Path<String>) -> AppResult<Json<WeatherCode>> {
    code.parse::<u8>()
        .ok()
        .and_then(codes::describe)
        .copied()
        .map(Json)
        .ok_or_else(|| AppError::NotFound(format!("Weather code '{code}' not found")))
}
