use async_trait::async_trait;

use super::cities::{find_city, MajorCity, MAJOR_CITIES};
use super::envelope::WeatherEnvelope;
use crate::error::UpstreamError;

/// Forecast length used when the caller does not ask for one.
pub const DEFAULT_FORECAST_DAYS: u8 = 7;

/// Source of weather data.
///
/// [`crate::openmeteo::OpenMeteoClient`] is the production implementation;
/// tests plug in fakes to observe how often the upstream is hit.
#[async_trait]
pub trait WeatherProvider: Send + Sync {
    /// Current conditions at a coordinate.
    async fn current(
        &self,
        latitude: f64,
        longitude: f64,
    ) -> Result<WeatherEnvelope, UpstreamError>;

    /// Hourly and daily forecast at a coordinate.
    async fn forecast(
        &self,
        latitude: f64,
        longitude: f64,
        days: u8,
    ) -> Result<WeatherEnvelope, UpstreamError>;

    /// Current conditions plus the default forecast for a major city.
    ///
    /// Both upstream calls run concurrently and both must succeed.
    async fn by_city(&self, name: &str) -> Result<WeatherEnvelope, UpstreamError> {
        let city = *find_city(name)
            .ok_or_else(|| UpstreamError::CityNotFound(name.to_string()))?;

        let (current, forecast) = futures::try_join!(
            self.current(city.latitude, city.longitude),
            self.forecast(city.latitude, city.longitude, DEFAULT_FORECAST_DAYS),
        )?;

        Ok(WeatherEnvelope::for_city(city, current, forecast))
    }

    async fn major_cities(&self) -> Result<Vec<MajorCity>, UpstreamError> {
        Ok(MAJOR_CITIES.to_vec())
    }
}
