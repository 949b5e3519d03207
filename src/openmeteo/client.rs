use async_trait::async_trait;
use reqwest::Client;
use serde::de::DeserializeOwned;
use std::time::Duration;

use crate::config::Config;
use crate::error::UpstreamError;
use crate::openmeteo::models::{ErrorResponse, ForecastResponse};
use crate::weather::{WeatherEnvelope, WeatherProvider};

const CURRENT_FIELDS: &str = "temperature_2m,relative_humidity_2m,apparent_temperature,is_day,\
precipitation,rain,showers,snowfall,weather_code,cloud_cover,pressure_msl,surface_pressure,\
wind_speed_10m,wind_direction_10m,wind_gusts_10m";

const HOURLY_FIELDS: &str = "temperature_2m,relative_humidity_2m,apparent_temperature,\
precipitation_probability,precipitation,rain,showers,snowfall,weather_code,cloud_cover,\
visibility,wind_speed_10m,wind_direction_10m,wind_gusts_10m";

const DAILY_FIELDS: &str = "weather_code,temperature_2m_max,temperature_2m_min,\
apparent_temperature_max,apparent_temperature_min,sunrise,sunset,uv_index_max,\
precipitation_sum,rain_sum,showers_sum,snowfall_sum,precipitation_hours,\
precipitation_probability_max,wind_speed_10m_max,wind_gusts_10m_max,wind_direction_10m_dominant";

pub struct OpenMeteoClient {
    http_client: Client,
    base_url: String,
}

impl OpenMeteoClient {
    /// Build a client for the configured Open-Meteo base URL.
    ///
    /// No request timeout is applied unless `UPSTREAM_TIMEOUT_SECONDS` is set.
    ///
    /// # Errors
    ///
    /// Returns the underlying `reqwest::Error` if the TLS backend cannot be initialized.
    pub fn new(config: &Config) -> Result<Self, reqwest::Error> {
        let mut builder = Client::builder().user_agent(concat!(
            env!("CARGO_PKG_NAME"),
            "/",
            env!("CARGO_PKG_VERSION")
        ));
        if let Some(secs) = config.upstream_timeout_seconds {
            builder = builder.timeout(Duration::from_secs(secs));
        }

        Ok(Self {
            http_client: builder.build()?,
            base_url: config.upstream_base_url.clone(),
        })
    }

    #[must_use]
    pub fn forecast_url(&self) -> String {
        format!("{}/forecast", self.base_url)
    }

    /// Issue a `/forecast` call and decode the body.
    async fn get_forecast<T: DeserializeOwned>(
        &self,
        params: &[(&str, String)],
    ) -> Result<T, UpstreamError> {
        let url = self.forecast_url();
        tracing::debug!(url = %url, ?params, "upstream_request");

        let response = self
            .http_client
            .get(&url)
            .query(params)
            .send()
            .await
            .map_err(|e| UpstreamError::Request(e.to_string()))?;

        let status = response.status();
        let text = response
            .text()
            .await
            .map_err(|e| UpstreamError::Request(format!("Failed to get response text: {e}")))?;

        if !status.is_success() {
            let reason = serde_json::from_str::<ErrorResponse>(&text)
                .ok()
                .and_then(|body| body.reason)
                .unwrap_or(text);
            return Err(UpstreamError::Status {
                status: status.as_u16(),
                reason,
            });
        }

        serde_json::from_str(&text).map_err(|e| {
            tracing::error!(
                error = %e,
                body_preview = %text.chars().take(500).collect::<String>(),
                "Failed to parse forecast response"
            );
            UpstreamError::Parse(e.to_string())
        })
    }
}

#[async_trait]
impl WeatherProvider for OpenMeteoClient {
    async fn current(
        &self,
        latitude: f64,
        longitude: f64,
    ) -> Result<WeatherEnvelope, UpstreamError> {
        let response: ForecastResponse = self
            .get_forecast(&[
                ("latitude", latitude.to_string()),
                ("longitude", longitude.to_string()),
                ("current", CURRENT_FIELDS.to_string()),
            ])
            .await?;

        Ok(response.into_current(latitude, longitude))
    }

    async fn forecast(
        &self,
        latitude: f64,
        longitude: f64,
        days: u8,
    ) -> Result<WeatherEnvelope, UpstreamError> {
        let response: ForecastResponse = self
            .get_forecast(&[
                ("latitude", latitude.to_string()),
                ("longitude", longitude.to_string()),
                ("forecast_days", days.to_string()),
                ("hourly", HOURLY_FIELDS.to_string()),
                ("daily", DAILY_FIELDS.to_string()),
            ])
            .await?;

        Ok(response.into_forecast(latitude, longitude))
    }
}
