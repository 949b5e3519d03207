use axum::body::Bytes;
use serde::Serialize;
use std::future::Future;
use std::sync::Arc;
use std::time::Duration;

use crate::error::{AppError, AppResult, UpstreamError};
use crate::services::cache::{cache_key, ResponseCache};
use crate::services::history::{SearchHistory, SearchHistoryEntry, SearchQuery};
use crate::weather::WeatherProvider;

/// Serialized payload and whether it came from the cache.
#[derive(Debug, Clone)]
pub struct Payload {
    pub data: Bytes,
    pub cache_hit: bool,
}

/// Owns the response cache and search history and fronts the upstream provider.
///
/// Every lookup follows the same path: derive a key, serve from cache when
/// fresh, otherwise fetch and store; then record the search for the client.
/// History is only recorded for successful lookups.
pub struct WeatherService {
    provider: Arc<dyn WeatherProvider>,
    cache: ResponseCache,
    history: SearchHistory,
    weather_ttl: Duration,
}

impl WeatherService {
    #[must_use]
    pub fn new(provider: Arc<dyn WeatherProvider>, weather_ttl: Duration) -> Self {
        Self {
            provider,
            cache: ResponseCache::new(),
            history: SearchHistory::new(),
            weather_ttl,
        }
    }

    #[must_use]
    pub fn cache(&self) -> &ResponseCache {
        &self.cache
    }

    #[must_use]
    pub fn history(&self) -> &SearchHistory {
        &self.history
    }

    /// Current conditions at a coordinate. Cached under `current_{lat}_{lon}`.
    pub async fn current(
        &self,
        client_id: &str,
        latitude: f64,
        longitude: f64,
    ) -> AppResult<Payload> {
        let key = cache_key("current", &[&latitude.to_string(), &longitude.to_string()]);

        let payload = self
            .cached(
                key,
                "Failed to fetch current weather data",
                self.provider.current(latitude, longitude),
            )
            .await?;

        self.history.record(
            client_id,
            SearchQuery::Coordinates {
                latitude,
                longitude,
            },
        );
        Ok(payload)
    }

    /// Forecast at a coordinate. Cached under `forecast_{lat}_{lon}_{days}`.
    pub async fn forecast(
        &self,
        client_id: &str,
        latitude: f64,
        longitude: f64,
        days: u8,
    ) -> AppResult<Payload> {
        let key = cache_key(
            "forecast",
            &[&latitude.to_string(), &longitude.to_string(), &days.to_string()],
        );

        let payload = self
            .cached(
                key,
                "Failed to fetch forecast data",
                self.provider.forecast(latitude, longitude, days),
            )
            .await?;

        self.history.record(
            client_id,
            SearchQuery::Coordinates {
                latitude,
                longitude,
            },
        );
        Ok(payload)
    }

    /// Current plus forecast for a major city. Cached under `city_{name}` with
    /// the name exactly as given.
    pub async fn city(&self, client_id: &str, name: &str) -> AppResult<Payload> {
        let key = cache_key("city", &[name]);

        let payload = self
            .cached(
                key,
                "Failed to fetch weather data for this city",
                self.provider.by_city(name),
            )
            .await?;

        self.history.record(
            client_id,
            SearchQuery::City {
                city: name.to_string(),
            },
        );
        Ok(payload)
    }

    /// The static major-city list. Not recorded in history.
    pub async fn major_cities(&self) -> AppResult<Payload> {
        self.cached(
            "major_cities".to_string(),
            "Failed to fetch major cities data",
            self.provider.major_cities(),
        )
        .await
    }

    #[must_use]
    pub fn recent_searches(&self, client_id: &str) -> Vec<SearchHistoryEntry> {
        self.history.list(client_id)
    }

    async fn cached<T, F>(
        &self,
        key: String,
        message: &'static str,
        fetch: F,
    ) -> AppResult<Payload>
    where
        T: Serialize,
        F: Future<Output = Result<T, UpstreamError>>,
    {
        let (data, cache_hit) = self
            .cache
            .get_or_try_insert_with(key, Some(self.weather_ttl), async move {
                let value = fetch.await?;
                Ok::<_, UpstreamError>(Bytes::from(serde_json::to_vec(&value)?))
            })
            .await
            .map_err(AppError::upstream(message))?;

        Ok(Payload { data, cache_hit })
    }
}
