use std::sync::Arc;
use std::time::Duration;

use crate::config::Config;
use crate::services::WeatherService;
use crate::weather::WeatherProvider;

#[derive(Clone)]
pub struct AppState {
    pub config: Arc<Config>,
    pub weather: Arc<WeatherService>,
}

impl AppState {
    pub fn new(config: Config, provider: Arc<dyn WeatherProvider>) -> Self {
        let weather = WeatherService::new(
            provider,
            Duration::from_secs(config.weather_cache_ttl_seconds),
        );

        Self {
            config: Arc::new(config),
            weather: Arc::new(weather),
        }
    }
}
