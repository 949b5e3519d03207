pub mod client;
pub mod health;
mod rate_limit;
pub mod weather;

use axum::{routing::get, Router};
use std::sync::Arc;
use tower_governor::{governor::GovernorConfigBuilder, GovernorLayer};

use rate_limit::FallbackIpKeyExtractor;
use tower_http::{
    compression::CompressionLayer,
    cors::{Any, CorsLayer},
    limit::RequestBodyLimitLayer,
    services::{ServeDir, ServeFile},
    trace::TraceLayer,
};
use utoipa::OpenApi;
use utoipa_scalar::{Scalar, Servable};

use crate::common::AppState;
use crate::error::AppError;

#[derive(OpenApi)]
#[openapi(
    paths(
        health::healthz,
        weather::get_current,
        weather::get_forecast,
        weather::get_city,
        weather::list_cities,
        weather::get_history,
        weather::list_codes,
        weather::get_code,
    ),
    components(
        schemas(
            health::HealthResponse,
            crate::weather::WeatherEnvelope,
            crate::weather::Location,
            crate::weather::MajorCity,
            crate::weather::codes::WeatherCode,
            crate::weather::codes::Condition,
            crate::services::SearchHistoryEntry,
        )
    ),
    tags(
        (name = "health", description = "Health check endpoints"),
        (name = "weather", description = "Cached current conditions and forecasts"),
        (name = "history", description = "Per-client recent searches"),
    ),
    info(
        title = "Weather Proxy API",
        description = "Caching proxy for the Open-Meteo weather API",
        version = "0.1.0"
    )
)]
struct ApiDoc;

/// Assemble the application router.
///
/// # Errors
///
/// Returns `AppError::Internal` if the rate limiter configuration is rejected
/// (zero rate or burst).
pub fn build_router(state: AppState) -> Result<Router, AppError> {
    let config = &state.config;

    let weather_routes_base = Router::new()
        .route("/current", get(weather::get_current))
        .route("/forecast", get(weather::get_forecast))
        .route("/city", get(weather::get_city))
        .route("/cities", get(weather::list_cities))
        .route("/history", get(weather::get_history))
        .route("/codes", get(weather::list_codes))
        .route("/codes/{code}", get(weather::get_code));

    let weather_routes = if config.disable_rate_limiting {
        tracing::warn!("Rate limiting DISABLED");
        weather_routes_base
    } else {
        tracing::info!(
            rate = %format!("{}/s burst {}", config.rate_limit_per_second, config.rate_limit_burst),
            "Rate limiting configured"
        );

        let limiter = GovernorConfigBuilder::default()
            .key_extractor(FallbackIpKeyExtractor)
            .per_second(config.rate_limit_per_second)
            .burst_size(config.rate_limit_burst)
            .finish()
            .ok_or_else(|| AppError::Internal("Failed to create rate limiter".to_string()))?;

        weather_routes_base.layer(GovernorLayer {
            config: Arc::new(limiter),
        })
    }
    .layer(RequestBodyLimitLayer::new(1024 * 1024)); // 1MB body limit

    // Health check routes (NO rate limiting)
    let health_routes = Router::new().route("/healthz", get(health::healthz));

    // OpenAPI documentation
    let docs_routes = Router::new().merge(Scalar::with_url("/docs", ApiDoc::openapi()));

    let mut router = Router::new()
        .nest("/api/weather", weather_routes)
        .merge(health_routes)
        .merge(docs_routes);

    // Built frontend, with index.html as the fallback for client-side routes
    if let Some(dir) = &config.static_dir {
        tracing::info!(dir = %dir.display(), "Serving static files");
        router = router.fallback_service(
            ServeDir::new(dir).fallback(ServeFile::new(dir.join("index.html"))),
        );
    }

    Ok(router
        .layer(CompressionLayer::new())
        .layer(
            CorsLayer::new()
                .allow_origin(Any)
                .allow_methods(Any)
                .allow_headers(Any),
        )
        .layer(TraceLayer::new_for_http())
        .with_state(state))
}
