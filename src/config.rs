use std::env;
use std::path::PathBuf;
use std::str::FromStr;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Deployment {
    Local,
    Dev,
    Stage,
    Prod,
}

impl Deployment {
    #[must_use]
    pub fn from_str(s: &str) -> Self {
        match s.to_lowercase().as_str() {
            "dev" | "development" => Self::Dev,
            "stage" | "staging" => Self::Stage,
            "prod" | "production" => Self::Prod,
            _ => Self::Local,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LogFormat {
    Text,
    Json,
}

impl LogFormat {
    #[must_use]
    pub fn from_str(s: &str) -> Self {
        if s.eq_ignore_ascii_case("json") {
            Self::Json
        } else {
            Self::Text
        }
    }
}

#[derive(Debug, Clone)]
pub struct Config {
    // Open-Meteo API
    pub upstream_base_url: String,
    pub upstream_timeout_seconds: Option<u64>,

    // API settings
    pub api_host: String,
    pub api_port: u16,

    // Rate limiting
    pub disable_rate_limiting: bool,
    pub rate_limit_per_second: u64,
    pub rate_limit_burst: u32,

    // Caching
    pub weather_cache_ttl_seconds: u64,
    pub cache_sweep_interval_seconds: u64,

    // Frontend assets
    pub static_dir: Option<PathBuf>,

    // Application metadata
    pub log_format: LogFormat,
    pub deployment: Deployment,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            upstream_base_url: "https://api.open-meteo.com/v1".to_string(),
            upstream_timeout_seconds: None,
            api_host: "0.0.0.0".to_string(),
            api_port: 3000,
            disable_rate_limiting: false,
            rate_limit_per_second: 10,
            rate_limit_burst: 60,
            weather_cache_ttl_seconds: 600, // 10 minutes
            cache_sweep_interval_seconds: 120,
            static_dir: None,
            log_format: LogFormat::Text,
            deployment: Deployment::Local,
        }
    }
}

impl Config {
    /// Load configuration from `.env` and environment variables.
    ///
    /// Every key is optional; unset keys fall back to [`Config::default`].
    ///
    /// # Errors
    ///
    /// Returns `ConfigError::Invalid` if a variable is set but cannot be parsed.
    pub fn from_env() -> Result<Self, ConfigError> {
        dotenvy::dotenv().ok();

        let defaults = Self::default();

        Ok(Self {
            // Open-Meteo API
            upstream_base_url: env::var("OPEN_METEO_BASE_URL")
                .map(|url| url.trim_end_matches('/').to_string())
                .unwrap_or(defaults.upstream_base_url),
            upstream_timeout_seconds: optional("UPSTREAM_TIMEOUT_SECONDS")?,

            // API settings
            api_host: env::var("API_HOST").unwrap_or(defaults.api_host),
            api_port: parsed("API_PORT", defaults.api_port)?,

            // Rate limiting
            disable_rate_limiting: parsed("DISABLE_RATE_LIMITING", defaults.disable_rate_limiting)?,
            rate_limit_per_second: parsed("RATE_LIMIT_PER_SECOND", defaults.rate_limit_per_second)?,
            rate_limit_burst: parsed("RATE_LIMIT_BURST", defaults.rate_limit_burst)?,

            // Caching
            weather_cache_ttl_seconds: parsed(
                "WEATHER_CACHE_TTL_SECONDS",
                defaults.weather_cache_ttl_seconds,
            )?,
            cache_sweep_interval_seconds: parsed(
                "CACHE_SWEEP_INTERVAL_SECONDS",
                defaults.cache_sweep_interval_seconds,
            )?,

            // Frontend assets
            static_dir: env::var("STATIC_DIR").ok().map(PathBuf::from),

            // Application metadata
            log_format: LogFormat::from_str(
                &env::var("LOG_FORMAT").unwrap_or_else(|_| "text".to_string()),
            ),
            deployment: Deployment::from_str(
                &env::var("DEPLOYMENT").unwrap_or_else(|_| "local".to_string()),
            ),
        })
    }

    #[must_use]
    pub fn bind_address(&self) -> String {
        format!("{}:{}", self.api_host, self.api_port)
    }
}

fn parsed<T: FromStr>(key: &'static str, default: T) -> Result<T, ConfigError> {
    Ok(optional(key)?.unwrap_or(default))
}

fn optional<T: FromStr>(key: &'static str) -> Result<Option<T>, ConfigError> {
    match env::var(key) {
        Ok(raw) if !raw.trim().is_empty() => raw
            .trim()
            .parse()
            .map(Some)
            .map_err(|_| ConfigError::Invalid { key, value: raw }),
        _ => Ok(None),
    }
}

#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Invalid value for environment variable {key}: {value:?}")]
    Invalid { key: &'static str, value: String },
}
