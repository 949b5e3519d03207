pub mod cities;
pub mod codes;
pub mod envelope;
pub mod provider;

pub use cities::{find_city, MajorCity, MAJOR_CITIES};
pub use envelope::{Location, MetricMap, WeatherEnvelope};
pub use provider::{WeatherProvider, DEFAULT_FORECAST_DAYS};
