pub mod cache;
pub mod history;
pub mod weather;

pub use cache::ResponseCache;
pub use history::{SearchHistory, SearchHistoryEntry, SearchQuery};
pub use weather::{Payload, WeatherService};
