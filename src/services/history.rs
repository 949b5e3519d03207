use chrono::{DateTime, Utc};
use dashmap::DashMap;
use serde::Serialize;
use std::collections::VecDeque;
use std::sync::Arc;
use utoipa::ToSchema;

/// Most searches remembered per client.
pub const MAX_HISTORY_ITEMS: usize = 5;

/// Client id used when no address can be determined.
pub const DEFAULT_CLIENT_ID: &str = "default";

/// What a client searched for.
#[derive(Debug, Clone, PartialEq)]
pub enum SearchQuery {
    Coordinates { latitude: f64, longitude: f64 },
    City { city: String },
}

/// One remembered search, tagged by `type` in JSON.
#[derive(Debug, Clone, PartialEq, Serialize, ToSchema)]
#[serde(tag = "type", rename_all = "lowercase")]
pub enum SearchHistoryEntry {
    Coordinates {
        latitude: f64,
        longitude: f64,
        timestamp: DateTime<Utc>,
    },
    City {
        city: String,
        timestamp: DateTime<Utc>,
    },
}

impl SearchHistoryEntry {
    fn new(query: SearchQuery, timestamp: DateTime<Utc>) -> Self {
        match query {
            SearchQuery::Coordinates {
                latitude,
                longitude,
            } => Self::Coordinates {
                latitude,
                longitude,
                timestamp,
            },
            SearchQuery::City { city } => Self::City { city, timestamp },
        }
    }

    /// Same kind of search with the same parameters.
    ///
    /// Coordinates compare with exact `f64` equality and city names are
    /// case-sensitive, so `"paris"` and `"Paris"` are distinct entries.
    #[must_use]
    pub fn matches(&self, query: &SearchQuery) -> bool {
        match (self, query) {
            (
                Self::Coordinates {
                    latitude,
                    longitude,
                    ..
                },
                SearchQuery::Coordinates {
                    latitude: lat,
                    longitude: lon,
                },
            ) => latitude == lat && longitude == lon,
            (Self::City { city, .. }, SearchQuery::City { city: wanted }) => city == wanted,
            _ => false,
        }
    }

    #[must_use]
    pub fn timestamp(&self) -> DateTime<Utc> {
        match self {
            Self::Coordinates { timestamp, .. } | Self::City { timestamp, .. } => *timestamp,
        }
    }
}

/// Per-client recency lists, most recent first.
///
/// Lists never expire; they live until the process exits. Cloning shares
/// the same store.
#[derive(Clone)]
pub struct SearchHistory {
    lists: Arc<DashMap<String, VecDeque<SearchHistoryEntry>>>,
    limit: usize,
}

impl Default for SearchHistory {
    fn default() -> Self {
        Self::with_limit(MAX_HISTORY_ITEMS)
    }
}

impl SearchHistory {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn with_limit(limit: usize) -> Self {
        Self {
            lists: Arc::new(DashMap::new()),
            limit,
        }
    }

    /// Record a search for `client_id`, stamped with the current time.
    pub fn record(&self, client_id: &str, query: SearchQuery) {
        self.record_at(client_id, query, Utc::now());
    }

    /// Record a search with an explicit timestamp.
    ///
    /// An earlier identical search is moved to the front instead of being
    /// duplicated. The list is then truncated to the limit.
    pub fn record_at(&self, client_id: &str, query: SearchQuery, timestamp: DateTime<Utc>) {
        // Entry guard holds the shard lock for the whole read-modify-write
        let mut list = self.lists.entry(client_id.to_string()).or_default();

        if let Some(pos) = list.iter().position(|entry| entry.matches(&query)) {
            list.remove(pos);
        }
        list.push_front(SearchHistoryEntry::new(query, timestamp));
        list.truncate(self.limit);

        tracing::debug!(client_id = %client_id, entries = list.len(), "history_recorded");
    }

    /// Recent searches for `client_id`, most recent first.
    #[must_use]
    pub fn list(&self, client_id: &str) -> Vec<SearchHistoryEntry> {
        self.lists
            .get(client_id)
            .map(|list| list.iter().cloned().collect())
            .unwrap_or_default()
    }
}
