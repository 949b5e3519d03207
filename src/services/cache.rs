//! Response caching for the weather endpoints.
//!
//! Entries hold the serialized JSON payload and carry their own TTL:
//!
//! | Payload | TTL |
//! |---------|-----|
//! | Current / forecast / city weather | `WEATHER_CACHE_TTL_SECONDS` (600s default) |
//! | `ttl = None` | never expires |
//!
//! Expiry is enforced on read: an entry inserted at `t` with TTL `d` is
//! absent from `t + d` onwards. Memory held by expired entries is reclaimed
//! by [`run_sweeper`], which is an optimization only.
//!
//! # Usage
//!
//! ```text
//! let key = cache::cache_key("current", &[&lat.to_string(), &lon.to_string()]);
//! let (data, hit) = cache
//!     .get_or_try_insert_with(key, Some(ttl), async { fetch_and_encode().await })
//!     .await?;
//! ```

use axum::body::Bytes;
use moka::{future::Cache, Expiry};
use std::future::Future;
use std::sync::Arc;
use std::time::{Duration, Instant};
use tokio::time::interval;

/// Cached payload plus the TTL it was stored with
#[derive(Clone)]
pub struct CachedResponse {
    pub data: Bytes,
    pub ttl: Option<Duration>,
}

/// Each entry expires after its own `ttl`, also when overwritten.
struct PerEntryTtl;

impl Expiry<String, CachedResponse> for PerEntryTtl {
    fn expire_after_create(
        &self,
        _key: &String,
        value: &CachedResponse,
        _created_at: Instant,
    ) -> Option<Duration> {
        value.ttl
    }

    fn expire_after_update(
        &self,
        _key: &String,
        value: &CachedResponse,
        _updated_at: Instant,
        _duration_until_expiry: Option<Duration>,
    ) -> Option<Duration> {
        value.ttl
    }
}

/// Build a cache key from a prefix and components.
///
/// Components are joined with `_`. Empty components are kept so that
/// different queries produce different keys.
pub fn cache_key(prefix: &str, components: &[&str]) -> String {
    let mut key = prefix.to_string();
    for c in components {
        key.push('_');
        key.push_str(c);
    }
    key
}

/// Key/value store with per-entry expiration. Cloning shares the same store.
#[derive(Clone)]
pub struct ResponseCache {
    inner: Cache<String, CachedResponse>,
}

impl Default for ResponseCache {
    fn default() -> Self {
        Self::new()
    }
}

impl ResponseCache {
    #[must_use]
    pub fn new() -> Self {
        Self {
            inner: Cache::builder().expire_after(PerEntryTtl).build(),
        }
    }

    /// Return the payload stored under `key` unless its TTL has elapsed.
    pub async fn get(&self, key: &str) -> Option<Bytes> {
        match self.inner.get(key).await {
            Some(cached) => {
                tracing::debug!(cache_key = %key, "cache_hit");
                Some(cached.data)
            }
            None => {
                tracing::debug!(cache_key = %key, "cache_miss");
                None
            }
        }
    }

    /// Store `data` under `key`, replacing any previous entry.
    ///
    /// `ttl = None` keeps the entry until it is invalidated or the process exits.
    pub async fn set(&self, key: String, data: impl Into<Bytes>, ttl: Option<Duration>) {
        let data = data.into();
        let size = data.len();
        self.inner
            .insert(key.clone(), CachedResponse { data, ttl })
            .await;

        tracing::debug!(
            cache_key = %key,
            size_bytes = size,
            ttl = ?ttl,
            "cache_stored"
        );
    }

    /// Return the cached payload, or run `init` and cache what it produces.
    ///
    /// The boolean is `true` on a cache hit. Concurrent callers missing on
    /// the same key wait for a single `init` run. Errors are returned to
    /// every waiter and nothing is stored.
    pub async fn get_or_try_insert_with<F, E>(
        &self,
        key: String,
        ttl: Option<Duration>,
        init: F,
    ) -> Result<(Bytes, bool), Arc<E>>
    where
        F: Future<Output = Result<Bytes, E>>,
        E: Send + Sync + 'static,
    {
        let entry = self
            .inner
            .entry(key)
            .or_try_insert_with(async move {
                init.await.map(|data| CachedResponse { data, ttl })
            })
            .await?;

        let cache_hit = !entry.is_fresh();
        if cache_hit {
            tracing::debug!(cache_key = %entry.key(), "cache_hit");
        } else {
            tracing::debug!(
                cache_key = %entry.key(),
                size_bytes = entry.value().data.len(),
                ttl = ?ttl,
                "cache_stored"
            );
        }

        Ok((entry.into_value().data, cache_hit))
    }

    /// Manually drop one entry.
    pub async fn invalidate(&self, key: &str) {
        self.inner.invalidate(key).await;
        tracing::debug!(cache_key = %key, "cache_invalidated");
    }

    /// Run moka's pending maintenance, evicting expired entries.
    ///
    /// Expiry is tracked on a timer wheel with roughly one second of
    /// granularity, so an entry is evicted up to ~1 s after its TTL elapses.
    /// Reads never return an expired entry in the meantime.
    pub async fn sweep(&self) {
        self.inner.run_pending_tasks().await;
    }

    /// Approximate number of stored entries; exact right after [`Self::sweep`].
    #[must_use]
    pub fn entry_count(&self) -> u64 {
        self.inner.entry_count()
    }
}

/// Sweep expired entries every `period` for the lifetime of the process.
pub async fn run_sweeper(cache: ResponseCache, period: Duration) {
    tracing::info!(period_secs = period.as_secs(), "Starting cache sweeper");

    let mut ticker = interval(period);
    // First tick completes immediately; nothing to sweep at startup
    ticker.tick().await;

    loop {
        ticker.tick().await;
        cache.sweep().await;
        tracing::debug!(entries = cache.entry_count(), "cache_swept");
    }
}
