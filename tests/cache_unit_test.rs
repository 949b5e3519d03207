//! Unit tests for the response cache.
//!
//! Run with: cargo test --test cache_unit_test

use std::sync::atomic::{AtomicUsize, Ordering};
use std::time::Duration;

use axum::body::Bytes;
use tokio_test::{assert_err, assert_ok};
use weather_proxy::services::cache::{self, ResponseCache};

#[test]
fn cache_key_builds_correctly() {
    // Basic key building
    assert_eq!(cache::cache_key("major_cities", &[]), "major_cities");
    assert_eq!(
        cache::cache_key("forecast", &["40.7128", "-74.006", "7"]),
        "forecast_40.7128_-74.006_7"
    );

    // Empty components preserved (ensures query uniqueness)
    assert_ne!(
        cache::cache_key("city", &["Paris", ""]),
        cache::cache_key("city", &["Paris"])
    );
}

#[test]
fn cache_key_uses_shortest_float_form() {
    let lat: f64 = "40.7128".parse().unwrap();
    let lon: f64 = "-74.0060".parse().unwrap();
    assert_eq!(
        cache::cache_key("current", &[&lat.to_string(), &lon.to_string()]),
        "current_40.7128_-74.006"
    );
}

#[tokio::test]
async fn get_returns_value_before_ttl() {
    let cache = ResponseCache::new();
    cache
        .set("k".to_string(), b"{\"a\":1}".to_vec(), Some(Duration::from_secs(60)))
        .await;

    assert_eq!(cache.get("k").await, Some(Bytes::from_static(b"{\"a\":1}")));
    assert_eq!(cache.get("other").await, None);
}

#[tokio::test]
async fn get_is_absent_once_ttl_elapsed() {
    let cache = ResponseCache::new();
    cache
        .set("k".to_string(), b"1".to_vec(), Some(Duration::from_millis(100)))
        .await;
    assert!(cache.get("k").await.is_some());

    tokio::time::sleep(Duration::from_millis(300)).await;

    assert_eq!(cache.get("k").await, None);
}

#[tokio::test]
async fn entries_without_ttl_do_not_expire() {
    let cache = ResponseCache::new();
    cache.set("forever".to_string(), b"1".to_vec(), None).await;
    cache
        .set("short".to_string(), b"2".to_vec(), Some(Duration::from_millis(50)))
        .await;

    tokio::time::sleep(Duration::from_millis(200)).await;

    assert!(cache.get("forever").await.is_some());
    assert!(cache.get("short").await.is_none());
}

#[tokio::test]
async fn overwrite_takes_the_new_ttl() {
    let cache = ResponseCache::new();
    cache.set("k".to_string(), b"old".to_vec(), None).await;
    cache
        .set("k".to_string(), b"new".to_vec(), Some(Duration::from_millis(50)))
        .await;
    assert_eq!(cache.get("k").await, Some(Bytes::from_static(b"new")));

    tokio::time::sleep(Duration::from_millis(200)).await;

    assert_eq!(cache.get("k").await, None);
}

#[tokio::test]
async fn sweep_drops_expired_entries() {
    let cache = ResponseCache::new();
    for i in 0..3 {
        cache
            .set(format!("short_{i}"), b"x".to_vec(), Some(Duration::from_millis(50)))
            .await;
    }
    cache.set("long".to_string(), b"y".to_vec(), None).await;
    cache.sweep().await;
    assert_eq!(cache.entry_count(), 4);

    // Reads see expiry immediately
    tokio::time::sleep(Duration::from_millis(200)).await;
    for i in 0..3 {
        assert_eq!(cache.get(&format!("short_{i}")).await, None);
    }

    // Eviction runs on a ~1 s timer wheel
    tokio::time::sleep(Duration::from_millis(1500)).await;
    cache.sweep().await;

    assert_eq!(cache.entry_count(), 1);
    assert!(cache.get("long").await.is_some());
}

#[tokio::test]
async fn entry_is_absent_at_exactly_its_ttl() {
    let cache = ResponseCache::new();
    cache
        .set("k".to_string(), b"1".to_vec(), Some(Duration::ZERO))
        .await;

    assert_eq!(cache.get("k").await, None);
}

#[tokio::test]
async fn get_or_try_insert_with_reports_hit_and_miss() {
    let cache = ResponseCache::new();
    let calls = &AtomicUsize::new(0);

    let init = move || async move {
        calls.fetch_add(1, Ordering::SeqCst);
        Ok::<_, std::io::Error>(Bytes::from_static(b"payload"))
    };

    let (first, hit) = assert_ok!(
        cache
            .get_or_try_insert_with("k".to_string(), Some(Duration::from_secs(60)), init())
            .await
    );
    assert!(!hit);
    assert_eq!(first, Bytes::from_static(b"payload"));

    let (second, hit) = assert_ok!(
        cache
            .get_or_try_insert_with("k".to_string(), Some(Duration::from_secs(60)), init())
            .await
    );
    assert!(hit);
    assert_eq!(second, first);
    assert_eq!(calls.load(Ordering::SeqCst), 1);
}

#[tokio::test]
async fn failed_init_is_not_cached() {
    let cache = ResponseCache::new();

    let failed = cache
        .get_or_try_insert_with("k".to_string(), None, async {
            Err::<Bytes, _>(std::io::Error::other("upstream down"))
        })
        .await;
    let err = assert_err!(failed);
    assert_eq!(err.to_string(), "upstream down");
    assert_eq!(cache.get("k").await, None);

    let (_, hit) = assert_ok!(
        cache
            .get_or_try_insert_with("k".to_string(), None, async {
                Ok::<_, std::io::Error>(Bytes::from_static(b"ok"))
            })
            .await
    );
    assert!(!hit);
}

#[tokio::test]
async fn concurrent_misses_share_one_init() {
    let cache = &ResponseCache::new();
    let calls = &AtomicUsize::new(0);

    let load = move || async move {
        cache
            .get_or_try_insert_with("k".to_string(), None, async move {
                calls.fetch_add(1, Ordering::SeqCst);
                tokio::time::sleep(Duration::from_millis(50)).await;
                Ok::<_, std::io::Error>(Bytes::from_static(b"shared"))
            })
            .await
    };

    let (a, b) = tokio::join!(load(), load());
    assert_eq!(assert_ok!(a).0, Bytes::from_static(b"shared"));
    assert_eq!(assert_ok!(b).0, Bytes::from_static(b"shared"));
    assert_eq!(calls.load(Ordering::SeqCst), 1);
}
