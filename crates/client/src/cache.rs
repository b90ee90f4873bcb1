//! In-memory cache for responses the backend marks as cacheable.

use std::collections::HashMap;
use std::sync::Arc;
use std::time::Duration;

use chrono::{DateTime, Utc};
use tokio::sync::Mutex;

use crate::response::ApiResponse;

#[derive(Debug, Clone)]
struct CachedResponse {
    response: ApiResponse,
    cached_at: DateTime<Utc>,
}

/// TTL-bounded response cache shared by clones of the HTTP client.
///
/// Entries are keyed by method, absolute URL and request body, so two
/// instances never share an entry. A TTL of zero disables caching.
#[derive(Debug, Clone)]
pub struct ResponseCache {
    entries: Arc<Mutex<HashMap<String, CachedResponse>>>,
    ttl: Duration,
}

impl ResponseCache {
    pub fn new(ttl: Duration) -> Self {
        Self {
            entries: Arc::new(Mutex::new(HashMap::new())),
            ttl,
        }
    }

    pub fn ttl(&self) -> Duration {
        self.ttl
    }

    pub async fn get(&self, key: &str) -> Option<ApiResponse> {
        let mut entries = self.entries.lock().await;
        let cached_at = entries.get(key)?.cached_at;
        if self.is_expired(cached_at) {
            entries.remove(key);
            return None;
        }
        entries.get(key).map(|entry| entry.response.clone())
    }

    pub async fn put(&self, key: String, response: ApiResponse) {
        if self.ttl.is_zero() {
            return;
        }
        let mut entries = self.entries.lock().await;
        entries.insert(
            key,
            CachedResponse {
                response,
                cached_at: Utc::now(),
            },
        );
    }

    pub async fn clear(&self) {
        self.entries.lock().await.clear();
    }

    pub async fn len(&self) -> usize {
        self.entries.lock().await.len()
    }

    fn is_expired(&self, cached_at: DateTime<Utc>) -> bool {
        // A clock that moved backwards yields a negative age; treat it as fresh.
        (Utc::now() - cached_at)
            .to_std()
            .is_ok_and(|age| age >= self.ttl)
    }
}

/// Cache key for a request: method, absolute URL and the serialized body.
pub fn cache_key(method: &str, url: &str, body: Option<&serde_json::Value>) -> String {
    match body {
        Some(body) => format!("{method} {url} {body}"),
        None => format!("{method} {url}"),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn response() -> ApiResponse {
        ApiResponse::new(200, json!({"timeZones": []}))
    }

    #[tokio::test]
    async fn stores_and_returns_entries() {
        let cache = ResponseCache::new(Duration::from_secs(60));
        let key = cache_key("GET", "https://demo.hotwax.io/api/getAvailableTimeZones", None);

        assert!(cache.get(&key).await.is_none());
        cache.put(key.clone(), response()).await;
        assert_eq!(cache.get(&key).await, Some(response()));
        assert_eq!(cache.len().await, 1);

        cache.clear().await;
        assert!(cache.get(&key).await.is_none());
    }

    #[tokio::test]
    async fn zero_ttl_disables_caching() {
        let cache = ResponseCache::new(Duration::ZERO);
        cache.put("k".to_string(), response()).await;
        assert!(cache.get("k").await.is_none());
        assert_eq!(cache.len().await, 0);
    }

    #[tokio::test]
    async fn expired_entries_are_evicted() {
        let cache = ResponseCache::new(Duration::from_millis(5));
        cache.put("k".to_string(), response()).await;
        tokio::time::sleep(Duration::from_millis(20)).await;
        assert!(cache.get("k").await.is_none());
        assert_eq!(cache.len().await, 0);
    }

    #[test]
    fn key_includes_body() {
        let a = cache_key("POST", "http://x/api/performFind", Some(&json!({"a": 1})));
        let b = cache_key("POST", "http://x/api/performFind", Some(&json!({"a": 2})));
        assert_ne!(a, b);
        assert_eq!(cache_key("GET", "http://x/", None), "GET http://x/");
    }
}
