use std::collections::HashMap;
use std::sync::Arc;
use tokio::sync::Mutex;
use tracing::debug;

/// Session-scoped memo of fetched rates, keyed by rate page URL.
/// Clones share the same underlying map.
#[derive(Clone, Default)]
pub struct RateCache {
    inner: Arc<Mutex<HashMap<String, f64>>>,
}

impl RateCache {
    pub fn new() -> Self {
        Self::default()
    }

    pub async fn get(&self, page_url: &str) -> Option<f64> {
        let rates = self.inner.lock().await;
        let rate = rates.get(page_url).copied();
        if rate.is_some() {
            debug!("Rate cache HIT for {page_url}");
        } else {
            debug!("Rate cache MISS for {page_url}");
        }
        rate
    }

    pub async fn put(&self, page_url: &str, rate: f64) {
        let mut rates = self.inner.lock().await;
        debug!("Rate cache PUT {rate} for {page_url}");
        rates.insert(page_url.to_string(), rate);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_rate_cache_get_put() {
        let cache = RateCache::new();

        // Initially, cache is empty
        assert!(cache.get("https://rates.test/a").await.is_none());

        // Put a value
        cache.put("https://rates.test/a", 16100.0).await;

        // Get the value
        assert_eq!(cache.get("https://rates.test/a").await, Some(16100.0));

        // Get a non-existent page
        assert!(cache.get("https://rates.test/b").await.is_none());
    }

    #[tokio::test]
    async fn test_rate_cache_clones_share_entries() {
        let cache = RateCache::new();
        let alias = cache.clone();

        alias.put("https://rates.test/a", 15623.0).await;

        assert_eq!(cache.get("https://rates.test/a").await, Some(15623.0));
    }
}
