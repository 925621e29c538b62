use crate::adapters::outbound::filesystem::{CacheScope, TtlCache};
use crate::ports::outbound::RemoteClient;
use dashmap::DashMap;
use serde_json::Value;
use std::collections::HashSet;

/// CachingRemoteClient wraps a RemoteClient and adds a two-level cache:
/// an in-process map for repeated lookups within one run, backed by the
/// on-disk TTL cache for reuse across runs.
///
/// The decorator owns no caching policy beyond layering: which endpoint
/// types bypass the cache entirely is decided by the `excluded_endpoints`
/// list handed in by the caller (high-churn endpoints such as the asset
/// list itself). Excluded endpoints go straight to the inner client and are
/// never memoized.
pub struct CachingRemoteClient<C: RemoteClient> {
    inner: C,
    cache: TtlCache,
    memo: DashMap<String, Value>,
    excluded_endpoints: HashSet<String>,
}

impl<C: RemoteClient> CachingRemoteClient<C> {
    /// Creates a new caching client wrapping the given transport.
    ///
    /// # Arguments
    /// * `excluded_endpoints` - first path segments (e.g. `assets`) whose
    ///   requests must always hit the network
    pub fn new(inner: C, cache: TtlCache, excluded_endpoints: Vec<String>) -> Self {
        Self {
            inner,
            cache,
            memo: DashMap::new(),
            excluded_endpoints: excluded_endpoints.into_iter().collect(),
        }
    }

    fn is_excluded(&self, endpoint: &str) -> bool {
        let segment = endpoint
            .trim_start_matches('/')
            .split(['/', '?'])
            .next()
            .unwrap_or("");
        self.excluded_endpoints.contains(segment)
    }

    #[cfg(test)]
    fn memo_size(&self) -> usize {
        self.memo.len()
    }
}

impl<C: RemoteClient> RemoteClient for CachingRemoteClient<C> {
    fn get_json(&self, endpoint: &str) -> Option<Value> {
        if self.is_excluded(endpoint) {
            return self.inner.get_json(endpoint);
        }

        if let Some(cached) = self.memo.get(endpoint) {
            return Some(cached.clone());
        }

        let scope = CacheScope::from_endpoint(endpoint);
        if let Some(cached) = self.cache.get(endpoint, scope) {
            self.memo.insert(endpoint.to_string(), cached.clone());
            return Some(cached);
        }

        // cache miss: fetch and store; a failed fetch is never cached
        let body = self.inner.get_json(endpoint)?;
        self.cache.set(endpoint, &body, scope);
        self.memo.insert(endpoint.to_string(), body.clone());
        Some(body)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::time::Duration;
    use tempfile::TempDir;

    /// Mock transport that tracks how many requests reached the network.
    struct CountingClient {
        call_count: AtomicUsize,
        fail: bool,
    }

    impl CountingClient {
        fn new(fail: bool) -> Self {
            Self {
                call_count: AtomicUsize::new(0),
                fail,
            }
        }

        fn calls(&self) -> usize {
            self.call_count.load(Ordering::SeqCst)
        }
    }

    impl RemoteClient for CountingClient {
        fn get_json(&self, endpoint: &str) -> Option<Value> {
            self.call_count.fetch_add(1, Ordering::SeqCst);
            if self.fail {
                None
            } else {
                Some(json!({"endpoint": endpoint}))
            }
        }
    }

    fn caching_client(
        dir: &TempDir,
        fail: bool,
        excluded: Vec<String>,
    ) -> CachingRemoteClient<CountingClient> {
        let cache = TtlCache::new(dir.path().join("cache"), Duration::from_secs(3600)).unwrap();
        CachingRemoteClient::new(CountingClient::new(fail), cache, excluded)
    }

    #[test]
    fn test_second_lookup_is_served_from_cache() {
        let dir = TempDir::new().unwrap();
        let client = caching_client(&dir, false, vec![]);

        let first = client.get_json("departments").unwrap();
        let second = client.get_json("departments").unwrap();
        assert_eq!(first, second);
        assert_eq!(client.inner.calls(), 1);
        assert_eq!(client.memo_size(), 1);
    }

    #[test]
    fn test_excluded_endpoint_always_hits_network() {
        let dir = TempDir::new().unwrap();
        let client = caching_client(&dir, false, vec!["assets".to_string()]);

        client.get_json("assets/42").unwrap();
        client.get_json("assets/42").unwrap();
        assert_eq!(client.inner.calls(), 2);
        assert_eq!(client.memo_size(), 0);
    }

    #[test]
    fn test_exclusion_matches_first_segment_only() {
        let dir = TempDir::new().unwrap();
        let client = caching_client(&dir, false, vec!["assets".to_string()]);

        client.get_json("asset_types/9").unwrap();
        client.get_json("asset_types/9").unwrap();
        assert_eq!(client.inner.calls(), 1);
    }

    #[test]
    fn test_failed_fetch_is_not_cached() {
        let dir = TempDir::new().unwrap();
        let client = caching_client(&dir, true, vec![]);

        assert!(client.get_json("departments").is_none());
        assert!(client.get_json("departments").is_none());
        assert_eq!(client.inner.calls(), 2);
        assert_eq!(client.memo_size(), 0);
    }

    #[test]
    fn test_disk_cache_survives_new_memo() {
        let dir = TempDir::new().unwrap();
        let cache_root = dir.path().join("cache");

        {
            let cache = TtlCache::new(&cache_root, Duration::from_secs(3600)).unwrap();
            let client = CachingRemoteClient::new(CountingClient::new(false), cache, vec![]);
            client.get_json("locations/7").unwrap();
        }

        // a fresh client with an empty memo still finds the disk entry
        let cache = TtlCache::new(&cache_root, Duration::from_secs(3600)).unwrap();
        let client = CachingRemoteClient::new(CountingClient::new(true), cache, vec![]);
        assert!(client.get_json("locations/7").is_some());
        assert_eq!(client.inner.calls(), 0);
    }
}
