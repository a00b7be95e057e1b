use common::models::Location;
use std::collections::HashMap;
use std::sync::Arc;
use tokio::sync::RwLock;
use tokio::time::{Duration, Instant};
use tracing::debug;

/// Which lookup a cache holds; decides TTL and sweeping.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CacheKind {
    Weather,
    Location,
}

impl CacheKind {
    pub fn default_ttl(self) -> Duration {
        match self {
            CacheKind::Weather => Duration::from_secs(10 * 60),
            CacheKind::Location => Duration::from_secs(60 * 60),
        }
    }

    /// Entry count above which expired entries are swept before an insert.
    pub fn sweep_threshold(self) -> Option<usize> {
        match self {
            CacheKind::Weather => Some(50),
            CacheKind::Location => None,
        }
    }
}

struct CacheEntry<V> {
    value: V,
    stored_at: Instant,
}

/// Time-boxed key/value memo.
///
/// `get` never evicts; a stale entry is reported as a miss and left for the
/// caller to overwrite. Below the sweep threshold growth is unbounded.
pub struct TtlCache<V> {
    kind: CacheKind,
    cache: Arc<RwLock<HashMap<String, CacheEntry<V>>>>,
    ttl: Duration,
}

impl<V: Clone> TtlCache<V> {
    pub fn new(kind: CacheKind) -> Self {
        Self::with_ttl(kind, kind.default_ttl())
    }

    pub fn with_ttl(kind: CacheKind, ttl: Duration) -> Self {
        Self {
            kind,
            cache: Arc::new(RwLock::new(HashMap::new())),
            ttl,
        }
    }

    pub async fn get(&self, key: &str) -> Option<V> {
        let cache = self.cache.read().await;
        if let Some(entry) = cache.get(key)
            && entry.stored_at.elapsed() < self.ttl
        {
            return Some(entry.value.clone());
        }
        None
    }

    pub async fn set(&self, key: String, value: V) {
        let mut cache = self.cache.write().await;

        if let Some(threshold) = self.kind.sweep_threshold()
            && cache.len() > threshold
        {
            let before = cache.len();
            let ttl = self.ttl;
            cache.retain(|_, entry| entry.stored_at.elapsed() < ttl);
            debug!(
                kind = ?self.kind,
                removed = before - cache.len(),
                remaining = cache.len(),
                "Swept expired cache entries"
            );
        }

        cache.insert(
            key,
            CacheEntry {
                value,
                stored_at: Instant::now(),
            },
        );
    }

    pub async fn len(&self) -> usize {
        self.cache.read().await.len()
    }
}

/// Both lookup caches, constructed once per process and shared by the clients.
pub struct CacheStore {
    pub weather: TtlCache<i32>,
    pub locations: TtlCache<Vec<Location>>,
}

impl CacheStore {
    pub fn with_ttls(weather_ttl: Duration, location_ttl: Duration) -> Self {
        Self {
            weather: TtlCache::with_ttl(CacheKind::Weather, weather_ttl),
            locations: TtlCache::with_ttl(CacheKind::Location, location_ttl),
        }
    }
}

impl Default for CacheStore {
    fn default() -> Self {
        Self {
            weather: TtlCache::new(CacheKind::Weather),
            locations: TtlCache::new(CacheKind::Location),
        }
    }
}

/// Weather key: coordinates rounded to two decimals (about 1.1 km).
pub fn weather_key(latitude: f64, longitude: f64) -> String {
    format!("{:.2},{:.2}", round2(latitude), round2(longitude))
}

/// Key for a single best-match city lookup.
pub fn city_key(name: &str) -> String {
    format!("city:{}", name.trim().to_lowercase())
}

/// Key for an autocomplete search; kept apart from `city_key` because the
/// result counts differ.
pub fn search_key(prefix: &str) -> String {
    format!("search:{}", prefix.trim().to_lowercase())
}

fn round2(value: f64) -> f64 {
    // + 0.0 folds -0.0 into 0.0 so both hemispheres of zero share a key
    (value * 100.0).round() / 100.0 + 0.0
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test(start_paused = true)]
    async fn set_then_get_returns_value() {
        let cache = TtlCache::new(CacheKind::Weather);
        cache.set("k".into(), 42).await;
        assert_eq!(cache.get("k").await, Some(42));
    }

    #[tokio::test(start_paused = true)]
    async fn entry_expires_at_ttl() {
        let cache = TtlCache::new(CacheKind::Weather);
        cache.set("k".into(), 42).await;

        tokio::time::advance(Duration::from_secs(10 * 60 - 1)).await;
        assert_eq!(cache.get("k").await, Some(42));

        tokio::time::advance(Duration::from_secs(1)).await;
        assert_eq!(cache.get("k").await, None);
    }

    #[tokio::test(start_paused = true)]
    async fn location_ttl_is_one_hour() {
        let cache: TtlCache<Vec<Location>> = TtlCache::new(CacheKind::Location);
        cache.set("city:paris".into(), Vec::new()).await;

        tokio::time::advance(Duration::from_secs(59 * 60)).await;
        assert!(cache.get("city:paris").await.is_some());

        tokio::time::advance(Duration::from_secs(60)).await;
        assert!(cache.get("city:paris").await.is_none());
    }

    #[tokio::test(start_paused = true)]
    async fn get_does_not_evict_stale_entries() {
        let cache = TtlCache::new(CacheKind::Weather);
        cache.set("k".into(), 1).await;
        tokio::time::advance(Duration::from_secs(11 * 60)).await;

        assert_eq!(cache.get("k").await, None);
        assert_eq!(cache.len().await, 1);
    }

    #[tokio::test(start_paused = true)]
    async fn weather_cache_sweeps_expired_entries_past_threshold() {
        let cache = TtlCache::new(CacheKind::Weather);
        for i in 0..51 {
            cache.set(format!("old{i}"), i).await;
        }
        tokio::time::advance(Duration::from_secs(10 * 60)).await;
        cache.set("fresh1".into(), 1).await;
        // 51 entries before the insert: sweep ran, only the new one is left
        assert_eq!(cache.len().await, 1);
        assert_eq!(cache.get("fresh1").await, Some(1));
    }

    #[tokio::test(start_paused = true)]
    async fn sweep_keeps_live_entries() {
        let cache = TtlCache::new(CacheKind::Weather);
        for i in 0..30 {
            cache.set(format!("old{i}"), i).await;
        }
        tokio::time::advance(Duration::from_secs(10 * 60)).await;
        for i in 0..21 {
            cache.set(format!("new{i}"), i).await;
        }
        assert_eq!(cache.len().await, 51);

        cache.set("trigger".into(), 0).await;
        assert_eq!(cache.len().await, 22);
        assert_eq!(cache.get("new0").await, Some(0));
    }

    #[tokio::test(start_paused = true)]
    async fn no_sweep_at_or_below_threshold() {
        let cache = TtlCache::new(CacheKind::Weather);
        for i in 0..50 {
            cache.set(format!("old{i}"), i).await;
        }
        tokio::time::advance(Duration::from_secs(10 * 60)).await;
        cache.set("fresh".into(), 1).await;
        assert_eq!(cache.len().await, 51);
    }

    #[tokio::test(start_paused = true)]
    async fn location_cache_never_sweeps() {
        let cache: TtlCache<Vec<Location>> = TtlCache::new(CacheKind::Location);
        for i in 0..60 {
            cache.set(format!("city:{i}"), Vec::new()).await;
        }
        tokio::time::advance(Duration::from_secs(2 * 60 * 60)).await;
        cache.set("city:new".into(), Vec::new()).await;
        assert_eq!(cache.len().await, 61);
    }

    #[test]
    fn nearby_coordinates_share_weather_key() {
        assert_eq!(
            weather_key(40.7128, -74.0060),
            weather_key(40.7129, -74.0061)
        );
        assert_eq!(weather_key(40.7128, -74.0060), "40.71,-74.01");
    }

    #[test]
    fn distant_coordinates_do_not_share_weather_key() {
        assert_ne!(weather_key(40.71, -74.00), weather_key(41.71, -75.00));
    }

    #[test]
    fn negative_zero_normalized() {
        assert_eq!(weather_key(-0.001, 0.001), weather_key(0.0, 0.0));
    }

    #[test]
    fn location_keys_are_namespaced_and_lowercased() {
        assert_eq!(city_key("  Paris "), "city:paris");
        assert_eq!(search_key("PAR"), "search:par");
        assert_ne!(city_key("paris"), search_key("paris"));
    }
}
