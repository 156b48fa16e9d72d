use std::time::{Duration, Instant};

use async_trait::async_trait;
use moka::Expiry;
use moka::future::Cache;
use tracing::{debug, warn};

use crate::cache::{CacheResult, ObjectCache};
use crate::config::AppConfig;
use crate::declare_object_cache_plugin;

declare_object_cache_plugin!("moka", MokaCacheWrapper);

#[derive(Clone)]
struct Entry {
    value: String,
    ttl: Duration,
}

// 每个条目按写入时给定的 TTL 过期
struct PerEntryTtl;

impl Expiry<String, Entry> for PerEntryTtl {
    fn expire_after_create(&self, _key: &String, entry: &Entry, _created_at: Instant) -> Option<Duration> {
        Some(entry.ttl)
    }
}

pub struct MokaCacheWrapper {
    inner: Cache<String, Entry>,
    default_ttl: Duration,
}

impl MokaCacheWrapper {
    pub async fn connect() -> Result<Self, String> {
        Ok(Self::new())
    }

    pub fn new() -> Self {
        let config = &AppConfig::get().cache;
        let inner = Cache::builder()
            .max_capacity(config.memory.max_capacity)
            .expire_after(PerEntryTtl)
            .support_invalidation_closures()
            .build();

        debug!(
            "MokaCacheWrapper initialized with max capacity: {}",
            config.memory.max_capacity
        );
        Self {
            inner,
            default_ttl: Duration::from_secs(config.default_ttl),
        }
    }
}

impl Default for MokaCacheWrapper {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl ObjectCache for MokaCacheWrapper {
    async fn get_raw(&self, key: &str) -> CacheResult<String> {
        match self.inner.get(key).await {
            Some(entry) => CacheResult::Found(entry.value),
            None => CacheResult::NotFound,
        }
    }

    async fn insert_raw(&self, key: String, value: String, ttl: u64) {
        let ttl = if ttl == 0 {
            self.default_ttl
        } else {
            Duration::from_secs(ttl)
        };
        self.inner.insert(key, Entry { value, ttl }).await;
    }

    async fn remove(&self, key: &str) {
        self.inner.invalidate(key).await;
    }

    async fn remove_prefix(&self, prefix: &str) {
        let prefix = prefix.to_string();
        if let Err(e) = self
            .inner
            .invalidate_entries_if(move |key, _| key.starts_with(&prefix))
        {
            warn!("Moka 前缀失效失败: {}", e);
        }
    }

    async fn invalidate_all(&self) {
        self.inner.invalidate_all();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[actix_web::test]
    async fn test_insert_get_remove() {
        let cache = MokaCacheWrapper::new();
        cache.insert_raw("a".to_string(), "1".to_string(), 0).await;
        assert_eq!(cache.get_raw("a").await, CacheResult::Found("1".to_string()));

        cache.remove("a").await;
        assert_eq!(cache.get_raw("a").await, CacheResult::NotFound);
    }

    #[actix_web::test]
    async fn test_remove_prefix_only_hits_matching_keys() {
        let cache = MokaCacheWrapper::new();
        cache.insert_raw("session:1:x".to_string(), "p1".to_string(), 60).await;
        cache.insert_raw("session:1:y".to_string(), "p1".to_string(), 60).await;
        cache.insert_raw("session:12:z".to_string(), "p12".to_string(), 60).await;

        cache.remove_prefix("session:1:").await;

        assert_eq!(cache.get_raw("session:1:x").await, CacheResult::NotFound);
        assert_eq!(cache.get_raw("session:1:y").await, CacheResult::NotFound);
        assert_eq!(
            cache.get_raw("session:12:z").await,
            CacheResult::Found("p12".to_string())
        );
    }
}
