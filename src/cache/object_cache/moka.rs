use async_trait::async_trait;
use moka::future::Cache;
use std::time::Duration;
use tracing::debug;

use crate::cache::{CacheResult, ObjectCache};
use crate::config::AppConfig;
use crate::declare_object_cache_plugin;

declare_object_cache_plugin!("moka", MokaCacheWrapper);

/// 进程内缓存，TTL 在构建时统一设置
pub struct MokaCacheWrapper {
    inner: Cache<String, String>,
}

impl MokaCacheWrapper {
    pub fn new() -> Result<Self, String> {
        let config = AppConfig::get();
        Ok(Self::with_settings(
            config.cache.memory.max_capacity,
            config.cache.default_ttl,
        ))
    }

    pub fn with_settings(max_capacity: u64, ttl_secs: u64) -> Self {
        let inner = Cache::builder()
            .max_capacity(max_capacity)
            .time_to_live(Duration::from_secs(ttl_secs.max(1)))
            .build();

        debug!(
            "Moka cache initialized (capacity: {}, ttl: {}s)",
            max_capacity, ttl_secs
        );
        Self { inner }
    }
}

#[async_trait]
impl ObjectCache for MokaCacheWrapper {
    async fn get_raw(&self, key: &str) -> CacheResult<String> {
        match self.inner.get(key).await {
            Some(value) => CacheResult::Found(value),
            None => CacheResult::NotFound,
        }
    }

    async fn insert_raw(&self, key: String, value: String, ttl: u64) {
        // 单条 TTL 不生效，使用全局 TTL
        if ttl != 0 {
            debug!("Moka cache ignores per-entry TTL for {}", key);
        }
        self.inner.insert(key, value).await;
    }

    async fn remove(&self, key: &str) {
        self.inner.invalidate(key).await;
    }

    async fn invalidate_all(&self) {
        self.inner.invalidate_all();
    }

    fn backend_name(&self) -> &'static str {
        "moka"
    }
}
