use async_trait::async_trait;
use serde::{Serialize, de::DeserializeOwned};

/// 缓存查询结果
#[derive(Debug, Clone, PartialEq)]
pub enum CacheResult<T> {
    Found(T),
    NotFound,
    // 后端出错，无法判断是否存在
    ExistsButNoValue,
}

#[async_trait]
pub trait ObjectCache: Send + Sync {
    async fn get_raw(&self, key: &str) -> CacheResult<String>;
    /// ttl 为 0 时使用后端默认 TTL
    async fn insert_raw(&self, key: String, value: String, ttl: u64);
    async fn remove(&self, key: &str);
    async fn invalidate_all(&self);
    /// 后端名称，用于健康检查
    fn backend_name(&self) -> &'static str;
}

impl dyn ObjectCache {
    /// 读取并反序列化，内容损坏时视为未命中
    pub async fn get<T: DeserializeOwned>(&self, key: &str) -> Option<T> {
        match self.get_raw(key).await {
            CacheResult::Found(raw) => match serde_json::from_str(&raw) {
                Ok(value) => Some(value),
                Err(e) => {
                    tracing::warn!("Discarding undecodable cache entry {}: {}", key, e);
                    self.remove(key).await;
                    None
                }
            },
            _ => None,
        }
    }

    pub async fn insert<T: Serialize + ?Sized>(&self, key: String, value: &T, ttl: u64) {
        match serde_json::to_string(value) {
            Ok(raw) => self.insert_raw(key, raw, ttl).await,
            Err(e) => tracing::warn!("Failed to serialize cache entry {}: {}", key, e),
        }
    }
}

/// 注册缓存后端插件，类型需提供 `new() -> Result<Self, String>`
#[macro_export]
macro_rules! declare_object_cache_plugin {
    ($name:expr, $ty:ty) => {
        #[ctor::ctor]
        fn __register_object_cache_plugin() {
            $crate::cache::register::register_object_cache_plugin(
                $name,
                std::sync::Arc::new(|| {
                    Box::pin(async {
                        let cache = <$ty>::new()
                            .map_err($crate::errors::CodeMentorError::cache_connection)?;
                        Ok(Box::new(cache) as Box<dyn $crate::cache::ObjectCache>)
                    })
                }),
            );
        }
    };
}
