//! 对象缓存
//!
//! 后端以插件形式注册（moka / redis），启动时按配置选择。
//! 目前用于缓存代码嵌入向量，键为代码内容的 SHA-256。

pub mod object_cache;
pub mod register;
pub mod traits;

pub use traits::{CacheResult, ObjectCache};

use sha2::{Digest, Sha256};

/// 代码嵌入向量的缓存键
pub fn embedding_cache_key(model: &str, code: &str) -> String {
    let digest = Sha256::digest(code.as_bytes());
    format!("embedding:{}:{}", model, hex::encode(digest))
}
