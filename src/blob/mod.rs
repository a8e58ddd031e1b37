//! 对象存储
//!
//! 上传的压缩包与视频以 `bucket/key` 形式记录在提交上。
//! 生产环境使用 S3 兼容服务，开发和测试可使用本地目录。

pub mod local;
pub mod s3;

use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use tracing::warn;

use crate::config::BlobConfig;
use crate::errors::{CodeMentorError, Result};

pub use local::LocalBlobStore;
pub use s3::S3BlobStore;

#[async_trait]
pub trait BlobStore: Send + Sync {
    /// 写入对象，返回 `bucket/key`
    async fn put(&self, bucket: &str, key: &str, data: Vec<u8>, content_type: &str)
    -> Result<String>;
    async fn get(&self, path: &str) -> Result<Vec<u8>>;
    /// 对象不存在时视为成功
    async fn delete(&self, path: &str) -> Result<()>;
    /// 生成限时下载链接
    async fn presign(&self, path: &str, expires_in: Duration) -> Result<String>;
    async fn check(&self) -> Result<()>;
    fn backend_name(&self) -> &'static str;
}

/// 拆分 `bucket/key`
pub fn split_path(path: &str) -> Result<(&str, &str)> {
    match path.split_once('/') {
        Some((bucket, key)) if !bucket.is_empty() && !key.is_empty() => Ok((bucket, key)),
        _ => Err(CodeMentorError::blob_store(format!(
            "对象路径格式无效: {path}"
        ))),
    }
}

/// 上传对象的 key：`{prefix}/{id}/{id}_{file_name}`
pub fn object_key(prefix: &str, submission_id: i64, file_name: &str) -> String {
    format!(
        "{prefix}/{submission_id}/{submission_id}_{}",
        sanitize_file_name(file_name)
    )
}

/// 去掉目录部分，只保留安全字符
pub fn sanitize_file_name(file_name: &str) -> String {
    let base = file_name
        .rsplit(['/', '\\'])
        .next()
        .unwrap_or(file_name);
    let cleaned: String = base
        .chars()
        .map(|c| {
            if c.is_alphanumeric() || matches!(c, '.' | '-' | '_') {
                c
            } else {
                '_'
            }
        })
        .collect();
    let cleaned = cleaned.trim_start_matches('.');
    if cleaned.is_empty() {
        "upload".to_string()
    } else {
        cleaned.to_string()
    }
}

/// 按配置创建对象存储
pub async fn create_blob_store(config: &BlobConfig) -> Result<Arc<dyn BlobStore>> {
    match config.blob_type.as_str() {
        "s3" => {
            let store = S3BlobStore::new(config)?;
            for bucket in [&config.submissions_bucket, &config.videos_bucket] {
                if let Err(e) = store.ensure_bucket(bucket).await {
                    warn!("Bucket {} is not ready: {}", bucket, e);
                }
            }
            Ok(Arc::new(store))
        }
        "local" => Ok(Arc::new(LocalBlobStore::new(&config.local_dir).await?)),
        other => Err(CodeMentorError::blob_store(format!(
            "不支持的对象存储类型: {other}"
        ))),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_split_path() {
        assert_eq!(
            split_path("submissions/submissions/3/3_a.zip").unwrap(),
            ("submissions", "submissions/3/3_a.zip")
        );
        assert!(split_path("nobucket").is_err());
        assert!(split_path("/key").is_err());
        assert!(split_path("bucket/").is_err());
    }

    #[test]
    fn test_object_key_layout() {
        assert_eq!(
            object_key("submissions", 7, "project.zip"),
            "submissions/7/7_project.zip"
        );
        assert_eq!(object_key("videos", 7, "demo.mp4"), "videos/7/7_demo.mp4");
    }

    #[test]
    fn test_sanitize_file_name() {
        assert_eq!(sanitize_file_name("../../etc/passwd"), "passwd");
        assert_eq!(sanitize_file_name("C:\\Users\\me\\my project.zip"), "my_project.zip");
        assert_eq!(sanitize_file_name("..."), "upload");
        assert_eq!(sanitize_file_name("tarea-1_v2.zip"), "tarea-1_v2.zip");
    }
}
