//! S3 兼容对象存储（MinIO、AWS S3 等）

use std::time::Duration;

use async_trait::async_trait;
use aws_sdk_s3::presigning::PresigningConfig;
use aws_sdk_s3::primitives::ByteStream;
use tracing::{debug, info};

use super::{BlobStore, split_path};
use crate::config::BlobConfig;
use crate::errors::{CodeMentorError, Result};

pub struct S3BlobStore {
    client: aws_sdk_s3::Client,
    buckets: Vec<String>,
}

impl S3BlobStore {
    pub fn new(config: &BlobConfig) -> Result<Self> {
        if config.endpoint.trim().is_empty() {
            return Err(CodeMentorError::validation("S3 endpoint 不能为空"));
        }

        let credentials = aws_sdk_s3::config::Credentials::new(
            &config.access_key,
            &config.secret_key,
            None,
            None,
            "codementor",
        );

        let region = if config.region.trim().is_empty() {
            "us-east-1".to_string()
        } else {
            config.region.clone()
        };

        let s3_config = aws_sdk_s3::Config::builder()
            .credentials_provider(credentials)
            .endpoint_url(&config.endpoint)
            .behavior_version_latest()
            .region(aws_sdk_s3::config::Region::new(region))
            .force_path_style(config.path_style)
            .build();

        info!("S3 blob store configured at {}", config.endpoint);

        Ok(Self {
            client: aws_sdk_s3::Client::from_conf(s3_config),
            buckets: vec![
                config.submissions_bucket.clone(),
                config.videos_bucket.clone(),
            ],
        })
    }

    /// 桶不存在时创建
    pub async fn ensure_bucket(&self, bucket: &str) -> Result<()> {
        if self.client.head_bucket().bucket(bucket).send().await.is_ok() {
            return Ok(());
        }

        self.client
            .create_bucket()
            .bucket(bucket)
            .send()
            .await
            .map_err(|e| CodeMentorError::blob_store(format!("创建桶 {bucket} 失败: {e}")))?;
        info!("Created bucket {}", bucket);
        Ok(())
    }
}

#[async_trait]
impl BlobStore for S3BlobStore {
    async fn put(
        &self,
        bucket: &str,
        key: &str,
        data: Vec<u8>,
        content_type: &str,
    ) -> Result<String> {
        let size = data.len();
        self.client
            .put_object()
            .bucket(bucket)
            .key(key)
            .content_type(content_type)
            .body(ByteStream::from(data))
            .send()
            .await
            .map_err(|e| CodeMentorError::blob_store(format!("S3 上传失败: {e}")))?;

        debug!("Uploaded {} bytes to {}/{}", size, bucket, key);
        Ok(format!("{bucket}/{key}"))
    }

    async fn get(&self, path: &str) -> Result<Vec<u8>> {
        let (bucket, key) = split_path(path)?;
        let output = self
            .client
            .get_object()
            .bucket(bucket)
            .key(key)
            .send()
            .await
            .map_err(|e| CodeMentorError::blob_store(format!("S3 下载失败: {e}")))?;

        let bytes = output
            .body
            .collect()
            .await
            .map_err(|e| CodeMentorError::blob_store(format!("读取 S3 对象失败: {e}")))?
            .into_bytes()
            .to_vec();
        Ok(bytes)
    }

    async fn delete(&self, path: &str) -> Result<()> {
        let (bucket, key) = split_path(path)?;
        self.client
            .delete_object()
            .bucket(bucket)
            .key(key)
            .send()
            .await
            .map_err(|e| CodeMentorError::blob_store(format!("S3 删除失败: {e}")))?;
        Ok(())
    }

    async fn presign(&self, path: &str, expires_in: Duration) -> Result<String> {
        let (bucket, key) = split_path(path)?;
        let presigning = PresigningConfig::expires_in(expires_in)
            .map_err(|e| CodeMentorError::blob_store(format!("预签名参数无效: {e}")))?;

        let request = self
            .client
            .get_object()
            .bucket(bucket)
            .key(key)
            .presigned(presigning)
            .await
            .map_err(|e| CodeMentorError::blob_store(format!("生成下载链接失败: {e}")))?;

        Ok(request.uri().to_string())
    }

    async fn check(&self) -> Result<()> {
        for bucket in &self.buckets {
            self.client
                .head_bucket()
                .bucket(bucket)
                .send()
                .await
                .map_err(|e| {
                    CodeMentorError::blob_store(format!("S3 桶 {bucket} 不可用: {e}"))
                })?;
        }
        Ok(())
    }

    fn backend_name(&self) -> &'static str {
        "s3"
    }
}
