//! 本地目录对象存储：`{root}/{bucket}/{key}`

use std::path::{Component, Path, PathBuf};
use std::time::Duration;

use async_trait::async_trait;

use super::{BlobStore, split_path};
use crate::errors::{CodeMentorError, Result};

pub struct LocalBlobStore {
    root: PathBuf,
}

impl LocalBlobStore {
    pub async fn new(root: impl AsRef<Path>) -> Result<Self> {
        let root = root.as_ref().to_path_buf();
        tokio::fs::create_dir_all(&root).await.map_err(|e| {
            CodeMentorError::blob_store(format!("无法创建存储目录 {}: {e}", root.display()))
        })?;
        let root = tokio::fs::canonicalize(&root).await?;
        Ok(Self { root })
    }

    fn resolve(&self, bucket: &str, key: &str) -> Result<PathBuf> {
        let relative = Path::new(bucket).join(key);
        // 只允许普通路径段
        if relative
            .components()
            .any(|c| !matches!(c, Component::Normal(_)))
        {
            return Err(CodeMentorError::blob_store(format!(
                "对象路径不安全: {bucket}/{key}"
            )));
        }
        Ok(self.root.join(relative))
    }
}

#[async_trait]
impl BlobStore for LocalBlobStore {
    async fn put(
        &self,
        bucket: &str,
        key: &str,
        data: Vec<u8>,
        _content_type: &str,
    ) -> Result<String> {
        let target = self.resolve(bucket, key)?;
        if let Some(parent) = target.parent() {
            tokio::fs::create_dir_all(parent).await?;
        }
        tokio::fs::write(&target, data).await?;
        Ok(format!("{bucket}/{key}"))
    }

    async fn get(&self, path: &str) -> Result<Vec<u8>> {
        let (bucket, key) = split_path(path)?;
        let target = self.resolve(bucket, key)?;
        tokio::fs::read(&target)
            .await
            .map_err(|e| CodeMentorError::blob_store(format!("读取对象 {path} 失败: {e}")))
    }

    async fn delete(&self, path: &str) -> Result<()> {
        let (bucket, key) = split_path(path)?;
        let target = self.resolve(bucket, key)?;
        match tokio::fs::remove_file(&target).await {
            Ok(()) => Ok(()),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(()),
            Err(e) => Err(e.into()),
        }
    }

    /// 本地存储没有签名机制，直接返回文件 URL
    async fn presign(&self, path: &str, _expires_in: Duration) -> Result<String> {
        let (bucket, key) = split_path(path)?;
        let target = self.resolve(bucket, key)?;
        if !tokio::fs::try_exists(&target).await? {
            return Err(CodeMentorError::not_found(format!("对象不存在: {path}")));
        }
        Ok(format!("file://{}", target.display()))
    }

    async fn check(&self) -> Result<()> {
        let meta = tokio::fs::metadata(&self.root).await?;
        if !meta.is_dir() {
            return Err(CodeMentorError::blob_store(format!(
                "存储路径不是目录: {}",
                self.root.display()
            )));
        }
        Ok(())
    }

    fn backend_name(&self) -> &'static str {
        "local"
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_put_get_delete() {
        let dir = tempfile::tempdir().unwrap();
        let store = LocalBlobStore::new(dir.path()).await.unwrap();

        let path = store
            .put("submissions", "submissions/1/1_p.zip", b"PK".to_vec(), "application/zip")
            .await
            .unwrap();
        assert_eq!(path, "submissions/submissions/1/1_p.zip");
        assert_eq!(store.get(&path).await.unwrap(), b"PK");

        let url = store.presign(&path, Duration::from_secs(60)).await.unwrap();
        assert!(url.starts_with("file://"));
        assert!(url.ends_with("1_p.zip"));

        store.delete(&path).await.unwrap();
        assert!(store.get(&path).await.is_err());
        // 重复删除不报错
        store.delete(&path).await.unwrap();
        store.check().await.unwrap();
    }

    #[tokio::test]
    async fn test_rejects_traversal() {
        let dir = tempfile::tempdir().unwrap();
        let store = LocalBlobStore::new(dir.path()).await.unwrap();
        assert!(
            store
                .put("submissions", "../escape.zip", vec![1], "application/zip")
                .await
                .is_err()
        );
        assert!(store.get("submissions//etc/passwd").await.is_err());
    }

    #[tokio::test]
    async fn test_presign_missing_object() {
        let dir = tempfile::tempdir().unwrap();
        let store = LocalBlobStore::new(dir.path()).await.unwrap();
        let err = store
            .presign("videos/videos/9/9_x.mp4", Duration::from_secs(60))
            .await
            .unwrap_err();
        assert_eq!(err.code(), "E008");
    }
}
