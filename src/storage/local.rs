//! Local filesystem storage implementation.
//!
//! Each bucket is a directory under the storage root. Used by the CLI and in
//! tests; the Lambda uses `S3Storage`.
//!
//! ## Storage Layout
//!
//! ```text
//! {root}/
//! ├── config.toml           # CLI configuration
//! └── {bucket}/
//!     ├── {prefix}_{season}_{timestamp}.csv
//!     └── {prefix}_{season}_{timestamp}.json
//! ```

use std::path::{Path, PathBuf};

use async_trait::async_trait;
use tokio::io::AsyncWriteExt;

use crate::error::{AppError, Result};
use crate::storage::BlobStore;

/// Local filesystem storage backend.
#[derive(Debug, Clone)]
pub struct LocalStorage {
    root_dir: PathBuf,
}

impl LocalStorage {
    /// Create a new LocalStorage rooted at the given directory.
    pub fn new(root_dir: impl Into<PathBuf>) -> Self {
        Self {
            root_dir: root_dir.into(),
        }
    }

    fn bucket_dir(&self, bucket: &str) -> PathBuf {
        self.root_dir.join(bucket)
    }

    /// Get the full path for an object.
    fn path(&self, bucket: &str, name: &str) -> Result<PathBuf> {
        if name.is_empty() || name.split('/').any(|part| part.is_empty() || part == "..") {
            return Err(AppError::validation(format!("Invalid object name '{name}'")));
        }
        Ok(self.bucket_dir(bucket).join(name))
    }

    /// Write bytes atomically (write to temp, then rename).
    async fn write_bytes(&self, path: &Path, bytes: &[u8]) -> Result<()> {
        if let Some(parent) = path.parent() {
            tokio::fs::create_dir_all(parent).await?;
        }

        let mut tmp = path.as_os_str().to_owned();
        tmp.push(".tmp");
        let tmp = PathBuf::from(tmp);

        let mut file = tokio::fs::File::create(&tmp).await?;
        file.write_all(bytes).await?;
        file.flush().await?;
        drop(file);

        tokio::fs::rename(&tmp, path).await?;
        Ok(())
    }

    /// Read bytes, returning None if file doesn't exist.
    async fn read_bytes(&self, path: &Path) -> Result<Option<Vec<u8>>> {
        match tokio::fs::read(path).await {
            Ok(bytes) => Ok(Some(bytes)),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(None),
            Err(e) => Err(AppError::Io(e)),
        }
    }
}

#[async_trait]
impl BlobStore for LocalStorage {
    async fn list(&self, bucket: &str) -> Result<Vec<String>> {
        let dir = self.bucket_dir(bucket);
        let mut entries = match tokio::fs::read_dir(&dir).await {
            Ok(entries) => entries,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                log::debug!("Bucket directory {} does not exist", dir.display());
                return Ok(Vec::new());
            }
            Err(e) => return Err(AppError::Io(e)),
        };

        let mut names = Vec::new();
        while let Some(entry) = entries.next_entry().await? {
            if !entry.file_type().await?.is_file() {
                continue;
            }
            if let Some(name) = entry.file_name().to_str() {
                if !name.ends_with(".tmp") {
                    names.push(name.to_string());
                }
            }
        }
        names.sort();
        Ok(names)
    }

    async fn get(&self, bucket: &str, name: &str) -> Result<Option<Vec<u8>>> {
        let path = self.path(bucket, name)?;
        self.read_bytes(&path).await
    }

    async fn put(&self, bucket: &str, name: &str, bytes: Vec<u8>) -> Result<()> {
        let path = self.path(bucket, name)?;
        self.write_bytes(&path, &bytes).await?;
        log::debug!("Wrote {} bytes to {}", bytes.len(), path.display());
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[tokio::test]
    async fn test_put_and_get() {
        let tmp = TempDir::new().unwrap();
        let storage = LocalStorage::new(tmp.path());

        storage.put("bucket", "test.csv", b"hello".to_vec()).await.unwrap();
        let data = storage.get("bucket", "test.csv").await.unwrap();
        assert_eq!(data, Some(b"hello".to_vec()));
        assert!(tmp.path().join("bucket/test.csv").exists());
    }

    #[tokio::test]
    async fn test_get_nonexistent() {
        let tmp = TempDir::new().unwrap();
        let storage = LocalStorage::new(tmp.path());

        let data = storage.get("bucket", "nope.csv").await.unwrap();
        assert!(data.is_none());
    }

    #[tokio::test]
    async fn test_put_overwrites() {
        let tmp = TempDir::new().unwrap();
        let storage = LocalStorage::new(tmp.path());

        storage.put("b", "x.json", b"1".to_vec()).await.unwrap();
        storage.put("b", "x.json", b"2".to_vec()).await.unwrap();
        assert_eq!(storage.get("b", "x.json").await.unwrap(), Some(b"2".to_vec()));
        assert_eq!(storage.list("b").await.unwrap(), vec!["x.json"]);
    }

    #[tokio::test]
    async fn test_list_is_sorted_and_skips_directories() {
        let tmp = TempDir::new().unwrap();
        let storage = LocalStorage::new(tmp.path());

        storage.put("b", "b.csv", Vec::new()).await.unwrap();
        storage.put("b", "a.csv", Vec::new()).await.unwrap();
        storage.put("b", "config/config.toml", Vec::new()).await.unwrap();

        assert_eq!(storage.list("b").await.unwrap(), vec!["a.csv", "b.csv"]);
    }

    #[tokio::test]
    async fn test_list_missing_bucket_is_empty() {
        let tmp = TempDir::new().unwrap();
        let storage = LocalStorage::new(tmp.path());
        assert!(storage.list("absent").await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_rejects_escaping_names() {
        let tmp = TempDir::new().unwrap();
        let storage = LocalStorage::new(tmp.path());
        assert!(storage.get("b", "../secret").await.is_err());
        assert!(storage.put("b", "", Vec::new()).await.is_err());
    }
}
