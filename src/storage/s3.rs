//! AWS S3 storage implementation.
//!
//! Objects live at `s3://{bucket}/{prefix}/{name}`. Listing only returns the
//! direct children of the prefix, matching the local backend.

use aws_sdk_s3::Client;
use aws_sdk_s3::primitives::ByteStream;
use tracing::{debug, info};

use async_trait::async_trait;

use crate::error::{AppError, Result};
use crate::storage::BlobStore;

/// S3-based blob storage.
#[derive(Debug, Clone)]
pub struct S3Storage {
    client: Client,
    prefix: String,
}

impl S3Storage {
    /// Create a new S3 storage instance.
    pub fn new(client: Client, prefix: impl Into<String>) -> Self {
        Self {
            client,
            prefix: prefix.into().trim_matches('/').to_string(),
        }
    }

    /// Create S3 storage from the ambient AWS configuration.
    ///
    /// `S3_PREFIX` overrides the key prefix given here.
    pub async fn from_env(default_prefix: &str) -> Result<Self> {
        let config = aws_config::load_defaults(aws_config::BehaviorVersion::latest()).await;
        let client = Client::new(&config);

        let prefix = std::env::var("S3_PREFIX").unwrap_or_else(|_| default_prefix.to_string());

        Ok(Self::new(client, prefix))
    }

    fn key(&self, name: &str) -> String {
        object_key(&self.prefix, name)
    }

    fn list_prefix(&self) -> Option<String> {
        (!self.prefix.is_empty()).then(|| format!("{}/", self.prefix))
    }
}

fn object_key(prefix: &str, name: &str) -> String {
    if prefix.is_empty() {
        name.to_string()
    } else {
        format!("{}/{}", prefix, name)
    }
}

#[async_trait]
impl BlobStore for S3Storage {
    async fn list(&self, bucket: &str) -> Result<Vec<String>> {
        let list_prefix = self.list_prefix();
        let mut names = Vec::new();
        let mut token: Option<String> = None;

        loop {
            let output = self
                .client
                .list_objects_v2()
                .bucket(bucket)
                .set_prefix(list_prefix.clone())
                .delimiter("/")
                .set_continuation_token(token.take())
                .send()
                .await
                .map_err(|e| {
                    AppError::S3(format!("list s3://{}: {}", bucket, e.into_service_error()))
                })?;

            for object in output.contents() {
                let Some(key) = object.key() else { continue };
                let name = match &list_prefix {
                    Some(p) => key.strip_prefix(p.as_str()).unwrap_or(key),
                    None => key,
                };
                if !name.is_empty() {
                    names.push(name.to_string());
                }
            }

            match output.next_continuation_token() {
                Some(next) => token = Some(next.to_string()),
                None => break,
            }
        }

        debug!("Listed {} objects in s3://{}", names.len(), bucket);
        names.sort();
        Ok(names)
    }

    async fn get(&self, bucket: &str, name: &str) -> Result<Option<Vec<u8>>> {
        let key = self.key(name);
        let result = self
            .client
            .get_object()
            .bucket(bucket)
            .key(&key)
            .send()
            .await;

        match result {
            Ok(output) => {
                let bytes = output
                    .body
                    .collect()
                    .await
                    .map_err(|e| AppError::S3(format!("read s3://{}/{}: {}", bucket, key, e)))?;
                Ok(Some(bytes.into_bytes().to_vec()))
            }
            Err(err) => {
                let service_err = err.into_service_error();
                if service_err.is_no_such_key() {
                    info!("No object at s3://{}/{}", bucket, key);
                    Ok(None)
                } else {
                    Err(AppError::S3(format!(
                        "get s3://{}/{}: {}",
                        bucket, key, service_err
                    )))
                }
            }
        }
    }

    async fn put(&self, bucket: &str, name: &str, bytes: Vec<u8>) -> Result<()> {
        let key = self.key(name);
        let size = bytes.len();
        let content_type = if name.ends_with(".csv") {
            "text/csv"
        } else if name.ends_with(".json") {
            "application/json"
        } else {
            "application/octet-stream"
        };

        self.client
            .put_object()
            .bucket(bucket)
            .key(&key)
            .body(ByteStream::from(bytes))
            .content_type(content_type)
            .send()
            .await
            .map_err(|e| {
                AppError::S3(format!("put s3://{}/{}: {}", bucket, key, e.into_service_error()))
            })?;

        info!("Wrote {} bytes to s3://{}/{}", size, bucket, key);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_object_key() {
        assert_eq!(object_key("", "a.csv"), "a.csv");
        assert_eq!(
            object_key("player_stats", "config/config.toml"),
            "player_stats/config/config.toml"
        );
    }
}
