//! Blob storage for snapshots and configuration.
//!
//! Objects are addressed by bucket and name. Names may contain `/`.
//!
//! ```text
//! {bucket}/
//! ├── config/config.toml                          # optional, read by the Lambda
//! ├── player_stats_2021-22_20260301120000.csv     # snapshot rows
//! └── player_stats_2021-22_20260301120000.json    # run summary
//! ```

pub mod local;
#[cfg(feature = "s3")]
pub mod s3;

use async_trait::async_trait;

use crate::error::Result;

pub use local::LocalStorage;
#[cfg(feature = "s3")]
pub use s3::S3Storage;

/// Trait for blob storage backends.
#[async_trait]
pub trait BlobStore: Send + Sync {
    /// Object names in `bucket`, sorted. A missing bucket lists as empty.
    async fn list(&self, bucket: &str) -> Result<Vec<String>>;

    /// Read an object, `None` if it does not exist.
    async fn get(&self, bucket: &str, name: &str) -> Result<Option<Vec<u8>>>;

    /// Create or replace an object.
    async fn put(&self, bucket: &str, name: &str, bytes: Vec<u8>) -> Result<()>;
}
