use std::future::Future;

use crate::error::Result;

/// A named-blob store with directory semantics, e.g. HDFS.
pub trait BlobStore: Send + Sync {
    /// Create `dir` and any missing parents. Existing directories are fine.
    fn make_dirs(&self, dir: &str) -> impl Future<Output = Result<()>> + Send;

    /// Write `data` to `path`. Fails if `path` already exists.
    fn upload(&self, path: &str, data: Vec<u8>) -> impl Future<Output = Result<()>> + Send;

    fn read(&self, path: &str) -> impl Future<Output = Result<Vec<u8>>> + Send;

    /// Names of the files directly under `dir`, sorted.
    fn list(&self, dir: &str) -> impl Future<Output = Result<Vec<String>>> + Send;
}
