use std::{io::ErrorKind, path::PathBuf};
use tokio::{fs, io::AsyncWriteExt};

use crate::error::{Result, ScrapeError};
use crate::store::blob::BlobStore;

/// Blob store rooted at a local directory. Blob paths are taken relative to it.
#[derive(Debug, Clone)]
pub struct LocalBlobStore {
    root: PathBuf,
}

impl LocalBlobStore {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    fn resolve(&self, path: &str) -> PathBuf {
        self.root.join(path.trim_start_matches('/'))
    }
}

impl BlobStore for LocalBlobStore {
    async fn make_dirs(&self, dir: &str) -> Result<()> {
        let full = self.resolve(dir);
        fs::create_dir_all(&full)
            .await
            .map_err(|e| ScrapeError::storage(full.display().to_string(), e))
    }

    async fn upload(&self, path: &str, data: Vec<u8>) -> Result<()> {
        let full = self.resolve(path);
        let mut file = fs::OpenOptions::new()
            .write(true)
            .create_new(true)
            .open(&full)
            .await
            .map_err(|e| match e.kind() {
                ErrorKind::AlreadyExists => ScrapeError::storage(path, "already exists"),
                _ => ScrapeError::storage(path, e),
            })?;
        file.write_all(&data).await?;
        file.flush().await?;
        Ok(())
    }

    async fn read(&self, path: &str) -> Result<Vec<u8>> {
        fs::read(self.resolve(path))
            .await
            .map_err(|e| ScrapeError::storage(path, e))
    }

    async fn list(&self, dir: &str) -> Result<Vec<String>> {
        let full = self.resolve(dir);
        let mut rd = fs::read_dir(&full)
            .await
            .map_err(|e| ScrapeError::storage(dir, e))?;
        let mut names = Vec::new();
        while let Some(entry) = rd.next_entry().await? {
            if entry.file_type().await?.is_file() {
                names.push(entry.file_name().to_string_lossy().to_string());
            }
        }
        names.sort();
        Ok(names)
    }
}
