use std::path::Path;
use tokio::fs;
use tracing::{debug, error, info, instrument};

use crate::error::{Result, ScrapeError};
use crate::store::blob::BlobStore;

#[derive(Debug, Default)]
pub struct IngestReport {
    pub uploaded: Vec<String>,
    pub failed: Vec<(String, ScrapeError)>,
}

/// Upload every `*.csv` in `local_dir` into `target_dir`, write-once.
/// Only failing to create `target_dir` aborts; per-file failures are logged.
#[instrument(level = "info", skip(store, local_dir), fields(local = %local_dir.as_ref().display()))]
pub async fn upload_dir<S: BlobStore>(
    store: &S,
    local_dir: impl AsRef<Path>,
    target_dir: &str,
) -> Result<IngestReport> {
    let local_dir = local_dir.as_ref();
    store.make_dirs(target_dir).await?;
    info!("Ensured target folder exists: {}", target_dir);

    let mut files = Vec::new();
    let mut rd = fs::read_dir(local_dir).await?;
    while let Some(entry) = rd.next_entry().await? {
        let path = entry.path();
        if path.is_file() && path.extension().map_or(false, |ext| ext == "csv") {
            files.push(path);
        } else {
            debug!(file = %path.display(), "Skipping non-csv entry");
        }
    }
    files.sort();

    let mut report = IngestReport::default();
    for path in files {
        let name = path
            .file_name()
            .map(|n| n.to_string_lossy().to_string())
            .unwrap_or_default();
        let remote = format!("{}/{}", target_dir.trim_end_matches('/'), name);

        let result = match fs::read(&path).await {
            Ok(bytes) => store.upload(&remote, bytes).await,
            Err(e) => Err(ScrapeError::Io(e)),
        };
        match result {
            Ok(()) => {
                info!("Successfully uploaded {} to {}", name, remote);
                report.uploaded.push(name);
            }
            Err(e) => {
                error!("Failed to upload {}: {}", name, e);
                report.failed.push((name, e));
            }
        }
    }
    Ok(report)
}
