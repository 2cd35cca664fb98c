use std::path::{Path, PathBuf};
use tokio::fs;
use tracing::{error, info};

use crate::error::{Result, ScrapeError};
use crate::fetch::page::PageLoader;
use crate::process::utils::image_file_name;

/// Download the image at `url` into `dest_dir`, named after its last path segment.
/// Returns the full path of the saved file.
pub async fn download_image<L: PageLoader>(
    loader: &L,
    url: &str,
    dest_dir: impl AsRef<Path>,
) -> Result<PathBuf> {
    let filename = image_file_name(url)
        .ok_or_else(|| ScrapeError::storage(url, "no file name in image URL"))?;
    let dest_path = dest_dir.as_ref().join(filename);

    if let Some(parent) = dest_path.parent() {
        fs::create_dir_all(parent).await?;
    }

    let bytes = loader.fetch_bytes(url).await?;
    fs::write(&dest_path, &bytes).await?;

    Ok(dest_path)
}

/// Download every resolved image, logging failures. The URLs are left untouched.
pub async fn download_all<L: PageLoader>(loader: &L, urls: &[Option<String>], dest_dir: &Path) {
    for url in urls.iter().flatten() {
        match download_image(loader, url, dest_dir).await {
            Ok(path) => info!(url = %url, path = %path.display(), "downloaded image"),
            Err(e) => error!(url = %url, error = %e, "failed to download image"),
        }
    }
}
