use anyhow::{Context, Result};
use olympics_scraper::{config::Config, datasets::DatasetKind, logging, store};
use tracing::info;

#[tokio::main]
async fn main() -> Result<()> {
    logging::init();
    let cfg = Config::load()?;

    let hdfs = store::WebHdfsStore::new(&cfg.hdfs, cfg.request_timeout())?;
    let db = store::Database::open(&cfg.database_path)
        .with_context(|| format!("opening {}", cfg.database_path.display()))?;

    let tables: Vec<(String, String)> = DatasetKind::ALL
        .iter()
        .map(|kind| (kind.table_name().to_string(), cfg.blob_path(&kind.file_name())))
        .collect();

    let report = store::load_tables(&hdfs, &db, &tables).await;
    info!(
        loaded = report.loaded.len(),
        failed = report.failed.len(),
        skipped = report.skipped.len(),
        "Data transfer complete"
    );
    Ok(())
}
