use anyhow::{Context, Result};
use olympics_scraper::{config::Config, logging, store};
use tracing::{error, info};

#[tokio::main]
async fn main() -> Result<()> {
    logging::init();
    let cfg = Config::load()?;

    let hdfs = store::WebHdfsStore::new(&cfg.hdfs, cfg.request_timeout())?;
    info!(
        local = %cfg.output_dir.display(),
        namenode = %cfg.hdfs.url,
        target = %cfg.hdfs.target_dir,
        "uploading csv files"
    );

    let report = store::upload_dir(&hdfs, &cfg.output_dir, &cfg.hdfs.target_dir)
        .await
        .context("preparing upload target")?;

    for (name, err) in &report.failed {
        error!("{} not uploaded: {}", name, err);
    }
    info!(
        uploaded = report.uploaded.len(),
        failed = report.failed.len(),
        "upload finished"
    );
    Ok(())
}
