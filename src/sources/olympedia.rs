// src/sources/olympedia.rs

use anyhow::{Context, Result};
use tracing::{info, instrument};

use crate::config::Config;
use crate::datasets::DatasetKind;
use crate::extract::{self, TableLocator};
use crate::fetch::PageLoader;
use crate::process::{normalize::zip_row, Dataset};
use crate::sources::finish;

pub const SPORTS_URL: &str = "https://www.olympedia.org/sports";
const SPORTS_TABLE: &str = ".table-striped";

/// Scrape the sports list into `Sports.csv`. An empty table writes nothing.
#[instrument(level = "info", skip_all, fields(url = SPORTS_URL))]
pub async fn run<L: PageLoader>(loader: L, cfg: Config) -> Result<()> {
    info!("Scraping data from {}", SPORTS_URL);
    let html = loader
        .load(SPORTS_URL, SPORTS_TABLE)
        .await
        .with_context(|| format!("loading {}", SPORTS_URL))?;
    let table = extract::extract(&html, SPORTS_URL, &TableLocator::new(SPORTS_TABLE))?.table;
    info!(headers = ?table.headers, rows = table.rows.len(), "sports table");

    let dataset: Dataset = table
        .rows
        .iter()
        .map(|cells| zip_row(&table.headers, cells))
        .collect();
    finish(dataset, DatasetKind::Sports, &cfg)?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::fetch::page::testing::StaticPages;
    use crate::sink;
    use tempfile::tempdir;

    const PAGE: &str = r#"
        <table class="table table-striped">
          <thead><tr><th>Code</th><th>Sport</th><th>Olympic Status</th></tr></thead>
          <tbody>
            <tr><td>ARC</td><td>Archery</td><td>Current</td></tr>
            <tr></tr>
            <tr><td>ALP</td><td>Alpinism</td><td> </td></tr>
          </tbody>
        </table>"#;

    #[tokio::test]
    async fn writes_sports_with_canonical_status() -> anyhow::Result<()> {
        let tmp = tempdir()?;
        let cfg = Config {
            output_dir: tmp.path().to_path_buf(),
            ..Config::default()
        };
        run(StaticPages::default().page(SPORTS_URL, PAGE), cfg.clone()).await?;

        let ds = sink::read(cfg.output_dir.join("Sports.csv"))?;
        assert_eq!(ds.columns(), vec!["Code", "Sport", "Olympic_Status"]);
        assert_eq!(ds.len(), 2);
        assert_eq!(ds.records()[1].get("Olympic_Status"), None);
        Ok(())
    }

    #[tokio::test]
    async fn empty_table_writes_nothing() -> anyhow::Result<()> {
        let tmp = tempdir()?;
        let cfg = Config {
            output_dir: tmp.path().to_path_buf(),
            ..Config::default()
        };
        let empty = r#"<table class="table-striped"><thead><tr><th>Sport</th></tr></thead><tbody></tbody></table>"#;
        run(StaticPages::default().page(SPORTS_URL, empty), cfg.clone()).await?;
        assert!(!cfg.output_dir.join("Sports.csv").exists());
        Ok(())
    }

    #[tokio::test]
    async fn missing_table_fails_the_unit() {
        let err = run(StaticPages::default(), Config::default()).await.unwrap_err();
        assert!(format!("{:#}", err).contains("loading https://www.olympedia.org/sports"));
    }
}
