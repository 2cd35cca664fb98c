use tracing::{error, info, instrument, warn};

use crate::error::{Result, ScrapeError};
use crate::sink;
use crate::store::{blob::BlobStore, db::Database};

#[derive(Debug, Default)]
pub struct LoadReport {
    /// (table, rows appended)
    pub loaded: Vec<(String, usize)>,
    pub failed: Vec<(String, ScrapeError)>,
    pub skipped: Vec<String>,
}

async fn load_one<S: BlobStore>(store: &S, db: &Database, table: &str, path: &str) -> Result<usize> {
    let bytes = store.read(path).await?;
    info!("Reading CSV file from path: {}", path);
    let dataset = sink::read_from(bytes.as_slice())?;
    db.append(table, &dataset)
}

/// Append each (table, blob path) into the table of the same name, in order.
/// A failing table is logged and recorded; the rest are still attempted.
#[instrument(level = "info", skip_all)]
pub async fn load_tables<S: BlobStore>(
    store: &S,
    db: &Database,
    tables: &[(String, String)],
) -> LoadReport {
    let mut report = LoadReport::default();
    for (table, path) in tables {
        info!("Processing table: {} from path: {}", table, path);
        if !path.ends_with(".csv") {
            warn!("Unsupported file type: {}", path);
            report.skipped.push(table.clone());
            continue;
        }
        match load_one(store, db, table, path).await {
            Ok(rows) => {
                info!("Successfully inserted {} rows into {}", rows, table);
                report.loaded.push((table.clone(), rows));
            }
            Err(e) => {
                error!("Failed to insert data into {}: {}", table, e);
                report.failed.push((table.clone(), e));
            }
        }
    }
    report
}
