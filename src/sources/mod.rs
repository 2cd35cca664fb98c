//! The scraping units. Each one owns its loader and writes its own files.

pub mod espn;
pub mod olympedia;
pub mod olympian_database;

use anyhow::{Context, Result};
use std::path::PathBuf;
use tracing::{info, warn};

use crate::config::Config;
use crate::datasets::DatasetKind;
use crate::process::{clean, rename, Dataset};
use crate::sink;

/// Clean, rename onto canonical columns and write `<output_dir>/<kind>.csv`.
/// Returns `None` and writes nothing when no records survive cleaning.
pub(crate) fn finish(dataset: Dataset, kind: DatasetKind, cfg: &Config) -> Result<Option<PathBuf>> {
    let cleaned = clean(dataset);
    if cleaned.is_empty() {
        warn!(dataset = kind.table_name(), "no data found, nothing written");
        return Ok(None);
    }
    let renamed = rename(cleaned, &kind.column_mapping());

    let path = cfg.output_dir.join(kind.file_name());
    sink::persist(&renamed, &path)
        .with_context(|| format!("writing {}", path.display()))?;
    info!(
        dataset = kind.table_name(),
        records = renamed.len(),
        path = %path.display(),
        "cleaned data saved"
    );
    Ok(Some(path))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::process::Record;
    use tempfile::tempdir;

    #[test]
    fn finish_writes_canonical_columns() -> anyhow::Result<()> {
        let tmp = tempdir()?;
        let cfg = Config {
            output_dir: tmp.path().join("csvFiles"),
            ..Config::default()
        };
        let ds: Dataset = vec![
            Record::new().with("Sport", "Archery").with("Olympic Status", "Current"),
            Record::new().with("Sport", "Archery").with("Olympic Status", "Current"),
            Record::new().with("Sport", " ").with("Olympic Status", "nan"),
        ]
        .into();

        let path = finish(ds, DatasetKind::Sports, &cfg)?.expect("file written");
        assert_eq!(path, tmp.path().join("csvFiles").join("Sports.csv"));
        assert_eq!(
            std::fs::read_to_string(&path)?,
            "Sport,Olympic_Status\nArchery,Current\n"
        );
        Ok(())
    }

    #[test]
    fn finish_skips_empty_datasets() -> anyhow::Result<()> {
        let tmp = tempdir()?;
        let cfg = Config {
            output_dir: tmp.path().to_path_buf(),
            ..Config::default()
        };
        let ds: Dataset = vec![Record::new().with("Sport", "")].into();
        assert!(finish(ds, DatasetKind::Sports, &cfg)?.is_none());
        assert!(!tmp.path().join("Sports.csv").exists());
        Ok(())
    }
}
