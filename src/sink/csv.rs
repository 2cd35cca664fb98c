use csv::{ReaderBuilder, Writer};
use std::{
    fs::{self, File},
    io::Read,
    path::Path,
};
use tracing::info;

use crate::error::Result;
use crate::process::record::{Dataset, Record};

/// Write `dataset` to `path`, replacing whatever was there.
/// Header is the dataset's column union; nulls become empty fields.
pub fn persist(dataset: &Dataset, path: impl AsRef<Path>) -> Result<()> {
    let path = path.as_ref();
    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        fs::create_dir_all(parent)?;
    }

    let columns = dataset.columns();
    let mut writer = Writer::from_writer(File::create(path)?);
    if !columns.is_empty() {
        writer.write_record(&columns)?;
        for record in dataset {
            let row: Vec<String> = record
                .project_values(&columns)
                .into_iter()
                .map(Option::unwrap_or_default)
                .collect();
            writer.write_record(&row)?;
        }
    }
    writer.flush()?;

    info!(path = %path.display(), records = dataset.len(), "wrote csv");
    Ok(())
}

/// Parse CSV text back into records. Empty fields read as null.
pub fn read_from<R: Read>(reader: R) -> Result<Dataset> {
    let mut rdr = ReaderBuilder::new().has_headers(true).from_reader(reader);
    let headers: Vec<String> = rdr.headers()?.iter().map(str::to_string).collect();

    let mut dataset = Dataset::new();
    for row in rdr.records() {
        let row = row?;
        let record: Record = headers
            .iter()
            .zip(row.iter())
            .map(|(h, v)| {
                let value = if v.is_empty() { None } else { Some(v.to_string()) };
                (h.clone(), value)
            })
            .collect();
        dataset.push(record);
    }
    Ok(dataset)
}

pub fn read(path: impl AsRef<Path>) -> Result<Dataset> {
    read_from(File::open(path)?)
}
