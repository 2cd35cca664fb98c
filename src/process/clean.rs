use std::collections::HashSet;
use tracing::info;

use crate::process::record::{Dataset, Value};
use crate::process::utils::nullify;

/// Null out blanks and null-like strings, drop all-null rows, then drop
/// exact duplicates keeping the first. Survivors keep their relative order.
pub fn clean(dataset: Dataset) -> Dataset {
    let before = dataset.len();
    let columns = dataset.columns();
    let mut seen: HashSet<Vec<Value>> = HashSet::with_capacity(before);
    let mut out = Dataset::new();

    for mut record in dataset {
        for value in record.values_mut() {
            *value = nullify(value.take());
        }
        if record.is_all_null() {
            continue;
        }
        // Compare over the shared column set so missing keys count as null.
        if seen.insert(record.project_values(&columns)) {
            out.push(record);
        }
    }

    info!(before, after = out.len(), "cleaned dataset");
    out
}
