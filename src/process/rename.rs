use crate::process::record::{Dataset, Record};

/// Source column name → canonical column name.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ColumnMapping {
    pairs: Vec<(String, String)>,
}

impl ColumnMapping {
    pub fn new<F: Into<String>, T: Into<String>>(pairs: impl IntoIterator<Item = (F, T)>) -> Self {
        Self {
            pairs: pairs
                .into_iter()
                .map(|(f, t)| (f.into(), t.into()))
                .collect(),
        }
    }

    pub fn target(&self, source: &str) -> Option<&str> {
        self.pairs
            .iter()
            .find(|(f, _)| f == source)
            .map(|(_, t)| t.as_str())
    }

    /// Canonical → source. Only meaningful when the mapping is injective.
    pub fn inverse(&self) -> Self {
        Self {
            pairs: self
                .pairs
                .iter()
                .map(|(f, t)| (t.clone(), f.clone()))
                .collect(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.pairs.is_empty()
    }
}

/// Rename keys per `mapping`, keeping positions. Unmapped keys pass through.
pub fn rename(dataset: Dataset, mapping: &ColumnMapping) -> Dataset {
    if mapping.is_empty() {
        return dataset;
    }
    dataset
        .into_iter()
        .map(|rec| rename_record(rec, mapping))
        .collect()
}

fn rename_record(record: Record, mapping: &ColumnMapping) -> Record {
    Record::from_fields(
        record
            .into_fields()
            .into_iter()
            .map(|(k, v)| match mapping.target(&k) {
                Some(t) => (t.to_string(), v),
                None => (k, v),
            })
            .collect(),
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    fn medals() -> ColumnMapping {
        ColumnMapping::new([
            ("GROUP", "Team"),
            ("G", "Gold"),
            ("Year", "Years"),
            ("Flag URL", "Flag_URL"),
        ])
    }

    #[test]
    fn renames_in_place_and_passes_unknown_keys() {
        let ds: Dataset = vec![Record::new()
            .with("GROUP", "Kenya")
            .with("G", "4")
            .with("Extra", "y")
            .with("Year", "2004")]
        .into();
        let out = rename(ds, &medals());
        assert_eq!(
            out.records()[0].keys().collect::<Vec<_>>(),
            vec!["Team", "Gold", "Extra", "Years"]
        );
        assert_eq!(out.records()[0].get("Team"), Some("Kenya"));
    }

    #[test]
    fn inverse_recovers_original_keys() {
        let original: Dataset = vec![
            Record::new().with("GROUP", "Peru").with("Flag URL", "u"),
            Record::new().with("G", "1").with("Other", "z"),
        ]
        .into();
        let map = medals();
        let back = rename(rename(original.clone(), &map), &map.inverse());
        assert_eq!(back, original);
    }
}
