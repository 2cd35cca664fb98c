//! Per-dataset row shaping. Every function here is pure over its input.

use once_cell::sync::Lazy;
use regex::Regex;

use crate::error::{Result, ScrapeError};
use crate::process::record::Record;

pub const YEAR: &str = "Year";
pub const HOST_CITY: &str = "Host City";
pub const FLAG_URL: &str = "Flag URL";

static HOST_CITY_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"(.*)\s+(\d{4})").expect("host city pattern should compile"));

/// Zip header names with cells. The shorter side bounds the record, as `zip` does.
pub fn zip_row<S: AsRef<str>>(headers: &[S], cells: &[String]) -> Record {
    headers
        .iter()
        .zip(cells)
        .map(|(h, c)| (h.as_ref().to_string(), Some(c.clone())))
        .collect()
}

/// Tag a record with the year of the page it came from.
pub fn with_year(mut record: Record, year: &str) -> Record {
    record.insert(YEAR, Some(year.to_string()));
    record
}

/// Split `"Athens 2004"` into `Host City = Athens` and `Year = 2004`.
pub fn split_host_city(mut record: Record) -> Result<Record> {
    let raw = record.get(HOST_CITY).map(str::to_string);
    let caps = raw
        .as_deref()
        .and_then(|s| HOST_CITY_RE.captures(s))
        .ok_or_else(|| ScrapeError::MalformedField {
            field: HOST_CITY.to_string(),
            value: raw.clone(),
        })?;

    let city = caps[1].trim().to_string();
    let year = caps[2].to_string();
    record.insert(HOST_CITY, Some(city));
    record.insert(YEAR, Some(year));
    Ok(record)
}

/// Keep only `keys`, in that order. Absent keys come out null.
pub fn project<S: AsRef<str>>(record: &Record, keys: &[S]) -> Record {
    keys.iter()
        .map(|k| {
            let k = k.as_ref();
            (k.to_string(), record.get(k).map(str::to_string))
        })
        .collect()
}

/// Map cells onto `schema` by position and put `Year` in front.
/// Extra cells are dropped; missing trailing cells are null.
pub fn positional<S: AsRef<str>>(cells: &[String], schema: &[S], year: &str) -> Record {
    let mut record = Record::new();
    for (i, name) in schema.iter().enumerate() {
        record.insert(name.as_ref(), cells.get(i).cloned());
    }
    record.insert_first(YEAR, Some(year.to_string()));
    record
}

#[cfg(test)]
mod tests {
    use super::*;

    fn cells(v: &[&str]) -> Vec<String> {
        v.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn zip_row_truncates_to_shorter_side() {
        let rec = zip_row(&["GROUP", "G", "S"], &cells(&["Kenya", "4"]));
        assert_eq!(rec.keys().collect::<Vec<_>>(), vec!["GROUP", "G"]);
        let rec = zip_row(&["GROUP"], &cells(&["Kenya", "4"]));
        assert_eq!(rec.len(), 1);
    }

    #[test]
    fn splits_host_city_and_year() -> anyhow::Result<()> {
        let rec = split_host_city(Record::new().with(HOST_CITY, "Athens 2004"))?;
        assert_eq!(rec.get(HOST_CITY), Some("Athens"));
        assert_eq!(rec.get(YEAR), Some("2004"));

        let rec = split_host_city(Record::new().with(HOST_CITY, "Los Angeles 1984"))?;
        assert_eq!(rec.get(HOST_CITY), Some("Los Angeles"));
        assert_eq!(rec.get(YEAR), Some("1984"));
        Ok(())
    }

    #[test]
    fn host_city_without_year_is_malformed() {
        let err = split_host_city(Record::new().with(HOST_CITY, "TBD")).unwrap_err();
        assert!(matches!(err, ScrapeError::MalformedField { ref value, .. } if value.as_deref() == Some("TBD")));

        let err = split_host_city(Record::new().with("Olympiad", "I")).unwrap_err();
        assert!(matches!(err, ScrapeError::MalformedField { value: None, .. }));
    }

    #[test]
    fn project_reorders_and_drops() {
        let rec = Record::new()
            .with("Olympiad", "XXVIII")
            .with(HOST_CITY, "Athens")
            .with("Nations", "201")
            .with(YEAR, "2004");
        let out = project(&rec, &["Olympiad", YEAR, HOST_CITY, "Athletes"]);
        assert_eq!(
            out.keys().collect::<Vec<_>>(),
            vec!["Olympiad", YEAR, HOST_CITY, "Athletes"]
        );
        assert_eq!(out.get("Athletes"), None);
        assert!(!out.contains_key("Nations"));
    }

    #[test]
    fn positional_prepends_year() {
        let schema = ["Rank", "Continent", "Flag", "Gold", "Silver", "Bronze", "Total"];
        let rec = positional(&cells(&["1", "Europe", "", "90", "80", "70", "240", "x"]), &schema, "2004");
        assert_eq!(rec.keys().next(), Some(YEAR));
        assert_eq!(rec.get(YEAR), Some("2004"));
        assert_eq!(rec.get("Continent"), Some("Europe"));
        assert_eq!(rec.len(), 8);

        let short = positional(&cells(&["2", "Asia"]), &schema, "2008");
        assert_eq!(short.get("Total"), None);
        assert!(short.contains_key("Total"));
    }
}
