use crate::process::record::Value;

/// Collapse the whitespace runs browsers fold away, then trim.
pub fn clean_str(raw: &str) -> String {
    raw.split_whitespace().collect::<Vec<_>>().join(" ")
}

/// Spellings of "missing" that scraped pages and spreadsheets leave behind.
pub const NULL_LIKE: &[&str] = &["None", "none", "NaN", "nan"];

/// `None` for empty, whitespace-only or null-like text.
pub fn nullify(value: Value) -> Value {
    match value {
        Some(s) if s.trim().is_empty() => None,
        Some(s) if NULL_LIKE.contains(&s.as_str()) => None,
        other => other,
    }
}

/// File name for a downloaded image: last path segment, query/params cut off.
pub fn image_file_name(url: &str) -> Option<String> {
    let last = url.trim_end_matches('/').rsplit('/').next()?;
    let name = last.split(['&', '?']).next().unwrap_or_default();
    if name.is_empty() {
        None
    } else {
        Some(name.to_string())
    }
}
