// src/app/utils.rs
use chrono::NaiveDate;
use once_cell::sync::Lazy;
use regex::Regex;

static LEADING_NUMBER: Lazy<Option<Regex>> = Lazy::new(|| Regex::new(r"^\s*(\d+)").ok());

/// Split a comma-separated multi-value cell ("USA, France") into trimmed,
/// non-empty values.
pub fn split_multi(field: &str) -> impl Iterator<Item = &str> {
    field.split(',').map(str::trim).filter(|s| !s.is_empty())
}

/// Minutes (or seasons) from the leading digits of a duration label.
/// "90 min" -> 90.0, "2 Seasons" -> 2.0, anything not starting with a digit -> None.
pub fn parse_duration_minutes(text: &str) -> Option<f64> {
    let re = LEADING_NUMBER.as_ref()?;
    let caps = re.captures(text)?;
    caps.get(1)?.as_str().parse::<f64>().ok()
}

/// Case-insensitive substring test. `needle_lower` must already be lowercase.
pub fn contains_ci(haystack: &str, needle_lower: &str) -> bool {
    if needle_lower.is_empty() {
        return true;
    }
    haystack.to_lowercase().contains(needle_lower)
}

/// Parse the catalog's "date added" cells, e.g. "September 25, 2021".
pub fn parse_date_added(raw: &str) -> Option<NaiveDate> {
    let s = raw.trim();
    if s.is_empty() {
        return None;
    }
    NaiveDate::parse_from_str(s, "%B %d, %Y")
        .or_else(|_| NaiveDate::parse_from_str(s, "%b %d, %Y"))
        .or_else(|_| NaiveDate::parse_from_str(s, "%Y-%m-%d"))
        .ok()
}

/// Cell text for optional values in tables and detail lines.
pub fn or_dash(v: Option<&str>) -> &str {
    v.unwrap_or("—")
}

pub fn format_year_span(span: Option<(i32, i32)>) -> String {
    match span {
        Some((lo, hi)) if lo == hi => lo.to_string(),
        Some((lo, hi)) => format!("{lo} - {hi}"),
        None => "—".into(),
    }
}

/// Share of `part` in `total` as a percentage (0 when total is 0).
pub fn percent(part: usize, total: usize) -> f32 {
    if total == 0 {
        0.0
    } else {
        part as f32 * 100.0 / total as f32
    }
}
