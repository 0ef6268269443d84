//! Timestamp formatting and path templates.

use chrono::format::{Item, StrftimeItems};
use chrono::{DateTime, Local, Utc};
use fanlog_types::{FanlogError, Result};
use std::fmt::Write;

/// RFC 3339 with millisecond precision and a `Z` suffix.
pub fn format_timestamp(timestamp: DateTime<Utc>) -> String {
    timestamp.format("%Y-%m-%dT%H:%M:%S%.3fZ").to_string()
}

/// Local wall-clock time, `HH:MM:SS.mmm`.
pub fn format_clock(timestamp: DateTime<Utc>) -> String {
    timestamp.with_timezone(&Local).format("%H:%M:%S%.3f").to_string()
}

/// Substitute strftime patterns in `template` using local time `now`.
///
/// Templates without `%` are returned unchanged.
pub fn expand_template(template: &str, now: DateTime<Local>) -> Result<String> {
    if !template.contains('%') {
        return Ok(template.to_string());
    }

    let items: Vec<Item<'_>> = StrftimeItems::new(template).collect();
    if items.iter().any(|item| matches!(item, Item::Error)) {
        return Err(FanlogError::Config(format!(
            "Invalid date pattern in '{}'",
            template
        )));
    }

    let mut expanded = String::new();
    write!(expanded, "{}", now.format_with_items(items.into_iter()))
        .map_err(|_| FanlogError::Config(format!("Cannot expand '{}'", template)))?;
    Ok(expanded)
}
