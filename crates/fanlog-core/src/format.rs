//! Line rendering shared by console and file sinks.

use crate::term::level_tag;
use crate::time::{format_clock, format_timestamp};
use fanlog_types::{LogEvent, LogFormat};
use serde_json::json;

/// Render `event` in `format`, without a trailing newline.
///
/// `colors` only affects [`LogFormat::Pretty`].
pub fn render(event: &LogEvent, format: LogFormat, colors: bool) -> String {
    match format {
        LogFormat::Pretty => render_pretty(event, colors),
        LogFormat::Compact => render_compact(event),
        LogFormat::Json => render_json(event),
    }
}

fn render_pretty(event: &LogEvent, colors: bool) -> String {
    let mut out = format!(
        "{} [{}] {}: {}",
        format_timestamp(event.timestamp),
        level_tag(event.level, colors),
        event.source,
        event.message
    );

    if let Some(error) = event.error_text() {
        out.push_str("\n  error: ");
        out.push_str(&error);
    }
    if let Some(trace) = &event.stack_trace {
        for line in trace.lines().filter(|l| !l.trim().is_empty()) {
            out.push_str("\n    ");
            out.push_str(line.trim_end());
        }
    }

    out
}

fn render_compact(event: &LogEvent) -> String {
    let mut out = format!(
        "{} {} {} {}",
        format_clock(event.timestamp),
        event.level.short_label(),
        event.source,
        event.message
    );
    if let Some(error) = event.error_text() {
        out.push_str(" | error: ");
        out.push_str(&error);
    }
    out
}

fn render_json(event: &LogEvent) -> String {
    json!({
        "level": event.level,
        "message": event.message,
        "error": event.error_text(),
        "stack_trace": event.stack_trace,
        "timestamp": format_timestamp(event.timestamp),
        "source": event.source,
    })
    .to_string()
}
