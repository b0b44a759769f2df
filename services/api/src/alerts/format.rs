//! Display formatting for alert fields
//!
//! Formatting never fails: input that cannot be interpreted is shown as it
//! arrived.

use chrono::{DateTime, NaiveDate, NaiveDateTime};
use serde_json::Value;

/// Placeholder for values that are missing or empty
pub const NOT_AVAILABLE: &str = "N/A";

/// Epoch numbers above this are milliseconds, everything else is seconds
pub const EPOCH_MILLIS_THRESHOLD: f64 = 1_000_000_000_000.0;

/// Largest distance from the epoch, in milliseconds, treated as a real date
const MAX_EPOCH_MILLIS: f64 = 8.64e15;

/// Rendering pattern for timestamps: `YYYY/MM/DD, HH:MM:SS`, 24-hour clock
pub const DATE_TIME_PATTERN: &str = "%Y/%m/%d, %H:%M:%S";

const NAIVE_DATE_TIME_PATTERNS: &[&str] = &[
    "%Y-%m-%dT%H:%M:%S%.f",
    "%Y-%m-%d %H:%M:%S%.f",
    "%Y-%m-%dT%H:%M",
    "%Y-%m-%d %H:%M",
    "%Y/%m/%d %H:%M:%S",
    "%Y/%m/%d, %H:%M:%S",
];

const NAIVE_DATE_PATTERNS: &[&str] = &["%Y-%m-%d", "%Y/%m/%d"];

/// Show a value as text: strings verbatim, everything else as JSON
pub fn stringify(value: &Value) -> String {
    match value {
        Value::String(s) => s.clone(),
        other => other.to_string(),
    }
}

fn parse_text(text: &str) -> Option<NaiveDateTime> {
    let text = text.trim();

    if let Ok(instant) = DateTime::parse_from_rfc3339(text) {
        return Some(instant.naive_utc());
    }

    if let Ok(instant) = DateTime::parse_from_rfc2822(text) {
        return Some(instant.naive_utc());
    }

    for pattern in NAIVE_DATE_TIME_PATTERNS {
        if let Ok(naive) = NaiveDateTime::parse_from_str(text, pattern) {
            return Some(naive);
        }
    }

    NAIVE_DATE_PATTERNS
        .iter()
        .find_map(|pattern| NaiveDate::parse_from_str(text, pattern).ok())
        .and_then(|date| date.and_hms_opt(0, 0, 0))
}

fn parse_epoch(number: f64) -> Option<NaiveDateTime> {
    let millis = if number > EPOCH_MILLIS_THRESHOLD {
        number
    } else {
        number * 1000.0
    };

    if !millis.is_finite() || millis.abs() > MAX_EPOCH_MILLIS {
        return None;
    }

    DateTime::from_timestamp_millis(millis.trunc() as i64).map(|instant| instant.naive_utc())
}

/// Interpret a field value as a point in time
///
/// Strings are read as ISO-like timestamps (offsets are converted to UTC,
/// offset-less values are kept as written). Numbers are epoch milliseconds
/// above [`EPOCH_MILLIS_THRESHOLD`] and epoch seconds otherwise.
pub fn parse_timestamp(value: &Value) -> Option<NaiveDateTime> {
    match value {
        Value::String(text) => parse_text(text),
        Value::Number(number) => number.as_f64().and_then(parse_epoch),
        _ => None,
    }
}

/// Render a timestamp field, falling back to the original value
pub fn format_date_time(value: &Value) -> String {
    match parse_timestamp(value) {
        Some(instant) => instant.format(DATE_TIME_PATTERN).to_string(),
        None => stringify(value),
    }
}

fn is_falsy(value: &Value) -> bool {
    match value {
        Value::Null => true,
        Value::Bool(b) => !b,
        Value::String(s) => s.is_empty(),
        Value::Number(n) => n.as_f64() == Some(0.0),
        _ => false,
    }
}

/// Render a duration field given in minutes as `"<h> hrs <m> mins"`
///
/// Missing or falsy values give [`NOT_AVAILABLE`]; strings pass through.
pub fn format_duration(value: Option<&Value>) -> String {
    let Some(value) = value.filter(|v| !is_falsy(v)) else {
        return NOT_AVAILABLE.to_string();
    };

    match value {
        Value::String(s) => s.clone(),
        Value::Number(n) => {
            if let Some(minutes) = n.as_i64() {
                format!("{} hrs {} mins", minutes.div_euclid(60), minutes % 60)
            } else if let Some(minutes) = n.as_u64() {
                format!("{} hrs {} mins", minutes / 60, minutes % 60)
            } else {
                let minutes = n.as_f64().unwrap_or_default();
                format!("{} hrs {} mins", (minutes / 60.0).floor(), minutes % 60.0)
            }
        }
        other => stringify(other),
    }
}
