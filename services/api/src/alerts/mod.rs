//! Alert records: field resolution, formatting and filtering

pub mod fields;
pub mod filter;
pub mod format;
pub mod view;

use serde::Serialize;
use serde_json::Value;
use tracing::debug;

pub use fields::{LogicalField, Record, extract};
pub use filter::DateRange;
pub use format::{NOT_AVAILABLE, format_date_time, format_duration};
pub use view::AlertsView;

/// Envelope keys that may wrap the alert list
const ENVELOPE_KEYS: &[&str] = &["data", "alerts", "items", "results"];

/// Pull the alert records out of an upstream payload
///
/// Accepts a bare array or an object wrapping the array under one of the
/// envelope keys. Entries that are not objects are dropped.
pub fn records_from_payload(payload: Value) -> Vec<Record> {
    let items = match payload {
        Value::Array(items) => items,
        Value::Object(mut envelope) => ENVELOPE_KEYS
            .iter()
            .find_map(|key| match envelope.remove(*key) {
                Some(Value::Array(items)) => Some(items),
                _ => None,
            })
            .unwrap_or_default(),
        _ => Vec::new(),
    };

    let total = items.len();
    let records: Vec<Record> = items
        .into_iter()
        .filter_map(|item| match item {
            Value::Object(record) => Some(record),
            _ => None,
        })
        .collect();

    if records.len() != total {
        debug!("Dropped {} non-object alert entries", total - records.len());
    }

    records
}

/// One alert normalized for display
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct AlertRow {
    pub date_time: String,
    pub status: String,
    pub remark: String,
    pub duration: String,
}

impl AlertRow {
    pub fn from_record(record: &Record) -> Self {
        let text = |field| {
            extract(record, field)
                .map(format::stringify)
                .unwrap_or_else(|| NOT_AVAILABLE.to_string())
        };

        Self {
            date_time: extract(record, LogicalField::DateTime)
                .map(format_date_time)
                .unwrap_or_else(|| NOT_AVAILABLE.to_string()),
            status: text(LogicalField::Status),
            remark: text(LogicalField::Remark),
            duration: format_duration(extract(record, LogicalField::Duration)),
        }
    }
}
