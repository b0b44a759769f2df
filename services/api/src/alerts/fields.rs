//! Tolerant field extraction for alert payloads
//!
//! Upstream alert records do not agree on key names, so each logical field is
//! looked up through a fixed, ordered list of spellings.

use serde_json::{Map, Value};

/// An alert record as received from upstream
pub type Record = Map<String, Value>;

/// Fields the alerts view needs from every record
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum LogicalField {
    DateTime,
    Remark,
    Status,
    Duration,
}

const DATE_TIME_KEYS: &[&str] = &[
    "dateTime",
    "dateTimeString",
    "datetime",
    "date",
    "timestamp",
    "time",
    "created_at",
    "createdAt",
    "alert_time",
    "alertTime",
];

const REMARK_KEYS: &[&str] = &[
    "remark",
    "remarks",
    "message",
    "description",
    "note",
    "notes",
    "comment",
    "details",
    "text",
];

const STATUS_KEYS: &[&str] = &[
    "status",
    "state",
    "alertStatus",
    "alert_status",
    "level",
    "severity",
];

const DURATION_KEYS: &[&str] = &[
    "duration",
    "durationMinutes",
    "duration_minutes",
    "durationInMinutes",
    "minutes",
    "elapsed",
];

impl LogicalField {
    /// Every logical field, in display order
    pub const ALL: [LogicalField; 4] = [
        LogicalField::DateTime,
        LogicalField::Status,
        LogicalField::Remark,
        LogicalField::Duration,
    ];

    /// Physical key spellings tried for this field, highest priority first
    pub fn candidates(self) -> &'static [&'static str] {
        match self {
            LogicalField::DateTime => DATE_TIME_KEYS,
            LogicalField::Remark => REMARK_KEYS,
            LogicalField::Status => STATUS_KEYS,
            LogicalField::Duration => DURATION_KEYS,
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            LogicalField::DateTime => "Date/Time",
            LogicalField::Remark => "Remark",
            LogicalField::Status => "Status",
            LogicalField::Duration => "Duration",
        }
    }
}

fn is_present(value: &Value) -> bool {
    match value {
        Value::Null => false,
        Value::String(s) => !s.is_empty(),
        _ => true,
    }
}

/// Resolve `field` in `record`
///
/// Returns the value of the first candidate key that is present, not `null`
/// and not an empty string.
pub fn extract(record: &Record, field: LogicalField) -> Option<&Value> {
    field
        .candidates()
        .iter()
        .filter_map(|key| record.get(*key))
        .find(|value| is_present(value))
}
