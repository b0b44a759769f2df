//! Alert repository serving sample records in several upstream schemas

use std::sync::Arc;

use chrono::{DateTime, Duration, SecondsFormat, Utc};
use serde_json::{Value, json};

const STATUSES: &[&str] = &["OPEN", "ACKNOWLEDGED", "RESOLVED"];

const REMARKS: &[&str] = &[
    "Temperature above threshold",
    "Door left open",
    "Gateway offline",
    "Battery low",
    "Humidity out of range",
];

/// Alert repository holding a fixed list of records
#[derive(Clone)]
pub struct AlertRepository {
    records: Arc<Vec<Value>>,
}

impl AlertRepository {
    /// Create a repository serving `records` as given
    pub fn new(records: Vec<Value>) -> Self {
        Self {
            records: Arc::new(records),
        }
    }

    /// Generate `count` alerts, one every six hours back from `now`
    ///
    /// Records rotate through four key spellings so clients see the same mix
    /// of schemas real upstreams produce.
    pub fn seeded(count: usize, now: DateTime<Utc>) -> Self {
        let records = (0..count)
            .map(|i| {
                let at = now - Duration::hours(6 * i as i64);
                let status = STATUSES[i % STATUSES.len()];
                let remark = REMARKS[i % REMARKS.len()];
                let minutes = 15 + (i as i64 * 37) % 300;

                match i % 4 {
                    0 => json!({
                        "id": i + 1,
                        "dateTime": at.to_rfc3339_opts(SecondsFormat::Secs, true),
                        "status": status,
                        "remark": remark,
                        "duration": minutes,
                    }),
                    1 => json!({
                        "alert_id": i + 1,
                        "timestamp": at.timestamp(),
                        "state": status,
                        "message": remark,
                        "durationMinutes": minutes,
                    }),
                    2 => json!({
                        "uuid": format!("alert-{}", i + 1),
                        "createdAt": at.timestamp_millis(),
                        "alertStatus": status,
                        "description": remark,
                        "duration": format!("{} hrs", minutes / 60),
                    }),
                    _ => json!({
                        "id": i + 1,
                        "alert_time": at.format("%Y-%m-%d %H:%M:%S").to_string(),
                        "severity": status,
                        "notes": "",
                        "comment": remark,
                    }),
                }
            })
            .collect();

        Self::new(records)
    }

    /// Get every alert record, newest first
    pub fn list(&self) -> Vec<Value> {
        self.records.as_ref().clone()
    }
}
