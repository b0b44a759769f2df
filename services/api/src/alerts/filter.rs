//! Calendar date filtering of alert records

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use super::fields::{LogicalField, Record, extract};
use super::format::parse_timestamp;

/// Inclusive range of calendar dates; an open end is unbounded
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct DateRange {
    pub from: Option<NaiveDate>,
    pub to: Option<NaiveDate>,
}

impl DateRange {
    pub fn new(from: Option<NaiveDate>, to: Option<NaiveDate>) -> Self {
        Self { from, to }
    }

    /// True when neither end is set
    pub fn is_unbounded(&self) -> bool {
        self.from.is_none() && self.to.is_none()
    }

    /// True when `from` lies after `to`, which matches nothing
    pub fn is_inverted(&self) -> bool {
        matches!((self.from, self.to), (Some(from), Some(to)) if from > to)
    }

    pub fn contains(&self, date: NaiveDate) -> bool {
        self.from.is_none_or(|from| date >= from) && self.to.is_none_or(|to| date <= to)
    }

    /// Whether `record` falls inside the range
    ///
    /// Records without a readable date only pass an unbounded range.
    pub fn matches(&self, record: &Record) -> bool {
        if self.is_unbounded() {
            return true;
        }

        extract(record, LogicalField::DateTime)
            .and_then(parse_timestamp)
            .is_some_and(|instant| self.contains(instant.date()))
    }

    /// Keep the records inside the range, preserving order
    pub fn apply(&self, records: Vec<Record>) -> Vec<Record> {
        if self.is_unbounded() {
            return records;
        }

        records
            .into_iter()
            .filter(|record| self.matches(record))
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    fn records() -> Vec<Record> {
        [
            json!({"id": 1, "dateTime": "2024-03-01T10:00:00Z"}),
            json!({"id": 2, "timestamp": 1_709_942_400}),
            json!({"id": 3, "created_at": "2024-03-15 23:59:59"}),
            json!({"id": 4, "remark": "no date at all"}),
        ]
        .into_iter()
        .filter_map(|value| value.as_object().cloned())
        .collect()
    }

    fn ids(records: &[Record]) -> Vec<i64> {
        records
            .iter()
            .filter_map(|record| record.get("id").and_then(|id| id.as_i64()))
            .collect()
    }

    #[test]
    fn test_unbounded_keeps_everything() {
        let kept = DateRange::default().apply(records());
        assert_eq!(ids(&kept), vec![1, 2, 3, 4]);
    }

    #[test]
    fn test_bounds_are_inclusive() {
        let range = DateRange::new(Some(date(2024, 3, 9)), Some(date(2024, 3, 15)));
        assert_eq!(ids(&range.apply(records())), vec![2, 3]);
    }

    #[test]
    fn test_open_ended_ranges() {
        let from = DateRange::new(Some(date(2024, 3, 10)), None);
        assert_eq!(ids(&from.apply(records())), vec![3]);

        let to = DateRange::new(None, Some(date(2024, 3, 1)));
        assert_eq!(ids(&to.apply(records())), vec![1]);
    }

    #[test]
    fn test_inverted_range_matches_nothing() {
        let range = DateRange::new(Some(date(2024, 4, 1)), Some(date(2024, 3, 1)));
        assert!(range.is_inverted());
        assert!(range.apply(records()).is_empty());
    }
}
