//! Paged, date-filtered view over a fetched alert list

use super::{AlertRow, DateRange, Record};
use crate::pagination::Paginator;

/// Alert list as shown to the user: filtered by date, one page at a time
#[derive(Debug, Clone)]
pub struct AlertsView {
    records: Vec<Record>,
    visible: Vec<Record>,
    range: DateRange,
    paginator: Paginator,
}

impl AlertsView {
    pub fn new(records: Vec<Record>, page_size: usize) -> Self {
        let paginator = Paginator::with_total(page_size, records.len());
        Self {
            visible: records.clone(),
            records,
            range: DateRange::default(),
            paginator,
        }
    }

    /// Apply a new date range and return to the first page
    pub fn set_range(&mut self, range: DateRange) {
        self.range = range;
        self.visible = range.apply(self.records.clone());
        self.paginator.set_total_items(self.visible.len());
        self.paginator.first();
    }

    pub fn range(&self) -> DateRange {
        self.range
    }

    pub fn paginator(&self) -> &Paginator {
        &self.paginator
    }

    /// Navigation goes through the paginator, which ignores out-of-range pages
    pub fn paginator_mut(&mut self) -> &mut Paginator {
        &mut self.paginator
    }

    /// Rows on the current page
    pub fn rows(&self) -> Vec<AlertRow> {
        self.paginator
            .page_of(&self.visible)
            .iter()
            .map(AlertRow::from_record)
            .collect()
    }

    /// "Showing X-Y of Z" line for the current page
    pub fn summary(&self) -> String {
        format!(
            "Showing {}-{} of {}",
            self.paginator.start_item_index(),
            self.paginator.end_item_index(),
            self.paginator.total_items()
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;
    use serde_json::json;

    fn records(count: usize) -> Vec<Record> {
        (0..count)
            .filter_map(|i| {
                json!({
                    "status": format!("S{}", i + 1),
                    "date": format!("2024-03-{:02}", i + 1),
                })
                .as_object()
                .cloned()
            })
            .collect()
    }

    #[test]
    fn test_paging_through_twenty_three_alerts() {
        let mut view = AlertsView::new(records(23), 5);
        assert_eq!(view.paginator().total_pages(), 5);

        assert!(view.paginator_mut().go_to_page(3));
        assert_eq!(view.paginator().window(), vec![1, 2, 3, 4, 5]);
        assert_eq!(view.summary(), "Showing 11-15 of 23");

        let statuses: Vec<String> = view.rows().into_iter().map(|row| row.status).collect();
        assert_eq!(statuses, vec!["S11", "S12", "S13", "S14", "S15"]);

        assert!(!view.paginator_mut().go_to_page(99));
        assert_eq!(view.paginator().current_page(), 3);
    }

    #[test]
    fn test_range_change_resets_to_first_page() {
        let mut view = AlertsView::new(records(23), 5);
        view.paginator_mut().last();

        view.set_range(DateRange::new(
            NaiveDate::from_ymd_opt(2024, 3, 10),
            NaiveDate::from_ymd_opt(2024, 3, 16),
        ));

        assert_eq!(view.paginator().current_page(), 1);
        assert_eq!(view.paginator().total_pages(), 2);
        assert_eq!(view.summary(), "Showing 1-5 of 7");
        assert_eq!(view.rows()[0].status, "S10");
    }

    #[test]
    fn test_empty_view() {
        let view = AlertsView::new(Vec::new(), 5);
        assert!(view.rows().is_empty());
        assert!(view.paginator().window().is_empty());
        assert_eq!(view.summary(), "Showing 0-0 of 0");
    }
}
