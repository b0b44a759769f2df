//! Plain-text rendering of the alerts view

use api::alerts::{AlertRow, AlertsView, LogicalField};
use api::pagination::Paginator;

/// Page links such as `< 1 2 [3] 4 5 >`, with arrows only where navigation is possible
pub fn render_window(paginator: &Paginator) -> String {
    let window = paginator.window();
    if window.is_empty() {
        return String::new();
    }

    let mut parts = Vec::with_capacity(window.len() + 2);
    if paginator.has_previous() {
        parts.push("<".to_string());
    }
    for page in window {
        if page == paginator.current_page() {
            parts.push(format!("[{}]", page));
        } else {
            parts.push(page.to_string());
        }
    }
    if paginator.has_next() {
        parts.push(">".to_string());
    }

    parts.join(" ")
}

fn cells(row: &AlertRow) -> [&str; 4] {
    [
        row.date_time.as_str(),
        row.status.as_str(),
        row.remark.as_str(),
        row.duration.as_str(),
    ]
}

/// Left-aligned table of the rows on the current page
pub fn render_rows(rows: &[AlertRow]) -> String {
    let headers = LogicalField::ALL.map(LogicalField::label);

    let mut widths = headers.map(str::len);
    for row in rows {
        for (width, cell) in widths.iter_mut().zip(cells(row)) {
            *width = (*width).max(cell.chars().count());
        }
    }

    let line = |values: [&str; 4]| {
        values
            .iter()
            .zip(widths)
            .map(|(value, width)| format!("{:<width$}", value, width = width))
            .collect::<Vec<_>>()
            .join("  ")
            .trim_end()
            .to_string()
    };

    let mut out = vec![line(headers)];
    out.extend(rows.iter().map(|row| line(cells(row))));
    out.join("\n")
}

/// Full page: table, summary and page links
pub fn render_view(view: &AlertsView) -> String {
    let rows = view.rows();
    if rows.is_empty() {
        return "No alerts found".to_string();
    }

    format!(
        "{}\n\n{}\n{}",
        render_rows(&rows),
        view.summary(),
        render_window(view.paginator())
    )
}
