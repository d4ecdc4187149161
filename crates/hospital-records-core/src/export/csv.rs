//! CSV rendering of panel tables.

use crate::store::{RecordKind, RecordStore};
use crate::views::{table_for, TableView};

/// Render a table view as CSV, header row first.
pub fn table_to_csv(view: &TableView) -> String {
    let mut csv = String::new();
    push_record(&mut csv, &view.headers);
    for row in &view.rows {
        push_record(&mut csv, row);
    }
    csv
}

/// CSV of one table as currently stored.
pub fn export_csv(store: &RecordStore, kind: RecordKind) -> String {
    table_to_csv(&table_for(store, kind))
}

fn push_record(csv: &mut String, cells: &[String]) {
    let line = cells
        .iter()
        .map(|cell| escape_csv(cell))
        .collect::<Vec<_>>()
        .join(",");
    csv.push_str(&line);
    csv.push('\n');
}

fn escape_csv(s: &str) -> String {
    if s.contains(',') || s.contains('"') || s.contains('\n') || s.contains('\r') {
        format!("\"{}\"", s.replace('"', "\"\""))
    } else {
        s.to_string()
    }
}
