//! Recent movement history.

use crate::models::{Column, Table};
use crate::utils::table::{Column as TableColumn, Table as TextTable};

/// Text table of the `limit` most recent records, newest first.
pub fn history_table(table: &Table, limit: usize) -> TextTable {
    let with_distance = table.schema.has(Column::Distance);

    let mut columns = vec![
        TableColumn::new("Time", 16),
        TableColumn::new("Vehicle", 16),
        TableColumn::new("Purpose", 18),
        TableColumn::new("Location", 20),
    ];
    if with_distance {
        columns.push(TableColumn::new("Distance", 10));
    }
    columns.push(TableColumn::new("Items", 30));
    columns.push(TableColumn::new("Photo", 5));

    let mut out = TextTable::new(columns);
    for r in table.recent(limit) {
        let mut row = vec![
            r.timestamp.clone(),
            r.vehicle.clone(),
            r.purpose.clone(),
            r.location.clone(),
        ];
        if with_distance {
            row.push(format!("{} KM", r.distance.unwrap_or(0)));
        }
        row.push(r.items.clone());
        row.push(if r.has_photo() { "Yes" } else { "No" }.to_string());
        out.add_row(row);
    }
    out
}
