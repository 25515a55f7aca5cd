//! CSV encoding of a table: header row of column names, one row per record.

use crate::errors::AppResult;
use crate::models::{Column, Record, Schema, Table};
use std::borrow::Cow;
use std::io::{Read, Write};

fn writer<W: Write>(w: W) -> csv::Writer<W> {
    csv::WriterBuilder::new()
        .terminator(csv::Terminator::Any(b'\n'))
        .from_writer(w)
}

pub fn write_table<W: Write>(w: W, table: &Table) -> AppResult<()> {
    let mut wtr = writer(w);
    wtr.write_record(table.schema.headers())?;

    for record in table.records() {
        let row: Vec<String> = table.schema.columns.iter().map(|c| record.value(*c)).collect();
        wtr.write_record(&row)?;
    }

    wtr.flush()?;
    Ok(())
}

/// Exact bytes written locally and uploaded remotely.
pub fn to_csv_bytes(table: &Table) -> AppResult<Vec<u8>> {
    let mut buf = Vec::new();
    write_table(&mut buf, table)?;
    Ok(buf)
}

/// Columns are matched by header name. Unknown headers are skipped and
/// schema columns missing from the file stay empty. Cells that are not valid
/// UTF-8 (a spreadsheet saving Latin-1) are decoded lossily so one bad byte
/// cannot drop the other rows.
pub fn read_table<R: Read>(r: R, schema: &Schema) -> AppResult<Table> {
    let mut rdr = csv::ReaderBuilder::new()
        .has_headers(true)
        .flexible(true)
        .from_reader(r);

    let mapping: Vec<Option<Column>> = rdr
        .byte_headers()?
        .iter()
        .map(|h| Column::from_header(&String::from_utf8_lossy(h)).filter(|c| schema.has(*c)))
        .collect();

    let mut records = Vec::new();
    for row in rdr.byte_records() {
        let row = row?;
        let mut record = Record::default();
        for (cell, column) in row.iter().zip(mapping.iter()) {
            if let Some(col) = column {
                let text = String::from_utf8_lossy(cell);
                if let Cow::Owned(_) = text {
                    tracing::warn!(
                        column = %col,
                        line = row.position().map(|p| p.line()),
                        "invalid UTF-8 in log cell, replaced"
                    );
                }
                record.set(*col, &text);
            }
        }
        records.push(record);
    }

    Ok(Table::with_records(schema.clone(), records))
}
