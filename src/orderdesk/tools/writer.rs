use tracing::debug;

use crate::orderdesk::tools::error::Result;
use crate::orderdesk::tools::io::store::SheetStore;
use crate::orderdesk::tools::model::{Cell, CellRef, Grid, Record};

/// Replaces every row below the header of `sheet` with `records`.
///
/// The header row is row 0 and survives the rewrite. Columns a record carries
/// that the header lacks are appended to it; a sheet without headers takes the
/// columns of the first record.
pub fn replace_body<S: SheetStore + ?Sized>(
    store: &mut S,
    sheet: &str,
    records: &[Record],
) -> Result<()> {
    let (rows, cols) = store.used_size(sheet)?;
    let mut headers: Vec<String> = store
        .read_range(sheet, CellRef::new(0, 0), 1, cols)?
        .into_iter()
        .next()
        .unwrap_or_default()
        .iter()
        .map(Cell::text)
        .collect();
    while headers.last().is_some_and(String::is_empty) {
        headers.pop();
    }

    if rows > 1 {
        store.clear_range(sheet, CellRef::new(1, 0), rows - 1, cols)?;
    }
    if records.is_empty() {
        debug!(sheet, "cleared body rows");
        return Ok(());
    }

    let known = headers.len();
    for record in records {
        for column in record.columns() {
            if !headers.iter().any(|header| header == column) {
                headers.push(column.to_string());
            }
        }
    }
    if headers.len() > known {
        let added: Vec<Cell> = headers[known..]
            .iter()
            .map(|header| Cell::String(header.clone()))
            .collect();
        store.write_range(sheet, CellRef::new(0, known as u16), &vec![added])?;
    }

    let body: Grid = records
        .iter()
        .map(|record| {
            headers
                .iter()
                .map(|header| record.value(header).clone())
                .collect()
        })
        .collect();
    store.write_range(sheet, CellRef::new(1, 0), &body)?;
    debug!(sheet, rows = body.len(), "replaced body rows");
    Ok(())
}
