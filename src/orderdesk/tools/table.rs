//! Turns rectangular blocks of cells into header-keyed records.

use std::collections::BTreeMap;

use tracing::{debug, error};

use crate::orderdesk::tools::error::{Result, SheetError};
use crate::orderdesk::tools::io::store::SheetStore;
use crate::orderdesk::tools::model::{Cell, CellRef, Grid, Record};

/// Records read below a header row.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Table {
    /// Sheet the table was read from, empty for tables built from raw grids.
    pub sheet: String,
    pub headers: Vec<String>,
    /// 0-indexed sheet row holding the headers.
    pub header_row: u32,
    pub records: Vec<Record>,
}

impl Table {
    /// Builds a table from a grid whose headers sit in `header_row`.
    ///
    /// Rows shorter than the header are padded with empty cells, so every
    /// record carries exactly the header columns.
    pub fn from_grid(grid: &Grid, header_row: u32) -> Self {
        let Some(header_cells) = grid.get(header_row as usize) else {
            return Self {
                header_row,
                ..Self::default()
            };
        };
        let headers: Vec<String> = header_cells.iter().map(Cell::text).collect();

        let records = grid
            .iter()
            .skip(header_row as usize + 1)
            .map(|row| {
                let mut record = Record::new();
                for (col_idx, header) in headers.iter().enumerate() {
                    record.insert(header.clone(), row.get(col_idx).cloned().unwrap_or_default());
                }
                record
            })
            .collect();

        Self {
            sheet: String::new(),
            headers,
            header_row,
            records,
        }
    }

    /// Position of a header, if present.
    pub fn column(&self, name: &str) -> Option<usize> {
        self.headers.iter().position(|header| header == name)
    }

    /// Like [`Table::column`] but reports a missing header as a configuration error.
    pub fn require_column(&self, name: &str) -> Result<usize> {
        self.column(name)
            .ok_or_else(|| SheetError::missing_column(&self.sheet, name))
    }

    /// 0-indexed sheet row of the record at `index`.
    pub fn row_of(&self, index: usize) -> u32 {
        self.header_row + 1 + index as u32
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }
}

/// Reads the used range of `sheet` as a table with headers in `header_row`.
pub fn read_table<S: SheetStore + ?Sized>(
    store: &S,
    sheet: &str,
    header_row: u32,
) -> Result<Table> {
    let grid = store.read_used(sheet)?;
    let mut table = Table::from_grid(&grid, header_row);
    table.sheet = sheet.to_string();
    debug!(sheet, header_row, rows = table.len(), "read table");
    Ok(table)
}

/// Indexes records by the text of `key_field`, skipping rows with a blank key.
///
/// A later row with the same key replaces the earlier one.
pub fn index_by(table: &Table, key_field: &str) -> Result<BTreeMap<String, Record>> {
    table.require_column(key_field)?;

    let mut dictionary = BTreeMap::new();
    for record in &table.records {
        let key = record.value(key_field);
        if key.is_blank() {
            continue;
        }
        dictionary.insert(key.text(), record.clone());
    }
    Ok(dictionary)
}

/// [`index_by`] for callers that treat a missing key column as "no data".
pub fn index_by_or_empty(table: &Table, key_field: &str) -> BTreeMap<String, Record> {
    index_by(table, key_field).unwrap_or_else(|err| {
        error!(%err, "key field not found in headers");
        BTreeMap::new()
    })
}

/// First 0-indexed row whose cell in `col` reads `value`.
pub fn find_row_by_value<S: SheetStore + ?Sized>(
    store: &S,
    sheet: &str,
    col: u16,
    value: &str,
) -> Result<Option<u32>> {
    let (rows, _) = store.used_size(sheet)?;
    let column = store.read_range(sheet, CellRef::new(0, col), rows, 1)?;
    Ok(column
        .iter()
        .position(|row| row.first().is_some_and(|cell| cell.text() == value))
        .map(|idx| idx as u32))
}
