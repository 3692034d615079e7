use std::path::Path;

use calamine::{DataType, Reader, Xlsx, open_workbook};
use tracing::debug;

use crate::orderdesk::tools::error::{Result, SheetError};
use crate::orderdesk::tools::io::excel_write::LIST_SHEET;
use crate::orderdesk::tools::io::store::{MemoryWorkbook, Sheet};
use crate::orderdesk::tools::model::{Cell, Grid};

/// Loads every sheet of an `.xlsx` file into memory.
///
/// Values are placed at their absolute position, so a used range that starts
/// below or right of `A1` keeps its offset.
///
/// Only cell values are loaded. Data validation is not read back, so the
/// list constraints of the returned workbook start out empty and the hidden
/// list sheet written by [`write_workbook`](super::excel_write::write_workbook)
/// is skipped. Saving the result over its source drops every dropdown.
pub fn read_workbook(path: &Path) -> Result<MemoryWorkbook> {
    let mut workbook: Xlsx<_> = open_workbook(path)?;
    let names: Vec<String> = workbook.sheet_names().to_vec();

    let mut memory = MemoryWorkbook::new();
    for name in names {
        if name == LIST_SHEET {
            debug!(sheet = %name, "skipping list sheet");
            continue;
        }
        let range = read_sheet(&mut workbook, &name)?;
        let grid = range_to_grid(&range);
        debug!(sheet = %name, rows = grid.len(), "sheet loaded");
        memory.insert_sheet(Sheet::with_rows(name, grid));
    }
    Ok(memory)
}

fn read_sheet<R: std::io::Read + std::io::Seek>(
    workbook: &mut Xlsx<R>,
    name: &str,
) -> Result<calamine::Range<DataType>> {
    let range_result = workbook
        .worksheet_range(name)
        .ok_or_else(|| SheetError::MissingSheet(name.to_string()))?;
    let range = range_result.map_err(SheetError::from)?;
    Ok(range)
}

fn range_to_grid(range: &calamine::Range<DataType>) -> Grid {
    let (row_offset, col_offset) = range.start().unwrap_or((0, 0));

    let mut grid: Grid = vec![Vec::new(); row_offset as usize];
    for row in range.rows() {
        let mut cells = vec![Cell::Empty; col_offset as usize];
        cells.extend(row.iter().map(to_cell));
        grid.push(cells);
    }
    grid
}

fn to_cell(value: &DataType) -> Cell {
    match value {
        DataType::String(value) => Cell::String(value.clone()),
        DataType::Float(value) => Cell::Number(*value),
        DataType::Int(value) => Cell::Number(*value as f64),
        DataType::Bool(value) => Cell::Bool(*value),
        DataType::DateTime(value) => Cell::Number(*value),
        DataType::Empty => Cell::Empty,
        other => Cell::String(other.to_string()),
    }
}
