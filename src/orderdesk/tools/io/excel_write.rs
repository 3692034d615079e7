use std::path::Path;

use rust_xlsxwriter::{DataValidation, Formula, Workbook};
use tracing::debug;

use crate::orderdesk::tools::error::Result;
use crate::orderdesk::tools::io::store::MemoryWorkbook;
use crate::orderdesk::tools::model::{Cell, ListConstraint};

/// Hidden sheet holding dropdown lists too long to inline in a validation rule.
pub const LIST_SHEET: &str = "_orderdesk_lists";

/// Excel's limit on an inline list source, commas included.
const INLINE_LIST_LIMIT: usize = 255;

/// Writes the workbook to `path`, including list constraints as data
/// validation rules.
///
/// Short lists are stored inline. Longer ones are written to column A of the
/// hidden [`LIST_SHEET`] and referenced by range.
pub fn write_workbook(path: &Path, workbook: &MemoryWorkbook) -> Result<()> {
    let mut workbook_writer = Workbook::new();
    let mut list_rows: Vec<String> = Vec::new();

    for sheet in workbook.sheets() {
        if sheet.name == LIST_SHEET {
            continue;
        }
        let worksheet = workbook_writer.add_worksheet();
        worksheet.set_name(&sheet.name)?;

        for (row_idx, row) in sheet.rows().iter().enumerate() {
            let row_idx = row_idx as u32;
            for (col_idx, cell) in row.iter().enumerate() {
                let col_idx = col_idx as u16;
                match cell {
                    Cell::Empty => {}
                    Cell::String(value) => {
                        worksheet.write_string(row_idx, col_idx, value)?;
                    }
                    Cell::Number(value) => {
                        worksheet.write_number(row_idx, col_idx, *value)?;
                    }
                    Cell::Bool(value) => {
                        worksheet.write_boolean(row_idx, col_idx, *value)?;
                    }
                }
            }
        }

        for (cell, constraint) in sheet.constraints() {
            let validation = if fits_inline(constraint) {
                DataValidation::new().allow_list_strings(&constraint.values)?
            } else {
                let first = list_rows.len() + 1;
                list_rows.extend(constraint.values.iter().cloned());
                let last = list_rows.len();
                debug!(
                    sheet = %sheet.name,
                    row = cell.row,
                    col = cell.col,
                    options = constraint.values.len(),
                    "list moved to the hidden list sheet"
                );
                DataValidation::new().allow_list_formula(Formula::new(format!(
                    "='{LIST_SHEET}'!$A${first}:$A${last}"
                )))
            };
            let validation = validation.show_error_message(!constraint.allow_invalid);
            worksheet.add_data_validation(cell.row, cell.col, cell.row, cell.col, &validation)?;
        }
    }

    if !list_rows.is_empty() {
        let list_sheet = workbook_writer.add_worksheet();
        list_sheet.set_name(LIST_SHEET)?;
        for (row_idx, value) in list_rows.iter().enumerate() {
            list_sheet.write_string(row_idx as u32, 0, value)?;
        }
        list_sheet.set_hidden(true);
    }

    workbook_writer.save(path)?;
    Ok(())
}

fn fits_inline(constraint: &ListConstraint) -> bool {
    let separators = constraint.values.len().saturating_sub(1);
    let length: usize = constraint
        .values
        .iter()
        .map(|value| value.chars().count())
        .sum();
    length + separators <= INLINE_LIST_LIMIT
}
