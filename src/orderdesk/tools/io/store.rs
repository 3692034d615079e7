use std::collections::BTreeMap;

use crate::orderdesk::tools::error::{Result, SheetError};
use crate::orderdesk::tools::model::{Cell, CellRef, Grid, ListConstraint};

/// Tabular data store the workbook automation runs against.
///
/// Coordinates are 0-indexed. Reads outside the used area return empty cells.
pub trait SheetStore {
    fn has_sheet(&self, sheet: &str) -> bool;

    /// Creates an empty sheet when it does not exist yet.
    fn add_sheet(&mut self, sheet: &str);

    /// Number of rows and columns up to the last non-empty cell.
    fn used_size(&self, sheet: &str) -> Result<(u32, u16)>;

    fn read_range(&self, sheet: &str, top_left: CellRef, rows: u32, cols: u16) -> Result<Grid>;

    fn write_range(&mut self, sheet: &str, top_left: CellRef, values: &Grid) -> Result<()>;

    fn clear_range(&mut self, sheet: &str, top_left: CellRef, rows: u32, cols: u16)
    -> Result<()>;

    fn cell(&self, sheet: &str, cell: CellRef) -> Result<Cell>;

    fn set_cell(&mut self, sheet: &str, cell: CellRef, value: Cell) -> Result<()>;

    fn constraint(&self, sheet: &str, cell: CellRef) -> Result<Option<ListConstraint>>;

    /// Applies a value-list constraint, or removes it when `None`.
    fn set_constraint(
        &mut self,
        sheet: &str,
        cell: CellRef,
        constraint: Option<ListConstraint>,
    ) -> Result<()>;

    /// Reads every used cell of the sheet starting at `A1`.
    fn read_used(&self, sheet: &str) -> Result<Grid> {
        let (rows, cols) = self.used_size(sheet)?;
        self.read_range(sheet, CellRef::new(0, 0), rows, cols)
    }
}

/// Runs `operation` against the store and rolls every change back when it
/// fails, so the operation either applies completely or not at all.
pub fn atomically<S, T, F>(store: &mut S, operation: F) -> Result<T>
where
    S: SheetStore + Clone,
    F: FnOnce(&mut S) -> Result<T>,
{
    let snapshot = store.clone();
    match operation(store) {
        Ok(value) => Ok(value),
        Err(error) => {
            *store = snapshot;
            Err(error)
        }
    }
}

/// A single sheet of a [`MemoryWorkbook`].
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Sheet {
    pub name: String,
    rows: Grid,
    constraints: BTreeMap<CellRef, ListConstraint>,
}

impl Sheet {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            ..Self::default()
        }
    }

    /// Builds a sheet from row-major values.
    pub fn with_rows(name: impl Into<String>, rows: Grid) -> Self {
        let mut sheet = Self::new(name);
        sheet.rows = rows;
        sheet.trim();
        sheet
    }

    pub fn rows(&self) -> &Grid {
        &self.rows
    }

    pub fn constraints(&self) -> impl Iterator<Item = (&CellRef, &ListConstraint)> {
        self.constraints.iter()
    }

    fn get(&self, cell: CellRef) -> Cell {
        self.rows
            .get(cell.row as usize)
            .and_then(|row| row.get(cell.col as usize))
            .cloned()
            .unwrap_or_default()
    }

    fn put(&mut self, cell: CellRef, value: Cell) {
        let row_idx = cell.row as usize;
        let col_idx = cell.col as usize;
        if value == Cell::Empty && row_idx >= self.rows.len() {
            return;
        }
        if self.rows.len() <= row_idx {
            self.rows.resize_with(row_idx + 1, Vec::new);
        }
        let row = &mut self.rows[row_idx];
        if row.len() <= col_idx {
            if value == Cell::Empty {
                return;
            }
            row.resize_with(col_idx + 1, Cell::default);
        }
        row[col_idx] = value;
    }

    /// Drops trailing empty cells and rows so the used size stays tight.
    fn trim(&mut self) {
        for row in &mut self.rows {
            while row.last() == Some(&Cell::Empty) {
                row.pop();
            }
        }
        while self.rows.last().is_some_and(|row| row.is_empty()) {
            self.rows.pop();
        }
    }

    fn used_size(&self) -> (u32, u16) {
        let cols = self.rows.iter().map(Vec::len).max().unwrap_or(0);
        (self.rows.len() as u32, cols as u16)
    }
}

/// In-memory workbook keeping sheets in insertion order.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct MemoryWorkbook {
    sheets: Vec<Sheet>,
}

impl MemoryWorkbook {
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds or replaces a sheet.
    pub fn insert_sheet(&mut self, sheet: Sheet) {
        match self.sheets.iter_mut().find(|existing| existing.name == sheet.name) {
            Some(existing) => *existing = sheet,
            None => self.sheets.push(sheet),
        }
    }

    pub fn with_sheet(mut self, sheet: Sheet) -> Self {
        self.insert_sheet(sheet);
        self
    }

    pub fn sheets(&self) -> &[Sheet] {
        &self.sheets
    }

    pub fn sheet(&self, name: &str) -> Result<&Sheet> {
        self.sheets
            .iter()
            .find(|sheet| sheet.name == name)
            .ok_or_else(|| SheetError::MissingSheet(name.to_string()))
    }

    fn sheet_mut(&mut self, name: &str) -> Result<&mut Sheet> {
        self.sheets
            .iter_mut()
            .find(|sheet| sheet.name == name)
            .ok_or_else(|| SheetError::MissingSheet(name.to_string()))
    }
}

impl SheetStore for MemoryWorkbook {
    fn has_sheet(&self, sheet: &str) -> bool {
        self.sheets.iter().any(|existing| existing.name == sheet)
    }

    fn add_sheet(&mut self, sheet: &str) {
        if !self.has_sheet(sheet) {
            self.sheets.push(Sheet::new(sheet));
        }
    }

    fn used_size(&self, sheet: &str) -> Result<(u32, u16)> {
        Ok(self.sheet(sheet)?.used_size())
    }

    fn read_range(&self, sheet: &str, top_left: CellRef, rows: u32, cols: u16) -> Result<Grid> {
        let sheet = self.sheet(sheet)?;
        let grid = (0..rows)
            .map(|row| {
                (0..cols)
                    .map(|col| sheet.get(CellRef::new(top_left.row + row, top_left.col + col)))
                    .collect()
            })
            .collect();
        Ok(grid)
    }

    fn write_range(&mut self, sheet: &str, top_left: CellRef, values: &Grid) -> Result<()> {
        let sheet = self.sheet_mut(sheet)?;
        for (row_offset, row) in values.iter().enumerate() {
            for (col_offset, value) in row.iter().enumerate() {
                let target = CellRef::new(
                    top_left.row + row_offset as u32,
                    top_left.col + col_offset as u16,
                );
                sheet.put(target, value.clone());
            }
        }
        sheet.trim();
        Ok(())
    }

    fn clear_range(
        &mut self,
        sheet: &str,
        top_left: CellRef,
        rows: u32,
        cols: u16,
    ) -> Result<()> {
        let sheet = self.sheet_mut(sheet)?;
        for row in top_left.row..top_left.row.saturating_add(rows) {
            for col in top_left.col..top_left.col.saturating_add(cols) {
                sheet.put(CellRef::new(row, col), Cell::Empty);
            }
        }
        sheet.trim();
        Ok(())
    }

    fn cell(&self, sheet: &str, cell: CellRef) -> Result<Cell> {
        Ok(self.sheet(sheet)?.get(cell))
    }

    fn set_cell(&mut self, sheet: &str, cell: CellRef, value: Cell) -> Result<()> {
        let sheet = self.sheet_mut(sheet)?;
        sheet.put(cell, value);
        sheet.trim();
        Ok(())
    }

    fn constraint(&self, sheet: &str, cell: CellRef) -> Result<Option<ListConstraint>> {
        Ok(self.sheet(sheet)?.constraints.get(&cell).cloned())
    }

    fn set_constraint(
        &mut self,
        sheet: &str,
        cell: CellRef,
        constraint: Option<ListConstraint>,
    ) -> Result<()> {
        let sheet = self.sheet_mut(sheet)?;
        match constraint {
            Some(constraint) => {
                sheet.constraints.insert(cell, constraint);
            }
            None => {
                sheet.constraints.remove(&cell);
            }
        }
        Ok(())
    }
}
