use std::fmt;

/// A rectangular block of cells, outer index is the row.
pub type Grid = Vec<Vec<Cell>>;

/// Value held by a single spreadsheet cell.
#[derive(Debug, Clone, Default, PartialEq)]
pub enum Cell {
    /// Unset cell.
    #[default]
    Empty,
    /// Plain string.
    String(String),
    /// Floating point number.
    Number(f64),
    /// Boolean.
    Bool(bool),
}

impl Cell {
    /// Returns true for empty cells and strings holding only whitespace.
    pub fn is_blank(&self) -> bool {
        match self {
            Cell::Empty => true,
            Cell::String(value) => value.trim().is_empty(),
            _ => false,
        }
    }

    /// Text shown for the cell, with surrounding whitespace removed.
    pub fn text(&self) -> String {
        self.to_string().trim().to_string()
    }
}

impl fmt::Display for Cell {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Cell::Empty => Ok(()),
            Cell::String(value) => f.write_str(value),
            Cell::Number(value) => f.write_str(&format_number(*value)),
            Cell::Bool(value) => write!(f, "{value}"),
        }
    }
}

impl From<&str> for Cell {
    fn from(value: &str) -> Self {
        Cell::String(value.to_string())
    }
}

impl From<String> for Cell {
    fn from(value: String) -> Self {
        Cell::String(value)
    }
}

impl From<f64> for Cell {
    fn from(value: f64) -> Self {
        Cell::Number(value)
    }
}

impl From<bool> for Cell {
    fn from(value: bool) -> Self {
        Cell::Bool(value)
    }
}

/// Renders integral numbers without a fractional part.
pub fn format_number(value: f64) -> String {
    if value.is_finite() && value.fract() == 0.0 && value.abs() < 1e15 {
        format!("{}", value as i64)
    } else {
        value.to_string()
    }
}

/// A reference to a single cell within a sheet.
///
/// Rows and columns are **0-indexed**: `row = 0` is spreadsheet row `1`.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct CellRef {
    pub row: u32,
    pub col: u16,
}

impl CellRef {
    pub const fn new(row: u32, col: u16) -> Self {
        Self { row, col }
    }
}

/// An ordered column-name → cell mapping built from one sheet row.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Record {
    fields: Vec<(String, Cell)>,
}

impl Record {
    pub fn new() -> Self {
        Self::default()
    }

    /// Inserts a field, replacing the value in place when the column already exists.
    pub fn insert(&mut self, column: impl Into<String>, value: impl Into<Cell>) {
        let column = column.into();
        let value = value.into();
        match self.fields.iter_mut().find(|(name, _)| *name == column) {
            Some((_, existing)) => *existing = value,
            None => self.fields.push((column, value)),
        }
    }

    /// Builder-style variant of [`Record::insert`].
    pub fn with(mut self, column: impl Into<String>, value: impl Into<Cell>) -> Self {
        self.insert(column, value);
        self
    }

    pub fn get(&self, column: &str) -> Option<&Cell> {
        self.fields
            .iter()
            .find(|(name, _)| name == column)
            .map(|(_, value)| value)
    }

    /// Value of a column, treating a missing column as an empty cell.
    pub fn value(&self, column: &str) -> &Cell {
        const EMPTY: &Cell = &Cell::Empty;
        self.get(column).unwrap_or(EMPTY)
    }

    pub fn columns(&self) -> impl Iterator<Item = &str> {
        self.fields.iter().map(|(name, _)| name.as_str())
    }

    pub fn len(&self) -> usize {
        self.fields.len()
    }

    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }
}

/// A problem found on an order row, addressed to the requester.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Issue {
    pub item: String,
    pub message: String,
}

impl Issue {
    pub fn new(item: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            item: item.into(),
            message: message.into(),
        }
    }

    /// Renders the issue as a sheet record using the given column names.
    pub fn to_record(&self, item_header: &str, issue_header: &str) -> Record {
        Record::new()
            .with(item_header, self.item.as_str())
            .with(issue_header, self.message.as_str())
    }
}

/// An exclusive list of values accepted by a cell.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ListConstraint {
    pub values: Vec<String>,
    /// Whether values outside the list are still accepted.
    pub allow_invalid: bool,
}

impl ListConstraint {
    /// A constraint that rejects anything outside `values`.
    pub fn exclusive(values: Vec<String>) -> Self {
        Self {
            values,
            allow_invalid: false,
        }
    }

    pub fn accepts(&self, value: &Cell) -> bool {
        self.allow_invalid || self.values.iter().any(|allowed| *allowed == value.text())
    }
}
