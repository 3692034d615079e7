//! Keeps the path dropdown of an order row in step with its item.

use tracing::{debug, error, instrument};

use crate::orderdesk::tools::config::SheetConfig;
use crate::orderdesk::tools::error::{Result, SheetError};
use crate::orderdesk::tools::io::store::{SheetStore, atomically};
use crate::orderdesk::tools::model::{Cell, CellRef, ListConstraint};
use crate::orderdesk::tools::table::{Table, find_row_by_value, read_table};

/// A cell edit reported by the host.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EditEvent {
    pub sheet: String,
    pub cell: CellRef,
}

impl EditEvent {
    pub fn new(sheet: impl Into<String>, cell: CellRef) -> Self {
        Self {
            sheet: sheet.into(),
            cell,
        }
    }
}

/// What the path cell of an edited row should become.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DropdownOutcome {
    /// No item is chosen yet; the cell shows the prompt text.
    Prompt,
    /// The cell only accepts `options`, pre-selecting `default` when set.
    Constrained {
        options: Vec<String>,
        default: Option<String>,
    },
    /// No path matches; the cell accepts free text.
    Unconstrained,
}

/// Labels of every reference row whose inventory id equals `inventory_id`.
pub fn path_options(
    reference: &Table,
    inventory_id: &Cell,
    config: &SheetConfig,
) -> Result<Vec<String>> {
    reference.require_column(&config.inventory_id_header)?;
    reference.require_column(&config.oh_label_header)?;

    let wanted = inventory_id.text();
    Ok(reference
        .records
        .iter()
        .filter(|record| record.value(&config.inventory_id_header).text() == wanted)
        .map(|record| record.value(&config.oh_label_header))
        .filter(|label| !label.is_blank())
        .map(Cell::text)
        .collect())
}

/// First option starting with `marker`.
pub fn default_option(options: &[String], marker: char) -> Option<&String> {
    options.iter().find(|option| option.starts_with(marker))
}

/// Decides the dropdown state for an inventory id without touching any sheet.
///
/// A reference table missing its columns is logged and treated as offering
/// no options.
pub fn plan_dropdown(
    inventory_id: &Cell,
    reference: &Table,
    config: &SheetConfig,
) -> DropdownOutcome {
    if inventory_id.is_blank() {
        return DropdownOutcome::Prompt;
    }

    let options = path_options(reference, inventory_id, config).unwrap_or_else(|err| {
        error!(%err, "path options unavailable");
        Vec::new()
    });
    if options.is_empty() {
        return DropdownOutcome::Unconstrained;
    }

    let default = default_option(&options, config.default_marker).cloned();
    DropdownOutcome::Constrained { options, default }
}

/// Recomputes the path dropdown of `row` on `sheet` and applies it.
#[instrument(level = "debug", skip(store, config))]
pub fn sync_dropdown<S>(
    store: &mut S,
    sheet: &str,
    row: u32,
    config: &SheetConfig,
) -> Result<DropdownOutcome>
where
    S: SheetStore + Clone,
{
    atomically(store, |store| {
        let header_row = order_header_row(&*store, sheet, config)?;
        let headers = read_table(&*store, sheet, header_row)?;
        let path_col = headers.require_column(&config.path_header)? as u16;
        let inventory_col = headers.require_column(&config.inventory_id_header)? as u16;

        let inventory_id = store.cell(sheet, CellRef::new(row, inventory_col))?;
        let path_cell = CellRef::new(row, path_col);
        store.set_constraint(sheet, path_cell, None)?;

        let outcome = if inventory_id.is_blank() {
            DropdownOutcome::Prompt
        } else {
            if !store.has_sheet(&config.paths_sheet) {
                return Err(SheetError::MissingSheet(config.paths_sheet.clone()));
            }
            let reference = read_table(&*store, &config.paths_sheet, 0)?;
            plan_dropdown(&inventory_id, &reference, config)
        };

        match &outcome {
            DropdownOutcome::Prompt => {
                store.set_cell(sheet, path_cell, Cell::String(config.prompt_text.clone()))?;
            }
            DropdownOutcome::Constrained { options, default } => {
                store.set_constraint(
                    sheet,
                    path_cell,
                    Some(ListConstraint::exclusive(options.clone())),
                )?;
                let value = default.clone().map(Cell::String).unwrap_or_default();
                store.set_cell(sheet, path_cell, value)?;
            }
            DropdownOutcome::Unconstrained => {
                store.set_cell(sheet, path_cell, Cell::Empty)?;
            }
        }
        debug!(row, ?outcome, "path dropdown updated");
        Ok(outcome)
    })
}

/// Reacts to a cell edit; only edits of the item column below the header
/// of the order sheet refresh the dropdown.
pub fn on_edit<S>(
    store: &mut S,
    event: &EditEvent,
    config: &SheetConfig,
) -> Result<Option<DropdownOutcome>>
where
    S: SheetStore + Clone,
{
    if event.sheet != config.order_sheet {
        return Ok(None);
    }
    let header_row = order_header_row(&*store, &event.sheet, config)?;
    if event.cell.row <= header_row {
        return Ok(None);
    }
    let headers = read_table(&*store, &event.sheet, header_row)?;
    if headers.column(&config.item_header) != Some(event.cell.col as usize) {
        return Ok(None);
    }
    sync_dropdown(store, &event.sheet, event.cell.row, config).map(Some)
}

fn order_header_row<S: SheetStore + ?Sized>(
    store: &S,
    sheet: &str,
    config: &SheetConfig,
) -> Result<u32> {
    find_row_by_value(store, sheet, 0, &config.item_header)?
        .ok_or_else(|| SheetError::missing_column(sheet, &config.item_header))
}
