//! Quantity rules checked for every order row.

use tracing::{debug, info, instrument, warn};

use crate::orderdesk::tools::catalog::{PathCatalog, catalog_label};
use crate::orderdesk::tools::config::SheetConfig;
use crate::orderdesk::tools::error::{Result, SheetError};
use crate::orderdesk::tools::io::store::{SheetStore, atomically};
use crate::orderdesk::tools::model::{Cell, Issue, Record, format_number};
use crate::orderdesk::tools::table::{find_row_by_value, read_table};
use crate::orderdesk::tools::writer::replace_body;

/// An order row that could not be validated.
#[derive(Debug)]
pub struct RowFailure {
    /// 1-based spreadsheet row number.
    pub row: u32,
    pub error: SheetError,
}

/// Outcome of a validation run over the order sheet.
#[derive(Debug, Default)]
pub struct ValidationReport {
    pub issues: Vec<Issue>,
    pub failures: Vec<RowFailure>,
    /// Order rows that went through the quantity checks.
    pub checked: usize,
}

impl ValidationReport {
    pub fn is_clean(&self) -> bool {
        self.issues.is_empty() && self.failures.is_empty()
    }
}

/// Checks one order row against the quantity rules of its path.
///
/// Rows without an inventory id are not validation subjects and produce no
/// issues. An inventory id without a matching path is an error.
pub fn validate_row(
    row: &Record,
    catalog: &PathCatalog,
    config: &SheetConfig,
) -> Result<Vec<Issue>> {
    let inventory_id = row.value(&config.inventory_id_header);
    if inventory_id.is_blank() {
        return Ok(Vec::new());
    }

    let item = row.value(&config.item_header).text();
    let label = catalog_label(
        &inventory_id.text(),
        &row.value(&config.path_id_header).text(),
    );
    let path = catalog.lookup(&label).ok_or_else(|| SheetError::MissingPath {
        item: item.clone(),
        label: label.clone(),
    })?;

    let quantity = number(row, &config.quantity_header)?;
    let moq = number(path, &config.moq_header)?;
    let increment = number(path, &config.increment_header)?;

    let mut issues = Vec::new();

    // An order sitting exactly at the MOQ is flagged too.
    if quantity <= moq {
        issues.push(Issue::new(
            item.clone(),
            format!(
                "Our MOQ on this item is {}. Let us know if we can increase the quantity you requested.",
                format_number(moq)
            ),
        ));
    }

    if increment != 0.0 && quantity % increment != 0.0 {
        issues.push(Issue::new(
            item,
            format!(
                "This item needs to be ordered in multiples of {}. Let us know if we can increase the quantity you requested.",
                format_number(increment)
            ),
        ));
    }

    Ok(issues)
}

/// Validates every row of the order sheet and publishes the issues.
///
/// Rows that fail are reported in [`ValidationReport::failures`] while the
/// remaining rows are still checked. The issues sheet is only touched when
/// the whole run succeeds.
#[instrument(level = "info", skip_all, fields(order_sheet = %config.order_sheet))]
pub fn validate_orders<S>(store: &mut S, config: &SheetConfig) -> Result<ValidationReport>
where
    S: SheetStore + Clone,
{
    atomically(store, |store| {
        let report = check_orders(&*store, config)?;

        let records: Vec<Record> = report
            .issues
            .iter()
            .map(|issue| issue.to_record(&config.item_header, &config.issue_header))
            .collect();
        store.add_sheet(&config.issues_sheet);
        replace_body(store, &config.issues_sheet, &records)?;

        info!(
            checked = report.checked,
            issues = report.issues.len(),
            failures = report.failures.len(),
            "order validation finished"
        );
        Ok(report)
    })
}

/// Runs the quantity checks without writing anything back.
pub fn check_orders<S: SheetStore + ?Sized>(
    store: &S,
    config: &SheetConfig,
) -> Result<ValidationReport> {
    if !store.has_sheet(&config.order_sheet) {
        return Err(SheetError::MissingSheet(config.order_sheet.clone()));
    }
    let header_row = find_row_by_value(store, &config.order_sheet, 0, &config.item_header)?
        .ok_or_else(|| SheetError::missing_column(&config.order_sheet, &config.item_header))?;
    let orders = read_table(store, &config.order_sheet, header_row)?;
    let catalog = PathCatalog::load(store, config)?;

    let mut report = ValidationReport::default();
    for (index, order) in orders.records.iter().enumerate() {
        if order.value(&config.inventory_id_header).is_blank() {
            continue;
        }
        let row = orders.row_of(index) + 1;
        match validate_row(order, &catalog, config) {
            Ok(issues) => {
                debug!(row, issues = issues.len(), "order row checked");
                report.checked += 1;
                report.issues.extend(issues);
            }
            Err(error) => {
                warn!(row, %error, "order row could not be validated");
                report.failures.push(RowFailure { row, error });
            }
        }
    }
    Ok(report)
}

fn number(record: &Record, column: &str) -> Result<f64> {
    match record.value(column) {
        Cell::Number(value) if value.is_finite() => Ok(*value),
        cell if cell.is_blank() => Ok(0.0),
        Cell::String(value) => match value.trim().parse::<f64>() {
            Ok(parsed) if parsed.is_finite() => Ok(parsed),
            _ => Err(invalid_number(column, value)),
        },
        other => Err(invalid_number(column, &other.to_string())),
    }
}

fn invalid_number(column: &str, value: &str) -> SheetError {
    SheetError::InvalidNumber {
        column: column.to_string(),
        value: value.to_string(),
    }
}
