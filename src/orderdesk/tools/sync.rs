use std::path::Path;

use tracing::{info, instrument, warn};

use crate::orderdesk::tools::config::SheetConfig;
use crate::orderdesk::tools::dropdown::{self, DropdownOutcome};
use crate::orderdesk::tools::error::Result;
use crate::orderdesk::tools::io::excel_read;
use crate::orderdesk::tools::io::excel_write;
use crate::orderdesk::tools::io::store::MemoryWorkbook;
use crate::orderdesk::tools::validate::{self, ValidationReport};

/// Validates the order sheet of a workbook file and saves the issues list.
#[instrument(
    level = "info",
    skip_all,
    fields(input = %input.display(), output = %output.display())
)]
pub fn validate_workbook(
    input: &Path,
    output: &Path,
    config: &SheetConfig,
) -> Result<ValidationReport> {
    let mut workbook = read_source(input, output)?;
    let report = validate::validate_orders(&mut workbook, config)?;
    excel_write::write_workbook(output, &workbook)?;
    info!(issues = report.issues.len(), "issues written");
    Ok(report)
}

/// Replays an edit of the item cell in `row` (0-indexed) and saves the
/// resulting dropdown state.
#[instrument(
    level = "info",
    skip_all,
    fields(input = %input.display(), output = %output.display(), row = row)
)]
pub fn edit_workbook(
    input: &Path,
    output: &Path,
    row: u32,
    config: &SheetConfig,
) -> Result<DropdownOutcome> {
    let mut workbook = read_source(input, output)?;
    let outcome = dropdown::sync_dropdown(&mut workbook, &config.order_sheet, row, config)?;
    excel_write::write_workbook(output, &workbook)?;
    info!(?outcome, "dropdown refreshed");
    Ok(outcome)
}

fn read_source(input: &Path, output: &Path) -> Result<MemoryWorkbook> {
    if input == output {
        warn!("saving over the input; dropdowns from earlier edits are not carried over");
    }
    excel_read::read_workbook(input)
}
