//! Spreadsheet question importer.
//!
//! The pipeline is pure and single-pass: [`sheet`] reads the first worksheet
//! and checks the header, [`row`] validates each data row, and [`batch`]
//! collects records and row-scoped errors into an [`ImportReport`]. Nothing is
//! persisted here; callers insert the returned records separately.

pub mod batch;
pub mod cell;
pub mod row;
pub mod sheet;
pub mod template;

pub use batch::ImportReport;
pub use cell::CellValue;
pub use sheet::EXPECTED_HEADERS;

use chrono::Utc;

use crate::errors::ImportError;

pub fn import_workbook(bytes: &[u8], filename: &str) -> Result<ImportReport, ImportError> {
    let grid = sheet::read_first_sheet(bytes)?;
    let rows = sheet::split_header(grid)?;
    let report = batch::assemble(&rows, Utc::now())?;

    log::info!(
        "Imported '{}': {} rows, {} valid, {} invalid",
        filename,
        report.total,
        report.valid,
        report.invalid
    );

    Ok(report)
}
