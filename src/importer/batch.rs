use chrono::{DateTime, Utc};
use serde::Serialize;

use crate::errors::ImportError;
use crate::importer::row::{validate_row, RowOutcome};
use crate::importer::sheet::DataRow;
use crate::models::domain::QuestionRecord;

/// Outcome of a successful import. `total` counts every data row, blank ones
/// included; `invalid` equals the number of collected errors.
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct ImportReport {
    pub questions: Vec<QuestionRecord>,
    pub errors: Vec<String>,
    pub total: usize,
    pub valid: usize,
    pub invalid: usize,
}

pub fn assemble(rows: &[DataRow], now: DateTime<Utc>) -> Result<ImportReport, ImportError> {
    let mut questions = Vec::new();
    let mut errors = Vec::new();

    for row in rows {
        match validate_row(row, now) {
            RowOutcome::Skipped => {}
            RowOutcome::Valid(record) => questions.push(record),
            RowOutcome::Invalid(message) => {
                log::debug!("Rejected spreadsheet {}", message);
                errors.push(message);
            }
        }
    }

    if questions.is_empty() && !errors.is_empty() {
        return Err(ImportError::AllRowsInvalid(errors));
    }

    Ok(ImportReport {
        total: rows.len(),
        valid: questions.len(),
        invalid: errors.len(),
        questions,
        errors,
    })
}
