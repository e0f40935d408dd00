use std::io::Cursor;

use calamine::{open_workbook_auto_from_rs, Reader};
use csv::ReaderBuilder;

use crate::errors::ImportError;
use crate::importer::cell::CellValue;

pub const EXPECTED_HEADERS: [&str; 10] = [
    "题目内容", "选项A", "选项B", "选项C", "选项D", "正确答案", "题目解析", "主题", "难度", "来源",
];

/// One data row together with its 1-based sheet row number (the header is row 1).
#[derive(Clone, Debug, PartialEq)]
pub struct DataRow {
    pub row_number: usize,
    pub cells: Vec<CellValue>,
}

impl DataRow {
    /// Cell at `index`, treating cells past the end of a short row as empty.
    pub fn cell(&self, index: usize) -> &CellValue {
        self.cells.get(index).unwrap_or(&CellValue::Empty)
    }
}

const UTF8_BOM: &[u8] = b"\xEF\xBB\xBF";

/// Opens the workbook in memory and returns the first sheet as a grid.
///
/// Anything calamine cannot detect is retried as UTF-8 CSV, which is the
/// format of the downloadable template.
pub fn read_first_sheet(bytes: &[u8]) -> Result<Vec<Vec<CellValue>>, ImportError> {
    if bytes.is_empty() {
        return Err(ImportError::MissingFile);
    }

    let mut workbook = match open_workbook_auto_from_rs(Cursor::new(bytes.to_vec())) {
        Ok(workbook) => workbook,
        Err(e) => return read_csv(bytes).ok_or_else(|| ImportError::Unreadable(e.to_string())),
    };

    let range = workbook
        .worksheet_range_at(0)
        .ok_or_else(|| ImportError::Unreadable("工作簿中没有工作表".to_string()))?
        .map_err(|e| ImportError::Unreadable(e.to_string()))?;

    // calamine trims leading empty columns; restore them so header positions line up.
    let leading_cols = range.start().map(|(_, col)| col as usize).unwrap_or(0);

    let grid = range
        .rows()
        .map(|row| {
            std::iter::repeat(CellValue::Empty)
                .take(leading_cols)
                .chain(row.iter().map(CellValue::from))
                .collect()
        })
        .collect();

    Ok(grid)
}

/// Reads UTF-8 CSV into a grid. `None` when the bytes are not CSV text.
///
/// The csv reader drops blank lines, so unlike a workbook they are not
/// counted as rows.
fn read_csv(bytes: &[u8]) -> Option<Vec<Vec<CellValue>>> {
    let bytes = bytes.strip_prefix(UTF8_BOM).unwrap_or(bytes);
    std::str::from_utf8(bytes).ok()?;

    let mut reader = ReaderBuilder::new()
        .has_headers(false)
        .flexible(true)
        .from_reader(bytes);

    reader
        .records()
        .map(|record| {
            record
                .ok()
                .map(|record| record.iter().map(CellValue::from).collect())
        })
        .collect()
}

/// Checks grid shape and header, then hands back the data rows in file order.
pub fn split_header(grid: Vec<Vec<CellValue>>) -> Result<Vec<DataRow>, ImportError> {
    if grid.len() < 2 {
        return Err(ImportError::MissingRows);
    }

    let mut rows = grid.into_iter();
    let header = rows.next().unwrap_or_default();
    check_header(&header)?;

    Ok(rows
        .enumerate()
        .map(|(i, cells)| DataRow {
            row_number: i + 2,
            cells,
        })
        .collect())
}

pub fn check_header(header: &[CellValue]) -> Result<(), ImportError> {
    for (column, expected) in EXPECTED_HEADERS.iter().enumerate() {
        let actual = header.get(column).map(CellValue::as_text).unwrap_or_default();
        if actual != *expected {
            return Err(ImportError::HeaderMismatch {
                column,
                expected: expected.to_string(),
                actual,
            });
        }
    }
    Ok(())
}
