use chrono::{DateTime, Utc};

use crate::importer::sheet::DataRow;
use crate::models::domain::{Difficulty, QuestionDraft, QuestionRecord};

pub const DEFAULT_EXPLANATION: &str = "暂无解析";
pub const DEFAULT_IMPORT_SOURCE: &str = "Excel导入";

const COL_TITLE: usize = 0;
const COL_OPTIONS: [usize; 4] = [1, 2, 3, 4];
const COL_ANSWER: usize = 5;
const COL_EXPLANATION: usize = 6;
const COL_TOPIC: usize = 7;
const COL_DIFFICULTY: usize = 8;
const COL_SOURCE: usize = 9;

#[derive(Clone, Debug, PartialEq)]
pub enum RowOutcome {
    Skipped,
    Valid(QuestionRecord),
    Invalid(String),
}

fn row_error(row: &DataRow, reason: impl std::fmt::Display) -> RowOutcome {
    RowOutcome::Invalid(format!("row {}: {}", row.row_number, reason))
}

/// Validates a single data row. Checks run in a fixed order and the first
/// failure wins; a blank row is skipped without an error.
pub fn validate_row(row: &DataRow, now: DateTime<Utc>) -> RowOutcome {
    if row.cells.iter().all(|cell| cell.is_blank()) {
        return RowOutcome::Skipped;
    }

    let title = row.cell(COL_TITLE).trimmed();
    if title.is_empty() {
        return row_error(row, "题目内容不能为空");
    }

    let raw_options: Vec<String> = COL_OPTIONS
        .iter()
        .map(|&col| row.cell(col).trimmed())
        .collect();
    if raw_options[0].is_empty() || raw_options[1].is_empty() {
        return row_error(row, "至少需要2个选项");
    }

    // Gaps are closed up: [A, "", C, D] becomes [A, C, D].
    let options: Vec<String> = raw_options.into_iter().filter(|o| !o.is_empty()).collect();
    if options.len() < 2 {
        return row_error(row, "至少需要2个有效选项");
    }

    let correct_answer = row.cell(COL_ANSWER).as_answer_index();
    if correct_answer < 0 || correct_answer as usize >= options.len() {
        return row_error(
            row,
            format!("正确答案必须是0-{}之间的整数或对应字母", options.len() - 1),
        );
    }

    let topic = row.cell(COL_TOPIC).trimmed();
    if topic.is_empty() {
        return row_error(row, "主题不能为空");
    }

    let difficulty = Difficulty::normalize(&row.cell(COL_DIFFICULTY).as_text());

    let explanation = non_empty_or(row.cell(COL_EXPLANATION).trimmed(), DEFAULT_EXPLANATION);
    let source = non_empty_or(row.cell(COL_SOURCE).trimmed(), DEFAULT_IMPORT_SOURCE);

    let draft = QuestionDraft {
        title,
        options,
        correct_answer,
        explanation,
        topic,
        difficulty,
        source,
        created_at: Some(now),
    };

    match QuestionRecord::new(draft) {
        Ok(record) => RowOutcome::Valid(record),
        Err(reason) => row_error(row, reason),
    }
}

fn non_empty_or(value: String, default: &str) -> String {
    if value.is_empty() {
        default.to_string()
    } else {
        value
    }
}
