use serde::Serialize;

use crate::importer::ImportReport;
use crate::models::domain::{Question, QuestionRecord};

#[derive(Debug, Serialize)]
pub struct ImportQuestionsResponse {
    pub success: bool,
    pub questions: Vec<QuestionRecord>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub errors: Option<Vec<String>>,
    pub total: usize,
    pub valid: usize,
    pub invalid: usize,
}

impl From<ImportReport> for ImportQuestionsResponse {
    fn from(report: ImportReport) -> Self {
        ImportQuestionsResponse {
            success: true,
            questions: report.questions,
            errors: if report.errors.is_empty() {
                None
            } else {
                Some(report.errors)
            },
            total: report.total,
            valid: report.valid,
            invalid: report.invalid,
        }
    }
}

#[derive(Debug, Serialize)]
pub struct GenerateQuestionsResponse {
    pub success: bool,
    pub count: usize,
    pub questions: Vec<QuestionRecord>,
}

impl From<Vec<QuestionRecord>> for GenerateQuestionsResponse {
    fn from(questions: Vec<QuestionRecord>) -> Self {
        GenerateQuestionsResponse {
            success: true,
            count: questions.len(),
            questions,
        }
    }
}

#[derive(Debug, Serialize)]
pub struct ApiResponse<T> {
    pub data: T,
    pub message: String,
}

#[derive(Debug, Serialize)]
pub struct QuestionPage {
    pub items: Vec<Question>,
    pub total: i64,
    pub offset: i64,
    pub limit: i64,
}

#[derive(Debug, Serialize)]
pub struct DeleteQuestionResponse {
    pub message: String,
}
