use serde::Deserialize;
use validator::Validate;

use crate::models::domain::{Difficulty, QuestionRecord};

pub const DEFAULT_STYLE: &str = "亲子教育";
pub const DEFAULT_QUIZ_SIZE: u32 = 8;

/// Spreadsheet upload. `file` carries the raw workbook bytes as a JSON number array.
#[derive(Debug, Clone, Deserialize)]
pub struct ImportQuestionsRequest {
    #[serde(default)]
    pub file: Vec<u8>,
    #[serde(default)]
    pub filename: String,
}

#[derive(Debug, Clone, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct GenerateQuestionsRequest {
    #[validate(length(min = 1, max = 100))]
    pub topic: String,

    #[serde(default)]
    pub difficulty: Difficulty,

    #[validate(range(min = 1, max = 20))]
    pub count: u32,

    #[validate(length(max = 50))]
    pub style: Option<String>,

    pub reference_book_id: Option<String>,
}

impl GenerateQuestionsRequest {
    pub fn style(&self) -> &str {
        self.style
            .as_deref()
            .map(str::trim)
            .filter(|s| !s.is_empty())
            .unwrap_or(DEFAULT_STYLE)
    }
}

/// Batch insert of records previously returned by import or generation.
#[derive(Debug, Clone, Deserialize, Validate)]
pub struct InsertQuestionsRequest {
    #[validate(length(min = 1, max = 500))]
    pub questions: Vec<QuestionRecord>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct SetActiveRequest {
    pub is_active: bool,
}

#[derive(Debug, Clone, Default, Deserialize, Validate)]
pub struct ListQuestionsParams {
    pub topic: Option<String>,

    pub active: Option<bool>,

    #[validate(range(min = 0))]
    pub offset: Option<i64>,

    #[validate(range(min = 1, max = 100))]
    pub limit: Option<i64>,
}

impl ListQuestionsParams {
    pub fn offset(&self) -> i64 {
        self.offset.unwrap_or(0).max(0)
    }

    pub fn limit(&self) -> i64 {
        self.limit.unwrap_or(20).clamp(1, 100)
    }

    pub fn topic(&self) -> Option<&str> {
        self.topic.as_deref().map(str::trim).filter(|t| !t.is_empty())
    }
}

#[derive(Debug, Clone, Default, Deserialize, Validate)]
pub struct QuizQuestionsParams {
    #[validate(range(min = 1, max = 50))]
    pub count: Option<u32>,
}

impl QuizQuestionsParams {
    pub fn count(&self) -> u32 {
        self.count.unwrap_or(DEFAULT_QUIZ_SIZE)
    }
}
