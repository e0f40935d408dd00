use once_cell::sync::Lazy;
use regex::Regex;
use serde_json::Value;

use crate::errors::GenerationError;
use crate::models::domain::{Difficulty, QuestionDraft, QuestionRecord};
use crate::models::dto::request::GenerateQuestionsRequest;

pub const AI_SOURCE: &str = "AI生成";
pub const REQUIRED_OPTIONS: usize = 4;

static CODE_FENCE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"```(?:json)?\n?").expect("CODE_FENCE is a valid regex pattern"));

pub fn strip_code_fences(content: &str) -> String {
    CODE_FENCE.replace_all(content, "").trim().to_string()
}

/// Parses model output into validated records. One bad element rejects the
/// whole batch.
pub fn parse_generated_questions(
    content: &str,
    request: &GenerateQuestionsRequest,
) -> Result<Vec<QuestionRecord>, GenerationError> {
    let cleaned = strip_code_fences(content);
    let value: Value = serde_json::from_str(&cleaned).map_err(|e| {
        log::error!("Generated content is not valid JSON: {}", e);
        GenerationError::MalformedResponse(e.to_string())
    })?;

    let items = value.as_array().ok_or(GenerationError::NotAnArray)?;

    items
        .iter()
        .enumerate()
        .map(|(index, item)| {
            validate_item(item, request).ok_or(GenerationError::Schema { index })
        })
        .collect()
}

fn non_empty_str<'a>(item: &'a Value, key: &str) -> Option<&'a str> {
    item.get(key)
        .and_then(Value::as_str)
        .map(str::trim)
        .filter(|s| !s.is_empty())
}

fn validate_item(item: &Value, request: &GenerateQuestionsRequest) -> Option<QuestionRecord> {
    let title = non_empty_str(item, "title")?;
    let explanation = non_empty_str(item, "explanation")?;

    let options = item.get("options")?.as_array()?;
    if options.len() != REQUIRED_OPTIONS {
        return None;
    }
    let options: Vec<String> = options
        .iter()
        .map(|opt| {
            opt.as_str()
                .map(str::trim)
                .filter(|s| !s.is_empty())
                .map(str::to_string)
        })
        .collect::<Option<_>>()?;

    let correct_answer = item.get("correct_answer")?;
    let correct_answer = correct_answer
        .as_i64()
        .or_else(|| correct_answer.as_f64().filter(|f| f.fract() == 0.0).map(|f| f as i64))?;

    let topic = non_empty_str(item, "topic").unwrap_or(request.topic.trim());
    let difficulty = non_empty_str(item, "difficulty")
        .map(Difficulty::normalize)
        .unwrap_or(request.difficulty);
    let source = non_empty_str(item, "source").unwrap_or(AI_SOURCE);

    QuestionRecord::new(QuestionDraft {
        title: title.to_string(),
        options,
        correct_answer,
        explanation: explanation.to_string(),
        topic: topic.to_string(),
        difficulty,
        source: source.to_string(),
        created_at: None,
    })
    .ok()
}
