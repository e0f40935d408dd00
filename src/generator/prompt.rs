use once_cell::sync::Lazy;
use regex::{Captures, Regex};

use crate::constants::question_prompt::{
    QUESTION_GENERATOR_SYSTEM_PROMPT, QUESTION_GENERATOR_USER_TEMPLATE, REFERENCE_BOOK_LINE,
};
use crate::models::dto::request::GenerateQuestionsRequest;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Prompt {
    pub system: String,
    pub user: String,
}

static PLACEHOLDER: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"\{(\w+)\}").expect("PLACEHOLDER is a valid regex pattern"));

/// Fills the user template in a single pass, so request text that happens to
/// contain `{topic}` or similar is never expanded.
pub fn build_prompt(request: &GenerateQuestionsRequest) -> Prompt {
    let reference = request
        .reference_book_id
        .as_deref()
        .map(str::trim)
        .filter(|id| !id.is_empty())
        .map(|id| REFERENCE_BOOK_LINE.replace("{reference_book_id}", id))
        .unwrap_or_default();

    let count = request.count.to_string();
    let user = PLACEHOLDER
        .replace_all(QUESTION_GENERATOR_USER_TEMPLATE, |caps: &Captures| {
            match &caps[1] {
                "style" => request.style(),
                "count" => count.as_str(),
                "topic" => request.topic.trim(),
                "difficulty_zh" => request.difficulty.label_zh(),
                "difficulty" => request.difficulty.as_str(),
                "reference" => reference.as_str(),
                _ => caps.get(0).map_or("", |m| m.as_str()),
            }
            .to_string()
        })
        .into_owned();

    Prompt {
        system: QUESTION_GENERATOR_SYSTEM_PROMPT.to_string(),
        user,
    }
}
