use std::sync::Arc;

use validator::Validate;

use crate::{
    errors::{AppError, AppResult},
    generator::{build_prompt, parse_generated_questions, CompletionClient},
    models::{domain::QuestionRecord, dto::request::GenerateQuestionsRequest},
};

pub struct GenerationService {
    client: Arc<dyn CompletionClient>,
}

impl GenerationService {
    pub fn new(client: Arc<dyn CompletionClient>) -> Self {
        Self { client }
    }

    /// Generates a batch of questions. Nothing is persisted; the caller reviews
    /// the records and submits them through the batch insert.
    pub async fn generate(&self, request: GenerateQuestionsRequest) -> AppResult<Vec<QuestionRecord>> {
        request.validate()?;
        if request.topic.trim().is_empty() {
            return Err(AppError::ValidationError("主题不能为空".to_string()));
        }

        let prompt = build_prompt(&request);
        let content = self.client.complete(&prompt).await?;
        let questions = parse_generated_questions(&content, &request)?;

        log::info!(
            "Generated {} questions on topic {} ({})",
            questions.len(),
            request.topic.trim(),
            request.difficulty
        );
        Ok(questions)
    }
}
