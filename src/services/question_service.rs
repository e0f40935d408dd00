use std::sync::Arc;

use crate::{
    errors::{AppError, AppResult},
    models::{
        domain::{Question, QuestionRecord},
        dto::{request::ListQuestionsParams, response::QuestionPage},
    },
    repositories::{QuestionFilter, QuestionRepository},
};

pub const EMPTY_BANK_MESSAGE: &str = "暂无题目，请联系管理员录入题目";

pub struct QuestionService {
    repository: Arc<dyn QuestionRepository>,
}

impl QuestionService {
    pub fn new(repository: Arc<dyn QuestionRepository>) -> Self {
        Self { repository }
    }

    pub async fn create_question(&self, record: QuestionRecord) -> AppResult<Question> {
        let mut created = self
            .repository
            .insert_many(vec![Question::from_record(record)])
            .await?;
        created
            .pop()
            .ok_or_else(|| AppError::InternalError("Insert returned no question".to_string()))
    }

    pub async fn insert_questions(&self, records: Vec<QuestionRecord>) -> AppResult<Vec<Question>> {
        if records.is_empty() {
            return Err(AppError::ValidationError(
                "At least one question is required".to_string(),
            ));
        }

        let questions: Vec<Question> = records.into_iter().map(Question::from_record).collect();
        let inserted = self.repository.insert_many(questions).await?;
        log::info!("Inserted {} questions", inserted.len());
        Ok(inserted)
    }

    pub async fn list_questions(&self, params: &ListQuestionsParams) -> AppResult<QuestionPage> {
        let filter = QuestionFilter {
            topic: params.topic().map(str::to_string),
            active: params.active,
        };
        let (offset, limit) = (params.offset(), params.limit());

        let (items, total) = self.repository.list(&filter, offset, limit).await?;
        Ok(QuestionPage {
            items,
            total,
            offset,
            limit,
        })
    }

    pub async fn get_question(&self, id: &str) -> AppResult<Question> {
        self.repository
            .find_by_id(id)
            .await?
            .ok_or_else(|| AppError::NotFound(format!("Question with id '{}' not found", id)))
    }

    pub async fn update_question(&self, id: &str, record: QuestionRecord) -> AppResult<Question> {
        let mut question = self.get_question(id).await?;
        question.apply_record(record);
        self.repository.update(question).await
    }

    pub async fn set_active(&self, id: &str, is_active: bool) -> AppResult<Question> {
        let mut question = self.get_question(id).await?;
        if question.is_active == is_active {
            return Ok(question);
        }
        question.is_active = is_active;
        question.modified_at = chrono::Utc::now();
        self.repository.update(question).await
    }

    pub async fn delete_question(&self, id: &str) -> AppResult<()> {
        self.repository.delete(id).await?;
        log::info!("Deleted question {}", id);
        Ok(())
    }

    /// Random selection of active questions for a quiz session.
    pub async fn quiz_questions(&self, count: u32) -> AppResult<Vec<Question>> {
        let questions = self.repository.sample_active(count).await?;
        if questions.is_empty() {
            return Err(AppError::NotFound(EMPTY_BANK_MESSAGE.to_string()));
        }
        Ok(questions)
    }
}
