use std::{collections::HashMap, sync::Arc};

use async_trait::async_trait;
use tokio::sync::RwLock;

use crate::{
    app_state::AppState,
    auth::{JwtService, Role},
    config::Config,
    errors::{AppError, AppResult},
    generator::client::MockCompletionClient,
    models::domain::Question,
    repositories::{QuestionFilter, QuestionRepository},
};

pub mod fixtures {
    use crate::models::domain::{Difficulty, Question, QuestionDraft, QuestionRecord};

    pub fn record(topic: &str) -> QuestionRecord {
        QuestionRecord::new(QuestionDraft {
            title: format!("关于{}的问题", topic),
            options: vec![
                "立即制止".to_string(),
                "先倾听孩子".to_string(),
                "不予理会".to_string(),
            ],
            correct_answer: 1,
            explanation: "倾听能帮助孩子表达情绪".to_string(),
            topic: topic.to_string(),
            difficulty: Difficulty::Medium,
            source: "测试".to_string(),
            created_at: None,
        })
        .expect("fixture record is valid")
    }

    pub fn question(topic: &str) -> Question {
        Question::from_record(record(topic))
    }
}

/// `QuestionRepository` backed by a map, for service and handler tests.
#[derive(Clone, Default)]
pub struct InMemoryQuestionRepository {
    questions: Arc<RwLock<HashMap<String, Question>>>,
}

impl InMemoryQuestionRepository {
    pub fn new() -> Self {
        Self::default()
    }

    pub async fn len(&self) -> usize {
        self.questions.read().await.len()
    }
}

#[async_trait]
impl QuestionRepository for InMemoryQuestionRepository {
    async fn insert_many(&self, questions: Vec<Question>) -> AppResult<Vec<Question>> {
        let mut store = self.questions.write().await;
        for q in &questions {
            store.insert(q.id.clone(), q.clone());
        }
        Ok(questions)
    }

    async fn find_by_id(&self, id: &str) -> AppResult<Option<Question>> {
        Ok(self.questions.read().await.get(id).cloned())
    }

    async fn list(
        &self,
        filter: &QuestionFilter,
        offset: i64,
        limit: i64,
    ) -> AppResult<(Vec<Question>, i64)> {
        let store = self.questions.read().await;
        let mut items: Vec<Question> = store.values().filter(|q| filter.matches(q)).cloned().collect();
        items.sort_by(|a, b| b.created_at.cmp(&a.created_at));

        let total = items.len() as i64;
        let page = items
            .into_iter()
            .skip(offset.max(0) as usize)
            .take(limit.max(0) as usize)
            .collect();

        Ok((page, total))
    }

    async fn update(&self, question: Question) -> AppResult<Question> {
        let mut store = self.questions.write().await;
        match store.get_mut(&question.id) {
            Some(existing) => {
                *existing = question.clone();
                Ok(question)
            }
            None => Err(AppError::NotFound(format!(
                "Question with id '{}' not found",
                question.id
            ))),
        }
    }

    async fn delete(&self, id: &str) -> AppResult<()> {
        self.questions
            .write()
            .await
            .remove(id)
            .map(|_| ())
            .ok_or_else(|| AppError::NotFound(format!("Question with id '{}' not found", id)))
    }

    async fn sample_active(&self, count: u32) -> AppResult<Vec<Question>> {
        let store = self.questions.read().await;
        Ok(store
            .values()
            .filter(|q| q.is_active)
            .take(count as usize)
            .cloned()
            .collect())
    }

    async fn ensure_indexes(&self) -> AppResult<()> {
        Ok(())
    }
}

/// App state over an in-memory repository and the given completion client.
pub fn test_app_data_with_client(
    client: MockCompletionClient,
) -> (AppState, JwtService, InMemoryQuestionRepository) {
    let config = Config::test_config();
    let jwt = JwtService::new(&config.jwt_secret, config.jwt_expiration_hours);
    let repo = InMemoryQuestionRepository::new();
    let state = AppState::with_components(config, Arc::new(repo.clone()), Arc::new(client));
    (state, jwt, repo)
}

pub fn test_app_data() -> (AppState, JwtService, InMemoryQuestionRepository) {
    test_app_data_with_client(MockCompletionClient::new())
}

pub fn token_for(jwt: &JwtService, role: Role) -> String {
    jwt.create_token("test-account", "tester@example.com", role)
        .expect("test token is encodable")
}

pub mod test_helpers {
    use actix_web::http::StatusCode;

    /// Asserts that a status code represents an error (4xx or 5xx)
    pub fn assert_error_status(status: StatusCode) {
        assert!(
            status.is_client_error() || status.is_server_error(),
            "Expected error status, got: {}",
            status
        );
    }
}

#[cfg(test)]
mod tests {
    use super::fixtures::*;
    use super::*;

    #[actix_web::test]
    async fn test_in_memory_list_is_newest_first() {
        let repo = InMemoryQuestionRepository::new();
        let mut older = question("睡眠");
        older.created_at = older.created_at - chrono::Duration::minutes(5);
        let newer = question("睡眠");
        repo.insert_many(vec![older.clone(), newer.clone()]).await.unwrap();

        let (items, total) = repo.list(&QuestionFilter::default(), 0, 10).await.unwrap();
        assert_eq!(total, 2);
        assert_eq!(items[0].id, newer.id);
        assert_eq!(items[1].id, older.id);
    }

    #[test]
    fn test_fixture_record_is_valid() {
        let r = record("情绪管理");
        assert_eq!(r.options.len(), 3);
        assert_eq!(r.correct_answer, 1);
    }
}
