use std::{collections::HashMap, sync::Arc};

use async_trait::async_trait;
use tokio::sync::RwLock;

use parenting_quiz_server::{
    errors::{AppError, AppResult},
    models::domain::Question,
    repositories::{QuestionFilter, QuestionRepository},
};

#[derive(Clone, Default)]
pub struct InMemoryQuestionRepository {
    questions: Arc<RwLock<HashMap<String, Question>>>,
}

impl InMemoryQuestionRepository {
    pub fn new() -> Self {
        Self {
            questions: Arc::new(RwLock::new(HashMap::new())),
        }
    }

    #[allow(dead_code)]
    pub async fn len(&self) -> usize {
        self.questions.read().await.len()
    }
}

#[async_trait]
impl QuestionRepository for InMemoryQuestionRepository {
    async fn insert_many(&self, questions: Vec<Question>) -> AppResult<Vec<Question>> {
        let mut store = self.questions.write().await;
        for q in &questions {
            if store.contains_key(&q.id) {
                return Err(AppError::DatabaseError(format!(
                    "duplicate question id '{}'",
                    q.id
                )));
            }
        }
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
        let mut items: Vec<Question> = store
            .values()
            .filter(|q| filter.matches(q))
            .cloned()
            .collect();
        items.sort_by(|a, b| b.created_at.cmp(&a.created_at));

        let total = items.len() as i64;
        let start = offset.max(0) as usize;
        let end = (start + limit.max(0) as usize).min(items.len());

        let page = if start >= items.len() {
            vec![]
        } else {
            items[start..end].to_vec()
        };

        Ok((page, total))
    }

    async fn update(&self, question: Question) -> AppResult<Question> {
        let mut store = self.questions.write().await;
        if !store.contains_key(&question.id) {
            return Err(AppError::NotFound(format!(
                "Question with id '{}' not found",
                question.id
            )));
        }
        store.insert(question.id.clone(), question.clone());
        Ok(question)
    }

    async fn delete(&self, id: &str) -> AppResult<()> {
        match self.questions.write().await.remove(id) {
            Some(_) => Ok(()),
            None => Err(AppError::NotFound(format!(
                "Question with id '{}' not found",
                id
            ))),
        }
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
