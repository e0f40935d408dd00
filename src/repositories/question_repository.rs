use async_trait::async_trait;
use futures::TryStreamExt;
use mongodb::{
    bson::{doc, from_document, Document},
    options::{FindOptions, IndexOptions, ReplaceOptions},
    Collection, IndexModel,
};

use crate::{
    db::Database,
    errors::{AppError, AppResult},
    models::domain::Question,
};

/// Optional narrowing for question listings.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct QuestionFilter {
    pub topic: Option<String>,
    pub active: Option<bool>,
}

impl QuestionFilter {
    pub fn matches(&self, question: &Question) -> bool {
        self.topic.as_ref().map_or(true, |t| &question.topic == t)
            && self.active.map_or(true, |a| question.is_active == a)
    }

    fn to_document(&self) -> Document {
        let mut filter = doc! {};
        if let Some(topic) = &self.topic {
            filter.insert("topic", topic);
        }
        if let Some(active) = self.active {
            filter.insert("is_active", active);
        }
        filter
    }
}

#[async_trait]
pub trait QuestionRepository: Send + Sync {
    async fn insert_many(&self, questions: Vec<Question>) -> AppResult<Vec<Question>>;
    async fn find_by_id(&self, id: &str) -> AppResult<Option<Question>>;
    /// Newest first. Returns the page and the total matching the filter.
    async fn list(
        &self,
        filter: &QuestionFilter,
        offset: i64,
        limit: i64,
    ) -> AppResult<(Vec<Question>, i64)>;
    async fn update(&self, question: Question) -> AppResult<Question>;
    async fn delete(&self, id: &str) -> AppResult<()>;
    /// Up to `count` active questions in random order.
    async fn sample_active(&self, count: u32) -> AppResult<Vec<Question>>;
    async fn ensure_indexes(&self) -> AppResult<()>;
}

pub struct MongoQuestionRepository {
    collection: Collection<Question>,
}

impl MongoQuestionRepository {
    pub fn new(db: &Database, collection_name: &str) -> Self {
        let collection = db.collection(collection_name);
        Self { collection }
    }
}

#[async_trait]
impl QuestionRepository for MongoQuestionRepository {
    async fn insert_many(&self, questions: Vec<Question>) -> AppResult<Vec<Question>> {
        if questions.is_empty() {
            return Ok(questions);
        }
        self.collection.insert_many(&questions).await?;
        Ok(questions)
    }

    async fn find_by_id(&self, id: &str) -> AppResult<Option<Question>> {
        let question = self.collection.find_one(doc! { "id": id }).await?;
        Ok(question)
    }

    async fn list(
        &self,
        filter: &QuestionFilter,
        offset: i64,
        limit: i64,
    ) -> AppResult<(Vec<Question>, i64)> {
        let filter = filter.to_document();
        let total = self.collection.count_documents(filter.clone()).await? as i64;

        let find_options = FindOptions::builder()
            .sort(doc! { "created_at": -1 })
            .skip(Some(offset.max(0) as u64))
            .limit(Some(limit))
            .build();

        let cursor = self.collection.find(filter).with_options(find_options).await?;
        let items: Vec<Question> = cursor.try_collect().await?;

        Ok((items, total))
    }

    async fn update(&self, question: Question) -> AppResult<Question> {
        let options = ReplaceOptions::builder().upsert(false).build();

        let result = self
            .collection
            .replace_one(doc! { "id": &question.id }, &question)
            .with_options(options)
            .await?;

        if result.matched_count == 0 {
            return Err(AppError::NotFound(format!(
                "Question with id '{}' not found",
                question.id
            )));
        }

        Ok(question)
    }

    async fn delete(&self, id: &str) -> AppResult<()> {
        let result = self.collection.delete_one(doc! { "id": id }).await?;

        if result.deleted_count == 0 {
            return Err(AppError::NotFound(format!(
                "Question with id '{}' not found",
                id
            )));
        }

        Ok(())
    }

    async fn sample_active(&self, count: u32) -> AppResult<Vec<Question>> {
        let pipeline = vec![
            doc! { "$match": { "is_active": true } },
            doc! { "$sample": { "size": count as i64 } },
        ];

        let cursor = self.collection.aggregate(pipeline).await?;
        let documents: Vec<Document> = cursor.try_collect().await?;

        documents
            .into_iter()
            .map(|d| from_document::<Question>(d).map_err(AppError::from))
            .collect()
    }

    async fn ensure_indexes(&self) -> AppResult<()> {
        log::info!("Creating indexes for questions collection");

        let id_index = IndexModel::builder()
            .keys(doc! { "id": 1 })
            .options(
                IndexOptions::builder()
                    .unique(true)
                    .name("id_unique".to_string())
                    .build(),
            )
            .build();

        let listing_index = IndexModel::builder()
            .keys(doc! { "is_active": 1, "topic": 1, "created_at": -1 })
            .options(
                IndexOptions::builder()
                    .name("active_topic_created".to_string())
                    .build(),
            )
            .build();

        self.collection
            .create_indexes(vec![id_index, listing_index])
            .await?;

        log::info!("Successfully created indexes for questions collection");
        Ok(())
    }
}
