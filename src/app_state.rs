use std::sync::Arc;

use crate::{
    config::Config,
    db::Database,
    errors::AppResult,
    generator::{CompletionClient, OpenRouterClient},
    repositories::{MongoQuestionRepository, QuestionRepository},
    services::{GenerationService, QuestionService},
};

#[derive(Clone)]
pub struct AppState {
    pub question_service: Arc<QuestionService>,
    pub generation_service: Arc<GenerationService>,
    pub db: Option<Database>,
    pub config: Arc<Config>,
}

impl AppState {
    pub async fn new(config: Config) -> AppResult<Self> {
        let db = Database::connect(&config).await?;

        let question_repository =
            Arc::new(MongoQuestionRepository::new(&db, &config.questions_collection));
        question_repository.ensure_indexes().await?;

        let client = Arc::new(OpenRouterClient::from_config(&config)?);

        let mut state = Self::with_components(config, question_repository, client);
        state.db = Some(db);
        Ok(state)
    }

    /// Wires services over the given backends without a database connection.
    pub fn with_components(
        config: Config,
        question_repository: Arc<dyn QuestionRepository>,
        completion_client: Arc<dyn CompletionClient>,
    ) -> Self {
        Self {
            question_service: Arc::new(QuestionService::new(question_repository)),
            generation_service: Arc::new(GenerationService::new(completion_client)),
            db: None,
            config: Arc::new(config),
        }
    }
}
