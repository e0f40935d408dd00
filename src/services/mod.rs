pub mod generation_service;
pub mod question_service;

pub use generation_service::GenerationService;
pub use question_service::QuestionService;
