pub mod generation_handler;
pub mod health_handler;
pub mod import_handler;
pub mod question_handler;

use actix_web::web;

use crate::auth::AuthMiddleware;

pub use generation_handler::generate_questions;
pub use health_handler::{health_check, health_check_ready};
pub use import_handler::{download_template, import_questions};
pub use question_handler::{
    create_question, delete_question, get_question, insert_questions, list_questions,
    quiz_questions, set_question_active, update_question,
};

pub fn register_public_endpoints(config: &mut web::ServiceConfig) {
    config
        .service(health_check)
        .service(health_check_ready)
        .service(quiz_questions);
}

/// Admin routes under `/api/admin`, all behind [`AuthMiddleware`].
/// Literal segments are registered before `/questions/{id}`.
pub fn register_admin_endpoints(config: &mut web::ServiceConfig) {
    config.service(
        web::scope("/api/admin")
            .wrap(AuthMiddleware)
            .service(download_template)
            .service(import_questions)
            .service(generate_questions)
            .service(insert_questions)
            .service(list_questions)
            .service(create_question)
            .service(get_question)
            .service(update_question)
            .service(set_question_active)
            .service(delete_question),
    );
}
