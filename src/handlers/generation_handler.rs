use actix_web::{post, web, HttpRequest, HttpResponse};

use crate::{
    app_state::AppState,
    auth::{require_admin, AuthenticatedUser},
    errors::{AppError, GenerationError},
    middleware::get_request_id,
    models::dto::{request::GenerateQuestionsRequest, response::GenerateQuestionsResponse},
};

#[post("/questions/generate")]
pub async fn generate_questions(
    req: HttpRequest,
    state: web::Data<AppState>,
    body: web::Bytes,
    auth: AuthenticatedUser,
) -> Result<HttpResponse, AppError> {
    require_admin(&auth.0)?;

    let request: GenerateQuestionsRequest = serde_json::from_slice(&body)
        .map_err(|e| GenerationError::InvalidRequest(e.to_string()))?;
    log::info!(
        "[{}] Generating {} questions on topic {}",
        get_request_id(&req).unwrap_or_default(),
        request.count,
        request.topic.trim()
    );
    let questions = state.generation_service.generate(request).await?;
    Ok(HttpResponse::Ok().json(GenerateQuestionsResponse::from(questions)))
}
