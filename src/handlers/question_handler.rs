use actix_web::{delete, get, post, put, web, HttpResponse};
use validator::Validate;

use crate::{
    app_state::AppState,
    auth::{require_admin, AuthenticatedUser},
    errors::AppError,
    models::{
        domain::QuestionRecord,
        dto::{
            request::{InsertQuestionsRequest, ListQuestionsParams, QuizQuestionsParams, SetActiveRequest},
            response::{ApiResponse, DeleteQuestionResponse},
        },
    },
};

/// Public quiz read path: a random set of active questions.
#[get("/api/quiz/questions")]
pub async fn quiz_questions(
    state: web::Data<AppState>,
    query: web::Query<QuizQuestionsParams>,
) -> Result<HttpResponse, AppError> {
    query.validate()?;
    let questions = state.question_service.quiz_questions(query.count()).await?;
    Ok(HttpResponse::Ok().json(questions))
}

#[get("/questions")]
pub async fn list_questions(
    state: web::Data<AppState>,
    query: web::Query<ListQuestionsParams>,
    auth: AuthenticatedUser,
) -> Result<HttpResponse, AppError> {
    require_admin(&auth.0)?;
    query.validate()?;

    let page = state.question_service.list_questions(&query).await?;
    Ok(HttpResponse::Ok().json(page))
}

#[post("/questions")]
pub async fn create_question(
    state: web::Data<AppState>,
    request: web::Json<QuestionRecord>,
    auth: AuthenticatedUser,
) -> Result<HttpResponse, AppError> {
    require_admin(&auth.0)?;

    let question = state
        .question_service
        .create_question(request.into_inner())
        .await?;
    Ok(HttpResponse::Created().json(question))
}

#[post("/questions/batch")]
pub async fn insert_questions(
    state: web::Data<AppState>,
    request: web::Json<InsertQuestionsRequest>,
    auth: AuthenticatedUser,
) -> Result<HttpResponse, AppError> {
    require_admin(&auth.0)?;
    request.validate()?;

    let inserted = state
        .question_service
        .insert_questions(request.into_inner().questions)
        .await?;
    let message = format!("成功插入 {} 道题目", inserted.len());
    Ok(HttpResponse::Created().json(ApiResponse {
        data: inserted,
        message,
    }))
}

#[get("/questions/{id}")]
pub async fn get_question(
    state: web::Data<AppState>,
    id: web::Path<String>,
    auth: AuthenticatedUser,
) -> Result<HttpResponse, AppError> {
    require_admin(&auth.0)?;

    let question = state.question_service.get_question(&id).await?;
    Ok(HttpResponse::Ok().json(question))
}

#[put("/questions/{id}")]
pub async fn update_question(
    state: web::Data<AppState>,
    id: web::Path<String>,
    request: web::Json<QuestionRecord>,
    auth: AuthenticatedUser,
) -> Result<HttpResponse, AppError> {
    require_admin(&auth.0)?;

    let question = state
        .question_service
        .update_question(&id, request.into_inner())
        .await?;
    Ok(HttpResponse::Ok().json(question))
}

#[put("/questions/{id}/active")]
pub async fn set_question_active(
    state: web::Data<AppState>,
    id: web::Path<String>,
    request: web::Json<SetActiveRequest>,
    auth: AuthenticatedUser,
) -> Result<HttpResponse, AppError> {
    require_admin(&auth.0)?;

    let question = state
        .question_service
        .set_active(&id, request.is_active)
        .await?;
    Ok(HttpResponse::Ok().json(question))
}

#[delete("/questions/{id}")]
pub async fn delete_question(
    state: web::Data<AppState>,
    id: web::Path<String>,
    auth: AuthenticatedUser,
) -> Result<HttpResponse, AppError> {
    require_admin(&auth.0)?;

    state.question_service.delete_question(&id).await?;
    Ok(HttpResponse::Ok().json(DeleteQuestionResponse {
        message: format!("Question '{}' deleted", id),
    }))
}
