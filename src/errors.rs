use actix_web::{http::StatusCode, HttpResponse, ResponseError};
use serde::Serialize;
use thiserror::Error;

/// Whole-file import failures. Row-level problems are collected in the
/// import report instead and never surface here.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ImportError {
    #[error("请求格式错误：{0}")]
    InvalidRequest(String),

    #[error("未提供文件")]
    MissingFile,

    #[error("文件格式错误：无法读取工作簿（{0}）")]
    Unreadable(String),

    #[error("文件格式错误：至少需要标题行和数据行")]
    MissingRows,

    #[error("文件格式错误：第{}列应为\"{}\"，但实际为\"{}\"", .column + 1, .expected, .actual)]
    HeaderMismatch {
        column: usize,
        expected: String,
        actual: String,
    },

    #[error("所有题目都验证失败：\n{}", .0.join("\n"))]
    AllRowsInvalid(Vec<String>),
}

/// AI generation failures. Any of these discards the whole batch.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum GenerationError {
    #[error("Invalid generation request: {0}")]
    InvalidRequest(String),

    #[error("OpenRouter API key not configured")]
    NotConfigured,

    #[error("Failed to reach OpenRouter API: {0}")]
    Transport(String),

    #[error("OpenRouter API error: {status}")]
    Upstream { status: u16 },

    #[error("Failed to parse generated questions: {0}")]
    MalformedResponse(String),

    #[error("Generated content is not an array")]
    NotAnArray,

    #[error("Invalid question format at index {index}")]
    Schema { index: usize },
}

#[derive(Debug, Clone, Error)]
pub enum AppError {
    #[error("Not found: {0}")]
    NotFound(String),

    #[error("Validation error: {0}")]
    ValidationError(String),

    #[error("Database error: {0}")]
    DatabaseError(String),

    #[error("Unauthorized: {0}")]
    Unauthorized(String),

    #[error("Forbidden: {0}")]
    Forbidden(String),

    #[error("Internal server error: {0}")]
    InternalError(String),

    #[error(transparent)]
    Import(#[from] ImportError),

    #[error(transparent)]
    Generation(#[from] GenerationError),
}

#[derive(Debug, Serialize)]
pub struct ErrorResponse {
    pub error: String,
    pub code: u16,
}

#[derive(Debug, Serialize)]
pub struct FailureEnvelope {
    pub success: bool,
    pub error: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub details: Option<String>,
}

pub const GENERATION_FAILURE_DETAILS: &str = "Failed to generate questions";

impl ResponseError for AppError {
    fn status_code(&self) -> StatusCode {
        match self {
            AppError::NotFound(_) => StatusCode::NOT_FOUND,
            AppError::ValidationError(_) => StatusCode::BAD_REQUEST,
            AppError::DatabaseError(_) => StatusCode::INTERNAL_SERVER_ERROR,
            AppError::Unauthorized(_) => StatusCode::UNAUTHORIZED,
            AppError::Forbidden(_) => StatusCode::FORBIDDEN,
            AppError::InternalError(_) => StatusCode::INTERNAL_SERVER_ERROR,
            AppError::Import(_) => StatusCode::BAD_REQUEST,
            AppError::Generation(GenerationError::InvalidRequest(_)) => StatusCode::BAD_REQUEST,
            AppError::Generation(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    fn error_response(&self) -> HttpResponse {
        match self {
            AppError::Import(err) => HttpResponse::build(self.status_code()).json(FailureEnvelope {
                success: false,
                error: err.to_string(),
                details: None,
            }),
            AppError::Generation(err) => {
                HttpResponse::build(self.status_code()).json(FailureEnvelope {
                    success: false,
                    error: err.to_string(),
                    details: Some(GENERATION_FAILURE_DETAILS.to_string()),
                })
            }
            _ => HttpResponse::build(self.status_code()).json(ErrorResponse {
                error: self.to_string(),
                code: self.status_code().as_u16(),
            }),
        }
    }
}

impl From<mongodb::error::Error> for AppError {
    fn from(err: mongodb::error::Error) -> Self {
        AppError::DatabaseError(err.to_string())
    }
}
impl From<mongodb::bson::de::Error> for AppError {
    fn from(err: mongodb::bson::de::Error) -> Self {
        AppError::InternalError(format!("BSON deserialization error: {}", err))
    }
}
impl From<validator::ValidationErrors> for AppError {
    fn from(err: validator::ValidationErrors) -> Self {
        AppError::ValidationError(err.to_string())
    }
}
impl From<actix_web::error::BlockingError> for AppError {
    fn from(err: actix_web::error::BlockingError) -> Self {
        AppError::InternalError(format!("Blocking task failed: {}", err))
    }
}

pub type AppResult<T> = Result<T, AppError>;
