use actix_web::{
    error::{JsonPayloadError, QueryPayloadError},
    http::StatusCode,
    web, HttpRequest, HttpResponse, ResponseError,
};
use serde::Serialize;
use thiserror::Error;

use crate::services::completion_provider::ProviderError;
use crate::services::question_generator::GenerationError;

#[derive(Debug, Clone, Error)]
pub enum AppError {
    #[error("Not found: {0}")]
    NotFound(String),

    #[error("Validation error: {0}")]
    ValidationError(String),

    #[error("Upstream error: {0}")]
    UpstreamError(String),

    #[error("Upstream timeout: {0}")]
    UpstreamTimeout(String),
}

#[derive(Debug, Serialize)]
pub struct ErrorResponse {
    pub error: String,
    pub code: u16,
}

impl ResponseError for AppError {
    fn status_code(&self) -> StatusCode {
        match self {
            AppError::NotFound(_) => StatusCode::NOT_FOUND,
            AppError::ValidationError(_) => StatusCode::BAD_REQUEST,
            AppError::UpstreamError(_) => StatusCode::BAD_GATEWAY,
            AppError::UpstreamTimeout(_) => StatusCode::GATEWAY_TIMEOUT,
        }
    }

    fn error_response(&self) -> HttpResponse {
        HttpResponse::build(self.status_code()).json(ErrorResponse {
            error: self.to_string(),
            code: self.status_code().as_u16(),
        })
    }
}

impl From<validator::ValidationErrors> for AppError {
    fn from(err: validator::ValidationErrors) -> Self {
        AppError::ValidationError(err.to_string())
    }
}

impl From<GenerationError> for AppError {
    fn from(err: GenerationError) -> Self {
        match err {
            GenerationError::InvalidRequest(message) => AppError::ValidationError(message),
            GenerationError::Provider(ProviderError::Timeout(_)) => {
                AppError::UpstreamTimeout(err.to_string())
            }
            GenerationError::Provider(_) => AppError::UpstreamError(err.to_string()),
        }
    }
}

pub type AppResult<T> = Result<T, AppError>;

/// Body extractor config that reports rejected payloads as `{error, code}`.
pub fn json_config() -> web::JsonConfig {
    web::JsonConfig::default().error_handler(|err: JsonPayloadError, _req: &HttpRequest| {
        AppError::ValidationError(err.to_string()).into()
    })
}

/// Query extractor config that reports rejected parameters as `{error, code}`.
pub fn query_config() -> web::QueryConfig {
    web::QueryConfig::default().error_handler(|err: QueryPayloadError, _req: &HttpRequest| {
        AppError::ValidationError(err.to_string()).into()
    })
}
