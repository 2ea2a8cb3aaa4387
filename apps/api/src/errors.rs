use axum::{
    extract::rejection::JsonRejection,
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::{json, Value};
use thiserror::Error;

use crate::form::ValidationErrors;
use crate::generation::{GenerationError, SubmitError};
use crate::render::RenderError;
use crate::store::StorageError;

/// Application-level error type.
/// Implements `IntoResponse` so Axum handlers can return `Result<T, AppError>`.
///
/// Each variant maps to one user-facing message; underlying causes are
/// logged, never returned.
#[derive(Debug, Error)]
pub enum AppError {
    #[error("Not found: {0}")]
    NotFound(String),

    #[error("Bad request: {0}")]
    BadRequest(String),

    #[error("Validation error: {0}")]
    Validation(#[from] ValidationErrors),

    #[error("Conflict: {0}")]
    Conflict(String),

    #[error("Generation error: {0}")]
    Generation(#[from] GenerationError),

    #[error("Storage error: {0}")]
    Storage(#[from] StorageError),

    #[error("Render error: {0}")]
    Render(#[from] RenderError),
}

impl From<SubmitError> for AppError {
    fn from(e: SubmitError) -> Self {
        match e {
            SubmitError::Validation(errors) => AppError::Validation(errors),
            SubmitError::GenerationInProgress => {
                AppError::Conflict("A resume is already being generated".to_string())
            }
            SubmitError::Generation(e) => AppError::Generation(e),
            SubmitError::Storage(e) => AppError::Storage(e),
        }
    }
}

impl From<JsonRejection> for AppError {
    fn from(rejection: JsonRejection) -> Self {
        tracing::warn!("Rejected request body: {rejection}");
        AppError::BadRequest(rejection.body_text())
    }
}

impl AppError {
    fn parts(&self) -> (StatusCode, &'static str, String) {
        match self {
            AppError::NotFound(msg) => (StatusCode::NOT_FOUND, "NOT_FOUND", msg.clone()),
            AppError::BadRequest(msg) => (StatusCode::BAD_REQUEST, "INVALID_BODY", msg.clone()),
            AppError::Validation(_) => (
                StatusCode::BAD_REQUEST,
                "VALIDATION_ERROR",
                "Please fill in the highlighted fields".to_string(),
            ),
            AppError::Conflict(msg) => (StatusCode::CONFLICT, "CONFLICT", msg.clone()),
            AppError::Generation(e) => {
                tracing::error!("Generation error: {e}");
                let (status, code) = match e {
                    GenerationError::ProviderFailure(_) => {
                        (StatusCode::BAD_GATEWAY, "PROVIDER_ERROR")
                    }
                    GenerationError::MalformedResponse(_) => {
                        (StatusCode::BAD_GATEWAY, "MALFORMED_RESPONSE")
                    }
                    GenerationError::TruncatedResponse => {
                        (StatusCode::BAD_GATEWAY, "TRUNCATED_RESPONSE")
                    }
                    GenerationError::PromptEncoding(_) => {
                        (StatusCode::INTERNAL_SERVER_ERROR, "PROMPT_ERROR")
                    }
                };
                (
                    status,
                    code,
                    "Failed to generate resume. Please check your API key and try again."
                        .to_string(),
                )
            }
            AppError::Storage(e) => {
                tracing::error!("Storage error: {e}");
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "STORAGE_ERROR",
                    "Failed to access saved resumes".to_string(),
                )
            }
            AppError::Render(e) => {
                tracing::error!("Render error: {e}");
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "RENDER_ERROR",
                    "Failed to prepare the resume for printing".to_string(),
                )
            }
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, code, message) = self.parts();

        let mut error: Value = json!({
            "code": code,
            "message": message
        });
        if let AppError::Validation(fields) = &self {
            error["fields"] = json!(fields);
        }

        (status, Json(json!({ "error": error }))).into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_submit_errors_map_to_statuses() {
        let conflict = AppError::from(SubmitError::GenerationInProgress);
        assert_eq!(conflict.parts().0, StatusCode::CONFLICT);

        let malformed = AppError::from(SubmitError::Generation(
            GenerationError::MalformedResponse("eof".to_string()),
        ));
        let (status, code, message) = malformed.parts();
        assert_eq!(status, StatusCode::BAD_GATEWAY);
        assert_eq!(code, "MALFORMED_RESPONSE");
        assert!(!message.contains("eof"), "causes stay out of the response");
    }

    #[test]
    fn test_prompt_encoding_is_not_blamed_on_the_provider() {
        let cause = serde_json::from_str::<Value>("{").unwrap_err();
        let (status, code, _) = AppError::Generation(GenerationError::PromptEncoding(cause)).parts();
        assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(code, "PROMPT_ERROR");
    }

    #[test]
    fn test_body_rejections_are_bad_requests() {
        let (status, code, message) = AppError::BadRequest("expected a sequence".to_string()).parts();
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(code, "INVALID_BODY");
        assert_eq!(message, "expected a sequence");
    }

    #[test]
    fn test_truncation_has_its_own_code() {
        let (_, code, _) = AppError::Generation(GenerationError::TruncatedResponse).parts();
        assert_eq!(code, "TRUNCATED_RESPONSE");
    }
}
