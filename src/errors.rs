use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use std::fmt;
use thiserror::Error;
use uuid::Uuid;

// --- Domain/Infrastructure Errors ---

/// Which Idea field a model-output element failed on.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum IdeaField {
    MemeText,
    Caption,
    Format,
    Hashtags,
}

impl fmt::Display for IdeaField {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            IdeaField::MemeText => "meme_text",
            IdeaField::Caption => "caption",
            IdeaField::Format => "format",
            IdeaField::Hashtags => "hashtags",
        };
        f.write_str(name)
    }
}

/// Failures turning raw model text into 5 well-formed ideas. All are terminal
/// for the current request; nothing is retried.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ValidationError {
    #[error("Could not parse model response as a JSON array")]
    MalformedResponse,

    #[error("Model response must contain exactly 5 ideas, got {0}")]
    WrongCount(usize),

    // `index` is the zero-based array position; the message is one-based to
    // match what a human reads off the rendered list.
    #[error("Idea {} has invalid {field}", .index + 1)]
    InvalidField { field: IdeaField, index: usize },
}

#[derive(Error, Debug)]
pub enum BackendError {
    #[error("Generative backend returned status {status}")]
    Upstream { status: u16, body: String },

    #[error("Generative backend returned an empty response")]
    EmptyResponse,

    #[error("Generative backend request failed: {0}")]
    Request(#[from] anyhow::Error),
}

#[derive(Error, Debug)]
pub enum RepoError {
    #[error("Idea not found with ID: {0}")]
    NotFound(Uuid),

    #[error("Repository backend error: {0}")]
    BackendError(#[from] anyhow::Error),
}

// --- Web Layer Error ---

#[derive(Error, Debug)]
pub enum AppError {
    // Input validation / request parsing errors
    #[error("Invalid input: {0}")]
    InvalidInput(String),
    #[error("Invalid idea ID format: {0}")]
    InvalidUuid(#[from] uuid::Error),

    // Domain/Service level errors
    #[error("Idea not found with ID: {0}")]
    IdeaNotFound(Uuid),
    #[error("Could not access saved ideas")]
    RepositoryError(#[source] RepoError),
    #[error("Failed to generate ideas from AI provider")]
    UpstreamFailure { details: String },
    #[error("Model response failed validation")]
    ModelResponse(#[source] ValidationError),

    // Configuration / Startup errors
    #[error("Configuration error: {0}")]
    ConfigError(String),
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

// --- Conversions from Domain Errors to AppError ---

impl From<RepoError> for AppError {
    fn from(err: RepoError) -> Self {
        match err {
            RepoError::NotFound(id) => AppError::IdeaNotFound(id),
            e @ RepoError::BackendError(_) => AppError::RepositoryError(e),
        }
    }
}

impl From<BackendError> for AppError {
    fn from(err: BackendError) -> Self {
        let details = match &err {
            BackendError::Upstream { body, .. } => body.clone(),
            other => other.to_string(),
        };
        AppError::UpstreamFailure { details }
    }
}

impl From<ValidationError> for AppError {
    fn from(err: ValidationError) -> Self {
        AppError::ModelResponse(err)
    }
}

impl From<crate::config::ConfigError> for AppError {
    fn from(err: crate::config::ConfigError) -> Self {
        AppError::ConfigError(err.to_string())
    }
}

// --- Axum Response Implementation ---

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, error_message, details) = match &self {
            // 4xx Client Errors
            AppError::InvalidInput(msg) => (StatusCode::BAD_REQUEST, msg.clone(), None),
            AppError::InvalidUuid(e) => (
                StatusCode::BAD_REQUEST,
                format!("Invalid ID format: {}", e),
                None,
            ),
            AppError::IdeaNotFound(id) => (
                StatusCode::NOT_FOUND,
                format!("Idea not found with ID: {}", id),
                None,
            ),

            // Upstream provider failed before validation could run; the raw
            // provider body rides along in `details` for debugging.
            AppError::UpstreamFailure { details } => (
                StatusCode::BAD_GATEWAY,
                "Failed to generate ideas from AI provider.".to_string(),
                Some(details.clone()),
            ),
            // The provider answered but its output failed validation. The
            // precise reason (field + index) goes out instead of a generic
            // "invalid data" so prompt/response drift stays debuggable.
            AppError::ModelResponse(e) => (
                StatusCode::INTERNAL_SERVER_ERROR,
                "Failed to generate ideas.".to_string(),
                Some(e.to_string()),
            ),

            // 5xx Server Errors
            AppError::RepositoryError(e) => {
                tracing::error!(error.source = ?e, "Repository error occurred");
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "Saved-ideas operation failed".to_string(),
                    None,
                )
            }
            AppError::ConfigError(msg) => {
                tracing::error!("Configuration error: {}", msg);
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "Server configuration error".to_string(),
                    None,
                )
            }
            AppError::Io(e) => {
                tracing::error!("I/O error: {}", e);
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "An internal server error occurred".to_string(),
                    None,
                )
            }
        };

        tracing::error!(error.message = %error_message, error.detail = %self, "Responding with error");

        let body = match details {
            Some(details) => {
                Json(serde_json::json!({ "error": error_message, "details": details }))
            }
            None => Json(serde_json::json!({ "error": error_message })),
        };
        (status, body).into_response()
    }
}
