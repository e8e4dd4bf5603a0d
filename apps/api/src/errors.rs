use axum::{
    extract::rejection::JsonRejection,
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::json;
use thiserror::Error;

use crate::composer::conversation::ConversationError;
use crate::composer::session::ComposerError;
use crate::composer::task::CANCELLED_MESSAGE;
use crate::llm_client::LlmError;

/// Plain-text body for any non-POST request to a generation endpoint.
pub const METHOD_NOT_ALLOWED_MESSAGE: &str = "Only POST allowed";
/// Shown when the provider fails without a message of its own.
pub const PROVIDER_ERROR_MESSAGE: &str = "The completion provider returned an error.";
/// Shown for every transport or parse failure; details stay in the logs.
pub const CONNECTION_FAILURE_MESSAGE: &str = "Failed to connect to OpenAI";
/// Request body could not be parsed as JSON.
pub const INVALID_JSON_MESSAGE: &str = "Request body is not valid JSON";
/// Request body parsed but does not have the expected fields or values.
pub const INVALID_BODY_MESSAGE: &str = "Request body does not match the expected format";
pub const JSON_CONTENT_TYPE_MESSAGE: &str = "Expected a request with Content-Type: application/json";
const UNREADABLE_BODY_MESSAGE: &str = "Failed to read the request body";
const INTERNAL_ERROR_MESSAGE: &str = "An internal server error occurred";

/// Application-level error type.
/// Implements `IntoResponse` so Axum handlers can return `Result<T, AppError>`.
/// Every variant except `MethodNotAllowed` renders as `{"error": "<message>"}`.
#[derive(Debug, Error)]
pub enum AppError {
    #[error("Method not allowed")]
    MethodNotAllowed,

    #[error("Validation error: {0}")]
    Validation(String),

    #[error("Upstream error (status {status}): {message}")]
    Upstream { status: u16, message: String },

    #[error("Transport error: {0}")]
    Transport(String),

    #[error("Generation cancelled")]
    Cancelled,

    #[error("Not implemented: {0}")]
    NotImplemented(String),

    #[error("Internal server error: {0}")]
    Internal(#[from] anyhow::Error),
}

impl From<LlmError> for AppError {
    fn from(err: LlmError) -> Self {
        match err {
            LlmError::Api { status, message } => AppError::Upstream {
                status,
                message: message.unwrap_or_else(|| PROVIDER_ERROR_MESSAGE.to_string()),
            },
            other => AppError::Transport(other.to_string()),
        }
    }
}

impl From<JsonRejection> for AppError {
    fn from(rejection: JsonRejection) -> Self {
        tracing::debug!("Rejected request body: {}", rejection.body_text());
        let message = match rejection {
            JsonRejection::JsonSyntaxError(_) => INVALID_JSON_MESSAGE,
            JsonRejection::JsonDataError(_) => INVALID_BODY_MESSAGE,
            JsonRejection::MissingJsonContentType(_) => JSON_CONTENT_TYPE_MESSAGE,
            _ => UNREADABLE_BODY_MESSAGE,
        };
        AppError::Validation(message.to_string())
    }
}

impl From<ComposerError> for AppError {
    fn from(err: ComposerError) -> Self {
        AppError::Validation(err.to_string())
    }
}

impl From<ConversationError> for AppError {
    fn from(err: ConversationError) -> Self {
        AppError::Validation(err.to_string())
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, message) = match &self {
            AppError::MethodNotAllowed => {
                return (StatusCode::METHOD_NOT_ALLOWED, METHOD_NOT_ALLOWED_MESSAGE).into_response();
            }
            AppError::Validation(msg) => (StatusCode::BAD_REQUEST, msg.clone()),
            AppError::Upstream { status, message } => {
                tracing::warn!("Upstream error {status}: {message}");
                (
                    StatusCode::from_u16(*status).unwrap_or(StatusCode::BAD_GATEWAY),
                    message.clone(),
                )
            }
            AppError::Transport(msg) => {
                tracing::error!("Transport error: {msg}");
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    CONNECTION_FAILURE_MESSAGE.to_string(),
                )
            }
            AppError::Cancelled => (
                StatusCode::SERVICE_UNAVAILABLE,
                CANCELLED_MESSAGE.to_string(),
            ),
            AppError::NotImplemented(msg) => (StatusCode::NOT_IMPLEMENTED, msg.clone()),
            AppError::Internal(e) => {
                tracing::error!("Internal error: {e:?}");
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    INTERNAL_ERROR_MESSAGE.to_string(),
                )
            }
        };

        (status, Json(json!({ "error": message }))).into_response()
    }
}
