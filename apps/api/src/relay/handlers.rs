//! Axum route handlers for the relay endpoint.

use axum::{extract::State, Json};
use serde::{Deserialize, Serialize};

use crate::composer::conversation::Conversation;
use crate::errors::AppError;
use crate::extract::AppJson;
use crate::models::message::Message;
use crate::relay::generate;
use crate::state::AppState;

#[derive(Debug, Deserialize)]
pub struct GenerateLetterRequest {
    pub messages: Vec<Message>,
}

#[derive(Debug, Serialize)]
pub struct GenerateLetterResponse {
    pub reply: String,
}

/// POST /generate-letter
///
/// Forwards the messages unchanged and returns `{"reply": ...}`.
pub async fn handle_generate_letter(
    State(state): State<AppState>,
    AppJson(request): AppJson<GenerateLetterRequest>,
) -> Result<Json<GenerateLetterResponse>, AppError> {
    let conversation = Conversation::try_from(request.messages)?;
    let reply = generate(&state, &conversation).await?;
    Ok(Json(GenerateLetterResponse { reply }))
}

/// Any non-POST method on a generation endpoint.
pub async fn handle_method_not_allowed() -> AppError {
    AppError::MethodNotAllowed
}
