//! Completion Relay: forwards a conversation to the completion provider and
//! normalizes whatever comes back.
//!
//! Stateless: each invocation builds one outbound request, awaits it, maps the result.

pub mod handlers;

use tracing::{info, warn};
use uuid::Uuid;

use crate::composer::conversation::Conversation;
use crate::composer::task::{GenerationTask, TaskError};
use crate::errors::AppError;
use crate::state::AppState;

/// Reply returned when the provider answers without any content.
pub const FALLBACK_REPLY: &str = "No response received.";

/// Sends `conversation` upstream and returns the reply text.
///
/// Missing content is replaced by `FALLBACK_REPLY`; every other failure becomes an `AppError`.
pub async fn generate(state: &AppState, conversation: &Conversation) -> Result<String, AppError> {
    let messages = conversation.for_generation()?;
    let generation_id = Uuid::new_v4();
    info!(
        "Generation {generation_id}: relaying {} message(s)",
        conversation.len()
    );

    let task = GenerationTask::with_token(state.shutdown.child_token());
    let result = task
        .run(async {
            let content = state.llm.complete(messages).await?;
            Ok::<_, crate::llm_client::LlmError>(content.unwrap_or_else(|| {
                warn!("Generation {generation_id}: provider returned no content");
                FALLBACK_REPLY.to_string()
            }))
        })
        .await;

    match result {
        Ok(reply) => {
            info!("Generation {generation_id}: settled ({} chars)", reply.len());
            Ok(reply)
        }
        Err(TaskError::Failed(e)) => Err(e.into()),
        Err(TaskError::Cancelled) => Err(AppError::Cancelled),
        // Each call owns a fresh task, so this only fires if `run` is re-entered.
        Err(TaskError::AlreadyInFlight) => Err(AppError::Internal(anyhow::anyhow!(
            "generation {generation_id} started twice"
        ))),
    }
}
