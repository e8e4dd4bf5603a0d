//! Axum route handlers for the composer API.

use std::collections::BTreeMap;

use axum::{extract::State, Json};
use serde::{Deserialize, Serialize};
use tracing::info;

use crate::composer::catalog::{Catalog, Category};
use crate::composer::session::{reduce, Action, ComposerError, ComposerState};
use crate::composer::tone::Tone;
use crate::errors::AppError;
use crate::extract::AppJson;
use crate::export::ExportFormat;
use crate::relay::generate;
use crate::state::AppState;

// ────────────────────────────────────────────────────────────────────────────
// Request / Response types
// ────────────────────────────────────────────────────────────────────────────

/// A form submission: the selection plus the values typed into it.
#[derive(Debug, Clone, Deserialize)]
pub struct LetterRequest {
    pub category: String,
    /// Defaults to the category's first subtype.
    pub subtype: Option<String>,
    pub tone: Option<Tone>,
    #[serde(default)]
    pub fields: BTreeMap<String, String>,
}

#[derive(Debug, Serialize)]
pub struct CatalogResponse {
    pub categories: Vec<Category>,
    pub tones: Vec<Tone>,
}

#[derive(Debug, Serialize)]
pub struct ComposeResponse {
    pub category: String,
    pub subtype: String,
    pub tone: Tone,
    pub prompt: String,
    pub filename: String,
}

#[derive(Debug, Serialize)]
pub struct LetterResponse {
    pub reply: String,
    pub prompt: String,
    pub filename: String,
}

// ────────────────────────────────────────────────────────────────────────────
// Handlers
// ────────────────────────────────────────────────────────────────────────────

/// GET /api/catalog
pub async fn handle_get_catalog(State(state): State<AppState>) -> Json<CatalogResponse> {
    Json(CatalogResponse {
        categories: state.catalog.categories.clone(),
        tones: Tone::all().to_vec(),
    })
}

/// POST /api/compose
///
/// Returns the prompt a generation would send, without contacting the provider.
pub async fn handle_compose(
    State(state): State<AppState>,
    AppJson(request): AppJson<LetterRequest>,
) -> Result<Json<ComposeResponse>, AppError> {
    let composer = composer_from_request(&state.catalog, request)?;
    let prompt = composer.prompt(&state.catalog)?;

    Ok(Json(ComposeResponse {
        filename: composer.export_filename(ExportFormat::Text),
        category: composer.category,
        subtype: composer.subtype,
        tone: composer.tone,
        prompt,
    }))
}

/// POST /api/letters
///
/// Form mode: compose the prompt, relay it as a single user message, return the reply.
pub async fn handle_generate_from_form(
    State(state): State<AppState>,
    AppJson(request): AppJson<LetterRequest>,
) -> Result<Json<LetterResponse>, AppError> {
    let composer = composer_from_request(&state.catalog, request)?;
    let prompt = composer.prompt(&state.catalog)?;
    let conversation = composer.conversation(&state.catalog)?;
    info!(
        "Generating {} / {} ({} tone)",
        composer.category, composer.subtype, composer.tone
    );

    // Same lifecycle an interactive session follows; the reply is read back from `output`.
    let composer = reduce(&state.catalog, &composer, Action::GenerationStarted)?;
    let reply = generate(&state, &conversation).await?;
    let composer = reduce(
        &state.catalog,
        &composer,
        Action::GenerationSettled(Ok(reply)),
    )?;

    Ok(Json(LetterResponse {
        filename: composer.export_filename(ExportFormat::Text),
        reply: composer.output,
        prompt,
    }))
}

/// Replays a form submission through the reducer so every name is checked against the catalog.
fn composer_from_request(
    catalog: &Catalog,
    request: LetterRequest,
) -> Result<ComposerState, ComposerError> {
    let mut actions = vec![Action::SelectCategory(request.category)];
    if let Some(subtype) = request.subtype {
        actions.push(Action::SelectSubtype(subtype));
    }
    actions.extend(
        request
            .fields
            .into_iter()
            .map(|(name, value)| Action::SetField { name, value }),
    );
    if let Some(tone) = request.tone {
        actions.push(Action::SetTone(tone));
    }

    actions
        .into_iter()
        .try_fold(ComposerState::initial(catalog), |state, action| {
            reduce(catalog, &state, action)
        })
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::{http::StatusCode, response::IntoResponse};
    use serde_json::json;

    use crate::llm_client::LlmError;
    use crate::models::message::Role;
    use crate::relay::FALLBACK_REPLY;
    use crate::test_support::{test_state, StubProvider};

    fn admission_request() -> LetterRequest {
        serde_json::from_value(json!({
            "category": "Education",
            "subtype": "Admission Letter",
            "tone": "Formal",
            "fields": {"Student Name": "Asha", "Institution Name": "Delta U"}
        }))
        .unwrap()
    }

    #[tokio::test]
    async fn test_catalog_lists_categories_and_tones() {
        let state = test_state(StubProvider::replying("unused"));
        let Json(response) = handle_get_catalog(State(state)).await;
        assert_eq!(response.categories.len(), 5);
        assert_eq!(response.tones.len(), 5);
    }

    #[tokio::test]
    async fn test_compose_builds_prompt_without_provider_call() {
        let stub = StubProvider::replying("unused");
        let Json(response) = handle_compose(State(test_state(stub.clone())), AppJson(admission_request()))
            .await
            .unwrap();

        assert!(response.prompt.contains("Formal"));
        assert!(response.prompt.contains("Admission Letter"));
        assert!(response.prompt.contains("Education"));
        assert!(response.prompt.contains("Student Name: Asha"));
        assert!(response.prompt.contains("Institution Name: Delta U"));
        assert_eq!(response.filename, "Admission_Letter_letter.txt");
        assert_eq!(stub.calls(), 0);
    }

    #[tokio::test]
    async fn test_compose_defaults_to_first_subtype_and_formal() {
        let request: LetterRequest =
            serde_json::from_value(json!({"category": "Banking"})).unwrap();
        let state = test_state(StubProvider::replying("unused"));
        let Json(response) = handle_compose(State(state), AppJson(request)).await.unwrap();

        assert_eq!(response.subtype, "Loan Application");
        assert_eq!(response.tone, Tone::Formal);
    }

    #[tokio::test]
    async fn test_compose_rejects_field_from_other_category() {
        let request: LetterRequest = serde_json::from_value(json!({
            "category": "Banking",
            "fields": {"Student Name": "Asha"}
        }))
        .unwrap();
        let state = test_state(StubProvider::replying("unused"));
        let err = handle_compose(State(state), AppJson(request))
            .await
            .unwrap_err();
        assert_eq!(err.into_response().status(), StatusCode::BAD_REQUEST);
    }

    #[tokio::test]
    async fn test_compose_rejects_unknown_category() {
        let request: LetterRequest =
            serde_json::from_value(json!({"category": "Medical"})).unwrap();
        let state = test_state(StubProvider::replying("unused"));
        let err = handle_compose(State(state), AppJson(request))
            .await
            .unwrap_err();
        assert!(matches!(err, AppError::Validation(ref m) if m.contains("Medical")));
    }

    #[tokio::test]
    async fn test_form_generation_relays_single_user_message() {
        let stub = StubProvider::replying("Dear Admissions Office");
        let Json(response) =
            handle_generate_from_form(State(test_state(stub.clone())), AppJson(admission_request()))
                .await
                .unwrap();

        assert_eq!(response.reply, "Dear Admissions Office");
        let sent = stub.last_messages().unwrap();
        assert_eq!(sent.len(), 1);
        assert_eq!(sent[0].role, Role::User);
        assert_eq!(sent[0].content, response.prompt);
    }

    #[tokio::test]
    async fn test_form_generation_uses_fallback_for_empty_reply() {
        let Json(response) = handle_generate_from_form(
            State(test_state(StubProvider::empty())),
            AppJson(admission_request()),
        )
        .await
        .unwrap();
        assert_eq!(response.reply, FALLBACK_REPLY);
    }

    #[tokio::test]
    async fn test_form_generation_propagates_upstream_error() {
        let stub = StubProvider::failing(|| LlmError::Api {
            status: 429,
            message: Some("Rate limit reached".to_string()),
        });
        let err = handle_generate_from_form(State(test_state(stub)), AppJson(admission_request()))
            .await
            .unwrap_err();
        assert_eq!(
            err.into_response().status(),
            StatusCode::TOO_MANY_REQUESTS
        );
    }
}
