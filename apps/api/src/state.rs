use std::sync::Arc;

use tokio_util::sync::CancellationToken;

use crate::composer::catalog::Catalog;
use crate::llm_client::CompletionProvider;

/// Shared application state injected into all route handlers via Axum extractors.
#[derive(Clone)]
pub struct AppState {
    /// Completion provider. `LlmClient` in production, a stub in tests.
    pub llm: Arc<dyn CompletionProvider>,
    /// Read-only letter catalog, loaded once at startup.
    pub catalog: Arc<Catalog>,
    /// Fired on shutdown; every generation runs under a child of this token.
    pub shutdown: CancellationToken,
}
