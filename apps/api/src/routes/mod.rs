pub mod health;

use axum::{
    routing::{get, post, MethodRouter},
    Router,
};

use crate::composer::handlers as composer;
use crate::export::handlers::handle_export;
use crate::relay::handlers::{handle_generate_letter, handle_method_not_allowed};
use crate::state::AppState;

/// POST-only route; every other method gets the plain-text 405.
fn post_only<H, T>(handler: H) -> MethodRouter<AppState>
where
    H: axum::handler::Handler<T, AppState>,
    T: 'static,
{
    post(handler).fallback(handle_method_not_allowed)
}

pub fn build_router(state: AppState) -> Router {
    Router::new()
        .route("/health", get(health::health_handler))
        // Relay; the browser front-end calls the `/api` path
        .route("/generate-letter", post_only(handle_generate_letter))
        .route("/api/generate-letter", post_only(handle_generate_letter))
        // Composer
        .route("/api/catalog", get(composer::handle_get_catalog))
        .route("/api/compose", post_only(composer::handle_compose))
        .route("/api/letters", post_only(composer::handle_generate_from_form))
        // Export
        .route("/api/export", post_only(handle_export))
        .with_state(state)
}
