//! Request extractors whose rejections render through `AppError`.

use axum::extract::FromRequest;

use crate::errors::AppError;

/// JSON request body. Malformed or mistyped bodies are answered with a fixed
/// `{"error": ...}` message instead of axum's plain-text rejection.
#[derive(Debug, FromRequest)]
#[from_request(via(axum::Json), rejection(AppError))]
pub struct AppJson<T>(pub T);
