//! Public API types

use axum::Json;
use axum::response::{IntoResponse, Response};
use http::StatusCode;
use serde_json::json;

use crate::chat::ChatError;

// Errors

pub struct ApiError(ChatError);

/// Convert `ChatError` into an Axum compatible response. Every failure
/// class gets a distinct status so the UI can tell a rejected input
/// from a remote failure from a stuck run.
impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        // Always log the error
        tracing::error!("{}", self.0);

        let status = match &self.0 {
            ChatError::EmptyMessage => StatusCode::BAD_REQUEST,
            ChatError::Timeout { .. } => StatusCode::GATEWAY_TIMEOUT,
            ChatError::Provisioning(_)
            | ChatError::Communication(_)
            | ChatError::RunFailed { .. }
            | ChatError::MalformedResponse => StatusCode::BAD_GATEWAY,
        };

        (status, Json(json!({ "error": self.0.to_string() }))).into_response()
    }
}

/// Enables using `?` on functions that return `Result<_, ChatError>`
/// inside handlers
impl From<ChatError> for ApiError {
    fn from(err: ChatError) -> Self {
        Self(err)
    }
}

// Re-export public types from each route

pub mod chat {
    pub use crate::api::routes::chat::public::*;
}
