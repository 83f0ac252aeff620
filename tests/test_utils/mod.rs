//! Test utilities for integration tests
use std::sync::Arc;
use std::time::Duration;

use axum::{Router, body::Body};

use confab::api::AppState;
use confab::api::app;
use confab::core::AppConfig;

/// Creates a test application router pointed at a mock assistant
/// service. Poll settings are tightened so tests that exercise the
/// waiting path finish quickly.
pub fn test_app(api_hostname: &str) -> Router {
    let app_config = AppConfig {
        api_hostname: api_hostname.to_string(),
        api_key: String::from("test-api-key"),
        assistant_id: String::from("asst_test"),
        instructions: String::from("You are a helpful assistant."),
        poll_interval: Duration::from_millis(10),
        poll_timeout: Duration::from_millis(250),
    };
    let app_state = AppState::new(app_config);
    app(Arc::new(app_state))
}

pub async fn body_to_string(body: Body) -> String {
    let bytes = axum::body::to_bytes(body, usize::MAX)
        .await
        .expect("Failed to read response body");
    String::from_utf8(bytes.to_vec()).expect("Response body was not utf-8")
}
