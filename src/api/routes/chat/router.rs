//! Router for the chat API

use std::sync::Arc;

use axum::{
    Router,
    extract::State,
    routing::{get, post},
};

use super::public;
use crate::api::state::AppState;
use crate::chat::submit_turn;

type SharedState = Arc<AppState>;

/// Submit the next message in the conversation. Blocks until the run
/// reaches a terminal state; the session lock is held for the whole
/// turn so concurrent submissions queue instead of racing.
async fn chat_handler(
    State(state): State<SharedState>,
    axum::Json(payload): axum::Json<public::ChatRequest>,
) -> Result<axum::Json<public::ChatResponse>, crate::api::public::ApiError> {
    let mut session = state.session.lock().await;
    let reply = submit_turn(&state.client, &mut session, &state.config, &payload.message).await?;

    Ok(axum::Json(public::ChatResponse::new(&reply)))
}

/// Full conversation history in submission order
async fn transcript(
    State(state): State<SharedState>,
) -> axum::Json<public::TranscriptResponse> {
    let session = state.session.lock().await;

    axum::Json(public::TranscriptResponse {
        transcript: session.transcript.all().to_vec(),
    })
}

/// The remote thread backing this session, if provisioned yet
async fn session(State(state): State<SharedState>) -> axum::Json<public::SessionResponse> {
    let session = state.session.lock().await;

    axum::Json(public::SessionResponse {
        thread_id: session.thread_id().map(str::to_string),
    })
}

/// Create the chat router
pub fn router() -> Router<SharedState> {
    Router::new()
        .route("/", post(chat_handler))
        .route("/transcript", get(transcript))
        .route("/session", get(session))
}
