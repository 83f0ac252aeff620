//! Public types for the chat API
use serde::{Deserialize, Serialize};

use crate::chat::Turn;

#[derive(Deserialize)]
pub struct ChatRequest {
    pub message: String,
}

#[derive(Serialize)]
pub struct ChatResponse {
    message: String,
}

impl ChatResponse {
    pub fn new(message: &str) -> Self {
        Self {
            message: message.into(),
        }
    }
}

#[derive(Serialize)]
pub struct TranscriptResponse {
    pub transcript: Vec<Turn>,
}

#[derive(Serialize)]
pub struct SessionResponse {
    pub thread_id: Option<String>,
}
