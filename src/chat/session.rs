//! Per-conversation state: the remote thread identifier and the local
//! transcript.

use serde::Serialize;

use super::error::ChatError;
use crate::assistant::{AssistantClient, Role};

/// One entry in the conversation history
#[derive(Clone, Debug, Serialize, PartialEq)]
pub struct Turn {
    pub role: Role,
    pub content: String,
    /// The run that produced an assistant turn; absent on user turns
    #[serde(skip_serializing_if = "Option::is_none")]
    pub run_id: Option<String>,
}

impl Turn {
    pub fn user(content: &str) -> Self {
        Turn {
            role: Role::User,
            content: content.to_string(),
            run_id: None,
        }
    }

    pub fn assistant(content: &str, run_id: &str) -> Self {
        Turn {
            role: Role::Assistant,
            content: content.to_string(),
            run_id: Some(run_id.to_string()),
        }
    }
}

/// Ordered, append-only conversation history. Insertion order is
/// chronological order; entries are never reordered or mutated.
#[derive(Clone, Debug, Default, Serialize)]
pub struct Transcript(Vec<Turn>);

impl Transcript {
    pub fn append(&mut self, turn: Turn) {
        self.0.push(turn);
    }

    pub fn all(&self) -> &[Turn] {
        &self.0
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

/// State for a single conversation. Constructed once when the
/// conversation starts and carried through every turn; the thread id is
/// write-once.
#[derive(Debug, Default)]
pub struct SessionContext {
    thread_id: Option<String>,
    pub transcript: Transcript,
}

impl SessionContext {
    pub fn new() -> Self {
        Self::default()
    }

    /// Lazily provision the remote thread for this session. The first
    /// call makes one create request; every later call returns the
    /// cached identifier without touching the network.
    pub async fn get_or_create_thread(
        &mut self,
        client: &AssistantClient,
    ) -> Result<String, ChatError> {
        if let Some(id) = &self.thread_id {
            return Ok(id.clone());
        }
        let thread = client
            .create_thread()
            .await
            .map_err(ChatError::Provisioning)?;
        tracing::info!("Created thread {}", thread.id);
        self.thread_id = Some(thread.id.clone());
        Ok(thread.id)
    }

    pub fn thread_id(&self) -> Option<&str> {
        self.thread_id.as_deref()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_transcript_preserves_insertion_order() {
        let mut transcript = Transcript::default();
        transcript.append(Turn::user("What is mining?"));
        transcript.append(Turn::assistant("Mining is the process...", "run_1"));

        let all = transcript.all();
        assert_eq!(all.len(), 2);
        assert_eq!(all[0], Turn::user("What is mining?"));
        assert_eq!(
            all[1],
            Turn::assistant("Mining is the process...", "run_1")
        );

        // Reading is side-effect free
        assert_eq!(transcript.all().len(), 2);
    }

    #[test]
    fn test_turn_serialization() {
        let turn = Turn::user("Hello");
        assert_eq!(
            serde_json::to_string(&turn).unwrap(),
            r#"{"role":"user","content":"Hello"}"#
        );

        let turn = Turn::assistant("Hi!", "run_1");
        assert_eq!(
            serde_json::to_string(&turn).unwrap(),
            r#"{"role":"assistant","content":"Hi!","run_id":"run_1"}"#
        );
    }

    #[tokio::test]
    async fn test_get_or_create_thread_is_idempotent() {
        let mut server = mockito::Server::new_async().await;

        // Exactly one remote create call no matter how many times the
        // session is asked for its thread
        let mock = server
            .mock("POST", "/v1/threads")
            .with_status(200)
            .with_header("content-type", "application/json")
            .with_body(r#"{"id": "thread_1"}"#)
            .expect(1)
            .create();

        let client = AssistantClient::new(server.url().as_str(), "test-key");
        let mut session = SessionContext::new();
        assert!(session.thread_id().is_none());

        let first = session.get_or_create_thread(&client).await.unwrap();
        let second = session.get_or_create_thread(&client).await.unwrap();

        mock.assert();
        assert_eq!(first, "thread_1");
        assert_eq!(second, "thread_1");
        assert_eq!(session.thread_id(), Some("thread_1"));
    }

    #[tokio::test]
    async fn test_provisioning_failure() {
        let mut server = mockito::Server::new_async().await;

        let mock = server
            .mock("POST", "/v1/threads")
            .with_status(503)
            .with_body("unavailable")
            .create();

        let client = AssistantClient::new(server.url().as_str(), "test-key");
        let mut session = SessionContext::new();
        let result = session.get_or_create_thread(&client).await;

        mock.assert();
        assert!(matches!(result, Err(ChatError::Provisioning(_))));
        // A failed create leaves the session unprovisioned so the next
        // attempt retries
        assert!(session.thread_id().is_none());
    }
}
