//! Client for the hosted assistant service.
//!
//! The service models a conversation as a persistent *thread* that
//! accumulates messages. Each request for a response is a *run*: an
//! asynchronous invocation of a pre-provisioned assistant against the
//! current thread state, polled until it reaches a terminal status.

use std::fmt;
use std::time::Duration;

use serde::{Deserialize, Serialize};
use serde_json::json;

const REQUEST_TIMEOUT: Duration = Duration::from_secs(30);

// The threads/runs surface is only served under the beta header
const BETA_HEADER: (&str, &str) = ("OpenAI-Beta", "assistants=v2");

#[derive(Clone, Copy, Serialize, Deserialize, Debug, PartialEq, Eq)]
pub enum Role {
    #[serde(rename = "assistant")]
    Assistant,
    #[serde(rename = "user")]
    User,
}

/// Run status as reported by the service. The driver only cares about
/// three classes: terminal-success, terminal-failure, and everything
/// else (non-terminal, poll again). Vocabulary the client doesn't know
/// lands in `Unknown` and is treated as non-terminal rather than
/// failing deserialization.
#[derive(Clone, Copy, Serialize, Deserialize, Debug, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum RunStatus {
    Queued,
    InProgress,
    RequiresAction,
    Cancelling,
    Completed,
    Failed,
    Cancelled,
    Expired,
    #[serde(other)]
    Unknown,
}

impl RunStatus {
    /// The run finished and produced its messages.
    pub fn is_terminal_success(self) -> bool {
        matches!(self, RunStatus::Completed)
    }

    /// The run will never produce messages.
    pub fn is_terminal_failure(self) -> bool {
        matches!(
            self,
            RunStatus::Failed | RunStatus::Cancelled | RunStatus::Expired
        )
    }

    pub fn is_terminal(self) -> bool {
        self.is_terminal_success() || self.is_terminal_failure()
    }
}

impl fmt::Display for RunStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            RunStatus::Queued => "queued",
            RunStatus::InProgress => "in_progress",
            RunStatus::RequiresAction => "requires_action",
            RunStatus::Cancelling => "cancelling",
            RunStatus::Completed => "completed",
            RunStatus::Failed => "failed",
            RunStatus::Cancelled => "cancelled",
            RunStatus::Expired => "expired",
            RunStatus::Unknown => "unknown",
        };
        f.write_str(s)
    }
}

#[derive(Deserialize, Debug)]
pub struct Thread {
    pub id: String,
}

#[derive(Deserialize, Debug)]
pub struct TextValue {
    pub value: String,
}

/// One content block of a thread message. Only `text` blocks carry a
/// payload this client extracts; other block types (image files etc.)
/// are skipped by the caller.
#[derive(Deserialize, Debug)]
pub struct ContentBlock {
    pub r#type: String,
    pub text: Option<TextValue>,
}

#[derive(Deserialize, Debug)]
pub struct ThreadMessage {
    pub id: String,
    pub role: Role,
    /// Set only on messages produced by a run
    pub run_id: Option<String>,
    #[serde(default)]
    pub content: Vec<ContentBlock>,
}

#[derive(Deserialize, Debug)]
pub struct Run {
    pub id: String,
    pub status: RunStatus,
    pub created_at: i64,
    pub completed_at: Option<i64>,
}

/// Diagnostic record of one step the assistant took during a run
#[derive(Deserialize, Debug)]
pub struct RunStep {
    pub id: String,
    pub r#type: String,
    pub status: RunStatus,
}

#[derive(Deserialize, Debug)]
pub struct ListResponse<T> {
    pub data: Vec<T>,
}

/// HTTP client for the thread/message/run endpoints. Holds the
/// hostname and credential so callers never thread them through
/// individual calls.
#[derive(Clone, Debug)]
pub struct AssistantClient {
    http: reqwest::Client,
    api_hostname: String,
    api_key: String,
}

impl AssistantClient {
    pub fn new(api_hostname: &str, api_key: &str) -> Self {
        Self {
            http: reqwest::Client::new(),
            api_hostname: api_hostname.trim_end_matches("/").to_string(),
            api_key: api_key.to_string(),
        }
    }

    fn post(&self, path: &str) -> reqwest::RequestBuilder {
        self.http
            .post(format!("{}/v1/{}", self.api_hostname, path))
            .bearer_auth(&self.api_key)
            .header(BETA_HEADER.0, BETA_HEADER.1)
            .timeout(REQUEST_TIMEOUT)
    }

    fn get(&self, path: &str) -> reqwest::RequestBuilder {
        self.http
            .get(format!("{}/v1/{}", self.api_hostname, path))
            .bearer_auth(&self.api_key)
            .header(BETA_HEADER.0, BETA_HEADER.1)
            .timeout(REQUEST_TIMEOUT)
    }

    /// Create a new conversation thread
    pub async fn create_thread(&self) -> Result<Thread, reqwest::Error> {
        self.post("threads")
            .json(&json!({}))
            .send()
            .await?
            .error_for_status()?
            .json()
            .await
    }

    /// Append a message to a thread
    pub async fn create_message(
        &self,
        thread_id: &str,
        role: Role,
        content: &str,
    ) -> Result<ThreadMessage, reqwest::Error> {
        self.post(&format!("threads/{}/messages", thread_id))
            .json(&json!({ "role": role, "content": content }))
            .send()
            .await?
            .error_for_status()?
            .json()
            .await
    }

    /// Request a generation run against the current thread state
    pub async fn create_run(
        &self,
        thread_id: &str,
        assistant_id: &str,
        instructions: &str,
    ) -> Result<Run, reqwest::Error> {
        self.post(&format!("threads/{}/runs", thread_id))
            .json(&json!({
                "assistant_id": assistant_id,
                "instructions": instructions,
            }))
            .send()
            .await?
            .error_for_status()?
            .json()
            .await
    }

    /// Fetch the current status of a run
    pub async fn get_run(&self, thread_id: &str, run_id: &str) -> Result<Run, reqwest::Error> {
        self.get(&format!("threads/{}/runs/{}", thread_id, run_id))
            .send()
            .await?
            .error_for_status()?
            .json()
            .await
    }

    /// List all messages on a thread, in the order the service returns
    /// them
    pub async fn list_messages(
        &self,
        thread_id: &str,
    ) -> Result<ListResponse<ThreadMessage>, reqwest::Error> {
        self.get(&format!("threads/{}/messages", thread_id))
            .send()
            .await?
            .error_for_status()?
            .json()
            .await
    }

    /// List the steps a run took. Observability only, not required for
    /// correctness.
    pub async fn list_run_steps(
        &self,
        thread_id: &str,
        run_id: &str,
    ) -> Result<ListResponse<RunStep>, reqwest::Error> {
        self.get(&format!("threads/{}/runs/{}/steps", thread_id, run_id))
            .send()
            .await?
            .error_for_status()?
            .json()
            .await
    }
}
