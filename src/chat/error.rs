use thiserror::Error;

use crate::assistant::RunStatus;

/// Failures a conversational turn can surface. All of these are caught
/// at the presentation boundary and rendered as user-visible messages;
/// none should take the process down.
#[derive(Error, Debug)]
pub enum ChatError {
    /// Creating the conversation thread failed. Nothing about the
    /// session is usable until provisioning succeeds.
    #[error("failed to provision a conversation thread: {0}")]
    Provisioning(#[source] reqwest::Error),

    /// Transport failure while submitting a message or polling a run.
    /// Not retried here; the user's message stays in the transcript so
    /// they can resubmit.
    #[error("error communicating with the assistant service: {0}")]
    Communication(#[source] reqwest::Error),

    /// The service reported a terminal failure for the run
    #[error("run ended with terminal status {status}")]
    RunFailed { status: RunStatus },

    /// A run completed but produced no extractable text
    #[error("run completed but returned no assistant text")]
    MalformedResponse,

    /// The run stayed non-terminal past the configured deadline
    #[error("run did not reach a terminal state within {waited_secs}s")]
    Timeout { waited_secs: u64 },

    #[error("message content must not be empty")]
    EmptyMessage,
}
