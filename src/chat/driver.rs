//! Executes one conversational turn end to end: submit the user's
//! message, launch a generation run, wait for it to resolve, and
//! extract the assistant's response.

use std::time::Instant;

use tokio::time::sleep;

use super::error::ChatError;
use super::session::{SessionContext, Turn};
use crate::assistant::{AssistantClient, Role, Run};
use crate::core::AppConfig;

/// Runs the next turn in the conversation and returns the assistant's
/// text. The session's transcript gains the user turn immediately and
/// the assistant turn only once its run completes, so a failed run
/// never loses what the user typed.
///
/// Only one turn may be in flight per session; callers serialize
/// submissions by holding `&mut SessionContext` for the duration.
pub async fn submit_turn(
    client: &AssistantClient,
    session: &mut SessionContext,
    config: &AppConfig,
    user_text: &str,
) -> Result<String, ChatError> {
    if user_text.trim().is_empty() {
        return Err(ChatError::EmptyMessage);
    }

    let thread_id = session.get_or_create_thread(client).await?;

    // Recorded before any fallible remote call so the message survives
    // an aborted turn
    session.transcript.append(Turn::user(user_text));

    client
        .create_message(&thread_id, Role::User, user_text)
        .await
        .map_err(ChatError::Communication)?;

    let run = client
        .create_run(&thread_id, &config.assistant_id, &config.instructions)
        .await
        .map_err(ChatError::Communication)?;
    tracing::debug!("Started run {} on thread {}", run.id, thread_id);

    let run = wait_for_run(client, &thread_id, run, config).await?;

    if let Some(completed_at) = run.completed_at {
        tracing::info!("Run {} completed in {}s", run.id, completed_at - run.created_at);
    }

    let text = assistant_text_for_run(client, &thread_id, &run.id).await?;

    log_run_steps(client, &thread_id, &run.id).await;

    session.transcript.append(Turn::assistant(&text, &run.id));

    Ok(text)
}

/// Polls the run at the configured interval until it reaches a
/// terminal status. Statuses the client doesn't recognize count as
/// non-terminal and poll again; the deadline bounds the total wait so
/// a stuck run can't hang the caller.
async fn wait_for_run(
    client: &AssistantClient,
    thread_id: &str,
    mut run: Run,
    config: &AppConfig,
) -> Result<Run, ChatError> {
    let started = Instant::now();

    loop {
        if run.status.is_terminal_success() {
            return Ok(run);
        }
        if run.status.is_terminal_failure() {
            return Err(ChatError::RunFailed { status: run.status });
        }
        if started.elapsed() >= config.poll_timeout {
            return Err(ChatError::Timeout {
                waited_secs: started.elapsed().as_secs(),
            });
        }

        tracing::debug!("Run {} is {}, waiting for completion...", run.id, run.status);
        sleep(config.poll_interval).await;

        run = client
            .get_run(thread_id, &run.id)
            .await
            .map_err(ChatError::Communication)?;
    }
}

/// Collects the text produced by a run: assistant messages carrying
/// this run's id, their text segments joined with newlines in the
/// order the service returned them.
async fn assistant_text_for_run(
    client: &AssistantClient,
    thread_id: &str,
    run_id: &str,
) -> Result<String, ChatError> {
    let messages = client
        .list_messages(thread_id)
        .await
        .map_err(ChatError::Communication)?;

    let segments: Vec<&str> = messages
        .data
        .iter()
        .filter(|m| m.role == Role::Assistant && m.run_id.as_deref() == Some(run_id))
        .flat_map(|m| m.content.iter())
        .filter(|block| block.r#type == "text")
        .filter_map(|block| block.text.as_ref().map(|t| t.value.as_str()))
        .collect();

    if segments.is_empty() {
        return Err(ChatError::MalformedResponse);
    }

    Ok(segments.join("\n"))
}

/// Run steps are diagnostic only; failing to fetch them never fails
/// the turn.
async fn log_run_steps(client: &AssistantClient, thread_id: &str, run_id: &str) {
    match client.list_run_steps(thread_id, run_id).await {
        Ok(steps) => {
            for step in &steps.data {
                tracing::debug!("Run step {} ({}): {}", step.id, step.r#type, step.status);
            }
        }
        Err(e) => tracing::debug!("Could not fetch steps for run {}: {}", run_id, e),
    }
}
