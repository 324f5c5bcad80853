//! Command executor: issues one command to the execution service and
//! normalizes whatever comes back.
//!
//! Each dispatch runs on its own worker thread and reports through an mpsc
//! channel drained by the event loop, so the UI never blocks on the
//! network. The executor is stateless per call — exclusivity (one in-flight
//! command per process) is enforced by the orchestrator's busy flag, and a
//! failed or cancelled command is reported exactly once, never retried.

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::mpsc::Sender;
use std::sync::Arc;
use std::thread;
use std::time::Duration;

use anyhow::{Context, Result};
use reqwest::blocking::Client;
use serde::{Deserialize, Serialize};

use crate::session::SessionId;

/// Request body sent to the execution service.
#[derive(Debug, Serialize)]
struct ExecRequest<'a> {
    command: &'a str,
}

/// Response body from the execution service.
#[derive(Debug, Deserialize)]
struct ExecResponse {
    #[serde(default)]
    stdout: String,
    #[serde(default)]
    stderr: String,
    #[serde(default)]
    error: Option<String>,
    /// Reported by the service but not shown in the scrollback.
    #[serde(default, rename = "exitCode")]
    #[allow(dead_code)]
    exit_code: Option<i32>,
}

/// Cancellation token for the single in-flight command.
///
/// Cancellation is cooperative and best-effort: flipping the token makes
/// this process stop waiting for the result, it does not guarantee the
/// remote side stops working.
#[derive(Debug, Clone, Default)]
pub struct CancelToken(Arc<AtomicBool>);

impl CancelToken {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn cancel(&self) {
        self.0.store(true, Ordering::SeqCst);
    }

    pub fn is_cancelled(&self) -> bool {
        self.0.load(Ordering::SeqCst)
    }
}

/// Normalized outcome of one command execution.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ExecOutcome {
    /// The service ran the command; either stream may be empty.
    Completed { stdout: String, stderr: String },
    /// The service ran the command and reported a failure of its own.
    ServiceError(String),
    /// The caller cancelled before the result was consumed.
    Cancelled,
    /// Transport failure, non-2xx status, or malformed response.
    Failed(String),
}

/// Reply for exactly one dispatch, tagged with the issuing session and the
/// generation captured at submission time so stale replies can be
/// discarded.
#[derive(Debug)]
pub struct ExecReply {
    pub session_id: SessionId,
    pub generation: u64,
    pub outcome: ExecOutcome,
}

/// HTTP client for the execution service.
pub struct CommandExecutor {
    client: Client,
    base_url: String,
    reply_tx: Sender<ExecReply>,
}

impl CommandExecutor {
    pub fn new(base_url: &str, timeout: Duration, reply_tx: Sender<ExecReply>) -> Result<Self> {
        let client = Client::builder()
            .timeout(timeout)
            .build()
            .context("Failed to create HTTP client")?;
        Ok(Self {
            client,
            base_url: base_url.trim_end_matches('/').to_string(),
            reply_tx,
        })
    }

    /// Send one command to the service on a worker thread. The reply
    /// arrives on the channel given at construction.
    pub fn dispatch(
        &self,
        session_id: SessionId,
        generation: u64,
        command: String,
        cancel: CancelToken,
    ) {
        let client = self.client.clone();
        let url = format!("{}/execute", self.base_url);
        let tx = self.reply_tx.clone();

        thread::spawn(move || {
            let outcome = run(&client, &url, &command, &cancel);
            // Receiver gone means the app is shutting down.
            let _ = tx.send(ExecReply {
                session_id,
                generation,
                outcome,
            });
        });
    }
}

/// One request/response round against the service, normalized into an
/// [`ExecOutcome`]. The cancellation token is re-checked after each
/// blocking step so an aborted call resolves as cancelled instead of
/// surfacing a partial result.
fn run(client: &Client, url: &str, command: &str, cancel: &CancelToken) -> ExecOutcome {
    let response = client.post(url).json(&ExecRequest { command }).send();
    if cancel.is_cancelled() {
        return ExecOutcome::Cancelled;
    }

    let response = match response {
        Ok(response) => response,
        Err(e) => return ExecOutcome::Failed(e.to_string()),
    };

    let status = response.status();
    if !status.is_success() {
        return ExecOutcome::Failed(format!("service returned {}", status));
    }

    let body = match response.json::<ExecResponse>() {
        Ok(body) => body,
        Err(e) => return ExecOutcome::Failed(format!("malformed response: {}", e)),
    };
    if cancel.is_cancelled() {
        return ExecOutcome::Cancelled;
    }

    match body.error {
        Some(error) if !error.is_empty() => ExecOutcome::ServiceError(error),
        _ => ExecOutcome::Completed {
            stdout: body.stdout,
            stderr: body.stderr,
        },
    }
}
