// ABOUTME: Log retrieval trait for container runtimes.
// ABOUTME: Fetches the raw multiplexed log body with time and tail options.

use super::sealed::Sealed;
use crate::logs::LogWindow;
use crate::types::ContainerId;
use async_trait::async_trait;
use bytes::Bytes;

/// Historical log retrieval.
#[async_trait]
pub trait LogOps: Sealed + Send + Sync {
    /// Fetch the undecoded log body of a container.
    ///
    /// The body is the runtime's multiplexed stream: 8-byte frame headers
    /// followed by payload lines.
    async fn raw_logs(&self, id: &ContainerId, opts: &LogOptions) -> Result<Bytes, LogError>;
}

/// Options passed to the runtime's log endpoint.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct LogOptions {
    /// Include stdout.
    pub stdout: bool,
    /// Include stderr.
    pub stderr: bool,
    /// Prefix each line with its RFC3339 timestamp.
    pub timestamps: bool,
    /// Only logs at or after this epoch second.
    pub since: Option<i64>,
    /// Only logs before this epoch second.
    pub until: Option<i64>,
}

impl LogOptions {
    /// Runtime options that narrow transfer volume for `window` without
    /// changing what the local filter returns.
    ///
    /// The runtime's `until` is exclusive, so it is widened by one second.
    /// The tail is never forwarded: the runtime counts raw lines, including
    /// ones the decoder discards, and counts them before its time bounds.
    pub fn for_window(window: &LogWindow) -> Self {
        Self {
            stdout: true,
            stderr: true,
            timestamps: true,
            since: window.since,
            until: window.until.map(|until| until.saturating_add(1)),
        }
    }

    /// Encode as the runtime's query string (without the leading `?`).
    ///
    /// Always requests the whole history (`tail=all`).
    pub fn query_string(&self) -> String {
        let mut params = vec![
            format!("stdout={}", u8::from(self.stdout)),
            format!("stderr={}", u8::from(self.stderr)),
            format!("timestamps={}", u8::from(self.timestamps)),
            "tail=all".to_string(),
        ];
        if let Some(since) = self.since {
            params.push(format!("since={since}"));
        }
        if let Some(until) = self.until {
            params.push(format!("until={until}"));
        }
        params.join("&")
    }
}

/// Errors from log operations.
#[derive(Debug, thiserror::Error)]
pub enum LogError {
    #[error("container not found: {0}")]
    ContainerNotFound(String),

    #[error("stream error: {0}")]
    StreamError(String),

    #[error("runtime error: {0}")]
    Runtime(String),
}
