// ABOUTME: Log retrieval orchestrator over a live runtime or demo data.
// ABOUTME: Fetches raw frames, decodes them and applies the filter window.

use super::entry::LogEntry;
use super::fallback;
use super::filter::LogWindow;
use super::frame;
use crate::runtime::{Connection, LogError, LogOps, LogOptions, RuntimeMode};
use crate::types::ContainerId;

/// Retrieves historical container logs.
///
/// Both data sources go through the same [`LogWindow`], so filtering
/// behaves identically in live and demo mode.
pub struct LogRetrieval<R> {
    connection: Connection<R>,
}

impl<R> Clone for LogRetrieval<R> {
    fn clone(&self) -> Self {
        Self {
            connection: self.connection.clone(),
        }
    }
}

impl<R: LogOps> LogRetrieval<R> {
    pub fn new(connection: Connection<R>) -> Self {
        Self { connection }
    }

    pub fn mode(&self) -> RuntimeMode {
        self.connection.mode()
    }

    /// Logs of container `id` within `window`, oldest first.
    ///
    /// Runtime failures are returned, not logged; callers decide how to surface them.
    pub async fn retrieve(
        &self,
        id: &ContainerId,
        window: &LogWindow,
    ) -> Result<Vec<LogEntry>, LogError> {
        self.retrieve_at(id, window, chrono::Utc::now().timestamp())
            .await
    }

    async fn retrieve_at(
        &self,
        id: &ContainerId,
        window: &LogWindow,
        now: i64,
    ) -> Result<Vec<LogEntry>, LogError> {
        let entries = match self.connection.runtime() {
            Some(runtime) => {
                let opts = LogOptions::for_window(window);
                let raw = runtime.raw_logs(id, &opts).await?;
                let entries = frame::decode(&raw);
                tracing::debug!(
                    container = %id,
                    bytes = raw.len(),
                    entries = entries.len(),
                    "decoded container logs"
                );
                entries
            }
            None => fallback::demo_logs(now),
        };

        // The runtime may have narrowed the batch already; its bounds are not
        // trusted on their own.
        Ok(window.apply(entries))
    }
}
