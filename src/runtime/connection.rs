// ABOUTME: One-time runtime availability decision shared by all services.
// ABOUTME: Either a live runtime handle or demo mode, fixed for the process lifetime.

use super::error::{RuntimeError, UnreachableSnafu};
use super::traits::{RuntimeInfo, RuntimeInfoError};
use serde::Serialize;
use snafu::ResultExt;
use std::sync::Arc;

/// Result of the startup availability check.
///
/// Constructed exactly once per process via [`Connection::establish`] and then
/// cloned into each service. It is never re-checked: a runtime that goes away
/// later surfaces as per-call errors, and a runtime that appears later is not
/// picked up until restart.
pub enum Connection<R> {
    /// Runtime answered the ping; calls go to it.
    Live(Arc<R>),
    /// Runtime unreachable; reads serve canned data, writes fail.
    Demo,
}

/// Which data source a [`Connection`] serves from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum RuntimeMode {
    Live,
    Demo,
}

impl<R: RuntimeInfo> Connection<R> {
    /// Ping `runtime` once and wrap it if it answers.
    pub async fn ping(runtime: R) -> Result<Self, RuntimeError> {
        runtime.ping().await.context(UnreachableSnafu)?;
        Ok(Connection::Live(Arc::new(runtime)))
    }

    /// Decide the process-wide mode from a connection attempt.
    ///
    /// Falls back to demo mode on any failure, logging why.
    pub async fn establish(runtime: Result<R, RuntimeInfoError>) -> Self {
        let checked = match runtime {
            Ok(runtime) => Self::ping(runtime).await,
            Err(source) => Err(RuntimeError::Connect { source }),
        };

        match checked {
            Ok(connection) => {
                tracing::info!("container runtime reachable");
                connection
            }
            Err(e) => {
                tracing::warn!(kind = ?e.kind(), "{e}; serving demo data");
                Connection::Demo
            }
        }
    }
}

impl<R> Connection<R> {
    /// Wrap a runtime without probing it.
    pub fn live(runtime: R) -> Self {
        Connection::Live(Arc::new(runtime))
    }

    pub fn runtime(&self) -> Option<&R> {
        match self {
            Connection::Live(runtime) => Some(runtime.as_ref()),
            Connection::Demo => None,
        }
    }

    pub fn mode(&self) -> RuntimeMode {
        match self {
            Connection::Live(_) => RuntimeMode::Live,
            Connection::Demo => RuntimeMode::Demo,
        }
    }

    pub fn is_live(&self) -> bool {
        self.mode() == RuntimeMode::Live
    }
}

impl<R> Clone for Connection<R> {
    fn clone(&self) -> Self {
        match self {
            Connection::Live(runtime) => Connection::Live(Arc::clone(runtime)),
            Connection::Demo => Connection::Demo,
        }
    }
}

impl<R> std::fmt::Debug for Connection<R> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_tuple("Connection").field(&self.mode()).finish()
    }
}
