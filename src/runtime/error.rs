// ABOUTME: Runtime error types with SNAFU pattern.
// ABOUTME: Unifies client construction and reachability failures at startup.

use snafu::Snafu;

use super::traits::RuntimeInfoError;

/// Why a runtime connection could not be established.
#[derive(Debug, Snafu)]
#[snafu(visibility(pub))]
pub enum RuntimeError {
    #[snafu(display("failed to create runtime client: {source}"))]
    Connect { source: RuntimeInfoError },

    #[snafu(display("runtime did not answer ping: {source}"))]
    Unreachable { source: RuntimeInfoError },
}

/// Error kind for programmatic handling.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RuntimeErrorKind {
    /// The client could not be constructed for the endpoint.
    ClientSetup,
    /// The runtime socket or host refused or dropped the connection.
    ConnectionFailed,
    /// The runtime answered but reported an error.
    RuntimeOperation,
}

impl RuntimeError {
    /// Returns the error kind for programmatic handling.
    pub fn kind(&self) -> RuntimeErrorKind {
        match self {
            RuntimeError::Connect { .. } => RuntimeErrorKind::ClientSetup,
            RuntimeError::Unreachable { source } => match source {
                RuntimeInfoError::ConnectionFailed(_) => RuntimeErrorKind::ConnectionFailed,
                RuntimeInfoError::Runtime(_) => RuntimeErrorKind::RuntimeOperation,
            },
        }
    }
}
