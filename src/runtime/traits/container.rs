// ABOUTME: Container operations trait for container runtimes.
// ABOUTME: List, inspect, start, and stop containers.

use super::sealed::Sealed;
use crate::types::{ContainerId, ContainerState};
use async_trait::async_trait;
use serde::Serialize;
use std::time::Duration;

/// Container lifecycle operations.
#[async_trait]
pub trait ContainerOps: Sealed + Send + Sync {
    /// List containers matching the given filters.
    async fn list_containers(
        &self,
        filters: &ContainerFilters,
    ) -> Result<Vec<ContainerSummary>, ContainerError>;

    /// Get the runtime's own detail document for a container.
    async fn inspect_container(&self, id: &ContainerId)
    -> Result<serde_json::Value, ContainerError>;

    /// Start a stopped container.
    async fn start_container(&self, id: &ContainerId) -> Result<(), ContainerError>;

    /// Stop a running container. `None` uses the runtime's default grace period.
    async fn stop_container(
        &self,
        id: &ContainerId,
        timeout: Option<Duration>,
    ) -> Result<(), ContainerError>;
}

/// Filters for listing containers.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ContainerFilters {
    /// Include stopped containers.
    pub all: bool,
}

impl ContainerFilters {
    pub fn new(all: bool) -> Self {
        Self { all }
    }

    /// Whether a container in `state` passes this filter.
    pub fn matches(&self, state: ContainerState) -> bool {
        self.all || state.is_running()
    }
}

/// Summary information about a container.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ContainerSummary {
    pub id: ContainerId,
    /// Container names without the leading `/`.
    pub names: Vec<String>,
    /// Image tag, or the short image id when untagged.
    pub image: String,
    pub state: ContainerState,
    /// Human readable status, e.g. "Up 2 hours".
    pub status: String,
    /// Creation time in epoch seconds.
    pub created: i64,
}

/// Errors from container operations.
#[derive(Debug, thiserror::Error)]
pub enum ContainerError {
    #[error("container not found: {0}")]
    NotFound(String),

    #[error("container not running: {0}")]
    NotRunning(String),

    #[error("container already running: {0}")]
    AlreadyRunning(String),

    #[error("container runtime unavailable")]
    RuntimeUnavailable,

    #[error("runtime error: {0}")]
    Runtime(String),
}
