// ABOUTME: Container registry facade over a live runtime or demo data.
// ABOUTME: List, inspect, start and stop with one shared availability decision.

pub mod fallback;

use crate::runtime::{
    Connection, ContainerError, ContainerFilters, ContainerOps, ContainerSummary, RuntimeMode,
};
use crate::types::ContainerId;
use std::time::Duration;

/// Container lifecycle facade.
///
/// In demo mode reads are answered from canned data and writes fail with
/// [`ContainerError::RuntimeUnavailable`] without side effects.
pub struct ContainerRegistry<R> {
    connection: Connection<R>,
    stop_timeout: Option<Duration>,
}

impl<R> Clone for ContainerRegistry<R> {
    fn clone(&self) -> Self {
        Self {
            connection: self.connection.clone(),
            stop_timeout: self.stop_timeout,
        }
    }
}

impl<R: ContainerOps> ContainerRegistry<R> {
    pub fn new(connection: Connection<R>) -> Self {
        Self {
            connection,
            stop_timeout: None,
        }
    }

    /// Grace period passed to the runtime on stop. `None` keeps the runtime default.
    pub fn with_stop_timeout(mut self, timeout: Option<Duration>) -> Self {
        self.stop_timeout = timeout;
        self
    }

    pub fn mode(&self) -> RuntimeMode {
        self.connection.mode()
    }

    /// Running containers, plus stopped ones when `all` is set.
    pub async fn list(&self, all: bool) -> Result<Vec<ContainerSummary>, ContainerError> {
        self.list_at(all, chrono::Utc::now().timestamp()).await
    }

    async fn list_at(&self, all: bool, now: i64) -> Result<Vec<ContainerSummary>, ContainerError> {
        match self.connection.runtime() {
            Some(runtime) => runtime.list_containers(&ContainerFilters::new(all)).await,
            None => Ok(fallback::demo_containers(now, all)),
        }
    }

    /// The runtime's detail document for `id`.
    pub async fn inspect(&self, id: &ContainerId) -> Result<serde_json::Value, ContainerError> {
        match self.connection.runtime() {
            Some(runtime) => runtime.inspect_container(id).await,
            None => Ok(fallback::demo_container_info()),
        }
    }

    pub async fn start(&self, id: &ContainerId) -> Result<(), ContainerError> {
        let runtime = self.live_runtime("start")?;
        runtime.start_container(id).await?;
        tracing::info!(container = %id, "container started");
        Ok(())
    }

    pub async fn stop(&self, id: &ContainerId) -> Result<(), ContainerError> {
        let runtime = self.live_runtime("stop")?;
        runtime.stop_container(id, self.stop_timeout).await?;
        tracing::info!(container = %id, "container stopped");
        Ok(())
    }

    fn live_runtime(&self, operation: &str) -> Result<&R, ContainerError> {
        self.connection.runtime().ok_or_else(|| {
            tracing::info!(operation, "container runtime not available in demo mode");
            ContainerError::RuntimeUnavailable
        })
    }
}
