// ABOUTME: In-memory runtime double for service-level unit tests.
// ABOUTME: Serves canned containers and log bodies and records calls.

use super::traits::sealed::Sealed;
use super::traits::{
    ContainerError, ContainerFilters, ContainerOps, ContainerSummary, LogError, LogOps,
    LogOptions, RuntimeInfo, RuntimeInfoError,
};
use crate::types::ContainerId;
use async_trait::async_trait;
use bytes::Bytes;
use std::sync::Mutex;
use std::time::Duration;

#[derive(Default)]
pub struct MockRuntime {
    pub containers: Vec<ContainerSummary>,
    pub log_body: Bytes,
    /// Every runtime call fails with this message when set.
    pub fail_with: Option<String>,
    pub calls: Mutex<Vec<String>>,
    pub last_log_options: Mutex<Option<LogOptions>>,
}

impl MockRuntime {
    pub fn failing(message: &str) -> Self {
        Self {
            fail_with: Some(message.to_string()),
            ..Self::default()
        }
    }

    pub fn calls(&self) -> Vec<String> {
        self.calls.lock().unwrap().clone()
    }

    fn record(&self, call: String) {
        self.calls.lock().unwrap().push(call);
    }

    fn find(&self, id: &ContainerId) -> Result<&ContainerSummary, ContainerError> {
        self.containers
            .iter()
            .find(|c| &c.id == id)
            .ok_or_else(|| ContainerError::NotFound(id.to_string()))
    }
}

impl Sealed for MockRuntime {}

#[async_trait]
impl RuntimeInfo for MockRuntime {
    async fn ping(&self) -> Result<(), RuntimeInfoError> {
        self.record("ping".to_string());
        match &self.fail_with {
            Some(msg) => Err(RuntimeInfoError::ConnectionFailed(msg.clone())),
            None => Ok(()),
        }
    }
}

#[async_trait]
impl ContainerOps for MockRuntime {
    async fn list_containers(
        &self,
        filters: &ContainerFilters,
    ) -> Result<Vec<ContainerSummary>, ContainerError> {
        self.record(format!("list all={}", filters.all));
        if let Some(msg) = &self.fail_with {
            return Err(ContainerError::Runtime(msg.clone()));
        }
        Ok(self
            .containers
            .iter()
            .filter(|c| filters.matches(c.state))
            .cloned()
            .collect())
    }

    async fn inspect_container(
        &self,
        id: &ContainerId,
    ) -> Result<serde_json::Value, ContainerError> {
        self.record(format!("inspect {id}"));
        if let Some(msg) = &self.fail_with {
            return Err(ContainerError::Runtime(msg.clone()));
        }
        let c = self.find(id)?;
        Ok(serde_json::json!({ "Id": c.id, "State": { "Status": c.state } }))
    }

    async fn start_container(&self, id: &ContainerId) -> Result<(), ContainerError> {
        self.record(format!("start {id}"));
        if let Some(msg) = &self.fail_with {
            return Err(ContainerError::Runtime(msg.clone()));
        }
        self.find(id).map(|_| ())
    }

    async fn stop_container(
        &self,
        id: &ContainerId,
        timeout: Option<Duration>,
    ) -> Result<(), ContainerError> {
        self.record(format!("stop {id} timeout={:?}", timeout.map(|t| t.as_secs())));
        if let Some(msg) = &self.fail_with {
            return Err(ContainerError::Runtime(msg.clone()));
        }
        self.find(id).map(|_| ())
    }
}

#[async_trait]
impl LogOps for MockRuntime {
    async fn raw_logs(&self, id: &ContainerId, opts: &LogOptions) -> Result<Bytes, LogError> {
        self.record(format!("logs {id}"));
        *self.last_log_options.lock().unwrap() = Some(opts.clone());
        if let Some(msg) = &self.fail_with {
            return Err(LogError::StreamError(msg.clone()));
        }
        Ok(self.log_body.clone())
    }
}
