// ABOUTME: Bollard-based container runtime implementation.
// ABOUTME: Supports Docker and Podman via the Docker-compatible API.

use crate::runtime::traits::sealed::Sealed;
use crate::runtime::traits::{
    ContainerError, ContainerFilters, ContainerOps, ContainerSummary, LogError, LogOps,
    LogOptions, RuntimeInfo, RuntimeInfoError,
};
use crate::runtime::types::RuntimeEndpoint;
use crate::types::{ContainerId, ContainerState, ImageId};
use async_trait::async_trait;
use bollard::Docker;
use bollard::query_parameters::{
    InspectContainerOptions, ListContainersOptions, StartContainerOptions, StopContainerOptions,
};
use bytes::Bytes;
use http_body_util::{BodyExt, Empty};
use hyper::StatusCode;
use hyper_util::rt::TokioIo;
use std::collections::HashMap;
use std::time::Duration;
use tokio::io::{AsyncRead, AsyncWrite};
use tokio::net::{TcpStream, UnixStream};

/// Tag reported by the runtime for dangling images.
const UNTAGGED: &str = "<none>:<none>";

// =============================================================================
// Error Mapping Helpers
// =============================================================================

fn map_container_start_error(e: bollard::errors::Error) -> ContainerError {
    match &e {
        bollard::errors::Error::DockerResponseServerError {
            status_code,
            message,
        } if *status_code == 404 => ContainerError::NotFound(message.clone()),
        bollard::errors::Error::DockerResponseServerError {
            status_code,
            message,
        } if *status_code == 304 => ContainerError::AlreadyRunning(message.clone()),
        _ => ContainerError::Runtime(e.to_string()),
    }
}

fn map_container_stop_error(e: bollard::errors::Error) -> ContainerError {
    match &e {
        bollard::errors::Error::DockerResponseServerError {
            status_code,
            message,
        } if *status_code == 404 => ContainerError::NotFound(message.clone()),
        bollard::errors::Error::DockerResponseServerError {
            status_code,
            message,
        } if *status_code == 304 => ContainerError::NotRunning(message.clone()),
        _ => ContainerError::Runtime(e.to_string()),
    }
}

fn map_container_not_found_error(e: bollard::errors::Error) -> ContainerError {
    match &e {
        bollard::errors::Error::DockerResponseServerError {
            status_code,
            message,
        } if *status_code == 404 => ContainerError::NotFound(message.clone()),
        _ => ContainerError::Runtime(e.to_string()),
    }
}

fn map_logs_status(status: StatusCode, body: &[u8], id: &ContainerId) -> LogError {
    let message = error_message(body);
    match status {
        StatusCode::NOT_FOUND => {
            LogError::ContainerNotFound(message.unwrap_or_else(|| id.to_string()))
        }
        _ => LogError::Runtime(format!(
            "{}: {}",
            status,
            message.unwrap_or_else(|| String::from_utf8_lossy(body).trim().to_string())
        )),
    }
}

/// Extract `message` from the runtime's JSON error body.
fn error_message(body: &[u8]) -> Option<String> {
    serde_json::from_slice::<serde_json::Value>(body)
        .ok()?
        .get("message")?
        .as_str()
        .map(str::to_string)
}

/// Display label for an image: first real tag, else the short id.
pub fn image_label(tags: &[String], id: &ImageId) -> String {
    tags.iter()
        .find(|tag| tag.as_str() != UNTAGGED)
        .cloned()
        .unwrap_or_else(|| id.short().to_string())
}

// =============================================================================
// BollardRuntime
// =============================================================================

/// Container runtime implementation using bollard.
///
/// Log bodies are fetched with a raw HTTP request on the same endpoint so the
/// multiplexed frame headers reach the decoder untouched.
pub struct BollardRuntime {
    client: Docker,
    endpoint: RuntimeEndpoint,
    timeout: Duration,
}

impl BollardRuntime {
    /// Create a client for `endpoint`. No request is made until the first call.
    pub fn connect(endpoint: &RuntimeEndpoint, timeout: Duration) -> Result<Self, RuntimeInfoError> {
        let secs = timeout.as_secs().max(1);
        let client = match endpoint {
            RuntimeEndpoint::Unix(path) => Docker::connect_with_unix(
                &path.to_string_lossy(),
                secs,
                bollard::API_DEFAULT_VERSION,
            ),
            RuntimeEndpoint::Tcp(_) => {
                Docker::connect_with_http(&endpoint.to_url(), secs, bollard::API_DEFAULT_VERSION)
            }
        }
        .map_err(|e| RuntimeInfoError::ConnectionFailed(e.to_string()))?;

        Ok(Self {
            client,
            endpoint: endpoint.clone(),
            timeout,
        })
    }

    /// Issue a single GET against the runtime API and buffer the whole body.
    async fn get_raw(&self, uri: &str) -> Result<(StatusCode, Bytes), String> {
        let request = async {
            match &self.endpoint {
                RuntimeEndpoint::Unix(path) => {
                    let stream = UnixStream::connect(path)
                        .await
                        .map_err(|e| format!("failed to connect to {}: {}", path.display(), e))?;
                    send_get(stream, self.endpoint.host_header(), uri).await
                }
                RuntimeEndpoint::Tcp(addr) => {
                    let stream = TcpStream::connect(addr.as_str())
                        .await
                        .map_err(|e| format!("failed to connect to {}: {}", addr, e))?;
                    send_get(stream, self.endpoint.host_header(), uri).await
                }
            }
        };

        tokio::time::timeout(self.timeout, request)
            .await
            .map_err(|_| format!("request timed out after {}s", self.timeout.as_secs()))?
    }

    /// Resolve the display label of an image, degrading to its short id.
    async fn resolve_image(&self, image_id: &ImageId) -> String {
        match self.client.inspect_image(image_id.as_str()).await {
            Ok(image) => image_label(image.repo_tags.as_deref().unwrap_or_default(), image_id),
            Err(e) => {
                tracing::debug!(image = %image_id, error = %e, "image lookup failed, using short id");
                image_id.short().to_string()
            }
        }
    }
}

async fn send_get<S>(io: S, host: &str, uri: &str) -> Result<(StatusCode, Bytes), String>
where
    S: AsyncRead + AsyncWrite + Unpin + Send + 'static,
{
    let (mut sender, conn) = hyper::client::conn::http1::handshake(TokioIo::new(io))
        .await
        .map_err(|e| format!("HTTP handshake failed: {}", e))?;

    tokio::spawn(async move {
        if let Err(e) = conn.await {
            tracing::warn!("runtime connection error: {}", e);
        }
    });

    let req = hyper::Request::builder()
        .method("GET")
        .uri(uri)
        .header("Host", host)
        .body(Empty::<Bytes>::new())
        .map_err(|e| format!("failed to build request: {}", e))?;

    let resp = sender
        .send_request(req)
        .await
        .map_err(|e| format!("request failed: {}", e))?;

    let status = resp.status();
    let body = resp
        .into_body()
        .collect()
        .await
        .map_err(|e| format!("failed to read response: {}", e))?
        .to_bytes();

    Ok((status, body))
}

impl Sealed for BollardRuntime {}

#[async_trait]
impl RuntimeInfo for BollardRuntime {
    async fn ping(&self) -> Result<(), RuntimeInfoError> {
        self.client
            .ping()
            .await
            .map_err(|e| RuntimeInfoError::ConnectionFailed(e.to_string()))?;
        Ok(())
    }
}

#[async_trait]
impl ContainerOps for BollardRuntime {
    async fn list_containers(
        &self,
        filters: &ContainerFilters,
    ) -> Result<Vec<ContainerSummary>, ContainerError> {
        let opts = ListContainersOptions {
            all: filters.all,
            ..Default::default()
        };

        let containers = self
            .client
            .list_containers(Some(opts))
            .await
            .map_err(|e| ContainerError::Runtime(e.to_string()))?;

        // Containers commonly share images; look each one up once per listing.
        let mut labels: HashMap<String, String> = HashMap::new();
        let mut summaries = Vec::with_capacity(containers.len());

        for c in containers {
            let image_id = ImageId::new(c.image_id.unwrap_or_default());
            let image = if image_id.as_str().is_empty() {
                c.image.unwrap_or_default()
            } else if let Some(label) = labels.get(image_id.as_str()) {
                label.clone()
            } else {
                let label = self.resolve_image(&image_id).await;
                labels.insert(image_id.to_string(), label.clone());
                label
            };

            let state = c
                .state
                .map(|s| ContainerState::parse(&format!("{:?}", s)))
                .unwrap_or(ContainerState::Unknown);

            summaries.push(ContainerSummary {
                id: ContainerId::new(c.id.unwrap_or_default()),
                names: c
                    .names
                    .unwrap_or_default()
                    .into_iter()
                    .map(|n| n.trim_start_matches('/').to_string())
                    .collect(),
                image,
                state,
                status: c.status.unwrap_or_default(),
                created: c.created.unwrap_or_default(),
            });
        }

        Ok(summaries)
    }

    async fn inspect_container(
        &self,
        id: &ContainerId,
    ) -> Result<serde_json::Value, ContainerError> {
        let details = self
            .client
            .inspect_container(id.as_str(), None::<InspectContainerOptions>)
            .await
            .map_err(map_container_not_found_error)?;

        serde_json::to_value(details).map_err(|e| ContainerError::Runtime(e.to_string()))
    }

    async fn start_container(&self, id: &ContainerId) -> Result<(), ContainerError> {
        self.client
            .start_container(id.as_str(), None::<StartContainerOptions>)
            .await
            .map_err(map_container_start_error)
    }

    async fn stop_container(
        &self,
        id: &ContainerId,
        timeout: Option<Duration>,
    ) -> Result<(), ContainerError> {
        let opts = StopContainerOptions {
            t: timeout.map(|t| t.as_secs().min(i32::MAX as u64) as i32),
            signal: None,
        };

        self.client
            .stop_container(id.as_str(), Some(opts))
            .await
            .map_err(map_container_stop_error)
    }
}

#[async_trait]
impl LogOps for BollardRuntime {
    async fn raw_logs(&self, id: &ContainerId, opts: &LogOptions) -> Result<Bytes, LogError> {
        let uri = format!(
            "/containers/{}/logs?{}",
            urlencoding::encode(id.as_str()),
            opts.query_string()
        );

        let (status, body) = self.get_raw(&uri).await.map_err(LogError::StreamError)?;

        if !status.is_success() {
            return Err(map_logs_status(status, &body, id));
        }

        Ok(body)
    }
}
