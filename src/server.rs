// ABOUTME: HTTP/JSON surface over the log retrieval and container registry services.
// ABOUTME: Wraps every response in a {success, data|message} envelope.

use crate::diagnostics::BestEffort;
use crate::error::{Error, Result};
use crate::logs::{LogEntry, LogRetrieval, LogWindow};
use crate::registry::ContainerRegistry;
use crate::runtime::{Connection, ContainerSummary, FullRuntime, RuntimeMode};
use crate::types::ContainerId;
use axum::{
    Json, Router,
    extract::{Path, Query, State},
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::{get, post},
};
use serde::{Deserialize, Serialize};
use std::any::Any;
use std::net::SocketAddr;
use std::time::Duration;
use tower_http::catch_panic::CatchPanicLayer;
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;

/// Services shared across handlers.
pub struct AppState<R> {
    pub logs: LogRetrieval<R>,
    pub registry: ContainerRegistry<R>,
}

impl<R: FullRuntime> AppState<R> {
    /// Build both services over one connection.
    pub fn new(connection: Connection<R>, stop_timeout: Option<Duration>) -> Self {
        Self {
            logs: LogRetrieval::new(connection.clone()),
            registry: ContainerRegistry::new(connection).with_stop_timeout(stop_timeout),
        }
    }
}

impl<R> Clone for AppState<R> {
    fn clone(&self) -> Self {
        Self {
            logs: self.logs.clone(),
            registry: self.registry.clone(),
        }
    }
}

/// Read response envelope.
#[derive(Debug, Serialize)]
pub struct DataResponse<T> {
    pub success: bool,
    pub data: T,
}

impl<T> DataResponse<T> {
    fn ok(data: T) -> Json<Self> {
        Json(Self {
            success: true,
            data,
        })
    }
}

/// Write response envelope.
#[derive(Debug, Serialize)]
pub struct MessageResponse {
    pub success: bool,
    pub message: String,
}

#[derive(Debug, Serialize)]
pub struct HealthData {
    pub runtime: RuntimeMode,
}

#[derive(Debug, Default, Deserialize)]
pub struct ListQuery {
    #[serde(default)]
    pub all_containers: bool,
}

/// Build the router with all endpoints.
pub fn router<R: FullRuntime + 'static>(state: AppState<R>) -> Router {
    Router::new()
        .route("/", get(root))
        .route("/health", get(health::<R>))
        .route("/api/containers", get(list_containers::<R>))
        .route("/api/containers/{id}/logs", get(container_logs::<R>))
        .route("/api/containers/{id}/info", get(container_info::<R>))
        .route("/api/containers/{id}/start", post(start_container::<R>))
        .route("/api/containers/{id}/stop", post(stop_container::<R>))
        .with_state(state)
        .layer(CatchPanicLayer::custom(handle_panic))
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive())
}

/// Serve the API on `addr` until Ctrl-C.
pub async fn serve<R: FullRuntime + 'static>(addr: SocketAddr, state: AppState<R>) -> Result<()> {
    let listener = tokio::net::TcpListener::bind(addr)
        .await
        .map_err(|e| Error::Server(format!("failed to bind {}: {}", addr, e)))?;

    tracing::info!("listening on {}", addr);

    axum::serve(listener, router(state))
        .with_graceful_shutdown(shutdown_signal())
        .await
        .map_err(|e| Error::Server(e.to_string()))
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::warn!("failed to listen for shutdown signal: {}", e);
        std::future::pending::<()>().await;
    }
    tracing::info!("shutting down");
}

async fn root() -> Json<serde_json::Value> {
    Json(serde_json::json!({ "message": "docklog API" }))
}

async fn health<R: FullRuntime>(State(state): State<AppState<R>>) -> Json<DataResponse<HealthData>> {
    DataResponse::ok(HealthData {
        runtime: state.registry.mode(),
    })
}

async fn list_containers<R: FullRuntime>(
    State(state): State<AppState<R>>,
    Query(query): Query<ListQuery>,
) -> Json<DataResponse<Vec<ContainerSummary>>> {
    let containers = state
        .registry
        .list(query.all_containers)
        .await
        .or_empty("list containers");
    DataResponse::ok(containers)
}

async fn container_logs<R: FullRuntime>(
    State(state): State<AppState<R>>,
    Path(id): Path<String>,
    Query(window): Query<LogWindow>,
) -> Json<DataResponse<Vec<LogEntry>>> {
    let id = ContainerId::new(id);
    tracing::debug!(container = %id, ?window, "log request");
    let entries = state
        .logs
        .retrieve(&id, &window)
        .await
        .or_empty("container logs");
    DataResponse::ok(entries)
}

async fn container_info<R: FullRuntime>(
    State(state): State<AppState<R>>,
    Path(id): Path<String>,
) -> Json<DataResponse<serde_json::Value>> {
    let info = state
        .registry
        .inspect(&ContainerId::new(id))
        .await
        .or_fallback("inspect container", serde_json::json!({}));
    DataResponse::ok(info)
}

async fn start_container<R: FullRuntime>(
    State(state): State<AppState<R>>,
    Path(id): Path<String>,
) -> Json<MessageResponse> {
    let success = state
        .registry
        .start(&ContainerId::new(id))
        .await
        .succeeded("start container");
    Json(MessageResponse {
        success,
        message: if success {
            "Container started".to_string()
        } else {
            "Failed to start container".to_string()
        },
    })
}

async fn stop_container<R: FullRuntime>(
    State(state): State<AppState<R>>,
    Path(id): Path<String>,
) -> Json<MessageResponse> {
    let success = state
        .registry
        .stop(&ContainerId::new(id))
        .await
        .succeeded("stop container");
    Json(MessageResponse {
        success,
        message: if success {
            "Container stopped".to_string()
        } else {
            "Failed to stop container".to_string()
        },
    })
}

/// Turn a handler panic into a 500 with the panic message as detail.
fn handle_panic(err: Box<dyn Any + Send + 'static>) -> Response {
    let detail = if let Some(s) = err.downcast_ref::<String>() {
        s.clone()
    } else if let Some(s) = err.downcast_ref::<&str>() {
        s.to_string()
    } else {
        "internal server error".to_string()
    };

    tracing::error!(%detail, "request handler panicked");

    (
        StatusCode::INTERNAL_SERVER_ERROR,
        Json(serde_json::json!({ "detail": detail })),
    )
        .into_response()
}
