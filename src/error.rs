// ABOUTME: Application-wide error types for docklog.
// ABOUTME: Uses thiserror for ergonomic error handling.

use crate::runtime::{ContainerError, EndpointError, LogError};
use std::path::PathBuf;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum Error {
    #[error("configuration file not found: {0}")]
    ConfigNotFound(PathBuf),

    #[error("invalid configuration: {0}")]
    InvalidConfig(String),

    #[error("invalid runtime endpoint: {0}")]
    Endpoint(#[from] EndpointError),

    #[error(transparent)]
    Container(#[from] ContainerError),

    #[error(transparent)]
    Logs(#[from] LogError),

    #[error("server error: {0}")]
    Server(String),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("YAML parse error: {0}")]
    Yaml(#[from] serde_yaml::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

pub type Result<T> = std::result::Result<T, Error>;
