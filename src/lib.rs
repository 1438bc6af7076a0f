// ABOUTME: Library root for docklog - container lifecycle and log retrieval.
// ABOUTME: The main binary is in main.rs.

pub mod config;
pub mod diagnostics;
pub mod error;
pub mod logs;
pub mod registry;
pub mod runtime;
pub mod server;
pub mod types;
