// ABOUTME: Container runtime access for Docker and Podman.
// ABOUTME: Endpoint parsing, capability traits, the bollard client and the startup check.

mod bollard;
mod connection;
mod error;
#[cfg(test)]
pub(crate) mod mock;
pub mod traits;
mod types;

pub use self::bollard::{BollardRuntime, image_label};
pub use connection::{Connection, RuntimeMode};
pub use error::{RuntimeError, RuntimeErrorKind};
pub use traits::*;
pub use types::{DEFAULT_ENDPOINT, EndpointError, RuntimeEndpoint};
