// ABOUTME: Composable capability traits for container runtimes.
// ABOUTME: Defines RuntimeInfo, ContainerOps, LogOps and the FullRuntime bundle.

mod container;
mod logs;
mod runtime_info;
pub(crate) mod sealed;

pub use container::{ContainerError, ContainerFilters, ContainerOps, ContainerSummary};
pub use logs::{LogError, LogOps, LogOptions};
pub use runtime_info::{RuntimeInfo, RuntimeInfoError};

/// Every capability the log viewer needs from a runtime.
pub trait FullRuntime: RuntimeInfo + ContainerOps + LogOps {}

impl<T: RuntimeInfo + ContainerOps + LogOps> FullRuntime for T {}
