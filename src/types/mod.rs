// ABOUTME: Type-safe identifiers and container domain types.
// ABOUTME: Uses phantom types to keep container and image IDs apart.

mod id;
mod state;

pub use id::{ContainerId, ImageId};
pub use state::ContainerState;
