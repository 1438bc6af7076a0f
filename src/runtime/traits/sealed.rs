// ABOUTME: Sealed trait pattern for runtime traits.
// ABOUTME: Prevents external implementations, allowing non-breaking evolution.

/// Sealed trait to prevent external implementations.
///
/// Only runtime types inside this crate can implement the runtime traits.
pub trait Sealed {}
