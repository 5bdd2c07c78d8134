//! Container runtime abstraction
//!
//! A trait for the container operations the lifecycle needs, so the
//! reconciler can run against Docker in production and an in-memory fake in
//! tests.

use crate::error::WsforgeResult;
use crate::orchestration::{ContainerSpec, VolumeSpec};
use async_trait::async_trait;

/// Abstract container runtime interface
#[async_trait]
pub trait ContainerRuntime: Send + Sync {
    /// Check if the runtime is available on this system
    async fn is_available(&self) -> WsforgeResult<bool>;

    /// Create and start a container, returning its ID
    async fn create_container(&self, spec: &ContainerSpec) -> WsforgeResult<String>;

    /// Whether a container with this name exists (running or not)
    async fn container_exists(&self, name: &str) -> WsforgeResult<bool>;

    /// Stop a container gracefully
    async fn stop_container(&self, name: &str) -> WsforgeResult<()>;

    /// Remove a container; absent containers are not an error
    async fn remove_container(&self, name: &str) -> WsforgeResult<()>;

    /// Ensure a volume exists: created if absent, reused as-is otherwise.
    /// Never recreates an existing volume, whatever its attributes.
    async fn ensure_volume(&self, spec: &VolumeSpec) -> WsforgeResult<()>;

    /// Whether a volume with this name exists
    async fn volume_exists(&self, name: &str) -> WsforgeResult<bool>;

    /// Get the human-readable runtime name for display
    fn runtime_name(&self) -> &'static str;
}
