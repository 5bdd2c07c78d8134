//! Orchestration module for container runtimes
//!
//! Shared container/volume specifications plus the runtime trait and its
//! Docker implementation.

mod docker;
mod runtime;

pub use docker::DockerRuntime;
pub use runtime::ContainerRuntime;

use std::collections::HashMap;

/// Specification for creating a workspace container
#[derive(Debug, Clone)]
pub struct ContainerSpec {
    /// Container name (deterministic, lower-cased)
    pub name: String,
    /// Container image reference
    pub image: String,
    /// Container hostname (the human-readable workspace name)
    pub hostname: String,
    /// Environment as `KEY=VALUE` strings, in assembly order
    pub env: Vec<String>,
    /// Volume mounts (`volume:path` format)
    pub volumes: Vec<String>,
    /// Extra host-alias mappings (`host:target` format)
    pub extra_hosts: Vec<String>,
    /// Identifying labels
    pub labels: HashMap<String, String>,
}

/// Specification for a persistent volume
#[derive(Debug, Clone)]
pub struct VolumeSpec {
    /// Volume name (deterministic, lower-cased)
    pub name: String,
    /// Identifying labels
    pub labels: HashMap<String, String>,
}
