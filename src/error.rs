//! Error types for wsforge
//!
//! All modules use `WsforgeResult<T>` as their return type.

use std::path::PathBuf;
use thiserror::Error;

/// Result type alias for wsforge operations
pub type WsforgeResult<T> = Result<T, WsforgeError>;

/// All errors that can occur in wsforge
#[derive(Error, Debug)]
pub enum WsforgeError {
    // Environment errors
    #[error("Docker not found. Install Docker or make sure it is on PATH.")]
    DockerNotFound,

    #[error("Docker daemon is not responding. Is the daemon running?")]
    DockerNotRunning,

    // Configuration errors
    #[error("Invalid configuration at {path}: {reason}")]
    ConfigInvalid { path: PathBuf, reason: String },

    #[error("Configuration file not found: {0}")]
    ConfigNotFound(PathBuf),

    #[error("Failed to create config directory {path}: {source}")]
    ConfigDirCreate {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Unknown repository '{0}'. Configure repo.custom_url or pick a catalog entry.")]
    RepositoryUnknown(String),

    #[error("No repository selected. Set repo.name or repo.custom_url.")]
    RepositoryNotConfigured,

    // Identity errors
    #[error("Unable to resolve operator identity: {0}")]
    IdentityResolve(String),

    // Cache registry errors
    #[error("Cache registry {registry} unreachable: {reason}")]
    RegistryUnreachable { registry: String, reason: String },

    #[error("Cache registry {registry} probe failed: {reason}")]
    RegistryProbe { registry: String, reason: String },

    // Container errors
    #[error("Container failed to start: {0}")]
    ContainerStart(String),

    #[error("Container not found: {0}")]
    ContainerNotFound(String),

    // Volume errors
    #[error("Failed to create volume {name}: {reason}")]
    VolumeCreate { name: String, reason: String },

    // Workspace state errors
    #[error("No workspace has been provisioned yet. Run: wsforge up")]
    WorkspaceNotProvisioned,

    #[error("Failed to persist workspace state: {0}")]
    StatePersist(String),

    // IO errors
    #[error("IO error: {context}")]
    Io {
        context: String,
        #[source]
        source: std::io::Error,
    },

    // Process errors
    #[error("Command failed: {command}")]
    CommandFailed {
        command: String,
        #[source]
        source: std::io::Error,
    },

    #[error("Command execution error: {command}, stderr: {stderr}")]
    CommandExecution { command: String, stderr: String },

    // Serialization errors
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("TOML parse error: {0}")]
    TomlParse(#[from] toml::de::Error),

    #[error("TOML serialize error: {0}")]
    TomlSerialize(#[from] toml::ser::Error),

    // General errors
    #[error("Internal error: {0}")]
    Internal(String),

    #[error("{0}")]
    User(String),
}

impl WsforgeError {
    /// Create an IO error with context
    pub fn io(context: impl Into<String>, source: std::io::Error) -> Self {
        Self::Io {
            context: context.into(),
            source,
        }
    }

    /// Create a command failed error
    pub fn command_failed(command: impl Into<String>, source: std::io::Error) -> Self {
        Self::CommandFailed {
            command: command.into(),
            source,
        }
    }

    /// Create a command execution error
    pub fn command_exec(command: impl Into<String>, stderr: impl Into<String>) -> Self {
        Self::CommandExecution {
            command: command.into(),
            stderr: stderr.into(),
        }
    }

    /// Whether this condition is recovered locally instead of aborting a cycle
    pub fn is_recoverable(&self) -> bool {
        matches!(
            self,
            Self::RegistryUnreachable { .. } | Self::RegistryProbe { .. }
        )
    }

    /// Get actionable hint for the error
    pub fn hint(&self) -> Option<&'static str> {
        match self {
            Self::DockerNotFound => Some("Install Docker from https://docs.docker.com/get-docker"),
            Self::DockerNotRunning => Some("Start the Docker daemon"),
            Self::WorkspaceNotProvisioned => Some("Run: wsforge up"),
            Self::RepositoryNotConfigured => Some("Run: wsforge config set repo.name <name>"),
            _ => None,
        }
    }
}
