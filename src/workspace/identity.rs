//! Workspace identity and deterministic resource naming
//!
//! Container and volume names are derived from the owner and workspace
//! names, case-normalized, so repeated computation always yields the same
//! collision-free name.

use std::collections::HashMap;
use uuid::Uuid;

/// Name prefix for all workspace-owned runtime resources
pub const RESOURCE_PREFIX: &str = "coder";

/// Mount point of the persistent volume inside the container
pub const HOME_MOUNT_PATH: &str = "/workspace";

/// Label keys attached to workspace resources for external garbage collection
pub mod labels {
    /// Owner login
    pub const OWNER: &str = "io.wsforge.owner";
    /// Owner stable id
    pub const OWNER_ID: &str = "io.wsforge.owner_id";
    /// Workspace stable id
    pub const WORKSPACE_ID: &str = "io.wsforge.workspace_id";
    /// Human-readable workspace name
    pub const WORKSPACE_NAME: &str = "io.wsforge.workspace_name";
}

/// Identity of a single workspace, immutable for its lifetime
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WorkspaceIdentity {
    /// Owner display name (falls back to the login identifier)
    pub owner_name: String,
    /// Owner login identifier
    pub owner_login: String,
    /// Owner stable id
    pub owner_id: Uuid,
    /// Owner email, used for git author/committer variables
    pub owner_email: String,
    /// Human-readable workspace name
    pub workspace_name: String,
    /// Workspace stable id
    pub workspace_id: Uuid,
}

impl WorkspaceIdentity {
    /// Deterministic container name: `coder-{owner}-{workspace}`, lower-cased
    /// to satisfy runtime naming constraints.
    pub fn container_name(&self) -> String {
        format!(
            "{}-{}-{}",
            RESOURCE_PREFIX,
            sanitize(&self.owner_login),
            sanitize(&self.workspace_name)
        )
    }

    /// Deterministic persistent volume name, derived from the container name.
    pub fn volume_name(&self) -> String {
        format!("{}-home", self.container_name())
    }

    /// Container hostname: the human-readable workspace name.
    pub fn hostname(&self) -> &str {
        &self.workspace_name
    }

    /// Identifying labels for the container and volume.
    pub fn labels(&self) -> HashMap<String, String> {
        let mut labels = HashMap::new();
        labels.insert(labels::OWNER.to_string(), self.owner_login.clone());
        labels.insert(labels::OWNER_ID.to_string(), self.owner_id.to_string());
        labels.insert(
            labels::WORKSPACE_ID.to_string(),
            self.workspace_id.to_string(),
        );
        labels.insert(
            labels::WORKSPACE_NAME.to_string(),
            self.workspace_name.clone(),
        );
        labels
    }
}

/// Lower-case a name component and replace anything outside `[a-z0-9_.-]`
/// with `-` so it is a valid container/volume name segment.
fn sanitize(component: &str) -> String {
    component
        .to_lowercase()
        .chars()
        .map(|c| {
            if c.is_ascii_alphanumeric() || c == '_' || c == '.' || c == '-' {
                c
            } else {
                '-'
            }
        })
        .collect()
}
