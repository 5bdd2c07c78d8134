//! Operator identity and repository-host credentials
//!
//! Resolves the operator's display name and email from git configuration,
//! falling back to the login identifier, and a repository-host access token
//! from the environment or the gh CLI. A missing token is not an error;
//! cloning public repositories works without one.

use crate::error::{WsforgeError, WsforgeResult};
use std::process::Stdio;
use tokio::process::Command;
use tracing::debug;

/// Resolved operator identity
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OperatorIdentity {
    /// Display name (falls back to the login identifier)
    pub name: String,
    /// Login-style identifier
    pub login: String,
    /// Email for git author/committer attribution
    pub email: String,
    /// Repository-host access token (empty when unavailable)
    pub token: String,
}

/// Resolve the operator identity from the local environment
pub async fn resolve() -> WsforgeResult<OperatorIdentity> {
    let login = login_id()?;

    let name = match git_config("user.name").await {
        Some(name) => name,
        None => {
            debug!("git user.name unset, falling back to login '{}'", login);
            login.clone()
        }
    };

    let email = git_config("user.email")
        .await
        .unwrap_or_else(|| format!("{}@localhost", login));

    let token = repo_host_token().await.unwrap_or_default();

    Ok(OperatorIdentity {
        name,
        login,
        email,
        token,
    })
}

/// The login-style identifier of the current operator
fn login_id() -> WsforgeResult<String> {
    std::env::var("USER")
        .or_else(|_| std::env::var("USERNAME"))
        .map_err(|_| WsforgeError::IdentityResolve("no USER or USERNAME in environment".to_string()))
}

/// Read a git config value, treating failures and empty output as unset
async fn git_config(key: &str) -> Option<String> {
    let output = Command::new("git")
        .args(["config", "--get", key])
        .stdout(Stdio::piped())
        .stderr(Stdio::null())
        .output()
        .await
        .ok()?;

    if !output.status.success() {
        return None;
    }

    let value = String::from_utf8_lossy(&output.stdout).trim().to_string();
    if value.is_empty() {
        None
    } else {
        Some(value)
    }
}

/// Resolve a repository-host token: environment first, then the gh CLI
async fn repo_host_token() -> Option<String> {
    for var in ["GITHUB_TOKEN", "GH_TOKEN"] {
        if let Ok(token) = std::env::var(var) {
            if !token.is_empty() {
                debug!("Using repository token from ${}", var);
                return Some(token);
            }
        }
    }

    let output = Command::new("gh")
        .args(["auth", "token"])
        .stdout(Stdio::piped())
        .stderr(Stdio::null())
        .output()
        .await
        .ok()?;

    if !output.status.success() {
        return None;
    }

    let token = String::from_utf8_lossy(&output.stdout).trim().to_string();
    if token.is_empty() {
        None
    } else {
        debug!("Using repository token from gh CLI");
        Some(token)
    }
}
