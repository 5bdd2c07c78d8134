//! Configuration schema for wsforge
//!
//! Configuration is stored at `~/.config/wsforge/config.toml`

use serde::{Deserialize, Serialize};

/// Root configuration structure
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Workspace naming
    pub workspace: WorkspaceConfig,

    /// Repository selection
    pub repo: RepoConfig,

    /// Remote build cache settings
    pub cache: CacheConfig,

    /// Builder image settings
    pub builder: BuilderConfig,

    /// Workspace agent settings
    pub agent: AgentConfig,
}

/// Workspace naming configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct WorkspaceConfig {
    /// Workspace name (used for container/volume naming and the hostname)
    pub name: String,

    /// Owner login override (empty = resolved from the operator identity)
    pub owner: String,
}

impl Default for WorkspaceConfig {
    fn default() -> Self {
        Self {
            name: "dev".to_string(),
            owner: String::new(),
        }
    }
}

/// Repository selection configuration
///
/// Exactly one source is active per provisioning cycle: `custom_url` when
/// set, otherwise the catalog entry named by `name`.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct RepoConfig {
    /// Catalog entry to clone
    pub name: String,

    /// Custom repository URL (overrides the catalog when non-empty)
    pub custom_url: String,
}

impl Default for RepoConfig {
    fn default() -> Self {
        Self {
            name: "envbuilder-starter".to_string(),
            custom_url: String::new(),
        }
    }
}

/// Remote build cache configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct CacheConfig {
    /// Cache registry address, e.g. "registry.example.com/cache" (empty = disabled)
    pub registry: String,

    /// Allow insecure (plain HTTP) transport to the registry
    pub insecure: bool,

    /// Path to a Docker config JSON with registry credentials (sensitive; empty = none)
    pub credentials_file: String,
}

impl Default for CacheConfig {
    fn default() -> Self {
        Self {
            registry: String::new(),
            insecure: false,
            credentials_file: String::new(),
        }
    }
}

impl CacheConfig {
    /// Whether the remote build cache is enabled at all
    pub fn enabled(&self) -> bool {
        !self.registry.is_empty()
    }
}

/// Builder image configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct BuilderConfig {
    /// Generic builder image that performs the on-demand build at start
    pub image: String,

    /// Known-good image used when the repository has no buildable environment
    pub fallback_image: String,
}

impl Default for BuilderConfig {
    fn default() -> Self {
        Self {
            image: "ghcr.io/coder/envbuilder:latest".to_string(),
            fallback_image: "codercom/enterprise-base:ubuntu".to_string(),
        }
    }
}

/// Workspace agent configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct AgentConfig {
    /// Platform access URL the in-container agent connects back to
    pub access_url: String,

    /// Startup script run by the agent once the workspace is up
    pub init_script: String,
}

impl Default for AgentConfig {
    fn default() -> Self {
        Self {
            access_url: "http://localhost:3000".to_string(),
            init_script: String::new(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_config_serializes() {
        let config = Config::default();
        let toml = toml::to_string_pretty(&config).unwrap();
        assert!(toml.contains("[workspace]"));
        assert!(toml.contains("[cache]"));
    }

    #[test]
    fn config_deserializes_empty() {
        let config: Config = toml::from_str("").unwrap();
        assert_eq!(config.workspace.name, "dev");
        assert!(!config.cache.enabled());
    }

    #[test]
    fn config_deserializes_partial() {
        let toml = r#"
            [cache]
            registry = "registry.example.com/cache"
        "#;
        let config: Config = toml::from_str(toml).unwrap();
        assert!(config.cache.enabled());
        assert!(!config.cache.insecure); // default preserved
        assert_eq!(config.repo.name, "envbuilder-starter"); // default preserved
    }

    #[test]
    fn cache_disabled_by_default() {
        let cache = CacheConfig::default();
        assert!(!cache.enabled());
        assert!(cache.credentials_file.is_empty());
    }
}
