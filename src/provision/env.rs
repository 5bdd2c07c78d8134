//! Environment assembly
//!
//! Builds the canonical key/value environment a workspace container receives.
//! `assemble` is a pure function of its inputs: no I/O, deterministic output
//! order, safe defaults for every optional input.

use crate::agent::AgentParams;
use crate::cache::CacheSettings;
use crate::config::schema::BuilderConfig;
use crate::workspace::identity::WorkspaceIdentity;
use base64::{engine::general_purpose::STANDARD, Engine as _};

/// Host-gateway alias reachable from inside the container
pub const HOST_GATEWAY_ALIAS: &str = "host.docker.internal";

/// Environment variable names consumed by the builder and the agent
pub mod vars {
    pub const GIT_URL: &str = "ENVBUILDER_GIT_URL";
    pub const GIT_USERNAME: &str = "ENVBUILDER_GIT_USERNAME";
    pub const CACHE_REPO: &str = "ENVBUILDER_CACHE_REPO";
    pub const PUSH_IMAGE: &str = "ENVBUILDER_PUSH_IMAGE";
    pub const INSECURE: &str = "ENVBUILDER_INSECURE";
    pub const DOCKER_CONFIG_BASE64: &str = "ENVBUILDER_DOCKER_CONFIG_BASE64";
    pub const FALLBACK_IMAGE: &str = "ENVBUILDER_FALLBACK_IMAGE";
    pub const INIT_SCRIPT: &str = "ENVBUILDER_INIT_SCRIPT";
    pub const AGENT_TOKEN: &str = "CODER_AGENT_TOKEN";
    pub const AGENT_URL: &str = "CODER_AGENT_URL";
    pub const GIT_AUTHOR_NAME: &str = "GIT_AUTHOR_NAME";
    pub const GIT_AUTHOR_EMAIL: &str = "GIT_AUTHOR_EMAIL";
    pub const GIT_COMMITTER_NAME: &str = "GIT_COMMITTER_NAME";
    pub const GIT_COMMITTER_EMAIL: &str = "GIT_COMMITTER_EMAIL";
}

/// Ordered, deduplicating environment mapping
///
/// Insertion order is preserved so repeated assembly with equal inputs
/// yields byte-identical `KEY=VALUE` sequences.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct EnvironmentBundle {
    entries: Vec<(String, String)>,
}

impl EnvironmentBundle {
    pub fn new() -> Self {
        Self::default()
    }

    /// Set a key, replacing an existing value in place
    pub fn set(&mut self, key: impl Into<String>, value: impl Into<String>) {
        let key = key.into();
        let value = value.into();
        if let Some(entry) = self.entries.iter_mut().find(|(k, _)| *k == key) {
            entry.1 = value;
        } else {
            self.entries.push((key, value));
        }
    }

    /// Get a value by key
    pub fn get(&self, key: &str) -> Option<&str> {
        self.entries
            .iter()
            .find(|(k, _)| k == key)
            .map(|(_, v)| v.as_str())
    }

    /// Remove a key, returning its value if present
    pub fn remove(&mut self, key: &str) -> Option<String> {
        let pos = self.entries.iter().position(|(k, _)| k == key)?;
        Some(self.entries.remove(pos).1)
    }

    pub fn contains(&self, key: &str) -> bool {
        self.get(key).is_some()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.entries.iter().map(|(k, v)| (k.as_str(), v.as_str()))
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Render as `KEY=VALUE` strings for the container runtime
    pub fn to_kv_strings(&self) -> Vec<String> {
        self.entries
            .iter()
            .map(|(k, v)| format!("{}={}", k, v))
            .collect()
    }
}

/// Rewrite loopback endpoints to the host-gateway alias.
///
/// A process inside the container cannot reach the host's loopback
/// interface, so `localhost` and `127.0.0.1` are substituted with an alias
/// resolvable through the host gateway. The substitution is idempotent:
/// the alias contains neither source substring, so applying it twice is a
/// no-op beyond the first application. Non-loopback values pass through
/// unchanged.
pub fn rewrite_loopback(value: &str) -> String {
    value
        .replace("localhost", HOST_GATEWAY_ALIAS)
        .replace("127.0.0.1", HOST_GATEWAY_ALIAS)
}

/// Assemble the canonical environment for one provisioning cycle.
///
/// Pure and deterministic: the same inputs always produce the same bundle,
/// in the same order. Loopback rewriting applies to exactly two fields, the
/// platform access URL and the init script.
pub fn assemble(
    identity: &WorkspaceIdentity,
    repo_url: &str,
    repo_token: &str,
    cache: &CacheSettings,
    builder: &BuilderConfig,
    agent: &AgentParams,
) -> EnvironmentBundle {
    let mut env = EnvironmentBundle::new();

    env.set(vars::GIT_URL, repo_url);
    env.set(vars::GIT_USERNAME, repo_token);

    env.set(vars::CACHE_REPO, cache.registry.as_str());
    // Push is enabled iff a cache registry is configured; the consuming
    // systems expect textual booleans, with "" meaning disabled.
    env.set(
        vars::PUSH_IMAGE,
        if cache.enabled() { "true" } else { "" },
    );
    env.set(
        vars::INSECURE,
        if cache.insecure { "true" } else { "false" },
    );
    env.set(
        vars::DOCKER_CONFIG_BASE64,
        cache
            .credentials
            .as_deref()
            .map(|bytes| STANDARD.encode(bytes))
            .unwrap_or_default(),
    );

    env.set(vars::FALLBACK_IMAGE, builder.fallback_image.as_str());
    env.set(vars::INIT_SCRIPT, rewrite_loopback(&agent.init_script));

    env.set(vars::AGENT_TOKEN, agent.token.as_str());
    env.set(vars::AGENT_URL, rewrite_loopback(&agent.access_url));

    env.set(vars::GIT_AUTHOR_NAME, identity.owner_name.as_str());
    env.set(vars::GIT_AUTHOR_EMAIL, identity.owner_email.as_str());
    env.set(vars::GIT_COMMITTER_NAME, identity.owner_name.as_str());
    env.set(vars::GIT_COMMITTER_EMAIL, identity.owner_email.as_str());

    env
}
