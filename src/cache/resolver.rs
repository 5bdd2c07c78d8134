//! Cache resolution
//!
//! Decides whether a previously built image for the selected repository
//! already exists in the cache registry. Resolution is idempotent and
//! side-effect free: re-running it with unchanged repository state performs
//! the same bounded probe and reaches the same outcome. A miss is never
//! fatal; the builder image performs the build at container start instead.

use crate::cache::registry::ManifestProbe;
use crate::cache::CacheSettings;
use crate::error::WsforgeResult;
use crate::provision::env::{vars, EnvironmentBundle};
use sha2::{Digest, Sha256};
use tracing::{debug, info, warn};

/// Environment keys that trigger a build or push inside the container.
/// A cache hit must not carry them: the cached image is already built, and
/// re-triggering a build would defeat the reuse.
const BUILD_TRIGGER_KEYS: &[&str] = &[
    vars::CACHE_REPO,
    vars::PUSH_IMAGE,
    vars::INSECURE,
    vars::DOCKER_CONFIG_BASE64,
    vars::FALLBACK_IMAGE,
];

/// Outcome of cache resolution for one provisioning cycle
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CacheOutcome {
    /// Cache registry not configured; no lookup performed
    Disabled,
    /// A prebuilt image exists; use it with the hit-path environment
    Hit {
        image: String,
        env: EnvironmentBundle,
    },
    /// No prebuilt image (or registry unavailable); the builder image
    /// builds at container start using the assembled environment
    Build { env: EnvironmentBundle },
}

impl CacheOutcome {
    /// The effective environment for this outcome, when one applies
    pub fn environment(&self) -> Option<&EnvironmentBundle> {
        match self {
            Self::Disabled => None,
            Self::Hit { env, .. } | Self::Build { env } => Some(env),
        }
    }
}

/// Deterministic cache tag for a repository URL
pub fn cache_tag(repo_url: &str) -> String {
    let digest = Sha256::digest(repo_url.as_bytes());
    hex::encode(digest)[..12].to_string()
}

/// Resolve the cache for one provisioning cycle.
///
/// Only called at lifecycle cardinality 1. With an empty registry address
/// this returns `Disabled` without any I/O. Registry unavailability is
/// recovered locally: it downgrades to `Build` with a warning so outages
/// are observable but never abort the cycle.
pub async fn resolve(
    cache: &CacheSettings,
    repo_url: &str,
    bundle: &EnvironmentBundle,
) -> WsforgeResult<CacheOutcome> {
    if !cache.enabled() {
        debug!("Cache registry not configured, skipping resolution");
        return Ok(CacheOutcome::Disabled);
    }

    let tag = cache_tag(repo_url);
    let probe = ManifestProbe::new(cache, &tag);

    let result = tokio::task::spawn_blocking(move || probe.check())
        .await
        .map_err(|e| crate::error::WsforgeError::Internal(e.to_string()))?;

    match result {
        Ok(true) => {
            let image = format!("{}:{}", cache.registry, tag);
            info!("Cache hit: {}", image);
            Ok(CacheOutcome::Hit {
                image,
                env: hit_environment(bundle),
            })
        }
        Ok(false) => {
            info!("Cache miss for tag {}, building at container start", tag);
            Ok(CacheOutcome::Build {
                env: bundle.clone(),
            })
        }
        Err(e) if e.is_recoverable() => {
            // Fall back to the non-cache path; this is deliberately loud so
            // a registry outage does not masquerade as an ordinary miss.
            warn!("Cache registry unavailable, falling back to build: {}", e);
            Ok(CacheOutcome::Build {
                env: bundle.clone(),
            })
        }
        Err(e) => Err(e),
    }
}

/// Derive the hit-path environment: the frozen git URL and agent variables
/// are kept, the build/push trigger variables are stripped.
fn hit_environment(bundle: &EnvironmentBundle) -> EnvironmentBundle {
    let mut env = bundle.clone();
    for key in BUILD_TRIGGER_KEYS {
        env.remove(key);
    }
    env
}

#[cfg(test)]
mod tests {
    use super::*;

    fn bundle() -> EnvironmentBundle {
        let mut env = EnvironmentBundle::new();
        env.set(vars::GIT_URL, "https://example.com/org/repo");
        env.set(vars::CACHE_REPO, "registry.example.com/cache");
        env.set(vars::PUSH_IMAGE, "true");
        env.set(vars::INSECURE, "false");
        env.set(vars::DOCKER_CONFIG_BASE64, "");
        env.set(vars::FALLBACK_IMAGE, "codercom/enterprise-base:ubuntu");
        env.set(vars::AGENT_TOKEN, "token-1");
        env
    }

    #[test]
    fn cache_tag_is_deterministic() {
        let a = cache_tag("https://example.com/org/repo");
        let b = cache_tag("https://example.com/org/repo");
        assert_eq!(a, b);
        assert_eq!(a.len(), 12);
    }

    #[test]
    fn cache_tag_differs_per_repository() {
        assert_ne!(
            cache_tag("https://example.com/org/repo"),
            cache_tag("https://example.com/org/other")
        );
    }

    #[test]
    fn hit_environment_strips_build_triggers() {
        let env = hit_environment(&bundle());

        assert_eq!(env.get(vars::GIT_URL), Some("https://example.com/org/repo"));
        assert_eq!(env.get(vars::AGENT_TOKEN), Some("token-1"));
        for key in BUILD_TRIGGER_KEYS {
            assert!(!env.contains(key), "{key} should be stripped on hit");
        }
    }

    #[tokio::test]
    async fn disabled_cache_skips_lookup() {
        let outcome = resolve(&CacheSettings::default(), "https://example.com/org/repo", &bundle())
            .await
            .unwrap();
        assert_eq!(outcome, CacheOutcome::Disabled);
        assert!(outcome.environment().is_none());
    }

    #[tokio::test]
    async fn unreachable_registry_falls_back_to_build() {
        // Reserved TEST-NET-1 address: the probe fails fast and resolution
        // must degrade to the build path instead of erroring.
        let cache = CacheSettings {
            registry: "192.0.2.1/cache".to_string(),
            insecure: true,
            credentials: None,
        };

        let input = bundle();
        let outcome = resolve(&cache, "https://example.com/org/repo", &input)
            .await
            .unwrap();

        match outcome {
            CacheOutcome::Build { env } => assert_eq!(env, input),
            other => panic!("expected Build fallback, got {other:?}"),
        }
    }
}
