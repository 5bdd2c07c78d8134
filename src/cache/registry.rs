//! Cache registry probe
//!
//! Checks whether a manifest for a given tag exists in the cache registry
//! using the registry v2 HTTP API. The probe is the only network call in a
//! provisioning cycle and runs with a bounded timeout; callers treat any
//! failure as "no cached image" rather than blocking or aborting.

use crate::cache::CacheSettings;
use crate::error::{WsforgeError, WsforgeResult};
use base64::{engine::general_purpose::STANDARD, Engine as _};
use std::time::Duration;
use tracing::debug;

/// Bounded wait for the manifest probe
pub const PROBE_TIMEOUT: Duration = Duration::from_secs(5);

const MANIFEST_ACCEPT: &str = "application/vnd.oci.image.manifest.v1+json, \
     application/vnd.docker.distribution.manifest.v2+json";

/// A prepared manifest probe request
#[derive(Debug, Clone)]
pub struct ManifestProbe {
    url: String,
    registry: String,
    authorization: Option<String>,
}

impl ManifestProbe {
    /// Build a probe for `{registry}/v2/{repository}/manifests/{tag}`.
    ///
    /// The registry address is `host[/path…]`; the scheme follows the
    /// insecure flag. Credentials, when present, are attached as Basic auth
    /// derived from the first entry of a Docker config JSON.
    pub fn new(cache: &CacheSettings, tag: &str) -> Self {
        let scheme = if cache.insecure { "http" } else { "https" };
        let (host, repository) = match cache.registry.split_once('/') {
            Some((host, path)) => (host, path),
            None => (cache.registry.as_str(), "cache"),
        };

        Self {
            url: format!("{scheme}://{host}/v2/{repository}/manifests/{tag}"),
            registry: cache.registry.clone(),
            authorization: cache
                .credentials
                .as_deref()
                .and_then(basic_auth_from_docker_config),
        }
    }

    /// Execute the probe. `Ok(true)` means the manifest exists, `Ok(false)`
    /// means the registry answered but has no such manifest. Transport
    /// failures and unexpected statuses are errors the caller recovers from.
    pub fn check(&self) -> WsforgeResult<bool> {
        debug!("Probing cache registry: {}", self.url);

        let agent: ureq::Agent = ureq::Agent::config_builder()
            .timeout_global(Some(PROBE_TIMEOUT))
            .build()
            .into();

        let mut request = agent.head(&self.url).header("Accept", MANIFEST_ACCEPT);
        if let Some(auth) = &self.authorization {
            request = request.header("Authorization", auth);
        }

        match request.call() {
            Ok(_) => Ok(true),
            Err(ureq::Error::StatusCode(404)) => Ok(false),
            Err(ureq::Error::StatusCode(code)) => Err(WsforgeError::RegistryProbe {
                registry: self.registry.clone(),
                reason: format!("unexpected status {code}"),
            }),
            Err(e) => Err(WsforgeError::RegistryUnreachable {
                registry: self.registry.clone(),
                reason: e.to_string(),
            }),
        }
    }

    /// The manifest URL this probe targets
    pub fn url(&self) -> &str {
        &self.url
    }
}

/// Extract a Basic authorization header from Docker config JSON contents.
///
/// Accepts either a pre-encoded `auth` field or a `username`/`password`
/// pair. Malformed content yields no credentials; that is the credential
/// provider's failure, not ours.
fn basic_auth_from_docker_config(bytes: &[u8]) -> Option<String> {
    let config: serde_json::Value = serde_json::from_slice(bytes).ok()?;
    let auths = config.get("auths")?.as_object()?;
    let entry = auths.values().next()?;

    if let Some(auth) = entry.get("auth").and_then(|v| v.as_str()) {
        return Some(format!("Basic {auth}"));
    }

    let username = entry.get("username")?.as_str()?;
    let password = entry.get("password")?.as_str()?;
    Some(format!(
        "Basic {}",
        STANDARD.encode(format!("{username}:{password}"))
    ))
}
