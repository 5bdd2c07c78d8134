//! Metadata reporting
//!
//! After a successful Running-state reconciliation a small, fixed set of
//! derived facts is published for observability. Nothing is reported while
//! the lifecycle cardinality is 0.

use crate::provision::env::vars;
use crate::provision::image::Provisioned;
use serde::{Deserialize, Serialize};
use std::fmt;
use tracing::info;

/// Sentinel value reported when no cache registry is configured
pub const CACHE_NOT_ENABLED: &str = "not enabled";

/// Facts reported after provisioning completes
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MetadataReport {
    /// Resolved container image reference
    pub image: String,
    /// Repository URL the workspace was provisioned from
    pub repository_url: String,
    /// Cache registry address, or the "not enabled" sentinel
    pub cache_registry: String,
}

impl MetadataReport {
    /// Derive the report from a finished provisioning cycle
    pub fn from_cycle(provisioned: &Provisioned, cache_registry: &str) -> Self {
        Self {
            image: provisioned.image.reference().to_string(),
            repository_url: provisioned
                .env
                .get(vars::GIT_URL)
                .unwrap_or_default()
                .to_string(),
            cache_registry: if cache_registry.is_empty() {
                CACHE_NOT_ENABLED.to_string()
            } else {
                cache_registry.to_string()
            },
        }
    }

    /// Publish the report to the log stream
    pub fn publish(&self) {
        info!(
            image = %self.image,
            repository = %self.repository_url,
            cache = %self.cache_registry,
            "Workspace provisioned"
        );
    }
}

impl fmt::Display for MetadataReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "  image:      {}", self.image)?;
        writeln!(f, "  repository: {}", self.repository_url)?;
        write!(f, "  cache:      {}", self.cache_registry)
    }
}
