//! Workspace lifecycle reconciliation
//!
//! One lifecycle event runs the full chain to completion: assemble the
//! environment, resolve the cache, select the image, ensure the persistent
//! volume, create the container, report metadata. Stopping removes the
//! container only; the volume survives every stop/start cycle.

use crate::agent::AgentParams;
use crate::cache::{self, CacheSettings};
use crate::config::Config;
use crate::error::WsforgeResult;
use crate::orchestration::{ContainerRuntime, ContainerSpec, VolumeSpec};
use crate::provision::env::{assemble, HOST_GATEWAY_ALIAS};
use crate::provision::image::{select_image, Provisioned};
use crate::provision::metadata::MetadataReport;
use crate::workspace::identity::{WorkspaceIdentity, HOME_MOUNT_PATH};
use crate::workspace::repo::RepositorySelection;
use tracing::{debug, info};

/// Result of a successful Stopped -> Running transition
#[derive(Debug)]
pub struct RunningWorkspace {
    /// Handle of the created container
    pub container_id: String,
    /// The image/environment pairing this cycle resolved
    pub provisioned: Provisioned,
    /// Facts published after reconciliation
    pub report: MetadataReport,
}

/// Drives lifecycle transitions against a container runtime
pub struct Reconciler<'a> {
    runtime: &'a dyn ContainerRuntime,
    config: &'a Config,
}

impl<'a> Reconciler<'a> {
    pub fn new(runtime: &'a dyn ContainerRuntime, config: &'a Config) -> Self {
        Self { runtime, config }
    }

    /// Ensure the persistent volume exists. Runs outside the lifecycle gate:
    /// the volume has cardinality 1 always and is reused as-is when present.
    pub async fn ensure_volume(&self, identity: &WorkspaceIdentity) -> WsforgeResult<()> {
        self.runtime
            .ensure_volume(&VolumeSpec {
                name: identity.volume_name(),
                labels: identity.labels(),
            })
            .await
    }

    /// Transition Stopped -> Running: run the full provisioning chain.
    ///
    /// Fails atomically: if container creation is rejected, no partial
    /// container is left behind and the error is surfaced to the caller.
    pub async fn start(
        &self,
        identity: &WorkspaceIdentity,
        repo: &RepositorySelection,
        repo_token: &str,
        agent: &AgentParams,
    ) -> WsforgeResult<RunningWorkspace> {
        let cache_settings = CacheSettings::from_config(&self.config.cache).await;

        let bundle = assemble(
            identity,
            repo.url(),
            repo_token,
            &cache_settings,
            &self.config.builder,
            agent,
        );
        debug!("Assembled {} environment entries", bundle.len());

        let outcome = cache::resolve(&cache_settings, repo.url(), &bundle).await?;
        let provisioned = select_image(outcome, &self.config.builder.image, bundle);

        self.ensure_volume(identity).await?;

        let spec = container_spec(identity, &provisioned);
        let container_id = match self.runtime.create_container(&spec).await {
            Ok(id) => id,
            Err(e) => {
                // No half-created container may be visible to the next cycle.
                let _ = self.runtime.remove_container(&spec.name).await;
                return Err(e);
            }
        };

        let report = MetadataReport::from_cycle(&provisioned, &self.config.cache.registry);
        report.publish();

        Ok(RunningWorkspace {
            container_id,
            provisioned,
            report,
        })
    }

    /// Transition Running -> Stopped: destroy the container and only the
    /// container. The persistent volume and its contents are preserved.
    pub async fn stop(&self, identity: &WorkspaceIdentity) -> WsforgeResult<()> {
        let name = identity.container_name();
        info!("Stopping workspace container {}", name);

        self.runtime.stop_container(&name).await?;
        self.runtime.remove_container(&name).await
    }

    /// Whether the workspace container currently exists
    pub async fn container_exists(&self, identity: &WorkspaceIdentity) -> WsforgeResult<bool> {
        self.runtime.container_exists(&identity.container_name()).await
    }
}

/// Build the container specification for one cycle
pub fn container_spec(identity: &WorkspaceIdentity, provisioned: &Provisioned) -> ContainerSpec {
    ContainerSpec {
        name: identity.container_name(),
        image: provisioned.image.reference().to_string(),
        hostname: identity.hostname().to_string(),
        env: provisioned.env.to_kv_strings(),
        volumes: vec![format!("{}:{}", identity.volume_name(), HOME_MOUNT_PATH)],
        extra_hosts: vec![format!("{}:host-gateway", HOST_GATEWAY_ALIAS)],
        labels: identity.labels(),
    }
}
