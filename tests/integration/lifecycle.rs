//! Lifecycle reconciliation tests against an in-memory container runtime
//!
//! Exercises the full provisioning chain without Docker: start/stop
//! transitions, volume persistence across cycles, idempotence of the
//! resolved image and environment, and atomic failure of creation.

use async_trait::async_trait;
use std::collections::HashMap;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Mutex;
use uuid::Uuid;
use wsforge::agent::AgentParams;
use wsforge::config::Config;
use wsforge::error::{WsforgeError, WsforgeResult};
use wsforge::orchestration::{ContainerRuntime, ContainerSpec, VolumeSpec};
use wsforge::provision::env::vars;
use wsforge::provision::ResolvedImage;
use wsforge::workspace::{Reconciler, RepositorySelection, WorkspaceIdentity};

/// In-memory fake volume: labels plus simulated file contents
#[derive(Default)]
struct FakeVolume {
    labels: HashMap<String, String>,
    files: Vec<String>,
}

/// In-memory container runtime
#[derive(Default)]
struct FakeRuntime {
    containers: Mutex<HashMap<String, ContainerSpec>>,
    volumes: Mutex<HashMap<String, FakeVolume>>,
    fail_create: AtomicBool,
}

impl FakeRuntime {
    fn new() -> Self {
        Self::default()
    }

    fn container(&self, name: &str) -> Option<ContainerSpec> {
        self.containers.lock().unwrap().get(name).cloned()
    }

    fn write_file(&self, volume: &str, file: &str) {
        self.volumes
            .lock()
            .unwrap()
            .get_mut(volume)
            .expect("volume must exist")
            .files
            .push(file.to_string());
    }

    fn volume_label(&self, volume: &str, key: &str) -> Option<String> {
        self.volumes
            .lock()
            .unwrap()
            .get(volume)
            .and_then(|v| v.labels.get(key).cloned())
    }

    fn has_file(&self, volume: &str, file: &str) -> bool {
        self.volumes
            .lock()
            .unwrap()
            .get(volume)
            .map(|v| v.files.iter().any(|f| f == file))
            .unwrap_or(false)
    }
}

#[async_trait]
impl ContainerRuntime for FakeRuntime {
    async fn is_available(&self) -> WsforgeResult<bool> {
        Ok(true)
    }

    async fn create_container(&self, spec: &ContainerSpec) -> WsforgeResult<String> {
        if self.fail_create.load(Ordering::SeqCst) {
            return Err(WsforgeError::ContainerStart("injected failure".to_string()));
        }
        self.containers
            .lock()
            .unwrap()
            .insert(spec.name.clone(), spec.clone());
        Ok(format!("fake-{}", spec.name))
    }

    async fn container_exists(&self, name: &str) -> WsforgeResult<bool> {
        Ok(self.containers.lock().unwrap().contains_key(name))
    }

    async fn stop_container(&self, _name: &str) -> WsforgeResult<()> {
        Ok(())
    }

    async fn remove_container(&self, name: &str) -> WsforgeResult<()> {
        self.containers.lock().unwrap().remove(name);
        Ok(())
    }

    async fn ensure_volume(&self, spec: &VolumeSpec) -> WsforgeResult<()> {
        // Reuse an existing volume untouched, matching the check-then-create
        // reconciliation rule.
        self.volumes
            .lock()
            .unwrap()
            .entry(spec.name.clone())
            .or_insert_with(|| FakeVolume {
                labels: spec.labels.clone(),
                files: Vec::new(),
            });
        Ok(())
    }

    async fn volume_exists(&self, name: &str) -> WsforgeResult<bool> {
        Ok(self.volumes.lock().unwrap().contains_key(name))
    }

    fn runtime_name(&self) -> &'static str {
        "Fake"
    }
}

fn identity() -> WorkspaceIdentity {
    WorkspaceIdentity {
        owner_name: "Alice".to_string(),
        owner_login: "alice".to_string(),
        owner_id: Uuid::nil(),
        owner_email: "alice@example.com".to_string(),
        workspace_name: "Demo".to_string(),
        workspace_id: Uuid::nil(),
    }
}

fn config() -> Config {
    let mut config = Config::default();
    config.workspace.name = "Demo".to_string();
    config.repo.custom_url = "https://example.com/org/repo".to_string();
    config
}

fn agent() -> AgentParams {
    AgentParams {
        token: "fixed-token".to_string(),
        access_url: "http://localhost:3000".to_string(),
        init_script: String::new(),
    }
}

fn repo(config: &Config) -> RepositorySelection {
    RepositorySelection::from_config(&config.repo).unwrap()
}

#[tokio::test]
async fn up_provisions_container_and_volume() {
    let runtime = FakeRuntime::new();
    let config = config();
    let reconciler = Reconciler::new(&runtime, &config);
    let workspace = identity();

    let running = reconciler
        .start(&workspace, &repo(&config), "", &agent())
        .await
        .unwrap();

    assert_eq!(running.container_id, "fake-coder-alice-demo");
    assert!(runtime.container("coder-alice-demo").is_some());
    assert!(runtime.volume_exists("coder-alice-demo-home").await.unwrap());
    assert_eq!(
        runtime.volume_label("coder-alice-demo-home", "io.wsforge.owner"),
        Some("alice".to_string())
    );

    // cache disabled: builder image and assembled environment
    assert_eq!(
        running.provisioned.image,
        ResolvedImage::Builder("ghcr.io/coder/envbuilder:latest".to_string())
    );
    assert_eq!(
        running.provisioned.env.get(vars::GIT_URL),
        Some("https://example.com/org/repo")
    );
    assert_eq!(running.provisioned.env.get(vars::PUSH_IMAGE), Some(""));

    // the container receives the same environment
    let spec = runtime.container("coder-alice-demo").unwrap();
    assert!(spec
        .env
        .contains(&"ENVBUILDER_GIT_URL=https://example.com/org/repo".to_string()));
    assert_eq!(spec.hostname, "Demo");
    assert_eq!(
        spec.extra_hosts,
        vec!["host.docker.internal:host-gateway".to_string()]
    );
}

#[tokio::test]
async fn metadata_reports_sentinel_without_cache() {
    let runtime = FakeRuntime::new();
    let config = config();
    let reconciler = Reconciler::new(&runtime, &config);

    let running = reconciler
        .start(&identity(), &repo(&config), "", &agent())
        .await
        .unwrap();

    assert_eq!(running.report.cache_registry, "not enabled");
    assert_eq!(running.report.image, "ghcr.io/coder/envbuilder:latest");
    assert_eq!(running.report.repository_url, "https://example.com/org/repo");
}

#[tokio::test]
async fn stop_start_preserves_volume_contents() {
    let runtime = FakeRuntime::new();
    let config = config();
    let reconciler = Reconciler::new(&runtime, &config);
    let workspace = identity();

    reconciler
        .start(&workspace, &repo(&config), "", &agent())
        .await
        .unwrap();

    // a file written during the first Running period
    runtime.write_file("coder-alice-demo-home", ".bash_history");

    reconciler.stop(&workspace).await.unwrap();
    assert!(!runtime.container_exists("coder-alice-demo").await.unwrap());
    assert!(runtime.volume_exists("coder-alice-demo-home").await.unwrap());

    reconciler
        .start(&workspace, &repo(&config), "", &agent())
        .await
        .unwrap();

    assert!(runtime.has_file("coder-alice-demo-home", ".bash_history"));
}

#[tokio::test]
async fn repeated_start_is_idempotent() {
    let runtime = FakeRuntime::new();
    let config = config();
    let reconciler = Reconciler::new(&runtime, &config);
    let workspace = identity();

    let first = reconciler
        .start(&workspace, &repo(&config), "", &agent())
        .await
        .unwrap();
    reconciler.stop(&workspace).await.unwrap();
    let second = reconciler
        .start(&workspace, &repo(&config), "", &agent())
        .await
        .unwrap();

    assert_eq!(first.provisioned, second.provisioned);
    assert_eq!(first.report, second.report);
}

#[tokio::test]
async fn failed_creation_leaves_no_container() {
    let runtime = FakeRuntime::new();
    runtime.fail_create.store(true, Ordering::SeqCst);
    let config = config();
    let reconciler = Reconciler::new(&runtime, &config);
    let workspace = identity();

    let err = reconciler
        .start(&workspace, &repo(&config), "", &agent())
        .await
        .unwrap_err();
    assert!(matches!(err, WsforgeError::ContainerStart(_)));

    assert!(!runtime.container_exists("coder-alice-demo").await.unwrap());
    // the volume is provisioned independently of the failed container
    assert!(runtime.volume_exists("coder-alice-demo-home").await.unwrap());
}

#[tokio::test]
async fn no_cache_lookup_or_container_while_stopped() {
    let runtime = FakeRuntime::new();
    let mut config = config();
    config.cache.registry = "registry.example.com/cache".to_string();
    let reconciler = Reconciler::new(&runtime, &config);
    let workspace = identity();

    // Stopped state: nothing has been started, so no container exists even
    // with a cache registry configured.
    assert!(!reconciler.container_exists(&workspace).await.unwrap());
    assert!(runtime.containers.lock().unwrap().is_empty());
}
