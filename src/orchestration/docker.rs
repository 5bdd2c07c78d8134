//! Docker container runtime
//!
//! Implements the ContainerRuntime trait by shelling out to the `docker`
//! CLI via tokio process execution.

use crate::error::{WsforgeError, WsforgeResult};
use crate::orchestration::runtime::ContainerRuntime;
use crate::orchestration::{ContainerSpec, VolumeSpec};
use async_trait::async_trait;
use std::process::Stdio;
use tokio::process::Command;
use tracing::{debug, info};

/// Container runtime backed by the Docker CLI
pub struct DockerRuntime;

impl DockerRuntime {
    pub fn new() -> Self {
        Self
    }

    /// Check if the Docker CLI is installed
    async fn docker_installed() -> bool {
        Command::new("docker")
            .arg("--version")
            .stdout(Stdio::null())
            .stderr(Stdio::null())
            .status()
            .await
            .map(|s| s.success())
            .unwrap_or(false)
    }

    /// Execute a Docker command and return the output
    async fn exec(&self, args: &[&str]) -> WsforgeResult<std::process::Output> {
        debug!("Executing: docker {:?}", args);

        Command::new("docker")
            .args(args)
            .stdout(Stdio::piped())
            .stderr(Stdio::piped())
            .output()
            .await
            .map_err(|e| WsforgeError::command_failed(format!("docker {:?}", args), e))
    }
}

impl Default for DockerRuntime {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl ContainerRuntime for DockerRuntime {
    async fn is_available(&self) -> WsforgeResult<bool> {
        if !Self::docker_installed().await {
            return Ok(false);
        }

        let output = self.exec(&["info", "--format", "{{.ServerVersion}}"]).await?;
        Ok(output.status.success())
    }

    async fn create_container(&self, spec: &ContainerSpec) -> WsforgeResult<String> {
        let mut args = vec![
            "run".to_string(),
            "-d".to_string(),
            "--name".to_string(),
            spec.name.clone(),
            "--hostname".to_string(),
            spec.hostname.clone(),
        ];

        for volume in &spec.volumes {
            args.push("-v".to_string());
            args.push(volume.clone());
        }

        for host in &spec.extra_hosts {
            args.push("--add-host".to_string());
            args.push(host.clone());
        }

        for kv in &spec.env {
            args.push("-e".to_string());
            args.push(kv.clone());
        }

        for (key, value) in &spec.labels {
            args.push("--label".to_string());
            args.push(format!("{}={}", key, value));
        }

        args.push(spec.image.clone());

        debug!("Creating container: docker {:?}", args);

        let args_refs: Vec<&str> = args.iter().map(String::as_str).collect();
        let output = self.exec(&args_refs).await?;

        if output.status.success() {
            let container_id = String::from_utf8_lossy(&output.stdout).trim().to_string();
            info!(
                "Container started: {}",
                &container_id[..12.min(container_id.len())]
            );
            Ok(container_id)
        } else {
            let stderr = String::from_utf8_lossy(&output.stderr);
            Err(WsforgeError::ContainerStart(stderr.to_string()))
        }
    }

    async fn container_exists(&self, name: &str) -> WsforgeResult<bool> {
        let output = self.exec(&["container", "inspect", name]).await?;
        Ok(output.status.success())
    }

    async fn stop_container(&self, name: &str) -> WsforgeResult<()> {
        debug!("Stopping container: {}", name);

        let output = self.exec(&["stop", name]).await?;

        if output.status.success() {
            Ok(())
        } else {
            let stderr = String::from_utf8_lossy(&output.stderr);
            if stderr.to_lowercase().contains("no such container") {
                Ok(())
            } else {
                Err(WsforgeError::command_exec("docker stop", stderr))
            }
        }
    }

    async fn remove_container(&self, name: &str) -> WsforgeResult<()> {
        debug!("Removing container: {}", name);

        let output = self.exec(&["rm", "-f", name]).await?;

        if output.status.success() {
            Ok(())
        } else {
            let stderr = String::from_utf8_lossy(&output.stderr);
            if stderr.to_lowercase().contains("no such container") {
                Ok(())
            } else {
                Err(WsforgeError::command_exec("docker rm", stderr))
            }
        }
    }

    async fn ensure_volume(&self, spec: &VolumeSpec) -> WsforgeResult<()> {
        // Check-then-create: an existing volume is reused as-is, never
        // recreated on attribute drift.
        if self.volume_exists(&spec.name).await? {
            debug!("Volume {} already exists, reusing", spec.name);
            return Ok(());
        }

        let mut args = vec!["volume".to_string(), "create".to_string()];
        for (key, value) in &spec.labels {
            args.push("--label".to_string());
            args.push(format!("{}={}", key, value));
        }
        args.push(spec.name.clone());

        let args_refs: Vec<&str> = args.iter().map(String::as_str).collect();
        let output = self.exec(&args_refs).await?;

        if output.status.success() {
            info!("Volume created: {}", spec.name);
            Ok(())
        } else {
            let stderr = String::from_utf8_lossy(&output.stderr).to_string();
            // A concurrent create beat us to it; that is still "exists".
            if stderr.to_lowercase().contains("already exists") {
                Ok(())
            } else {
                Err(WsforgeError::VolumeCreate {
                    name: spec.name.clone(),
                    reason: stderr,
                })
            }
        }
    }

    async fn volume_exists(&self, name: &str) -> WsforgeResult<bool> {
        let output = self.exec(&["volume", "inspect", name]).await?;
        Ok(output.status.success())
    }

    fn runtime_name(&self) -> &'static str {
        "Docker"
    }
}
