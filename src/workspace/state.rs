//! Workspace state persistence
//!
//! One JSON record per workspace under the state directory. The record
//! carries the lifecycle cardinality, the container handle and the last
//! reported metadata; the stable owner/workspace ids are minted on first
//! provisioning and reused for the workspace's lifetime.

use crate::config::ConfigManager;
use crate::error::{WsforgeError, WsforgeResult};
use crate::provision::metadata::MetadataReport;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::path::PathBuf;
use tokio::fs;
use uuid::Uuid;

/// Lifecycle cardinality: whether "running" resources exist at all.
///
/// Governs existence, not configuration. The persistent volume always has
/// cardinality 1 and is not covered by this signal.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Cardinality {
    Stopped,
    Running,
}

impl Cardinality {
    /// The 0/1 count this state corresponds to
    pub fn count(&self) -> u8 {
        match self {
            Self::Stopped => 0,
            Self::Running => 1,
        }
    }

    pub fn is_running(&self) -> bool {
        matches!(self, Self::Running)
    }
}

/// Persisted record for one workspace
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct WorkspaceRecord {
    /// Workspace stable id
    pub workspace_id: Uuid,

    /// Owner stable id
    pub owner_id: Uuid,

    /// Human-readable workspace name
    pub name: String,

    /// Owner login
    pub owner: String,

    /// Current lifecycle cardinality
    pub cardinality: Cardinality,

    /// Container ID (present only while running)
    pub container_id: Option<String>,

    /// Metadata reported after the last successful reconciliation
    pub last_report: Option<MetadataReport>,

    /// When the workspace was first provisioned
    pub created_at: DateTime<Utc>,

    /// When the record was last updated
    pub updated_at: DateTime<Utc>,
}

impl WorkspaceRecord {
    /// Create a fresh record for a never-provisioned workspace
    pub fn new(name: String, owner: String) -> Self {
        let now = Utc::now();
        Self {
            workspace_id: Uuid::new_v4(),
            owner_id: Uuid::new_v4(),
            name,
            owner,
            cardinality: Cardinality::Stopped,
            container_id: None,
            last_report: None,
            created_at: now,
            updated_at: now,
        }
    }

    /// Get the record file path for a workspace name
    pub fn path_for(name: &str) -> PathBuf {
        ConfigManager::workspaces_dir().join(format!("{}.json", name))
    }

    /// Get this record's file path
    pub fn file_path(&self) -> PathBuf {
        Self::path_for(&self.name)
    }

    /// Load a record by workspace name
    pub async fn load(name: &str) -> WsforgeResult<Option<Self>> {
        let path = Self::path_for(name);

        if !path.exists() {
            return Ok(None);
        }

        let content = fs::read_to_string(&path).await.map_err(|e| {
            WsforgeError::io(format!("reading workspace record {}", path.display()), e)
        })?;

        let record: WorkspaceRecord = serde_json::from_str(&content)?;
        Ok(Some(record))
    }

    /// Save this record
    pub async fn save(&self) -> WsforgeResult<()> {
        let path = self.file_path();

        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)
                .await
                .map_err(|e| WsforgeError::io("creating workspaces directory", e))?;
        }

        let content = serde_json::to_string_pretty(self)?;
        fs::write(&path, content).await.map_err(|e| {
            WsforgeError::StatePersist(format!("{}: {}", path.display(), e))
        })?;

        Ok(())
    }

    /// Mark the record running with its container handle and report
    pub fn mark_running(&mut self, container_id: String, report: MetadataReport) {
        self.cardinality = Cardinality::Running;
        self.container_id = Some(container_id);
        self.last_report = Some(report);
        self.updated_at = Utc::now();
    }

    /// Mark the record stopped; the container handle is gone, the volume stays
    pub fn mark_stopped(&mut self) {
        self.cardinality = Cardinality::Stopped;
        self.container_id = None;
        self.updated_at = Utc::now();
    }
}
