//! Workspace agent collaborator
//!
//! The agent runs inside the container: it connects back to the platform
//! access URL with a per-cycle connection token, runs the init script, and
//! samples host metadata on fixed intervals. Provisioning only consumes the
//! connection parameters; the sampling schedule is purely observational.

use crate::config::schema::AgentConfig;
use uuid::Uuid;

/// Connection parameters issued for one provisioning cycle
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AgentParams {
    /// Connection token the agent authenticates with
    pub token: String,
    /// Platform access URL, as configured (loopback rewrite happens at assembly)
    pub access_url: String,
    /// Startup script run once the workspace is up
    pub init_script: String,
}

impl AgentParams {
    /// Issue fresh connection parameters for a provisioning cycle
    pub fn issue(config: &AgentConfig) -> Self {
        Self {
            token: Uuid::new_v4().to_string(),
            access_url: config.access_url.clone(),
            init_script: config.init_script.clone(),
        }
    }
}

/// One periodic metadata sample the agent reports
#[derive(Debug, Clone, Copy)]
pub struct MetadataSample {
    /// Stable key the sample is reported under
    pub key: &'static str,
    /// Display name
    pub display_name: &'static str,
    /// Shell one-liner producing the sample value
    pub script: &'static str,
    /// Sampling interval in seconds
    pub interval_secs: u64,
    /// Per-sample timeout in seconds
    pub timeout_secs: u64,
}

/// Fixed sampling schedule reported by the agent
pub const METADATA_SAMPLES: &[MetadataSample] = &[
    MetadataSample {
        key: "cpu_usage",
        display_name: "CPU Usage",
        script: "top -bn1 | awk 'FNR==3 {printf \"%2.0f%%\", $2+$3+$4}'",
        interval_secs: 10,
        timeout_secs: 1,
    },
    MetadataSample {
        key: "ram_usage",
        display_name: "RAM Usage",
        script: "free -m | awk '/^Mem/ {printf \"%2.0f%%\", $3/$2*100}'",
        interval_secs: 10,
        timeout_secs: 1,
    },
    MetadataSample {
        key: "home_disk",
        display_name: "Home Disk",
        script: "df -h /workspace | awk 'FNR==2 {print $5}'",
        interval_secs: 60,
        timeout_secs: 1,
    },
    MetadataSample {
        key: "load_average",
        display_name: "Load Average",
        script: "awk '{print $1}' /proc/loadavg",
        interval_secs: 60,
        timeout_secs: 1,
    },
    MetadataSample {
        key: "swap_usage",
        display_name: "Swap Usage",
        script: "free -m | awk '/^Swap/ {if ($2>0) printf \"%2.0f%%\", $3/$2*100; else print \"0%\"}'",
        interval_secs: 60,
        timeout_secs: 1,
    },
];
