//! Remote build cache: settings, registry probe and resolution

pub mod registry;
pub mod resolver;

pub use resolver::{resolve, CacheOutcome};

use crate::config::schema::CacheConfig;
use tokio::fs;
use tracing::warn;

/// Effective cache inputs for one provisioning cycle
///
/// Credential material is read once here so everything downstream (the
/// environment assembler, the registry probe) stays free of file I/O. A
/// missing or unreadable credentials file never fails provisioning; it just
/// means no credentials are attached.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CacheSettings {
    /// Cache registry address (empty = disabled)
    pub registry: String,
    /// Allow insecure (plain HTTP) transport
    pub insecure: bool,
    /// Raw registry credentials file contents, when configured and readable
    pub credentials: Option<Vec<u8>>,
}

impl CacheSettings {
    /// Build effective settings from configuration, reading the credentials
    /// file when a path is configured.
    pub async fn from_config(config: &CacheConfig) -> Self {
        let credentials = if config.credentials_file.is_empty() {
            None
        } else {
            match fs::read(&config.credentials_file).await {
                Ok(bytes) => Some(bytes),
                Err(e) => {
                    warn!(
                        "Cache credentials file {} unreadable, continuing without credentials: {}",
                        config.credentials_file, e
                    );
                    None
                }
            }
        };

        Self {
            registry: config.registry.clone(),
            insecure: config.insecure,
            credentials,
        }
    }

    /// Whether the cache is enabled at all
    pub fn enabled(&self) -> bool {
        !self.registry.is_empty()
    }
}
