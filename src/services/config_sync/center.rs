use std::path::PathBuf;

use async_trait::async_trait;
use serde::{Deserialize, Serialize};

use super::CenterError;

/// Identity of this device as reported to the central authority.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct DevMeta {
    /// Device kind, e.g. "fridge".
    #[serde(rename = "type")]
    pub device_type: String,
    /// Human-readable device name.
    pub name: String,
    /// Hardware address.
    pub mac: String,
}

/// Request for the full initial configuration.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct InitConfigRequest {
    /// Request time in nanoseconds since the Unix epoch.
    pub time: i64,
    /// Identity of the requesting device.
    pub meta: DevMeta,
}

/// Reply carrying the encoded initial configuration.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct InitConfigResponse {
    /// JSON-encoded configuration record.
    pub config: Vec<u8>,
}

/// Inbound configuration patch pushed by the central authority.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PatchRequest {
    /// JSON-encoded configuration patch.
    pub config: Vec<u8>,
}

impl PatchRequest {
    /// Wraps raw payload bytes.
    pub fn new(config: impl Into<Vec<u8>>) -> Self {
        Self {
            config: config.into(),
        }
    }
}

/// Acknowledgement returned for a patch request.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PatchAck {
    /// "OK" on success, "ERROR" otherwise.
    pub status: String,
    /// Failure description for error acknowledgements.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
}

impl PatchAck {
    /// Status string of an accepted patch.
    pub const OK: &'static str = "OK";
    /// Status string of a rejected patch.
    pub const ERROR: &'static str = "ERROR";

    /// Successful acknowledgement.
    pub fn ok() -> Self {
        Self {
            status: Self::OK.to_string(),
            message: None,
        }
    }

    /// Error acknowledgement carrying `message`.
    pub fn error(message: impl Into<String>) -> Self {
        Self {
            status: Self::ERROR.to_string(),
            message: Some(message.into()),
        }
    }

    /// True for an "OK" acknowledgement.
    pub fn is_ok(&self) -> bool {
        self.status == Self::OK
    }
}

/// Request/response boundary to the central authority.
///
/// Transport and wire framing live behind this trait; the agent only sees
/// decoded requests and raw configuration payloads.
#[async_trait]
pub trait CenterClient: Send + Sync {
    /// Asks the authority for the device's initial configuration.
    async fn fetch_init_config(
        &self,
        request: InitConfigRequest,
    ) -> Result<InitConfigResponse, CenterError>;
}

/// Serves the initial configuration from a local JSON file.
///
/// Useful on a bench without a central authority; the file is re-read on every
/// request so edits are picked up by the next bootstrap attempt.
#[derive(Debug, Clone)]
pub struct FileCenter {
    path: PathBuf,
}

impl FileCenter {
    /// Creates a center backed by `path`.
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }
}

#[async_trait]
impl CenterClient for FileCenter {
    async fn fetch_init_config(
        &self,
        request: InitConfigRequest,
    ) -> Result<InitConfigResponse, CenterError> {
        tracing::debug!(device = %request.meta.name, path = %self.path.display(), "reading init config");

        let config = tokio::fs::read(&self.path)
            .await
            .map_err(|e| CenterError::Io {
                path: self.path.clone(),
                details: e.to_string(),
            })?;

        Ok(InitConfigResponse { config })
    }
}
