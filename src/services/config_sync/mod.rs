//! Bootstrap and patch handling for the device configuration.
//!
//! [`ConfigSyncService`] turns the two inbound triggers from the central
//! authority, the initial fetch and later patches, into updates on a
//! [`ConfigStore`](crate::config_store::ConfigStore).

mod center;
mod error;
mod retry;
mod service;


pub use center::{
    CenterClient, DevMeta, FileCenter, InitConfigRequest, InitConfigResponse, PatchAck,
    PatchRequest,
};
pub use error::{CenterError, SyncError};
pub use retry::RetryPolicy;
pub use service::ConfigSyncService;
