/// Configuration synchronisation with the central authority
pub mod config_sync;

pub use config_sync::{
    CenterClient, CenterError, ConfigSyncService, DevMeta, FileCenter, PatchAck, PatchRequest,
    RetryPolicy, SyncError,
};
