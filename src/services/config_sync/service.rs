use std::sync::atomic::{AtomicBool, Ordering};

use chrono::Utc;
use serde::de::DeserializeOwned;
use serde_json::Value;
use tracing::{error, info, instrument, warn};

use super::{
    CenterClient, DevMeta, InitConfigRequest, PatchAck, PatchRequest, RetryPolicy, SyncError,
};
use crate::config_store::{ConfigPatch, ConfigRecord, ConfigStore, PowerTransition, Transition};

/// Applies configuration from the central authority to the local store.
///
/// Handles the one-time bootstrap fetch and patches pushed afterwards. Patches are
/// rejected with [`SyncError::NotReady`] until a bootstrap has succeeded.
pub struct ConfigSyncService<C: CenterClient> {
    store: ConfigStore,
    center: C,
    meta: DevMeta,
    retry: RetryPolicy,
    ready: AtomicBool,
}

impl<C: CenterClient> ConfigSyncService<C> {
    /// Creates a service writing into `store` and bootstrapping from `center`.
    pub fn new(store: ConfigStore, center: C, meta: DevMeta) -> Self {
        Self {
            store,
            center,
            meta,
            retry: RetryPolicy::default(),
            ready: AtomicBool::new(false),
        }
    }

    /// Replaces the bootstrap retry policy.
    pub fn with_retry(mut self, retry: RetryPolicy) -> Self {
        self.retry = retry;
        self
    }

    /// Store this service writes into.
    pub fn store(&self) -> &ConfigStore {
        &self.store
    }

    /// Client used to reach the central authority.
    pub fn center(&self) -> &C {
        &self.center
    }

    /// Whether a bootstrap has completed successfully.
    pub fn is_ready(&self) -> bool {
        self.ready.load(Ordering::Acquire)
    }

    /// Fetches the initial configuration and applies it.
    ///
    /// Failed fetches and undecodable payloads are retried per the retry policy.
    ///
    /// # Errors
    /// Returns `SyncError::BootstrapExhausted` when every attempt failed. The caller
    /// should treat this as fatal: the agent cannot run without a configuration.
    #[instrument(skip(self), fields(device = %self.meta.name))]
    pub async fn bootstrap(&self) -> Result<ConfigRecord, SyncError> {
        let record = self
            .retry
            .execute(move || self.fetch_init_config())
            .await
            .inspect_err(|e| error!("init config hasn't been received: {e}"))?;

        info!(?record, "init config");
        let transition = self.apply_update(record);
        self.ready.store(true, Ordering::Release);

        Ok(transition.current)
    }

    async fn fetch_init_config(&self) -> Result<ConfigRecord, SyncError> {
        let request = InitConfigRequest {
            time: Utc::now().timestamp_nanos_opt().unwrap_or_default(),
            meta: self.meta.clone(),
        };

        let response = self.center.fetch_init_config(request).await?;

        decode_object("init config", &response.config)
    }

    /// Decodes and applies a patch pushed by the central authority.
    ///
    /// Fields missing from the payload keep their stored value.
    ///
    /// # Errors
    /// * `SyncError::NotReady` - if no bootstrap has succeeded yet
    /// * `SyncError::Decode` - if the payload is malformed; the store is left unchanged
    #[instrument(skip_all, fields(bytes = request.config.len()))]
    pub fn apply_patch(&self, request: &PatchRequest) -> Result<PatchAck, SyncError> {
        if !self.is_ready() {
            warn!("config patch received before bootstrap");
            return Err(SyncError::NotReady);
        }

        let patch: ConfigPatch = decode_object("config patch", &request.config)?;

        info!(?patch, "config patch");
        self.commit(|current| patch.merge_onto(current));

        Ok(PatchAck::ok())
    }

    /// Like [`apply_patch`](Self::apply_patch) but folds failures into an error
    /// acknowledgement for the caller.
    pub fn handle_patch(&self, request: &PatchRequest) -> PatchAck {
        self.apply_patch(request).unwrap_or_else(|e| {
            warn!("config patch rejected: {e}");
            PatchAck::error(e.to_string())
        })
    }

    /// Stores `record` and notifies subscribers exactly once.
    ///
    /// Every field is taken from `record`; the on/off comparison only drives logging.
    /// Does not check readiness: callers are bootstrap and patches that already did.
    pub(crate) fn apply_update(&self, record: ConfigRecord) -> Transition {
        self.commit(|_| record)
    }

    fn commit<F>(&self, next: F) -> Transition
    where
        F: FnOnce(&ConfigRecord) -> ConfigRecord,
    {
        let transition = self.store.commit(next);

        match PowerTransition::between(&transition.previous, &transition.current) {
            PowerTransition::TurnedOn => info!("device is turned on"),
            PowerTransition::TurnedOff => info!("device is turned off"),
            PowerTransition::Unchanged => {}
        }

        info!(
            collect_freq = transition.current.collect_freq,
            send_freq = transition.current.send_freq,
            notified = transition.report.notified(),
            pruned = transition.report.pruned,
            "configuration published"
        );

        transition
    }
}

/// Decodes a payload that must be a JSON object.
///
/// Serde's derived visitors also accept sequences, so `[true,10,2]` would
/// otherwise decode positionally.
fn decode_object<T: DeserializeOwned>(operation: &str, bytes: &[u8]) -> Result<T, SyncError> {
    let value: Value = serde_json::from_slice(bytes).map_err(|e| SyncError::decode(operation, e))?;
    if !value.is_object() {
        return Err(SyncError::decode(operation, "expected a JSON object"));
    }

    serde_json::from_value(value).map_err(|e| SyncError::decode(operation, e))
}
