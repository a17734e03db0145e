use std::sync::{Arc, Mutex, MutexGuard};

use tracing::{debug, instrument};

use super::{
    ConfigRecord, NotificationChannel, PublishReport, Subscription,
    registry::SubscriberRegistry,
};

struct StoreState {
    record: ConfigRecord,
    subscribers: SubscriberRegistry,
}

/// Result of an atomic [`ConfigStore::commit`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Transition {
    /// Record before the commit.
    pub previous: ConfigRecord,
    /// Record after the commit.
    pub current: ConfigRecord,
    /// Fan-out that followed the write.
    pub report: PublishReport,
}

/// Thread-safe holder of the device configuration and its subscribers.
///
/// Cloning is cheap and every clone refers to the same record. A single lock guards
/// both the record and the subscriber registry; no operation waits while holding it.
#[derive(Clone)]
pub struct ConfigStore {
    state: Arc<Mutex<StoreState>>,
}

impl Default for ConfigStore {
    fn default() -> Self {
        Self::new()
    }
}

impl ConfigStore {
    /// Creates a store holding an empty record and no subscribers.
    pub fn new() -> Self {
        Self::with_record(ConfigRecord::default())
    }

    /// Creates a store seeded with `record`.
    pub fn with_record(record: ConfigRecord) -> Self {
        Self {
            state: Arc::new(Mutex::new(StoreState {
                record,
                subscribers: SubscriberRegistry::new(),
            })),
        }
    }

    /// Acquires the store lock, recovering the data if a holder panicked.
    fn lock(&self) -> MutexGuard<'_, StoreState> {
        match self.state.lock() {
            Ok(guard) => guard,
            Err(poisoned) => poisoned.into_inner(),
        }
    }

    /// Current on/off state.
    pub fn turned_on(&self) -> bool {
        self.lock().record.turned_on
    }

    /// Overwrites the on/off state.
    pub fn set_turned_on(&self, turned_on: bool) {
        self.lock().record.turned_on = turned_on;
    }

    /// Current collection interval.
    pub fn collect_freq(&self) -> i64 {
        self.lock().record.collect_freq
    }

    /// Overwrites the collection interval.
    pub fn set_collect_freq(&self, collect_freq: i64) {
        self.lock().record.collect_freq = collect_freq;
    }

    /// Current transmission interval.
    pub fn send_freq(&self) -> i64 {
        self.lock().record.send_freq
    }

    /// Overwrites the transmission interval.
    pub fn set_send_freq(&self, send_freq: i64) {
        self.lock().record.send_freq = send_freq;
    }

    /// Copy of all three fields taken under one lock acquisition.
    pub fn snapshot(&self) -> ConfigRecord {
        self.lock().record
    }

    /// Registers `channel` under `key`. An existing registration for `key` is replaced.
    #[instrument(skip(self, channel))]
    pub fn subscribe(&self, key: &str, channel: NotificationChannel) {
        let replaced = self.lock().subscribers.insert(key, channel);
        debug!(replaced, "subscriber registered");
    }

    /// Creates a bounded channel, registers it under `key` and returns the receiving end.
    pub fn subscribe_key(&self, key: &str) -> Subscription {
        let (channel, subscription) = Subscription::channel(key);
        self.subscribe(key, channel);
        subscription
    }

    /// Removes the registration for `key`. Returns false if none existed.
    pub fn unsubscribe(&self, key: &str) -> bool {
        self.lock().subscribers.remove(key)
    }

    /// Number of registered subscribers.
    pub fn subscriber_count(&self) -> usize {
        self.lock().subscribers.len()
    }

    /// Notifies every registered subscriber once.
    ///
    /// Never blocks: see [`SubscriberRegistry`](super::SubscriberRegistry) for how full
    /// and closed channels are treated.
    pub fn publish_change(&self) -> PublishReport {
        self.lock().subscribers.publish()
    }

    /// Replaces the record with `next(&current)` and publishes, as one critical section.
    ///
    /// Readers see either the whole previous record or the whole new one, and no
    /// notification is sent before all fields are written.
    pub fn commit<F>(&self, next: F) -> Transition
    where
        F: FnOnce(&ConfigRecord) -> ConfigRecord,
    {
        let mut state = self.lock();
        let previous = state.record;
        let current = next(&previous);
        state.record = current;
        let report = state.subscribers.publish();

        Transition {
            previous,
            current,
            report,
        }
    }
}
