use std::collections::HashMap;

use tokio::sync::mpsc::{self, Receiver, Sender, error::TrySendError};
use tokio_stream::wrappers::ReceiverStream;
use tracing::{debug, warn};

/// Sending half a subscriber registers to be told that the configuration changed.
///
/// Notifications carry no payload; receivers re-read the store through its accessors.
pub type NotificationChannel = Sender<()>;

/// Capacity used for channels created by [`Subscription::channel`].
pub const NOTIFICATION_CAPACITY: usize = 1;

/// Outcome of one fan-out over the registry.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct PublishReport {
    /// Subscribers that received a fresh notification.
    pub delivered: usize,
    /// Subscribers whose buffer already held an unread notification.
    pub coalesced: usize,
    /// Registrations removed because their receiver was dropped.
    pub pruned: usize,
}

impl PublishReport {
    /// Number of subscribers that will observe this change.
    pub fn notified(&self) -> usize {
        self.delivered + self.coalesced
    }
}

/// Keyed registry of subscriber channels.
///
/// Publishing never waits on a subscriber. A full channel already holds a pending
/// "changed" notification, so skipping the send loses nothing; a closed channel is
/// dropped from the registry.
#[derive(Debug, Default)]
pub struct SubscriberRegistry {
    channels: HashMap<String, NotificationChannel>,
}

impl SubscriberRegistry {
    /// Creates an empty registry.
    pub fn new() -> Self {
        Self::default()
    }

    /// Registers `channel` under `key`, replacing any previous registration.
    ///
    /// Returns true when an earlier registration was replaced.
    pub fn insert(&mut self, key: &str, channel: NotificationChannel) -> bool {
        self.channels.insert(key.to_string(), channel).is_some()
    }

    /// Removes the registration for `key`.
    pub fn remove(&mut self, key: &str) -> bool {
        self.channels.remove(key).is_some()
    }

    /// Number of live registrations.
    pub fn len(&self) -> usize {
        self.channels.len()
    }

    /// True when nothing is registered.
    pub fn is_empty(&self) -> bool {
        self.channels.is_empty()
    }

    /// True when a registration exists for `key`.
    pub fn contains(&self, key: &str) -> bool {
        self.channels.contains_key(key)
    }

    /// Sends one notification to every registered channel without blocking.
    pub fn publish(&mut self) -> PublishReport {
        let mut report = PublishReport::default();

        self.channels.retain(|key, channel| match channel.try_send(()) {
            Ok(()) => {
                report.delivered += 1;
                true
            }
            Err(TrySendError::Full(())) => {
                debug!(subscriber = %key, "notification already pending");
                report.coalesced += 1;
                true
            }
            Err(TrySendError::Closed(())) => {
                warn!(subscriber = %key, "subscriber went away, dropping registration");
                report.pruned += 1;
                false
            }
        });

        report
    }
}

/// Receiving half of a keyed subscription.
#[derive(Debug)]
pub struct Subscription {
    key: String,
    receiver: Receiver<()>,
}

impl Subscription {
    /// Creates a bounded notification channel for `key`.
    ///
    /// The sender is what gets registered with the store.
    pub fn channel(key: &str) -> (NotificationChannel, Self) {
        let (tx, rx) = mpsc::channel(NOTIFICATION_CAPACITY);
        let subscription = Self {
            key: key.to_string(),
            receiver: rx,
        };
        (tx, subscription)
    }

    /// Key this subscription was registered under.
    pub fn key(&self) -> &str {
        &self.key
    }

    /// Waits for the next change notification.
    ///
    /// Returns false once the registration is gone and no notification is pending.
    pub async fn changed(&mut self) -> bool {
        self.receiver.recv().await.is_some()
    }

    /// Consumes a pending notification if one is buffered.
    pub fn try_changed(&mut self) -> bool {
        self.receiver.try_recv().is_ok()
    }

    /// Turns the subscription into a stream of notifications.
    pub fn into_stream(self) -> ReceiverStream<()> {
        ReceiverStream::new(self.receiver)
    }
}
