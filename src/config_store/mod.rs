//! Shared device configuration with change notification.
//!
//! Holds the single authoritative [`ConfigRecord`] and a keyed registry of
//! subscribers that are told, without payload, whenever the record changes.

mod record;
mod registry;
mod store;

#[cfg(test)]
mod tests;

pub use record::{ConfigPatch, ConfigRecord, PowerTransition};
pub use registry::{
    NOTIFICATION_CAPACITY, NotificationChannel, PublishReport, SubscriberRegistry, Subscription,
};
pub use store::{ConfigStore, Transition};
