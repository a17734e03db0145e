//! Device agent - keeps a device's operational configuration in sync with a
//! central authority.
//!
//! The agent holds one configuration record (on/off state, collection and send
//! frequencies), applies the initial configuration and later patches pushed by
//! the authority, and tells local consumers whenever the record changes.
//!
//! # Quick Start
//!
//! ```rust,no_run
//! use device_agent::config_store::ConfigStore;
//!
//! let store = ConfigStore::new();
//! let mut sensor_loop = store.subscribe_key("sensor-loop");
//!
//! store.commit(|current| device_agent::config_store::ConfigRecord {
//!     collect_freq: 10,
//!     ..*current
//! });
//!
//! assert!(sensor_loop.try_changed());
//! assert_eq!(store.collect_freq(), 10);
//! ```

/// Agent settings loaded from TOML.
pub mod config;

/// Core error types and result aliases.
pub mod core;

/// JSON schema of the settings file.
pub mod docs;

/// Shared device configuration with change notification.
pub mod config_store;

/// Synchronisation with the central authority.
pub mod services;

/// Tracing subscriber setup.
pub mod tracing_config;

/// Re-exported core types for convenience.
pub use crate::core::{AgentError, Result};
