use std::path::PathBuf;

/// Errors raised by a [`CenterClient`](super::CenterClient) implementation.
#[derive(thiserror::Error, Debug, Clone, PartialEq, Eq)]
pub enum CenterError {
    /// The authority could not be reached
    #[error("central authority unavailable: {0}")]
    Unavailable(String),

    /// The authority answered but refused the request
    #[error("central authority rejected the request: {0}")]
    Rejected(String),

    /// A local source of configuration could not be read
    #[error("I/O error on '{path}': {details}")]
    Io {
        /// Path that failed to read
        path: PathBuf,
        /// I/O error details
        details: String,
    },
}

/// Errors that can occur while synchronising configuration.
#[derive(thiserror::Error, Debug)]
pub enum SyncError {
    /// A patch arrived before the first successful bootstrap
    #[error("configuration not ready: bootstrap has not completed")]
    NotReady,

    /// A payload could not be decoded
    #[error("failed to decode {operation} payload: {details}")]
    Decode {
        /// Which exchange carried the payload ("init config", "config patch")
        operation: String,
        /// Decoder error details
        details: String,
    },

    /// The exchange with the authority failed
    #[error("transport error: {0}")]
    Transport(#[from] CenterError),

    /// Bootstrap gave up after retrying
    #[error("bootstrap failed after {attempts} attempts: {last_error}")]
    BootstrapExhausted {
        /// Number of attempts made
        attempts: u32,
        /// Error from the final attempt
        last_error: Box<SyncError>,
    },
}

impl SyncError {
    pub(crate) fn decode(operation: &str, error: impl std::fmt::Display) -> Self {
        SyncError::Decode {
            operation: operation.to_string(),
            details: error.to_string(),
        }
    }
}
