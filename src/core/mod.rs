use std::{
    fmt,
    path::{Path, PathBuf},
    result,
};

use thiserror::Error;

/// Error types for the device agent.
///
/// Covers loading and validating the agent's own settings; configuration
/// received from the central authority reports through
/// [`SyncError`](crate::services::SyncError) instead.
#[derive(Error, Debug)]
pub enum AgentError {
    /// Configuration validation error
    #[error("configuration validation failed for '{component}': {details}")]
    ConfigValidation {
        /// Component that failed validation
        component: String,
        /// Validation error details
        details: String,
    },

    /// I/O operation error
    #[error("I/O error on '{path}': {details}")]
    IoError {
        /// Path where I/O error occurred
        path: PathBuf,
        /// I/O error details
        details: String,
    },

    /// TOML parsing error with location context
    #[error("failed to parse TOML at '{location}': {details}")]
    TomlParseError {
        /// Location of TOML being parsed (file path or "string")
        location: String,
        /// Parse error details
        details: String,
    },

    /// Neither `XDG_CONFIG_HOME` nor `HOME` is set
    #[error("cannot locate config directory: neither XDG_CONFIG_HOME nor HOME is set")]
    NoConfigDir,
}

/// A specialized `Result` type for agent operations.
pub type Result<T> = result::Result<T, AgentError>;

impl AgentError {
    /// Creates a TOML parsing error with optional file path context.
    ///
    /// # Arguments
    ///
    /// * `error` - The underlying parsing error
    /// * `path` - Optional path to the file that failed to parse
    pub fn toml_parse(error: impl fmt::Display, path: Option<&Path>) -> Self {
        let location = match path {
            Some(p) => {
                let clean_path = p.canonicalize().unwrap_or_else(|_| p.to_path_buf());
                clean_path.to_string_lossy().to_string()
            }
            None => "string".to_string(),
        };

        AgentError::TomlParseError {
            location,
            details: error.to_string(),
        }
    }

    /// Creates an I/O error with file path context.
    pub fn io(error: impl fmt::Display, path: &Path) -> Self {
        AgentError::IoError {
            path: path.to_path_buf(),
            details: error.to_string(),
        }
    }

    /// Creates a validation error for `component`.
    pub fn validation(component: &str, details: impl Into<String>) -> Self {
        AgentError::ConfigValidation {
            component: component.to_string(),
            details: details.into(),
        }
    }
}
