use std::{env, fs, path::PathBuf};

use crate::{AgentError, Result};

const APP_DIR: &str = "device-agent";

/// Utility struct for locating the agent's settings and data directories
///
/// Follows the XDG Base Directory specification
pub struct ConfigPaths;

impl ConfigPaths {
    /// Returns the configuration directory path for the agent
    ///
    /// - First checks `XDG_CONFIG_HOME`
    /// - Falls back to `$HOME/.config`
    /// - Appends "device-agent" to the base config directory
    ///
    /// # Errors
    /// Returns `AgentError::NoConfigDir` if neither variable is set
    pub fn config_dir() -> Result<PathBuf> {
        let config_home = env::var("XDG_CONFIG_HOME")
            .or_else(|_| env::var("HOME").map(|home| format!("{home}/.config")))
            .map_err(|_| AgentError::NoConfigDir)?;

        Ok(PathBuf::from(config_home).join(APP_DIR))
    }

    /// Returns the path to the main settings file
    ///
    /// # Errors
    /// Returns `AgentError::NoConfigDir` if the config directory cannot be determined
    pub fn main_config() -> Result<PathBuf> {
        Ok(Self::config_dir()?.join("config.toml"))
    }

    /// Get the agent log directory
    ///
    /// Creates the directory if it doesn't exist.
    ///
    /// # Errors
    /// Returns error if `HOME` is unset or the directory cannot be created
    pub fn log_dir() -> Result<PathBuf> {
        let home = env::var("HOME").map_err(|_| AgentError::NoConfigDir)?;
        let log_dir = PathBuf::from(home).join(format!(".{APP_DIR}")).join("logs");

        if !log_dir.exists() {
            fs::create_dir_all(&log_dir).map_err(|e| AgentError::io(e, &log_dir))?;
        }

        Ok(log_dir)
    }
}
