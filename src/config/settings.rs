//! Configuration settings and validation.

use crate::{Error, Result};
use std::path::PathBuf;

/// Upper bound on concurrent file reads during a search.
const MAX_READ_CONCURRENCY: usize = 64;

/// Main configuration for the relicdex server.
#[derive(Debug, Clone)]
pub struct Config {
    /// Root directory holding the JSON records.
    pub data_dir: PathBuf,

    /// Directory served at `/` (browser front-end), if any.
    pub public_dir: Option<PathBuf>,

    /// Directory served at `/Img`, if any.
    pub images_dir: Option<PathBuf>,

    /// Host address to bind to.
    pub host: String,

    /// Port to listen on.
    pub port: u16,

    /// Log level (trace, debug, info, warn, error).
    pub log_level: String,

    /// Record file extension, without the leading dot.
    pub extension: String,

    /// Number of files read concurrently while searching.
    pub read_concurrency: usize,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            data_dir: PathBuf::from("./Datos"),
            public_dir: None,
            images_dir: None,
            host: "127.0.0.1".to_string(),
            port: 3000,
            log_level: "info".to_string(),
            extension: "json".to_string(),
            read_concurrency: 8,
        }
    }
}

impl Config {
    /// Create a new configuration with defaults.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Validate configuration values.
    ///
    /// # Errors
    ///
    /// Returns an error if any configuration value is invalid.
    pub fn validate(&self) -> Result<()> {
        if self.port == 0 {
            return Err(Error::config("port cannot be 0"));
        }

        let valid_levels = ["trace", "debug", "info", "warn", "error"];
        if !valid_levels.contains(&self.log_level.to_lowercase().as_str()) {
            return Err(Error::config(format!(
                "invalid log level '{}', must be one of: {}",
                self.log_level,
                valid_levels.join(", ")
            )));
        }

        if self.read_concurrency == 0 {
            return Err(Error::config("read_concurrency cannot be 0"));
        }

        if self.read_concurrency > MAX_READ_CONCURRENCY {
            return Err(Error::config(format!(
                "read_concurrency cannot exceed {MAX_READ_CONCURRENCY}"
            )));
        }

        if self.host.is_empty() {
            return Err(Error::config("host cannot be empty"));
        }

        if self.extension.is_empty() {
            return Err(Error::config("extension cannot be empty"));
        }

        if self.extension.contains(['/', '\\']) {
            return Err(Error::config(format!(
                "extension '{}' cannot contain a path separator",
                self.extension
            )));
        }

        Ok(())
    }

    /// File-name suffix that marks a record, e.g. `.json`.
    #[must_use]
    pub fn record_suffix(&self) -> String {
        format!(".{}", self.extension.trim_start_matches('.'))
    }

    /// Get the server address as a string.
    #[must_use]
    pub fn server_addr(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}
