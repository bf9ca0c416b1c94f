//! Executor configuration
//!
//! Loaded from a JSON document; every field is optional and unknown fields
//! are rejected.
//!
//! ```json
//! { "log_level": "TRACE", "trace_dispatch": true }
//! ```

use std::fs;
use std::path::Path;

use serde::Deserialize;
use thiserror::Error;

use crate::observability::{log_event_with_fields, Event, Severity};

/// Result type for configuration operations
pub type ConfigResult<T> = Result<T, ConfigError>;

/// Configuration errors
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Failed to read config {path}: {source}")]
    Io {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("Malformed config: {0}")]
    Malformed(#[from] serde_json::Error),
}

/// Configuration for the query executor
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct ExecutorConfig {
    /// Lowest severity the executor logs
    pub log_level: Severity,
    /// Log every dispatched part (at TRACE)
    pub trace_dispatch: bool,
}

impl Default for ExecutorConfig {
    fn default() -> Self {
        Self {
            log_level: Severity::Info,
            trace_dispatch: false,
        }
    }
}

impl ExecutorConfig {
    /// Config that logs everything, including each dispatched part
    pub fn verbose() -> Self {
        Self {
            log_level: Severity::Trace,
            trace_dispatch: true,
        }
    }

    /// Config that only logs failures
    pub fn quiet() -> Self {
        Self {
            log_level: Severity::Warn,
            ..Self::default()
        }
    }

    /// Returns true if events of this severity are logged
    pub fn logs(&self, severity: Severity) -> bool {
        severity >= self.log_level
    }

    /// Parses a JSON document
    pub fn from_json(json: &str) -> ConfigResult<Self> {
        Ok(serde_json::from_str(json)?)
    }

    /// Reads and parses a JSON config file
    pub fn load(path: &Path) -> ConfigResult<Self> {
        let content = fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.display().to_string(),
            source,
        })?;
        let config = Self::from_json(&content)?;

        if config.logs(Event::ConfigLoaded.severity()) {
            let shown = path.display().to_string();
            log_event_with_fields(
                Event::ConfigLoaded,
                &[("log_level", config.log_level.as_str()), ("path", shown.as_str())],
            );
        }
        Ok(config)
    }
}
