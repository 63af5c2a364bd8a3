//! Declarative logger configuration.
//!
//! A logger can be described in TOML and built in one step:
//!
//! ```toml
//! auto_interpolate = true
//!
//! [[adapters]]
//! kind = "text"
//! path = "/var/log/app.log"
//! level = "info"
//! format = "[{timestamp}] {level}: {message}"
//! timestamp = "%Y-%m-%d %H:%M:%S"
//!
//! [[adapters]]
//! kind = "json"
//! path = "/var/log/app.json"
//! ```
//!
//! Level names are the exact lowercase names accepted by [`Level`].

use std::path::{Path, PathBuf};
use std::sync::Arc;

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::adapter::text::{DEFAULT_FORMAT, DEFAULT_TIMESTAMP, validate_timestamp};
use crate::adapter::{Adapter, JsonAdapter, TextAdapter};
use crate::error::{LogError, LogResult};
use crate::level::Level;
use crate::logger::Logger;

/// Root logger configuration.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct LoggerConfig {
    /// Whether messages are interpolated before dispatch.
    #[serde(default = "default_true")]
    pub auto_interpolate: bool,
    /// Adapters, in attachment order.
    #[serde(default)]
    pub adapters: Vec<AdapterConfig>,
}

fn default_true() -> bool {
    true
}

impl Default for LoggerConfig {
    fn default() -> Self {
        Self {
            auto_interpolate: true,
            adapters: Vec::new(),
        }
    }
}

/// One adapter entry, tagged by `kind`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "lowercase")]
pub enum AdapterConfig {
    /// Plain-text lines.
    Text {
        /// Target file.
        path: PathBuf,
        /// Threshold level.
        #[serde(default)]
        level: Level,
        /// Line template (defaults to `[{timestamp}] {level}: {message}`).
        #[serde(default, skip_serializing_if = "Option::is_none")]
        format: Option<String>,
        /// `strftime` pattern (defaults to `%Y-%m-%d %H:%M:%S`).
        #[serde(default, skip_serializing_if = "Option::is_none")]
        timestamp: Option<String>,
    },
    /// JSON lines.
    Json {
        /// Target file.
        path: PathBuf,
        /// Threshold level.
        #[serde(default)]
        level: Level,
    },
}

impl AdapterConfig {
    /// Target file of this adapter.
    #[must_use]
    pub fn path(&self) -> &Path {
        match self {
            Self::Text { path, .. } | Self::Json { path, .. } => path,
        }
    }

    /// Instantiate the adapter.
    #[must_use]
    pub fn build(&self) -> Arc<dyn Adapter> {
        match self {
            Self::Text {
                path,
                level,
                format,
                timestamp,
            } => {
                let adapter = TextAdapter::new(path, *level)
                    .with_format(format.as_deref().unwrap_or(DEFAULT_FORMAT))
                    .with_timestamp(timestamp.as_deref().unwrap_or(DEFAULT_TIMESTAMP));
                Arc::new(adapter)
            },
            Self::Json { path, level } => Arc::new(JsonAdapter::new(path, *level)),
        }
    }
}

impl LoggerConfig {
    /// Parse and validate a TOML document.
    ///
    /// # Errors
    ///
    /// Returns [`LogError::ConfigParse`] for malformed TOML or an unknown shape,
    /// and [`LogError::ConfigInvalid`] if validation fails.
    pub fn from_toml_str(source: &str) -> LogResult<Self> {
        parse(source, "<inline>")
    }

    /// Read, parse, and validate a TOML file.
    ///
    /// # Errors
    ///
    /// Returns [`LogError::ConfigIo`] if the file cannot be read, otherwise the
    /// same errors as [`LoggerConfig::from_toml_str`].
    pub fn load(path: impl AsRef<Path>) -> LogResult<Self> {
        let path = path.as_ref();
        let source = std::fs::read_to_string(path).map_err(|source| LogError::ConfigIo {
            path: path.display().to_string(),
            source,
        })?;
        let config = parse(&source, &path.display().to_string())?;
        debug!(path = %path.display(), adapters = config.adapters.len(), "Loaded logger config");
        Ok(config)
    }

    /// Check cross-field invariants that the TOML shape cannot express.
    ///
    /// # Errors
    ///
    /// Returns the first [`LogError::ConfigInvalid`] found.
    pub fn validate(&self) -> LogResult<()> {
        for (index, adapter) in self.adapters.iter().enumerate() {
            if adapter.path().as_os_str().is_empty() {
                return Err(invalid(index, "path", "must not be empty"));
            }

            if let AdapterConfig::Text {
                format, timestamp, ..
            } = adapter
            {
                if format.as_deref().is_some_and(|f| !f.contains("{message}")) {
                    return Err(invalid(index, "format", "must contain the {message} slot"));
                }
                if let Some(timestamp) = timestamp {
                    if validate_timestamp(timestamp).is_err() {
                        return Err(invalid(
                            index,
                            "timestamp",
                            &format!("'{timestamp}' is not a valid strftime pattern"),
                        ));
                    }
                }
            }
        }
        Ok(())
    }

    /// Build a logger with every configured adapter attached in order.
    ///
    /// # Errors
    ///
    /// Returns [`LogError::ConfigInvalid`] if validation fails.
    pub fn build(&self) -> LogResult<Logger> {
        self.validate()?;

        let mut logger = Logger::new();
        logger.auto_interpolate(self.auto_interpolate);
        for adapter in &self.adapters {
            logger.attach(adapter.build());
        }
        Ok(logger)
    }
}

fn parse(source: &str, origin: &str) -> LogResult<LoggerConfig> {
    let config: LoggerConfig = toml::from_str(source).map_err(|source| LogError::ConfigParse {
        path: origin.to_owned(),
        source,
    })?;
    config.validate()?;
    Ok(config)
}

fn invalid(index: usize, field: &str, message: &str) -> LogError {
    LogError::ConfigInvalid {
        field: format!("adapters[{index}].{field}"),
        message: message.to_owned(),
    }
}
