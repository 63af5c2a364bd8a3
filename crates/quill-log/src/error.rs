//! Logging error types.

use thiserror::Error;

/// Errors that can occur while configuring or dispatching log records.
#[derive(Debug, Error)]
pub enum LogError {
    /// The level name is not one of the eight known severities.
    #[error("level '{level}' is not a valid log level")]
    InvalidLevel {
        /// The rejected level name.
        level: String,
    },

    /// An adapter could not append to its target.
    #[error("failed to write log record to {path}: {source}")]
    SinkWrite {
        /// Target the adapter was writing to.
        path: String,
        /// Underlying I/O error.
        #[source]
        source: std::io::Error,
    },

    /// A structured record could not be serialized.
    #[error("serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    /// A timestamp pattern contains an unknown specifier.
    #[error("invalid timestamp pattern '{pattern}'")]
    TimestampFormat {
        /// The offending pattern.
        pattern: String,
    },

    /// A configuration file could not be read.
    #[error("failed to read config {path}: {source}")]
    ConfigIo {
        /// Path of the config file.
        path: String,
        /// Underlying I/O error.
        #[source]
        source: std::io::Error,
    },

    /// A configuration file is not valid TOML or has the wrong shape.
    #[error("failed to parse config {path}: {source}")]
    ConfigParse {
        /// Path of the config file (or `<inline>`).
        path: String,
        /// Underlying TOML error.
        #[source]
        source: toml::de::Error,
    },

    /// A configuration value failed validation.
    #[error("invalid config field {field}: {message}")]
    ConfigInvalid {
        /// Dotted path of the field.
        field: String,
        /// What is wrong with it.
        message: String,
    },
}

/// Result type for logging operations.
pub type LogResult<T> = Result<T, LogError>;
