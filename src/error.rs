//! Error types for the ranking pipeline.

use std::path::PathBuf;

/// Result type alias for pipeline operations
pub type Result<T> = std::result::Result<T, Error>;

/// Errors that abort a run.
///
/// Per-city provider failures are not represented here: they are absorbed by
/// the fetch stage as [`crate::client::ClientError`] and never cross a stage
/// boundary.
#[derive(thiserror::Error, Debug)]
pub enum Error {
    /// I/O operation on the store failed
    #[error("I/O error: {message}")]
    Io {
        message: String,
        #[source]
        source: std::io::Error,
    },

    /// Store document could not be encoded or decoded
    #[error("JSON error in '{}': {source}", .path.display())]
    Json {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },

    /// City produced a forecast but no day had a daytime temperature
    #[error("No daytime temperature data for city '{city}'")]
    NoTemperatureData { city: String },

    /// City registry could not be loaded
    #[error("City registry error: {message}")]
    Registry { message: String },

    /// Compute worker pool could not be built
    #[error("Compute pool error: {message}")]
    Compute { message: String },

    /// A background stage task panicked or was cancelled
    #[error("Stage task failed: {source}")]
    Join {
        #[from]
        source: tokio::task::JoinError,
    },

    /// Configuration error
    #[error("Configuration error: {message}")]
    Configuration { message: String },
}

impl Error {
    /// Create an I/O error with context
    pub fn io(message: impl Into<String>, source: std::io::Error) -> Self {
        Self::Io {
            message: message.into(),
            source,
        }
    }

    /// Create a JSON error for the document at `path`
    pub fn json(path: impl Into<PathBuf>, source: serde_json::Error) -> Self {
        Self::Json {
            path: path.into(),
            source,
        }
    }

    pub fn no_temperature_data(city: impl Into<String>) -> Self {
        Self::NoTemperatureData { city: city.into() }
    }

    pub fn registry(message: impl Into<String>) -> Self {
        Self::Registry {
            message: message.into(),
        }
    }

    pub fn compute(message: impl Into<String>) -> Self {
        Self::Compute {
            message: message.into(),
        }
    }

    /// Create a configuration error
    pub fn configuration(message: impl Into<String>) -> Self {
        Self::Configuration {
            message: message.into(),
        }
    }
}

// -- Tests -------------------------------------------------------------------
