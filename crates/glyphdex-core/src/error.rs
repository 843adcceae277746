//! Error types for the glyphdex library.

use std::error::Error as _;
use std::path::PathBuf;
use thiserror::Error;

/// Main error type for glyphdex operations.
#[derive(Debug, Error)]
pub enum GlyphdexError {
    // Network errors
    #[error("Network error: {message}")]
    Network {
        message: String,
        /// Optional cause description
        cause: Option<String>,
    },

    // Database errors
    #[error("Database error: {message}")]
    Database {
        message: String,
        #[source]
        source: Option<rusqlite::Error>,
    },

    // File system errors
    #[error("IO error at {path:?}: {message}")]
    Io {
        message: String,
        path: Option<PathBuf>,
        #[source]
        source: Option<std::io::Error>,
    },

    // Manifest errors. The provider masks both of these into an empty
    // table/index; they surface only through logs.
    #[error("Manifest unreadable at {location}: {message}")]
    ManifestUnreadable { location: String, message: String },

    #[error("Manifest malformed: {message}")]
    ManifestMalformed {
        message: String,
        #[source]
        source: Option<serde_yaml_ng::Error>,
    },

    // Serialization errors
    #[error("JSON error: {message}")]
    Json {
        message: String,
        #[source]
        source: Option<serde_json::Error>,
    },

    #[error("YAML error: {message}")]
    Yaml {
        message: String,
        #[source]
        source: Option<serde_yaml_ng::Error>,
    },

    // Settings errors
    #[error("Invalid setting {field}: {message}")]
    InvalidSettings { field: String, message: String },

    // Generic errors
    #[error("{0}")]
    Other(String),
}

/// Result type alias for glyphdex operations.
pub type Result<T> = std::result::Result<T, GlyphdexError>;

// Conversion implementations for common error types

impl From<std::io::Error> for GlyphdexError {
    fn from(err: std::io::Error) -> Self {
        GlyphdexError::Io {
            message: err.to_string(),
            path: None,
            source: Some(err),
        }
    }
}

impl From<serde_json::Error> for GlyphdexError {
    fn from(err: serde_json::Error) -> Self {
        GlyphdexError::Json {
            message: err.to_string(),
            source: Some(err),
        }
    }
}

impl From<rusqlite::Error> for GlyphdexError {
    fn from(err: rusqlite::Error) -> Self {
        GlyphdexError::Database {
            message: err.to_string(),
            source: Some(err),
        }
    }
}

impl From<reqwest::Error> for GlyphdexError {
    fn from(err: reqwest::Error) -> Self {
        GlyphdexError::Network {
            message: err.to_string(),
            cause: err.source().map(|s| s.to_string()),
        }
    }
}

impl GlyphdexError {
    /// Create an IO error with path context.
    pub fn io_with_path(err: std::io::Error, path: impl Into<PathBuf>) -> Self {
        GlyphdexError::Io {
            message: err.to_string(),
            path: Some(path.into()),
            source: Some(err),
        }
    }

    /// Create a settings-validation error.
    pub fn invalid_settings(field: impl Into<String>, message: impl Into<String>) -> Self {
        GlyphdexError::InvalidSettings {
            field: field.into(),
            message: message.into(),
        }
    }

    /// True for the failures the metadata provider degrades to empty
    /// results instead of propagating.
    pub fn is_metadata_failure(&self) -> bool {
        matches!(
            self,
            GlyphdexError::ManifestUnreadable { .. }
                | GlyphdexError::ManifestMalformed { .. }
                | GlyphdexError::Network { .. }
                | GlyphdexError::Io { .. }
        )
    }
}
