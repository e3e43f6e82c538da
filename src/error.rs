//! Error types for the prophash resource hashing system.

use std::path::PathBuf;
use thiserror::Error;

/// Errors raised while parsing key=value (`.properties`) content.
///
/// These never escape a hasher: the properties-aware hasher falls back to
/// raw content hashing when it sees one.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum PropertiesError {
    #[error("Malformed \\uxxxx encoding on line {line}")]
    MalformedUnicodeEscape { line: usize },
}

/// Hashing errors that must reach the caller
#[derive(Debug, Error)]
pub enum HashError {
    #[error("Failed to read resource {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Archive error in {path}: {source}")]
    Archive {
        path: PathBuf,
        #[source]
        source: zip::result::ZipError,
    },

    #[error("Failed to walk directory: {0}")]
    Walk(String),

    #[error("Invalid path: {0}")]
    InvalidPath(String),
}

/// API-level errors (configuration, CLI)
#[derive(Debug, Error)]
pub enum ApiError {
    #[error("Configuration error: {0}")]
    ConfigError(String),

    #[error("Invalid pattern '{pattern}': {reason}")]
    InvalidPattern { pattern: String, reason: String },

    #[error("Hashing failed: {0}")]
    Hash(#[from] HashError),
}

impl From<config::ConfigError> for ApiError {
    fn from(err: config::ConfigError) -> Self {
        ApiError::ConfigError(err.to_string())
    }
}
