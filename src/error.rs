//! Error types for the tubematter library
//!
//! This module covers every failure an update can run into: locating the
//! video link, the credential check, talking to the metadata service, and the
//! file and configuration I/O around them. Front matter parsing never fails
//! and therefore has no variant here.

use std::fmt;
use std::path::PathBuf;
use thiserror::Error;

/// The main error type for all library operations
#[derive(Error, Debug)]
pub enum TubeMatterError {
    /// I/O related errors
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// YAML errors (configuration files, `parse` output)
    #[error("YAML error: {0}")]
    Yaml(#[from] serde_yaml::Error),

    /// Transport errors from the HTTP client
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// The text contains no recognizable video link
    #[error("No YouTube link found")]
    NoLinkFound,

    /// A link matched but carries no direct video identifier (playlist-only links)
    #[error("YouTube link found, but it does not name a single video")]
    IdentifierMissing,

    /// No API key was configured
    #[error("No YouTube Data API key configured")]
    MissingCredential,

    /// The metadata service failed or returned unusable data
    #[error("Failed to fetch video details ({kind}): {reason}")]
    Fetch { kind: FetchErrorKind, reason: String },

    /// File not found or invalid path
    #[error("File not found: {path}")]
    FileNotFound { path: PathBuf },

    /// Configuration file could not be used
    #[error("Invalid configuration in {path}: {reason}")]
    Config { path: PathBuf, reason: String },
}

/// Result type alias for convenience
pub type Result<T> = std::result::Result<T, TubeMatterError>;

/// Broad classes of metadata service failures
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FetchErrorKind {
    /// The service has no video with the requested identifier
    NotFound,
    /// The credential was rejected
    Unauthorized,
    /// Network trouble, server errors, malformed responses
    Transient,
}

impl fmt::Display for FetchErrorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::NotFound => write!(f, "not found"),
            Self::Unauthorized => write!(f, "unauthorized"),
            Self::Transient => write!(f, "transient"),
        }
    }
}

impl TubeMatterError {
    /// Create a new fetch error
    pub fn fetch(kind: FetchErrorKind, reason: impl Into<String>) -> Self {
        Self::Fetch {
            kind,
            reason: reason.into(),
        }
    }

    /// Create a new file not found error
    pub fn file_not_found(path: impl Into<PathBuf>) -> Self {
        Self::FileNotFound { path: path.into() }
    }

    /// Create a new configuration error
    pub fn config(path: impl Into<PathBuf>, reason: impl Into<String>) -> Self {
        Self::Config {
            path: path.into(),
            reason: reason.into(),
        }
    }

    /// The fetch failure class, if this is a fetch error
    pub fn fetch_kind(&self) -> Option<FetchErrorKind> {
        match self {
            Self::Fetch { kind, .. } => Some(*kind),
            Self::Http(_) => Some(FetchErrorKind::Transient),
            _ => None,
        }
    }

    /// Whether retrying the same operation later could succeed
    pub fn is_recoverable(&self) -> bool {
        match self {
            Self::Io(io_err) => !matches!(
                io_err.kind(),
                std::io::ErrorKind::NotFound | std::io::ErrorKind::PermissionDenied
            ),
            Self::Http(_) => true,
            Self::Fetch { kind, .. } => *kind == FetchErrorKind::Transient,
            Self::NoLinkFound
            | Self::IdentifierMissing
            | Self::MissingCredential
            | Self::FileNotFound { .. }
            | Self::Config { .. }
            | Self::Yaml(_) => false,
        }
    }
}
