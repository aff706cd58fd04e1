//! Error types and exit-code classification.
//!
//! Every failure the pipeline can produce is a [`ReadableError`]. Each
//! variant maps onto exactly one [`ExitCategory`], which in turn carries the
//! numeric process exit status (sysexits-style).
//!
//! # Example
//!
//! ```rust
//! use readable_core::{ExitCategory, ReadableError};
//!
//! let err = ReadableError::Status { code: 404, reason: "Not Found".to_string() };
//! assert_eq!(err.exit_category(), ExitCategory::ServiceUnavailable);
//! assert_eq!(err.exit_category().code(), 69);
//! ```

use std::io;
use std::path::{Path, PathBuf};

use thiserror::Error;

/// Closed set of process outcomes.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ExitCategory {
    Success,
    /// Malformed flags, missing source on a terminal, bad option combination.
    Usage,
    /// Extraction failed, low-confidence exit, incompatible flags.
    DataError,
    /// Source file absent.
    NoInput,
    /// DNS resolution failed.
    NoHost,
    /// Non-2xx HTTP response.
    ServiceUnavailable,
    /// Filesystem permission denied.
    NoPermission,
}

impl ExitCategory {
    /// Numeric process exit status.
    pub fn code(self) -> u8 {
        match self {
            Self::Success => 0,
            Self::Usage => 64,
            Self::DataError => 65,
            Self::NoInput => 66,
            Self::NoHost => 68,
            Self::ServiceUnavailable => 69,
            Self::NoPermission => 77,
        }
    }
}

/// Main error type for reader-mode operations.
#[derive(Error, Debug)]
pub enum ReadableError {
    /// Command-line usage error.
    #[error("{0}")]
    Usage(String),

    /// A URL was expected but could not be parsed.
    #[error("Invalid URL: {0}")]
    InvalidUrl(String),

    /// Source file does not exist.
    #[error("No such file: {}", .0.display())]
    FileNotFound(PathBuf),

    /// Source file is not accessible.
    #[error("Permission denied: {}", .0.display())]
    PermissionDenied(PathBuf),

    /// The `--output` file could not be written.
    #[error("Cannot write output file {}: {source}", .path.display())]
    OutputFile { path: PathBuf, source: io::Error },

    /// Host name could not be resolved.
    #[error("Host not found: {host}")]
    HostNotFound { host: String },

    /// Server answered with a non-success status.
    #[error("Status error: {reason}")]
    Status { code: u16, reason: String },

    /// Any other HTTP failure (connection reset, TLS, body decoding...).
    #[error("HTTP request failed: {0}")]
    Http(#[from] reqwest::Error),

    /// The confidence heuristic rejected the document in `exit` mode.
    #[error("Not sure if this document should be processed, exiting")]
    NotReadable,

    /// Properties were requested but the document is passed through unextracted.
    #[error("Can't output properties")]
    PropertiesUnavailable,

    /// The extractor found no main content.
    #[error("Couldn't process document.")]
    NoContent,

    /// The extraction engine rejected the document.
    #[error("Extraction failed: {0}")]
    Extraction(String),

    /// HTML rewriting failed while sanitizing or resolving links.
    #[error("Failed to rewrite HTML: {0}")]
    Rewrite(String),

    #[error("Failed to serialize JSON: {0}")]
    Json(#[from] serde_json::Error),

    /// Other I/O failures.
    #[error("{0}")]
    Io(#[from] io::Error),
}

impl ReadableError {
    /// Classifies an I/O error raised while touching `path`.
    pub fn from_io(err: io::Error, path: &Path) -> Self {
        match err.kind() {
            io::ErrorKind::NotFound => Self::FileNotFound(path.to_path_buf()),
            io::ErrorKind::PermissionDenied => Self::PermissionDenied(path.to_path_buf()),
            _ => Self::Io(err),
        }
    }

    /// Maps this failure onto its exit category.
    pub fn exit_category(&self) -> ExitCategory {
        match self {
            Self::Usage(_) | Self::InvalidUrl(_) => ExitCategory::Usage,
            Self::FileNotFound(_) => ExitCategory::NoInput,
            Self::PermissionDenied(_) => ExitCategory::NoPermission,
            Self::OutputFile { source, .. } => match source.kind() {
                io::ErrorKind::PermissionDenied => ExitCategory::NoPermission,
                io::ErrorKind::NotFound => ExitCategory::NoInput,
                _ => ExitCategory::DataError,
            },
            Self::HostNotFound { .. } => ExitCategory::NoHost,
            Self::Status { .. } => ExitCategory::ServiceUnavailable,
            Self::Http(_)
            | Self::NotReadable
            | Self::PropertiesUnavailable
            | Self::NoContent
            | Self::Extraction(_)
            | Self::Rewrite(_)
            | Self::Json(_)
            | Self::Io(_) => ExitCategory::DataError,
        }
    }
}

/// Result type alias for ReadableError.
pub type Result<T> = std::result::Result<T, ReadableError>;
