//! Error types for cache operations.

use std::path::PathBuf;

/// Errors that can occur while locating, translating or storing a template.
///
/// Nothing is retried: every error goes back to the caller as-is.
#[derive(Debug, thiserror::Error)]
pub enum CacheError {
    /// The source template does not exist.
    #[error("template not found: {path}")]
    NotFound {
        /// The missing path.
        path: PathBuf,
    },

    /// An I/O error other than absence occurred while reading or writing.
    #[error("cache I/O error at {path}: {source}")]
    Io {
        /// The path that caused the error.
        path: PathBuf,
        /// The underlying I/O error.
        source: std::io::Error,
    },

    /// The source template is not valid UTF-8 text.
    #[error("template is not valid UTF-8: {path}")]
    InvalidUtf8 {
        /// The offending source path.
        path: PathBuf,
    },
}
