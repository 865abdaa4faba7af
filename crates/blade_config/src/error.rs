//! Errors from reading and validating `blade.toml`.

use std::path::PathBuf;

/// Errors that can occur when loading or validating a `blade.toml` configuration.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    /// The configuration file exists but could not be read.
    #[error("failed to read {}: {source}", path.display())]
    Read {
        /// The `blade.toml` that was being read.
        path: PathBuf,
        /// The underlying I/O error.
        #[source]
        source: std::io::Error,
    },

    /// The file is not valid TOML or does not have the `blade.toml` shape.
    #[error("invalid blade.toml: {0}")]
    Toml(#[from] toml::de::Error),

    /// `[views] paths` lists no directories.
    #[error("[views] paths must list at least one directory")]
    NoViewPaths,

    /// An entry of `[views] paths` is an empty string.
    #[error("[views] paths entry {index} is empty")]
    BlankViewPath {
        /// Zero-based position in the list.
        index: usize,
    },

    /// `[cache] path` is an empty string.
    #[error("[cache] path is empty")]
    BlankCachePath,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn display_read() {
        let err = ConfigError::Read {
            path: PathBuf::from("site/blade.toml"),
            source: std::io::Error::new(std::io::ErrorKind::PermissionDenied, "denied"),
        };
        assert_eq!(err.to_string(), "failed to read site/blade.toml: denied");
        assert!(std::error::Error::source(&err).is_some());
    }

    #[test]
    fn display_toml() {
        let inner = toml::from_str::<toml::Table>("[views").unwrap_err();
        let err = ConfigError::from(inner);
        assert!(err.to_string().starts_with("invalid blade.toml: "));
    }

    #[test]
    fn display_validation_errors() {
        assert_eq!(
            ConfigError::NoViewPaths.to_string(),
            "[views] paths must list at least one directory"
        );
        assert_eq!(
            ConfigError::BlankViewPath { index: 1 }.to_string(),
            "[views] paths entry 1 is empty"
        );
        assert_eq!(ConfigError::BlankCachePath.to_string(), "[cache] path is empty");
    }
}
