//! Filesystem helpers that tell absence apart from I/O failure.

use std::io;
use std::path::Path;
use std::time::SystemTime;

use crate::error::CacheError;

fn io_error(path: &Path, source: io::Error) -> CacheError {
    if source.kind() == io::ErrorKind::NotFound {
        CacheError::NotFound {
            path: path.to_path_buf(),
        }
    } else {
        CacheError::Io {
            path: path.to_path_buf(),
            source,
        }
    }
}

/// Returns `true` if `path` exists, `false` if it does not.
///
/// Any other stat failure (permissions, broken mounts) is an error.
pub fn exists(path: &Path) -> Result<bool, CacheError> {
    match std::fs::metadata(path) {
        Ok(_) => Ok(true),
        Err(e) if e.kind() == io::ErrorKind::NotFound => Ok(false),
        Err(e) => Err(io_error(path, e)),
    }
}

/// Returns the modification time of `path`.
pub fn last_modified(path: &Path) -> Result<SystemTime, CacheError> {
    std::fs::metadata(path)
        .and_then(|m| m.modified())
        .map_err(|e| io_error(path, e))
}

/// Returns the modification time of `path`, or `None` if it does not exist.
pub fn modified_if_exists(path: &Path) -> Result<Option<SystemTime>, CacheError> {
    match last_modified(path) {
        Ok(time) => Ok(Some(time)),
        Err(CacheError::NotFound { .. }) => Ok(None),
        Err(e) => Err(e),
    }
}

/// Reads the whole file.
pub fn load(path: &Path) -> Result<Vec<u8>, CacheError> {
    std::fs::read(path).map_err(|e| io_error(path, e))
}

/// Reads the whole file as UTF-8 text.
pub fn load_string(path: &Path) -> Result<String, CacheError> {
    String::from_utf8(load(path)?).map_err(|_| CacheError::InvalidUtf8 {
        path: path.to_path_buf(),
    })
}

/// Writes `contents` to `path`, replacing any previous content in place.
pub fn store(path: &Path, contents: &[u8]) -> Result<(), CacheError> {
    std::fs::write(path, contents).map_err(|e| CacheError::Io {
        path: path.to_path_buf(),
        source: e,
    })
}
