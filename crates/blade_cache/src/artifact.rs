//! Flat on-disk storage for translated templates.
//!
//! Every artifact lives directly in the cache directory as
//! `<cache_dir>/<sha256-hex of source path>.blade.html`. Artifacts carry no
//! header: the file content is exactly the translated template text.

use std::path::{Path, PathBuf};
use std::time::SystemTime;

use crate::digest::PathDigest;
use crate::error::CacheError;
use crate::fs;

/// File name suffix of every compiled artifact.
pub const ARTIFACT_EXT: &str = "blade.html";

/// Maps source paths to artifact files and moves text in and out of them.
#[derive(Debug, Clone)]
pub struct ArtifactStore {
    cache_dir: PathBuf,
}

impl ArtifactStore {
    /// Creates a store rooted at `cache_dir`. Nothing is created on disk yet.
    pub fn new(cache_dir: impl Into<PathBuf>) -> Self {
        Self {
            cache_dir: cache_dir.into(),
        }
    }

    /// Returns the cache directory.
    pub fn cache_dir(&self) -> &Path {
        &self.cache_dir
    }

    /// Returns the artifact path for a source template.
    pub fn artifact_path(&self, source: &Path) -> PathBuf {
        let digest = PathDigest::of(source);
        self.cache_dir.join(format!("{digest}.{ARTIFACT_EXT}"))
    }

    /// Creates the cache directory (and parents) if it is missing.
    pub fn ensure_dir(&self) -> Result<(), CacheError> {
        std::fs::create_dir_all(&self.cache_dir).map_err(|e| CacheError::Io {
            path: self.cache_dir.clone(),
            source: e,
        })
    }

    /// Returns the artifact's modification time, or `None` if there is no artifact.
    pub fn modified(&self, source: &Path) -> Result<Option<SystemTime>, CacheError> {
        fs::modified_if_exists(&self.artifact_path(source))
    }

    /// Reads the artifact text for a source template.
    pub fn read(&self, source: &Path) -> Result<String, CacheError> {
        let path = self.artifact_path(source);
        let bytes = fs::load(&path)?;
        String::from_utf8(bytes).map_err(|_| CacheError::InvalidUtf8 { path })
    }

    /// Writes the artifact for a source template, overwriting in place.
    ///
    /// The write is not atomic: a reader in another process can observe a
    /// partially written file.
    pub fn write(&self, source: &Path, text: &str) -> Result<PathBuf, CacheError> {
        self.ensure_dir()?;
        let path = self.artifact_path(source);
        fs::store(&path, text.as_bytes())?;
        Ok(path)
    }

    /// Deletes every artifact in the cache directory and returns how many
    /// were removed. Other files are left alone.
    pub fn purge(&self) -> Result<usize, CacheError> {
        let dir = &self.cache_dir;
        if !fs::exists(dir)? {
            return Ok(0);
        }

        let entries = std::fs::read_dir(dir).map_err(|e| CacheError::Io {
            path: dir.clone(),
            source: e,
        })?;

        let suffix = format!(".{ARTIFACT_EXT}");
        let mut removed = 0;
        for entry in entries {
            let entry = entry.map_err(|e| CacheError::Io {
                path: dir.clone(),
                source: e,
            })?;
            let path = entry.path();
            let is_artifact = path
                .file_name()
                .and_then(|n| n.to_str())
                .is_some_and(|n| n.ends_with(&suffix));
            if is_artifact && path.is_file() {
                std::fs::remove_file(&path).map_err(|e| CacheError::Io {
                    path: path.clone(),
                    source: e,
                })?;
                removed += 1;
            }
        }

        Ok(removed)
    }
}
