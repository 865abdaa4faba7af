//! Freshness checks and compile-on-miss for source templates.

use std::path::{Path, PathBuf};

use blade_compiler::Pipeline;
use parking_lot::Mutex;
use tracing::debug;

use crate::artifact::ArtifactStore;
use crate::error::CacheError;
use crate::fs;

/// A cache of translated templates, keyed by source path.
///
/// An artifact is fresh only while its modification time is strictly after
/// the source's. A stale or missing artifact is rebuilt by running the
/// pipeline over the source and overwriting the artifact.
///
/// All operations on one instance are serialized by a single internal lock, so
/// the instance can be shared across threads. Separate instances (or separate
/// processes) pointed at the same directory are not coordinated.
#[derive(Debug)]
pub struct CompiledCache {
    store: ArtifactStore,
    pipeline: Pipeline,
    lock: Mutex<()>,
}

impl CompiledCache {
    /// Creates a cache in `cache_dir` using the standard Blade pipeline.
    ///
    /// The directory is created on the first write, not here.
    pub fn new(cache_dir: impl Into<PathBuf>) -> Self {
        Self::with_pipeline(cache_dir, Pipeline::standard())
    }

    /// Creates a cache in `cache_dir` that translates with `pipeline`.
    pub fn with_pipeline(cache_dir: impl Into<PathBuf>, pipeline: Pipeline) -> Self {
        Self {
            store: ArtifactStore::new(cache_dir),
            pipeline,
            lock: Mutex::new(()),
        }
    }

    /// Returns the cache directory.
    pub fn cache_dir(&self) -> &Path {
        self.store.cache_dir()
    }

    /// Returns the pipeline used on a miss.
    pub fn pipeline(&self) -> &Pipeline {
        &self.pipeline
    }

    /// Returns where the artifact for `source` lives (or would live).
    pub fn artifact_path(&self, source: &Path) -> PathBuf {
        self.store.artifact_path(source)
    }

    /// Returns the translated text for `source`, rebuilding the artifact if
    /// it is missing or stale.
    pub fn obtain(&self, source: &Path) -> Result<String, CacheError> {
        let _guard = self.lock.lock();

        if !self.expired(source)? {
            debug!(source = %source.display(), "compiled artifact is fresh");
            return self.store.read(source);
        }

        let text = fs::load_string(source)?;
        let translated = self.pipeline.translate(&text);
        let artifact = self.store.write(source, &translated)?;
        debug!(
            source = %source.display(),
            artifact = %artifact.display(),
            "compiled template"
        );
        Ok(translated)
    }

    /// Returns `true` if the artifact for `source` is missing or not strictly
    /// newer than the source.
    ///
    /// Fails with [`CacheError::NotFound`] if the source itself is missing.
    pub fn is_expired(&self, source: &Path) -> Result<bool, CacheError> {
        let _guard = self.lock.lock();
        self.expired(source)
    }

    /// Deletes every artifact in the cache directory.
    pub fn purge(&self) -> Result<usize, CacheError> {
        let _guard = self.lock.lock();
        let removed = self.store.purge()?;
        debug!(cache_dir = %self.cache_dir().display(), removed, "purged compiled artifacts");
        Ok(removed)
    }

    fn expired(&self, source: &Path) -> Result<bool, CacheError> {
        let source_modified = fs::last_modified(source)?;
        match self.store.modified(source)? {
            Some(artifact_modified) => Ok(artifact_modified <= source_modified),
            None => Ok(true),
        }
    }
}
