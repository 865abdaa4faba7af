//! The view renderer.

use std::path::PathBuf;

use blade_cache::CompiledCache;
use blade_tmpl::Template;
use serde::Serialize;
use tracing::debug;

use crate::error::BladeError;
use crate::resolve;

/// Renders Blade views found under an ordered list of search roots.
///
/// One instance can be shared between threads; all cache traffic goes through
/// the instance's own [`CompiledCache`] and its lock.
#[derive(Debug)]
pub struct Blade {
    view_paths: Vec<PathBuf>,
    cache: CompiledCache,
}

impl Blade {
    /// Creates a renderer searching `view_paths` in order and keeping
    /// compiled artifacts in `cache_path`.
    pub fn new<I, P>(view_paths: I, cache_path: impl Into<PathBuf>) -> Self
    where
        I: IntoIterator<Item = P>,
        P: Into<PathBuf>,
    {
        Self::with_cache(view_paths, CompiledCache::new(cache_path))
    }

    /// Creates a renderer over an existing cache.
    pub fn with_cache<I, P>(view_paths: I, cache: CompiledCache) -> Self
    where
        I: IntoIterator<Item = P>,
        P: Into<PathBuf>,
    {
        Self {
            view_paths: view_paths.into_iter().map(Into::into).collect(),
            cache,
        }
    }

    /// Returns the search roots in lookup order.
    pub fn view_paths(&self) -> &[PathBuf] {
        &self.view_paths
    }

    /// Returns the compiled-artifact cache.
    pub fn cache(&self) -> &CompiledCache {
        &self.cache
    }

    /// Resolves a logical name to its source file without reading it.
    pub fn find_view(&self, name: &str) -> Result<PathBuf, BladeError> {
        resolve::find_view(&self.view_paths, name)
    }

    /// Returns the translated text of a view, compiling it if stale.
    pub fn compile(&self, name: &str) -> Result<String, BladeError> {
        let source = self.find_view(name)?;
        Ok(self.cache.obtain(&source)?)
    }

    /// Renders the view `name` with `data`.
    pub fn run<T>(&self, name: &str, data: &T) -> Result<String, BladeError>
    where
        T: Serialize + ?Sized,
    {
        let source = self.find_view(name)?;
        let data = serde_json::to_value(data)?;
        let text = self.cache.obtain(&source)?;
        let template = Template::parse(name, &text)?;
        let output = template.render(&data)?;
        debug!(name, bytes = output.len(), "rendered view");
        Ok(output)
    }
}
