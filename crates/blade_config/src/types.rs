//! Configuration types deserialized from `blade.toml`.

use std::path::{Path, PathBuf};

use serde::Deserialize;

/// Cache directory used when `[cache] path` is not given.
pub const DEFAULT_CACHE_PATH: &str = ".blade-cache";

/// View root used when no configuration file exists.
pub const DEFAULT_VIEWS_PATH: &str = "views";

/// The top-level configuration parsed from `blade.toml`.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct BladeConfig {
    /// Where view sources are looked up.
    pub views: ViewsConfig,
    /// Where compiled artifacts are stored.
    #[serde(default)]
    pub cache: CacheConfig,
}

/// The `[views]` table.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct ViewsConfig {
    /// Search roots, tried in order. The first root holding a view wins.
    pub paths: Vec<String>,
}

/// The `[cache]` table.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct CacheConfig {
    /// Directory holding compiled artifacts.
    #[serde(default = "default_cache_path")]
    pub path: String,
}

fn default_cache_path() -> String {
    DEFAULT_CACHE_PATH.to_string()
}

impl Default for CacheConfig {
    fn default() -> Self {
        Self {
            path: default_cache_path(),
        }
    }
}

impl Default for BladeConfig {
    /// The layout assumed without a `blade.toml`: `views/` and `.blade-cache/`.
    fn default() -> Self {
        Self {
            views: ViewsConfig {
                paths: vec![DEFAULT_VIEWS_PATH.to_string()],
            },
            cache: CacheConfig::default(),
        }
    }
}

/// View roots and cache directory with relative paths made concrete.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResolvedPaths {
    /// View search roots in lookup order.
    pub view_paths: Vec<PathBuf>,
    /// Cache directory.
    pub cache_path: PathBuf,
}

impl BladeConfig {
    /// Joins every relative path onto `base_dir`. Absolute paths are kept.
    pub fn resolve(&self, base_dir: &Path) -> ResolvedPaths {
        ResolvedPaths {
            view_paths: self.views.paths.iter().map(|p| base_dir.join(p)).collect(),
            cache_path: base_dir.join(&self.cache.path),
        }
    }
}
