//! Locating the project and building a renderer from its configuration.

use std::path::{Path, PathBuf};

use blade_config::CONFIG_FILE;
use blade_engine::Blade;
use tracing::debug;

use crate::GlobalArgs;

/// Walks up from `start` looking for the nearest directory holding `blade.toml`.
pub fn find_project_root(start: &Path) -> Option<PathBuf> {
    let mut current = start.to_path_buf();
    loop {
        if current.join(CONFIG_FILE).is_file() {
            return Some(current);
        }
        if !current.pop() {
            return None;
        }
    }
}

/// Resolves the project directory from global CLI args.
///
/// `--config` may name either `blade.toml` itself or its directory. Without
/// it, the nearest ancestor holding `blade.toml` is used, falling back to the
/// current directory.
pub fn resolve_project_root(global: &GlobalArgs) -> Result<PathBuf, Box<dyn std::error::Error>> {
    if let Some(ref config_path) = global.config {
        let p = PathBuf::from(config_path);
        if p.is_file() {
            return Ok(p
                .parent()
                .map(|p| p.to_path_buf())
                .unwrap_or_else(|| PathBuf::from(".")));
        }
        return Ok(p);
    }
    let cwd = std::env::current_dir()?;
    Ok(find_project_root(&cwd).unwrap_or(cwd))
}

/// Loads the project configuration (or the default layout) and builds a renderer.
pub fn open_engine(global: &GlobalArgs) -> Result<Blade, Box<dyn std::error::Error>> {
    let project_dir = resolve_project_root(global)?;
    let config = blade_config::load_config_or_default(&project_dir)?;
    let paths = config.resolve(&project_dir);
    debug!(
        project = %project_dir.display(),
        cache = %paths.cache_path.display(),
        "opened project"
    );
    Ok(Blade::new(paths.view_paths, paths.cache_path))
}
