//! Mapping logical view names onto files under the search roots.
//!
//! A logical name is dot-separated: `pages.home` means `pages/home.blade`
//! relative to a search root.

use std::path::PathBuf;

use blade_cache::fs;
use tracing::debug;

use crate::error::BladeError;

/// Extension appended to the last segment of a logical name.
pub const VIEW_EXT: &str = "blade";

/// Converts a logical name into a path relative to a search root.
pub fn view_relative_path(name: &str) -> Result<PathBuf, BladeError> {
    let invalid = |reason| BladeError::InvalidName {
        name: name.to_string(),
        reason,
    };

    if name.is_empty() {
        return Err(invalid("name is empty"));
    }

    let segments: Vec<&str> = name.split('.').collect();
    let mut path = PathBuf::new();
    for (i, segment) in segments.iter().enumerate() {
        if segment.is_empty() {
            return Err(invalid("empty segment"));
        }
        if segment.contains(['/', '\\']) {
            return Err(invalid("segment contains a path separator"));
        }
        if i + 1 == segments.len() {
            path.push(format!("{segment}.{VIEW_EXT}"));
        } else {
            path.push(segment);
        }
    }
    Ok(path)
}

/// Returns the first existing file for `name` across `roots`, in order.
///
/// Only stats candidates; nothing is written.
pub fn find_view(roots: &[PathBuf], name: &str) -> Result<PathBuf, BladeError> {
    let relative = view_relative_path(name)?;
    let mut searched = Vec::with_capacity(roots.len());

    for root in roots {
        let candidate = root.join(&relative);
        if fs::exists(&candidate)? {
            debug!(name, path = %candidate.display(), "resolved view");
            return Ok(candidate);
        }
        searched.push(candidate);
    }

    debug!(name, roots = roots.len(), "view not found");
    Err(BladeError::ViewNotFound {
        name: name.to_string(),
        searched,
    })
}
