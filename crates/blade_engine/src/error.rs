//! Error types for view resolution and rendering.

use std::path::PathBuf;

use blade_cache::CacheError;
use blade_tmpl::TemplateError;

/// Errors returned by [`Blade`](crate::Blade).
///
/// Cache and template errors are carried unchanged from the layer that
/// produced them.
#[derive(Debug, thiserror::Error)]
pub enum BladeError {
    /// The logical name cannot be mapped to a relative path.
    #[error("invalid view name '{name}': {reason}")]
    InvalidName {
        /// The rejected name.
        name: String,
        /// What is wrong with it.
        reason: &'static str,
    },

    /// No search root holds the view.
    #[error("view '{name}' not found in {} search root(s)", .searched.len())]
    ViewNotFound {
        /// The logical name that was requested.
        name: String,
        /// Every candidate path that was checked, in order.
        searched: Vec<PathBuf>,
    },

    /// Reading the source or maintaining its artifact failed.
    #[error(transparent)]
    Cache(#[from] CacheError),

    /// The translated template failed to parse or execute.
    #[error(transparent)]
    Template(#[from] TemplateError),

    /// The render data could not be converted to a template value.
    #[error("invalid render data: {0}")]
    Data(#[from] serde_json::Error),
}
