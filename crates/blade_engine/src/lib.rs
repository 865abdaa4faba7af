//! Resolves logical view names to Blade sources and renders them.
//!
//! A [`Blade`] instance owns an ordered list of view roots and a
//! [`CompiledCache`](blade_cache::CompiledCache). Rendering a view resolves
//! its file, obtains the translated text from the cache (translating only when
//! stale), then parses and executes it with [`blade_tmpl`].
//!
//! ```no_run
//! use blade_engine::Blade;
//! use serde_json::json;
//!
//! let blade = Blade::new(["views"], ".blade-cache");
//! let html = blade.run("pages.home", &json!({"Name": "Ben"}))?;
//! # Ok::<(), blade_engine::BladeError>(())
//! ```

#![warn(missing_docs)]

pub mod engine;
pub mod error;
pub mod resolve;

pub use engine::Blade;
pub use error::BladeError;
pub use resolve::VIEW_EXT;
