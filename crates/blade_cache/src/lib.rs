//! Compiled-artifact cache for translated Blade views.
//!
//! Each source template owns exactly one artifact file in a flat cache
//! directory, named by a digest of the source path. An artifact is served only
//! while its modification time is strictly after the source's; otherwise the
//! source is translated again and the artifact overwritten.

#![warn(missing_docs)]

pub mod artifact;
pub mod cache;
pub mod digest;
pub mod error;
pub mod fs;

pub use artifact::{ArtifactStore, ARTIFACT_EXT};
pub use cache::CompiledCache;
pub use digest::PathDigest;
pub use error::CacheError;
