//! Blade dialect to field-template translation.
//!
//! The translation is a fixed, ordered list of [`RewriteRule`]s applied to the
//! whole template body by a [`Pipeline`]. Every rule runs exactly once per
//! translation, in the same order, and the translation can never fail.

#![warn(missing_docs)]

pub mod pipeline;
pub mod rule;
pub mod rules;

pub use pipeline::Pipeline;
pub use rule::RewriteRule;
