//! A small field-access template engine.
//!
//! Templates mix literal text with actions delimited by `{{` and `}}`:
//!
//! - `{{ .Name }}`, `{{ .Page.title }}`: field access on the current data,
//!   `{{ $.Name }}` on the root data and `{{ . }}` for the data itself
//! - `{{if .A}} ... {{else if eq .Role "admin"}} ... {{else}} ... {{end}}`
//! - functions `not`, `and`, `or`, `eq`, `ne`, `lt`, `le`, `gt`, `ge`, `len`
//! - trim markers `{{- ` / ` -}}` and comments `{{/* ... */}}`
//!
//! Action output is HTML-escaped. Data is a [`serde_json::Value`].

#![warn(missing_docs)]

pub mod error;
mod exec;
mod funcs;
mod lex;
mod parse;
pub mod template;

pub use error::TemplateError;
pub use template::Template;
