//! doc_schema library - schema introspection for a document store
//!
//! Provides typed identifier and enum codecs, the type introspection engine,
//! index extraction, the schema registry, YAML/Markdown renderers, and the
//! command layer behind the `doc_schema` binary.

pub mod catalog;
pub mod cli;
pub mod codec;
pub mod commands;
pub mod config;
pub mod output;
pub mod render;
pub mod schema;
pub mod store;

#[macro_use]
pub mod test_macros;
