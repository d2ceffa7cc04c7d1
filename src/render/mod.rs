//! Renderers that turn a `SchemaDocument` into text.
//!
//! Two formats are supported: structured YAML (`yaml`, `yml`) and tabular
//! Markdown (`md`, `markdown`). Renderers are pure; writing the result to a
//! sink is the caller's job. `console` adds terminal highlighting for YAML.

pub mod console;
mod markdown;
mod yaml;

pub use markdown::MarkdownRenderer;
pub use yaml::YamlRenderer;

use std::fmt;
use std::str::FromStr;

use enum_dispatch::enum_dispatch;
use thiserror::Error;

use crate::schema::SchemaDocument;

/// Render error types
#[derive(Error, Debug)]
pub enum RenderError {
    #[error("Unsupported format '{0}': expected one of yaml, yml, md, markdown")]
    UnsupportedFormat(String),

    #[error("Failed to serialize schema document: {0}")]
    Serialize(#[from] serde_yaml::Error),

    #[error("Failed to write '{path}': {source}")]
    Write {
        path: String,
        #[source]
        source: std::io::Error,
    },
}

/// Turns a Schema Document into one text format.
#[enum_dispatch]
pub trait SchemaRenderer {
    fn render(&self, document: &SchemaDocument) -> Result<String, RenderError>;

    /// File extension for this format, without the dot.
    fn extension(&self) -> &'static str;
}

#[enum_dispatch(SchemaRenderer)]
#[derive(Debug, Clone)]
pub enum Renderer {
    Yaml(YamlRenderer),
    Markdown(MarkdownRenderer),
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum RenderFormat {
    #[default]
    Yaml,
    Markdown,
}

impl RenderFormat {
    pub fn renderer(&self) -> Renderer {
        match self {
            RenderFormat::Yaml => Renderer::Yaml(YamlRenderer),
            RenderFormat::Markdown => Renderer::Markdown(MarkdownRenderer),
        }
    }
}

impl FromStr for RenderFormat {
    type Err = RenderError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "yaml" | "yml" => Ok(RenderFormat::Yaml),
            "md" | "markdown" => Ok(RenderFormat::Markdown),
            _ => Err(RenderError::UnsupportedFormat(s.to_string())),
        }
    }
}

impl fmt::Display for RenderFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RenderFormat::Yaml => f.write_str("yaml"),
            RenderFormat::Markdown => f.write_str("md"),
        }
    }
}
