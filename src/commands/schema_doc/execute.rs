use std::error::Error;
use std::fs;

use serde::Serialize;
use tracing::info;

use super::SchemaDocCmd;
use crate::catalog;
use crate::commands::Execute;
use crate::config::ConfigFile;
use crate::render::console::{highlight_yaml, stdout_supports_color};
use crate::render::{RenderError, RenderFormat, SchemaRenderer};

/// Result of the schema-doc command execution
#[derive(Debug, Clone, Serialize)]
pub struct SchemaDocResult {
    pub format: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub output_path: Option<String>,
    pub collections: usize,
    pub enum_types: usize,
    pub summary: String,
    /// Rendered document; empty when it was written to a file.
    #[serde(skip)]
    pub content: String,
}

impl SchemaDocCmd {
    fn resolve_format(&self, config: &ConfigFile) -> Result<RenderFormat, RenderError> {
        match self.format.as_deref().or(config.default_format.as_deref()) {
            Some(requested) => requested.parse(),
            None => Ok(RenderFormat::default()),
        }
    }
}

/// Text shown on stdout: YAML is highlighted when the terminal takes color.
fn console_content(rendered: String, format: RenderFormat, colorize: bool) -> String {
    if colorize && format == RenderFormat::Yaml {
        highlight_yaml(&rendered)
    } else {
        rendered
    }
}

impl Execute for SchemaDocCmd {
    type Output = SchemaDocResult;

    fn execute(self, config: &ConfigFile) -> Result<Self::Output, Box<dyn Error>> {
        let format = self.resolve_format(config)?;
        let registry = catalog::registry(&config.introspection)?;
        let document = registry.build_document();
        let rendered = format.renderer().render(&document)?;

        let summary = document.summary();
        let (output_path, content) = match self.output {
            Some(path) => {
                fs::write(&path, &rendered).map_err(|source| RenderError::Write {
                    path: path.display().to_string(),
                    source,
                })?;
                info!(path = %path.display(), %format, "schema documentation written");
                (Some(path.display().to_string()), String::new())
            }
            None => (None, console_content(rendered, format, stdout_supports_color())),
        };

        Ok(SchemaDocResult {
            format: format.to_string(),
            output_path,
            collections: document.collections.len(),
            enum_types: document.enums.len(),
            summary,
            content,
        })
    }
}
