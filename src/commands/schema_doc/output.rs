//! Output formatting for schema-doc command results.

use super::execute::SchemaDocResult;
use crate::output::Outputable;

impl Outputable for SchemaDocResult {
    /// The document itself when it went to stdout, otherwise a short report.
    fn to_table(&self) -> String {
        match &self.output_path {
            None => self.content.clone(),
            Some(path) => format!("Schema documentation ({}) written to {}\n{}", self.format, path, self.summary),
        }
    }
}
