//! Tabular prose rendering as Markdown.

use super::{RenderError, SchemaRenderer};
use crate::codec::lower_first;
use crate::schema::{CollectionSchema, FieldMap, SchemaDocument};

const TITLE: &str = "# Schema Documentation";
const RULE: &str = "---";

#[derive(Debug, Clone, Copy, Default)]
pub struct MarkdownRenderer;

impl SchemaRenderer for MarkdownRenderer {
    fn render(&self, document: &SchemaDocument) -> Result<String, RenderError> {
        let mut lines = vec![TITLE.to_string(), String::new()];

        if !document.enums.is_empty() {
            lines.push("## Enums".to_string());
            lines.push(String::new());

            for (name, dictionary) in &document.enums {
                lines.push(format!("### {}", name));
                lines.push(String::new());
                for (member, value) in dictionary.iter() {
                    lines.push(format!("- {}: `{}`", member, value));
                }
                lines.push(String::new());
            }

            lines.push(RULE.to_string());
            lines.push(String::new());
        }

        for (i, collection) in document.collections.iter().enumerate() {
            render_collection(&mut lines, collection);

            if i + 1 < document.collections.len() {
                lines.push(RULE.to_string());
                lines.push(String::new());
            }
        }

        let mut out = String::with_capacity(lines.iter().map(|l| l.len() + 1).sum());
        for line in &lines {
            out.push_str(line);
            out.push('\n');
        }
        Ok(out)
    }

    fn extension(&self) -> &'static str {
        "md"
    }
}

fn render_collection(lines: &mut Vec<String>, collection: &CollectionSchema) {
    lines.push(format!("## {}", collection.collection_name));
    lines.push(String::new());
    lines.push(format!("**Description**: {}", collection.description));
    lines.push(String::new());

    if !collection.indices.is_empty() {
        lines.push("### Indices".to_string());
        lines.push(String::new());
        lines.push("| Index | Field | Direction |".to_string());
        lines.push("|-------|-------|-----------|".to_string());

        for index in &collection.indices {
            match index.keys.split_first() {
                Some((first, rest)) => {
                    lines.push(format!(
                        "| {} | {} | {} |",
                        escape(&index.name),
                        escape(&first.field),
                        first.direction
                    ));
                    for key in rest {
                        lines.push(format!("|  | {} | {} |", escape(&key.field), key.direction));
                    }
                }
                None => lines.push(format!("| {} | - | - |", escape(&index.name))),
            }
        }

        lines.push(String::new());
    }

    lines.push("### Fields".to_string());
    lines.push(String::new());
    lines.push("| Field | Type | Description |".to_string());
    lines.push("|-------|------|-------------|".to_string());

    for row in flatten(&collection.fields, "") {
        lines.push(format!(
            "| {} | `{}` | {} |",
            escape(&row.path),
            escape(&row.kind),
            escape(&row.description)
        ));
    }

    lines.push(String::new());
}

struct FieldRow {
    path: String,
    kind: String,
    description: String,
}

/// Depth-first flattening into dotted paths; array parents get a `[]` suffix.
fn flatten(fields: &FieldMap, prefix: &str) -> Vec<FieldRow> {
    let mut rows = Vec::new();

    for (name, field) in fields {
        let name = lower_first(name);
        let path = if prefix.is_empty() {
            name
        } else {
            format!("{}.{}", prefix, name)
        };

        let mut kind = field.kind.to_string();
        if let Some(id_type) = field.id_type() {
            kind.push_str(&format!(" (IdType: {})", id_type));
        }
        if let Some(enum_type) = field.enum_type() {
            kind.push_str(&format!(" (EnumType: {})", enum_type));
        }

        let nested = field.fields().filter(|nested| !nested.is_empty());
        let nested_prefix = if field.kind.is_array() {
            format!("{}[]", path)
        } else {
            path.clone()
        };

        rows.push(FieldRow {
            path,
            kind,
            description: field.description.clone(),
        });

        if let Some(nested) = nested {
            rows.extend(flatten(nested, &nested_prefix));
        }
    }

    rows
}

fn escape(value: &str) -> String {
    value.replace('|', "\\|")
}
