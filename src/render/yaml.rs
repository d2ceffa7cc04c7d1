//! Structured-text rendering as YAML.
//!
//! Layout:
//!
//! ```yaml
//! enums:                  # omitted when there are none
//!   ExportStatus:
//!     Pending: pending
//! collections:
//!   ExportTasks:
//!     description: Export tasks
//!     indices:            # `{}` when the collection has none
//!       _id_:
//!         fields:
//!         - field: _id
//!           direction: ascending
//!     fields:
//!       _id:
//!         type: objectId
//!         id_type: ExportTaskId
//!         description: Id
//! ```

use std::collections::BTreeMap;

use indexmap::IndexMap;
use serde::Serialize;

use super::{RenderError, SchemaRenderer};
use crate::codec::{lower_first, EnumDictionary};
use crate::schema::{CollectionSchema, FieldMap, FieldSchema, IndexDeclaration, SchemaDocument};

#[derive(Debug, Clone, Copy, Default)]
pub struct YamlRenderer;

impl SchemaRenderer for YamlRenderer {
    fn render(&self, document: &SchemaDocument) -> Result<String, RenderError> {
        let view = YamlDocument {
            enums: document.enums.clone(),
            collections: document
                .collections
                .iter()
                .map(|c| (c.collection_name.clone(), YamlCollection::from(c)))
                .collect(),
        };

        Ok(serde_yaml::to_string(&view)?)
    }

    fn extension(&self) -> &'static str {
        "yaml"
    }
}

#[derive(Serialize)]
struct YamlDocument {
    #[serde(skip_serializing_if = "BTreeMap::is_empty")]
    enums: BTreeMap<String, EnumDictionary>,
    collections: IndexMap<String, YamlCollection>,
}

#[derive(Serialize)]
struct YamlCollection {
    description: String,
    indices: IndexMap<String, YamlIndex>,
    fields: IndexMap<String, YamlField>,
}

impl From<&CollectionSchema> for YamlCollection {
    fn from(collection: &CollectionSchema) -> Self {
        Self {
            description: collection.description.clone(),
            indices: collection
                .indices
                .iter()
                .map(|index| (index.name.clone(), YamlIndex::from(index)))
                .collect(),
            fields: yaml_fields(&collection.fields),
        }
    }
}

#[derive(Serialize)]
struct YamlIndex {
    #[serde(skip_serializing_if = "IndexMap::is_empty")]
    options: IndexMap<String, String>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    fields: Vec<YamlIndexField>,
}

impl From<&IndexDeclaration> for YamlIndex {
    fn from(index: &IndexDeclaration) -> Self {
        Self {
            options: index.options.to_option_map(),
            fields: index
                .keys
                .iter()
                .map(|key| YamlIndexField {
                    field: key.field.clone(),
                    direction: key.direction.to_string(),
                })
                .collect(),
        }
    }
}

#[derive(Serialize)]
struct YamlIndexField {
    field: String,
    direction: String,
}

#[derive(Serialize)]
struct YamlField {
    #[serde(rename = "type")]
    kind: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    id_type: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    enum_type: Option<String>,
    description: String,
    #[serde(skip_serializing_if = "is_false")]
    nullable: bool,
    #[serde(skip_serializing_if = "IndexMap::is_empty")]
    fields: IndexMap<String, YamlField>,
}

impl From<&FieldSchema> for YamlField {
    fn from(field: &FieldSchema) -> Self {
        Self {
            kind: field.kind.to_string(),
            id_type: field.id_type().map(str::to_string),
            enum_type: field.enum_type().map(str::to_string),
            description: field.description.clone(),
            nullable: field.nullable,
            fields: field.fields().map(yaml_fields).unwrap_or_default(),
        }
    }
}

fn yaml_fields(fields: &FieldMap) -> IndexMap<String, YamlField> {
    fields
        .iter()
        .map(|(name, field)| (lower_first(name), YamlField::from(field)))
        .collect()
}

fn is_false(value: &bool) -> bool {
    !*value
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::codec::EnumWireValue;
    use crate::schema::{FieldDetail, WireKind};
    use serde_yaml::Value;

    fn sample_document() -> SchemaDocument {
        let mut nested = FieldMap::new();
        nested.insert(
            "name".to_string(),
            FieldSchema {
                description: "Name".to_string(),
                ..FieldSchema::leaf(WireKind::String)
            },
        );

        let mut fields = FieldMap::new();
        fields.insert(
            "_id".to_string(),
            FieldSchema {
                description: "Id".to_string(),
                ..FieldSchema::leaf(WireKind::String).with_detail(FieldDetail::Identifier("SubjectId".into()))
            },
        );
        fields.insert(
            "status".to_string(),
            FieldSchema {
                description: "Status \"quoted\"".to_string(),
                nullable: true,
                ..FieldSchema::leaf(WireKind::String).with_detail(FieldDetail::Enumeration("ExportStatus".into()))
            },
        );
        fields.insert(
            "Items".to_string(),
            FieldSchema::leaf(WireKind::Array(Box::new(WireKind::Object))).with_detail(FieldDetail::Nested(nested)),
        );

        let mut enums = BTreeMap::new();
        enums.insert(
            "ExportStatus".to_string(),
            [
                ("Pending".to_string(), EnumWireValue::Str("pending".into())),
                ("Running".to_string(), EnumWireValue::Str("running".into())),
            ]
            .into_iter()
            .collect(),
        );

        SchemaDocument {
            enums,
            collections: vec![CollectionSchema {
                collection_name: "Subjects".to_string(),
                model_name: "Subject".to_string(),
                description: "Subjects".to_string(),
                auditable: false,
                finalizable: false,
                indices: vec![
                    IndexDeclaration::default_index(),
                    IndexDeclaration::builder().ascending("code").unique().build(),
                ],
                fields,
            }],
        }
    }

    fn render(document: &SchemaDocument) -> Value {
        let text = YamlRenderer.render(document).unwrap();
        serde_yaml::from_str(&text).unwrap()
    }

    #[test]
    fn test_enums_section() {
        let value = render(&sample_document());
        assert_eq!(value["enums"]["ExportStatus"]["Pending"], Value::from("pending"));
        assert_eq!(value["enums"]["ExportStatus"]["Running"], Value::from("running"));
    }

    #[test]
    fn test_enums_omitted_when_empty() {
        let mut doc = sample_document();
        doc.enums.clear();
        let text = YamlRenderer.render(&doc).unwrap();
        assert!(!text.contains("enums:"));
        assert!(text.starts_with("collections:"));
    }

    #[test]
    fn test_field_attributes() {
        let value = render(&sample_document());
        let fields = &value["collections"]["Subjects"]["fields"];

        assert_eq!(fields["_id"]["type"], Value::from("string"));
        assert_eq!(fields["_id"]["id_type"], Value::from("SubjectId"));
        assert!(fields["_id"].get("nullable").is_none());
        assert!(fields["_id"].get("enum_type").is_none());

        assert_eq!(fields["status"]["enum_type"], Value::from("ExportStatus"));
        assert_eq!(fields["status"]["nullable"], Value::from(true));
        assert_eq!(fields["status"]["description"], Value::from("Status \"quoted\""));
    }

    #[test]
    fn test_nested_fields_with_lower_first_names() {
        let value = render(&sample_document());
        let items = &value["collections"]["Subjects"]["fields"]["items"];
        assert_eq!(items["type"], Value::from("array<object>"));
        assert_eq!(items["fields"]["name"]["description"], Value::from("Name"));
    }

    #[test]
    fn test_indices() {
        let value = render(&sample_document());
        let indices = &value["collections"]["Subjects"]["indices"];

        assert_eq!(indices["_id_"]["fields"][0]["field"], Value::from("_id"));
        assert_eq!(indices["_id_"]["fields"][0]["direction"], Value::from("ascending"));
        assert!(indices["_id_"].get("options").is_none());
        assert_eq!(indices["code_1"]["options"]["unique"], Value::from("true"));
    }

    #[test]
    fn test_empty_indices_render_as_empty_map() {
        let mut doc = sample_document();
        doc.collections[0].indices.clear();
        let text = YamlRenderer.render(&doc).unwrap();
        assert!(text.contains("indices: {}"));
    }

    #[test]
    fn test_render_is_deterministic() {
        let doc = sample_document();
        assert_eq!(YamlRenderer.render(&doc).unwrap(), YamlRenderer.render(&doc).unwrap());
    }
}
