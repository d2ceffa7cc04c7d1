//! The Schema Document: the full description of every registered collection.

use std::collections::BTreeMap;

use super::field::FieldMap;
use super::index::IndexDeclaration;
use crate::codec::EnumDictionary;

#[derive(Debug, Clone, Default, PartialEq)]
pub struct SchemaDocument {
    /// Every enumeration met while walking the models, keyed by type name.
    pub enums: BTreeMap<String, EnumDictionary>,
    /// One entry per registered model, ordered by model name.
    pub collections: Vec<CollectionSchema>,
}

impl SchemaDocument {
    pub fn collection(&self, name: &str) -> Option<&CollectionSchema> {
        self.collections.iter().find(|c| c.collection_name == name)
    }

    /// One-line summary, e.g. `12 collections, 7 enum types found`.
    pub fn summary(&self) -> String {
        format!(
            "{} collections, {} enum types found",
            self.collections.len(),
            self.enums.len()
        )
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct CollectionSchema {
    pub collection_name: String,
    pub model_name: String,
    pub description: String,
    pub auditable: bool,
    pub finalizable: bool,
    pub indices: Vec<IndexDeclaration>,
    pub fields: FieldMap,
}
