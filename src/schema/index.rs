//! Index declarations and the index metadata extractor.
//!
//! Indexable models declare their secondary indexes through
//! `IndexDeclaration::builder()`. The default `_id_` index is implicit and is
//! always reported first; models may not declare it themselves.

use std::fmt;
use std::time::Duration;

use indexmap::IndexMap;
use serde::{Serialize, Serializer};

use super::introspect::IDENTITY_FIELD;
use super::model::ModelEntry;
use super::registry::ConfigError;

/// Name of the implicit index on the identity field.
pub const DEFAULT_INDEX_NAME: &str = "_id_";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum IndexDirection {
    Ascending,
    Descending,
    Text,
    Hashed,
}

impl IndexDirection {
    /// Key marker as the store writes it (`1`, `-1`, `text`, `hashed`).
    pub fn marker(&self) -> &'static str {
        match self {
            IndexDirection::Ascending => "1",
            IndexDirection::Descending => "-1",
            IndexDirection::Text => "text",
            IndexDirection::Hashed => "hashed",
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            IndexDirection::Ascending => "ascending",
            IndexDirection::Descending => "descending",
            IndexDirection::Text => "text",
            IndexDirection::Hashed => "hashed",
        }
    }
}

impl fmt::Display for IndexDirection {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl Serialize for IndexDirection {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(self.as_str())
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct IndexKey {
    pub field: String,
    pub direction: IndexDirection,
}

/// Options of one index. Every option is unset unless explicitly given.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct IndexOptions {
    pub name: Option<String>,
    pub unique: Option<bool>,
    pub sparse: Option<bool>,
    pub expire_after: Option<Duration>,
    pub partial_filter: Option<serde_json::Value>,
    pub weights: Option<IndexMap<String, i32>>,
    pub min: Option<f64>,
    pub max: Option<f64>,
    pub hidden: Option<bool>,
    pub default_language: Option<String>,
}

impl IndexOptions {
    /// Set options other than the name, rendered as strings in a stable order.
    pub fn to_option_map(&self) -> IndexMap<String, String> {
        let mut map = IndexMap::new();

        if let Some(unique) = self.unique {
            map.insert("unique".to_string(), unique.to_string());
        }
        if let Some(sparse) = self.sparse {
            map.insert("sparse".to_string(), sparse.to_string());
        }
        if let Some(expire_after) = self.expire_after {
            map.insert("expireAfterSeconds".to_string(), expire_after.as_secs().to_string());
        }
        if let Some(filter) = &self.partial_filter {
            map.insert("partialFilterExpression".to_string(), filter.to_string());
        }
        if let Some(weights) = &self.weights {
            let rendered = serde_json::to_string(weights).unwrap_or_default();
            map.insert("weights".to_string(), rendered);
        }
        if let Some(min) = self.min {
            map.insert("min".to_string(), min.to_string());
        }
        if let Some(max) = self.max {
            map.insert("max".to_string(), max.to_string());
        }
        if let Some(hidden) = self.hidden {
            map.insert("hidden".to_string(), hidden.to_string());
        }
        if let Some(language) = &self.default_language {
            map.insert("defaultLanguage".to_string(), language.clone());
        }

        map
    }

    pub fn is_empty(&self) -> bool {
        self.name.is_none() && self.to_option_map().is_empty()
    }
}

/// One index: resolved name, ordered keys, options.
#[derive(Debug, Clone, PartialEq)]
pub struct IndexDeclaration {
    pub name: String,
    pub keys: Vec<IndexKey>,
    pub options: IndexOptions,
}

impl IndexDeclaration {
    pub fn builder() -> IndexBuilder {
        IndexBuilder::default()
    }

    /// The implicit identity index.
    pub fn default_index() -> Self {
        Self {
            name: DEFAULT_INDEX_NAME.to_string(),
            keys: vec![IndexKey {
                field: IDENTITY_FIELD.to_string(),
                direction: IndexDirection::Ascending,
            }],
            options: IndexOptions::default(),
        }
    }

    /// True when this declaration targets the implicit identity index.
    pub fn is_default(&self) -> bool {
        self.name == DEFAULT_INDEX_NAME
            || matches!(
                self.keys.as_slice(),
                [IndexKey { field, direction: IndexDirection::Ascending }] if field == IDENTITY_FIELD
            )
    }
}

/// Builder for `IndexDeclaration`; keys keep the order they are added in.
#[derive(Debug, Clone, Default)]
pub struct IndexBuilder {
    keys: Vec<IndexKey>,
    options: IndexOptions,
}

impl IndexBuilder {
    pub fn key(mut self, field: impl Into<String>, direction: IndexDirection) -> Self {
        self.keys.push(IndexKey {
            field: field.into(),
            direction,
        });
        self
    }

    pub fn ascending(self, field: impl Into<String>) -> Self {
        self.key(field, IndexDirection::Ascending)
    }

    pub fn descending(self, field: impl Into<String>) -> Self {
        self.key(field, IndexDirection::Descending)
    }

    pub fn text(self, field: impl Into<String>) -> Self {
        self.key(field, IndexDirection::Text)
    }

    pub fn hashed(self, field: impl Into<String>) -> Self {
        self.key(field, IndexDirection::Hashed)
    }

    pub fn named(mut self, name: impl Into<String>) -> Self {
        self.options.name = Some(name.into());
        self
    }

    pub fn unique(mut self) -> Self {
        self.options.unique = Some(true);
        self
    }

    pub fn sparse(mut self) -> Self {
        self.options.sparse = Some(true);
        self
    }

    pub fn hidden(mut self) -> Self {
        self.options.hidden = Some(true);
        self
    }

    pub fn expire_after(mut self, ttl: Duration) -> Self {
        self.options.expire_after = Some(ttl);
        self
    }

    pub fn partial_filter(mut self, filter: serde_json::Value) -> Self {
        self.options.partial_filter = Some(filter);
        self
    }

    pub fn weight(mut self, field: impl Into<String>, weight: i32) -> Self {
        self.options
            .weights
            .get_or_insert_with(IndexMap::new)
            .insert(field.into(), weight);
        self
    }

    pub fn bounds(mut self, min: f64, max: f64) -> Self {
        self.options.min = Some(min);
        self.options.max = Some(max);
        self
    }

    pub fn default_language(mut self, language: impl Into<String>) -> Self {
        self.options.default_language = Some(language.into());
        self
    }

    /// Finish the declaration, resolving its name.
    pub fn build(self) -> IndexDeclaration {
        let name = match &self.options.name {
            Some(name) if !name.trim().is_empty() => name.clone(),
            _ => default_index_name(&self.keys),
        };

        IndexDeclaration {
            name,
            keys: self.keys,
            options: self.options,
        }
    }
}

/// Name the store gives an unnamed index: `field_marker` pairs joined by `_`.
pub fn default_index_name(keys: &[IndexKey]) -> String {
    keys.iter()
        .map(|key| format!("{}_{}", key.field, key.direction.marker()))
        .collect::<Vec<_>>()
        .join("_")
}

/// Every index of a model: the default index first, then declared ones in
/// declaration order. Empty for models that are not indexable.
pub fn extract_indices(model: &ModelEntry) -> Vec<IndexDeclaration> {
    match model.declared_indexes() {
        Some(declared) => std::iter::once(IndexDeclaration::default_index())
            .chain(declared)
            .collect(),
        None => Vec::new(),
    }
}

/// Registration-time checks on a collection's declared indexes.
pub fn validate_declared(collection: &str, declared: &[IndexDeclaration]) -> Result<(), ConfigError> {
    for (position, index) in declared.iter().enumerate() {
        if index.keys.is_empty() {
            return Err(ConfigError::EmptyIndex {
                collection: collection.to_string(),
                position,
            });
        }

        if index.is_default() {
            return Err(ConfigError::DefaultIndexRedeclared {
                collection: collection.to_string(),
            });
        }

        if declared[..position].iter().any(|earlier| earlier.name == index.name) {
            return Err(ConfigError::IndexConflict {
                collection: collection.to_string(),
                name: index.name.clone(),
            });
        }
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;
    use serde_json::json;

    #[rstest]
    #[case(IndexDeclaration::builder().ascending("userId").descending("createdOn").build(), "userId_1_createdOn_-1")]
    #[case(IndexDeclaration::builder().text("title").build(), "title_text")]
    #[case(IndexDeclaration::builder().hashed("shard").build(), "shard_hashed")]
    #[case(IndexDeclaration::builder().ascending("code").named("code_unique").build(), "code_unique")]
    #[case(IndexDeclaration::builder().ascending("code").named("  ").build(), "code_1")]
    fn test_resolved_names(#[case] index: IndexDeclaration, #[case] expected: &str) {
        assert_eq!(index.name, expected);
    }

    #[test]
    fn test_option_map_only_contains_set_options() {
        let index = IndexDeclaration::builder()
            .ascending("expiresOn")
            .unique()
            .expire_after(Duration::from_secs(3600))
            .partial_filter(json!({ "enabled": true }))
            .build();

        let options = index.options.to_option_map();
        let keys: Vec<_> = options.keys().map(String::as_str).collect();
        assert_eq!(keys, vec!["unique", "expireAfterSeconds", "partialFilterExpression"]);
        assert_eq!(options["unique"], "true");
        assert_eq!(options["expireAfterSeconds"], "3600");
        assert_eq!(options["partialFilterExpression"], r#"{"enabled":true}"#);
    }

    #[test]
    fn test_weights_and_bounds() {
        let index = IndexDeclaration::builder()
            .text("title")
            .text("body")
            .weight("title", 10)
            .weight("body", 2)
            .bounds(-90.0, 90.0)
            .default_language("none")
            .build();

        let options = index.options.to_option_map();
        assert_eq!(options["weights"], r#"{"title":10,"body":2}"#);
        assert_eq!(options["min"], "-90");
        assert_eq!(options["max"], "90");
        assert_eq!(options["defaultLanguage"], "none");
    }

    #[test]
    fn test_default_options_are_empty() {
        let index = IndexDeclaration::builder().ascending("status").build();
        assert!(index.options.is_empty());
        assert!(index.options.to_option_map().is_empty());
        assert!(IndexDeclaration::default_index().options.is_empty());
    }

    #[test]
    fn test_default_index_detection() {
        assert!(IndexDeclaration::default_index().is_default());
        assert!(IndexDeclaration::builder().ascending("_id").build().is_default());
        assert!(IndexDeclaration::builder().ascending("code").named("_id_").build().is_default());
        assert!(!IndexDeclaration::builder().descending("_id").build().is_default());
    }

    #[test]
    fn test_validate_declared() {
        let ok = vec![
            IndexDeclaration::builder().ascending("a").build(),
            IndexDeclaration::builder().ascending("b").build(),
        ];
        assert!(validate_declared("Things", &ok).is_ok());

        let empty = vec![IndexDeclaration::builder().build()];
        assert!(matches!(
            validate_declared("Things", &empty),
            Err(ConfigError::EmptyIndex { position: 0, .. })
        ));

        let default = vec![IndexDeclaration::builder().ascending("_id").build()];
        assert!(matches!(
            validate_declared("Things", &default),
            Err(ConfigError::DefaultIndexRedeclared { .. })
        ));

        let clash = vec![
            IndexDeclaration::builder().ascending("a").build(),
            IndexDeclaration::builder().ascending("b").named("a_1").build(),
        ];
        assert!(matches!(
            validate_declared("Things", &clash),
            Err(ConfigError::IndexConflict { ref name, .. }) if name == "a_1"
        ));
    }

    #[test]
    fn test_direction_labels() {
        assert_eq!(IndexDirection::Ascending.to_string(), "ascending");
        assert_eq!(IndexDirection::Descending.marker(), "-1");
        assert_eq!(serde_json::to_string(&IndexDirection::Text).unwrap(), "\"text\"");
    }
}
