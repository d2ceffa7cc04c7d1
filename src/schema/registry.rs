//! Schema Registry.
//!
//! The registry is an explicitly built, immutable snapshot of the document
//! models an application stores. All registration problems surface from
//! `SchemaRegistryBuilder::build`; once built, producing a `SchemaDocument`
//! cannot fail.

use std::any::TypeId;
use std::collections::{BTreeMap, HashMap};

use thiserror::Error;
use tracing::{debug, info};

use super::document::{CollectionSchema, SchemaDocument};
use super::index::{extract_indices, validate_declared};
use super::introspect::{merge_enums, EnumDictionaries, TypeMapper};
use super::model::{DocumentModel, Indexable, ModelEntry};
use crate::codec::EnumEncoding;
use crate::config::IntrospectionConfig;

/// A model set that cannot be registered.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum ConfigError {
    #[error("Model '{model}' has an empty collection name")]
    EmptyCollectionName { model: String },

    #[error("Collection '{collection}' is claimed by both '{first}' and '{second}'")]
    DuplicateCollection {
        collection: String,
        first: String,
        second: String,
    },

    #[error("Model '{model}' is registered more than once")]
    DuplicateModel { model: String },

    #[error("Model '{model}' is not a record type")]
    NotARecord { model: String },

    #[error("Index #{position} of collection '{collection}' has no keys")]
    EmptyIndex { collection: String, position: usize },

    #[error("Collection '{collection}' re-declares the default _id_ index")]
    DefaultIndexRedeclared { collection: String },

    #[error("Collection '{collection}' declares index '{name}' more than once")]
    IndexConflict { collection: String, name: String },

    #[error("Enum '{enum_type}' maps more than one member to wire value {value}")]
    EnumWireCollision { enum_type: String, value: String },
}

/// Collects model registrations and validates them.
#[derive(Debug, Default)]
pub struct SchemaRegistryBuilder {
    entries: Vec<ModelEntry>,
    config: IntrospectionConfig,
}

impl SchemaRegistryBuilder {
    pub fn register<M: DocumentModel>(self) -> Self {
        self.register_entry(ModelEntry::of::<M>())
    }

    pub fn register_indexable<M: Indexable>(self) -> Self {
        self.register_entry(ModelEntry::indexable::<M>())
    }

    pub fn register_entry(mut self, entry: ModelEntry) -> Self {
        self.entries.push(entry);
        self
    }

    pub fn with_config(mut self, config: IntrospectionConfig) -> Self {
        self.config = config;
        self
    }

    /// Validate every registration and freeze the result.
    ///
    /// # Errors
    ///
    /// Returns the first problem found: a model that is not a record, an
    /// empty or duplicate collection name, a model registered twice, an
    /// invalid index declaration, or an enumeration whose members share a
    /// wire value.
    pub fn build(self) -> Result<SchemaRegistry, ConfigError> {
        let mapper = TypeMapper::from_config(&self.config);
        let mut seen_models: Vec<TypeId> = Vec::with_capacity(self.entries.len());
        let mut seen_collections: HashMap<&'static str, &'static str> = HashMap::new();

        for entry in &self.entries {
            let model = entry.model_name();

            let record = entry.record().ok_or_else(|| ConfigError::NotARecord {
                model: model.to_string(),
            })?;

            if seen_models.contains(&entry.type_id) {
                return Err(ConfigError::DuplicateModel {
                    model: model.to_string(),
                });
            }
            seen_models.push(entry.type_id);

            if entry.collection_name.trim().is_empty() {
                return Err(ConfigError::EmptyCollectionName {
                    model: model.to_string(),
                });
            }

            if let Some(first) = seen_collections.insert(entry.collection_name, model) {
                return Err(ConfigError::DuplicateCollection {
                    collection: entry.collection_name.to_string(),
                    first: first.to_string(),
                    second: model.to_string(),
                });
            }

            if let Some(declared) = entry.declared_indexes() {
                validate_declared(entry.collection_name, &declared)?;
            }

            let walked = mapper.introspect_record(record);
            check_enum_collisions(&walked.enums, &walked.encodings)?;

            debug!(model, collection = entry.collection_name, "registered model");
        }

        let mut models = self.entries;
        models.sort_by(|a, b| a.model_name().cmp(b.model_name()));

        info!(models = models.len(), max_depth = mapper.max_depth(), "schema registry built");
        Ok(SchemaRegistry { models, mapper })
    }
}

fn check_enum_collisions(
    enums: &EnumDictionaries,
    encodings: &BTreeMap<String, EnumEncoding>,
) -> Result<(), ConfigError> {
    for (name, dictionary) in enums {
        let collision = match encodings.get(name) {
            Some(encoding) => dictionary.colliding_wire_value(*encoding),
            None => dictionary.duplicate_wire_value(),
        };
        if let Some(value) = collision {
            return Err(ConfigError::EnumWireCollision {
                enum_type: name.clone(),
                value: value.to_string(),
            });
        }
    }
    Ok(())
}

/// Immutable set of registered document models.
#[derive(Debug, Clone)]
pub struct SchemaRegistry {
    models: Vec<ModelEntry>,
    mapper: TypeMapper,
}

impl SchemaRegistry {
    pub fn builder() -> SchemaRegistryBuilder {
        SchemaRegistryBuilder::default()
    }

    /// Registered models, ordered by model name.
    pub fn models(&self) -> &[ModelEntry] {
        &self.models
    }

    pub fn collection_names(&self) -> Vec<&'static str> {
        self.models.iter().map(|m| m.collection_name).collect()
    }

    pub fn len(&self) -> usize {
        self.models.len()
    }

    pub fn is_empty(&self) -> bool {
        self.models.is_empty()
    }

    pub fn mapper(&self) -> &TypeMapper {
        &self.mapper
    }

    /// Build a fresh Schema Document from the registered models.
    ///
    /// Enumeration dictionaries from every model are merged into one map;
    /// when two dictionaries share a name the first one seen is kept.
    pub fn build_document(&self) -> SchemaDocument {
        let mut enums = EnumDictionaries::new();
        let mut collections = Vec::with_capacity(self.models.len());

        for model in &self.models {
            let Some(record) = model.record() else {
                continue;
            };

            let walked = self.mapper.introspect_record(record);
            merge_enums(&mut enums, walked.enums);

            collections.push(CollectionSchema {
                collection_name: model.collection_name.to_string(),
                model_name: model.model_name().to_string(),
                description: model.description.to_string(),
                auditable: model.auditable,
                finalizable: model.finalizable,
                indices: extract_indices(model),
                fields: walked.fields,
            });
        }

        SchemaDocument { enums, collections }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::codec::{CodedEnum, EnumEncoding};
    use crate::schema::{FieldDecl, IndexDeclaration, Introspect, TypeShape};

    crate::string_id! {
        struct WidgetId;
    }

    crate::coded_enum! {
        enum Color: VerbatimString {
            Red = 0,
            Blue = 1,
        }
    }

    struct Widget;

    impl Introspect for Widget {
        fn shape() -> TypeShape {
            TypeShape::record::<Self>("Widget", || {
                vec![
                    FieldDecl::new::<WidgetId>("id").identity(),
                    FieldDecl::new::<Color>("color"),
                ]
            })
        }
    }

    impl DocumentModel for Widget {
        const COLLECTION_NAME: &'static str = "Widgets";
        const DESCRIPTION: &'static str = "Widgets";
    }

    impl Indexable for Widget {
        fn declared_indexes() -> Vec<IndexDeclaration> {
            vec![IndexDeclaration::builder().ascending("color").build()]
        }
    }

    struct Gadget;

    impl Introspect for Gadget {
        fn shape() -> TypeShape {
            TypeShape::record::<Self>("Gadget", || vec![FieldDecl::new::<String>("name")])
        }
    }

    impl DocumentModel for Gadget {
        const COLLECTION_NAME: &'static str = "Widgets";
        const DESCRIPTION: &'static str = "Gadgets";
    }

    struct Nameless;

    impl Introspect for Nameless {
        fn shape() -> TypeShape {
            TypeShape::record::<Self>("Nameless", Vec::new)
        }
    }

    impl DocumentModel for Nameless {
        const COLLECTION_NAME: &'static str = " ";
        const DESCRIPTION: &'static str = "";
    }

    struct Scalar;

    impl Introspect for Scalar {
        fn shape() -> TypeShape {
            String::shape()
        }
    }

    impl DocumentModel for Scalar {
        const COLLECTION_NAME: &'static str = "Scalars";
        const DESCRIPTION: &'static str = "";
    }

    #[derive(Debug, Clone, Copy, PartialEq, Eq)]
    enum Level {
        Low,
        LowAgain,
    }

    impl CodedEnum for Level {
        const TYPE_NAME: &'static str = "Level";
        const ENCODING: EnumEncoding = EnumEncoding::CamelString;
        const MEMBERS: &'static [Self] = &[Level::Low, Level::LowAgain];

        fn member_name(self) -> &'static str {
            match self {
                Level::Low => "Low",
                Level::LowAgain => "low",
            }
        }

        fn ordinal(self) -> i64 {
            self as i64
        }
    }

    impl Introspect for Level {
        fn shape() -> TypeShape {
            TypeShape::enumeration::<Self>()
        }
    }

    struct Leveled;

    impl Introspect for Leveled {
        fn shape() -> TypeShape {
            TypeShape::record::<Self>("Leveled", || vec![FieldDecl::new::<Vec<Level>>("levels")])
        }
    }

    impl DocumentModel for Leveled {
        const COLLECTION_NAME: &'static str = "Leveled";
        const DESCRIPTION: &'static str = "";
    }

    #[test]
    fn test_build_and_document() {
        let registry = SchemaRegistry::builder()
            .register_indexable::<Widget>()
            .build()
            .unwrap();

        assert_eq!(registry.len(), 1);
        assert_eq!(registry.collection_names(), vec!["Widgets"]);

        let doc = registry.build_document();
        let widgets = doc.collection("Widgets").unwrap();
        assert_eq!(widgets.model_name, "Widget");
        assert_eq!(widgets.indices[0].name, "_id_");
        assert_eq!(widgets.indices[1].name, "color_1");
        assert_eq!(doc.enums["Color"].len(), 2);
        assert_eq!(doc.summary(), "1 collections, 1 enum types found");
    }

    #[test]
    fn test_duplicate_model_rejected() {
        let err = SchemaRegistry::builder()
            .register::<Widget>()
            .register::<Widget>()
            .build()
            .unwrap_err();
        assert_eq!(err, ConfigError::DuplicateModel { model: "Widget".into() });
    }

    #[test]
    fn test_duplicate_collection_rejected() {
        let err = SchemaRegistry::builder()
            .register::<Widget>()
            .register::<Gadget>()
            .build()
            .unwrap_err();
        assert_eq!(
            err,
            ConfigError::DuplicateCollection {
                collection: "Widgets".into(),
                first: "Widget".into(),
                second: "Gadget".into(),
            }
        );
    }

    #[test]
    fn test_empty_collection_name_rejected() {
        let err = SchemaRegistry::builder().register::<Nameless>().build().unwrap_err();
        assert!(matches!(err, ConfigError::EmptyCollectionName { .. }));
    }

    #[test]
    fn test_non_record_model_rejected() {
        let err = SchemaRegistry::builder().register::<Scalar>().build().unwrap_err();
        assert!(matches!(err, ConfigError::NotARecord { .. }));
    }

    #[test]
    fn test_enum_wire_collision_rejected() {
        let err = SchemaRegistry::builder().register::<Leveled>().build().unwrap_err();
        assert_eq!(
            err,
            ConfigError::EnumWireCollision {
                enum_type: "Level".into(),
                value: "low".into(),
            }
        );
    }

    crate::coded_enum! {
        enum Grade: CamelString {
            AB = 0,
            Ab = 1,
        }
    }

    struct Graded;

    impl Introspect for Graded {
        fn shape() -> TypeShape {
            TypeShape::record::<Self>("Graded", || vec![FieldDecl::new::<Option<Grade>>("grade")])
        }
    }

    impl DocumentModel for Graded {
        const COLLECTION_NAME: &'static str = "Graded";
        const DESCRIPTION: &'static str = "";
    }

    #[test]
    fn test_camel_members_differing_only_in_case_rejected() {
        let err = SchemaRegistry::builder().register::<Graded>().build().unwrap_err();
        assert_eq!(
            err,
            ConfigError::EnumWireCollision {
                enum_type: "Grade".into(),
                value: "aB".into(),
            }
        );
    }

    #[test]
    fn test_non_indexable_model_has_no_indices() {
        let registry = SchemaRegistry::builder().register::<Widget>().build().unwrap();
        let doc = registry.build_document();
        assert!(doc.collections[0].indices.is_empty());
    }

    #[test]
    fn test_registry_is_send_and_sync() {
        fn assert_send_sync<T: Send + Sync>() {}
        assert_send_sync::<SchemaRegistry>();
    }
}
