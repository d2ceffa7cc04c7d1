//! Schema introspection for document models.
//!
//! # Architecture
//!
//! Models describe themselves through `Introspect` (see `shape.rs`) and are
//! registered on a `SchemaRegistryBuilder`. The built `SchemaRegistry` runs the
//! `TypeMapper` and the index extractor over every model and assembles a
//! `SchemaDocument`, which the renderers in `crate::render` turn into text.
//!
//! ```text
//! models -> SchemaRegistry -> TypeMapper + extract_indices -> SchemaDocument
//! ```

pub mod document;
pub mod field;
pub mod index;
pub mod introspect;
pub mod model;
pub mod registry;
pub mod shape;

pub use document::{CollectionSchema, SchemaDocument};
pub use field::{FieldDetail, FieldMap, FieldSchema, WireKind};
pub use index::{
    default_index_name, extract_indices, IndexBuilder, IndexDeclaration, IndexDirection,
    IndexKey, IndexOptions, DEFAULT_INDEX_NAME,
};
pub use introspect::{
    merge_enums, wire_name, EnumDictionaries, Introspection, RecordIntrospection, TypeMapper,
    DEFAULT_MAX_DEPTH, IDENTITY_FIELD, OBSOLETE_SUFFIX,
};
pub use model::{DocumentModel, Indexable, ModelEntry};
pub use registry::{ConfigError, SchemaRegistry, SchemaRegistryBuilder};
pub use shape::{
    Deprecation, EnumShape, FieldDecl, IdentifierShape, Introspect, Primitive, RecordShape,
    TypeRef, TypeShape,
};
