//! Item-bank document models.
//!
//! The collections documented and indexed by the `doc_schema` binary. Each
//! model is a plain serde struct paired with a hand-written `Introspect`
//! declaration; wire names are derived from the declared field names, so the
//! two stay in step (see `tests::test_serialized_keys_match_schema`).

pub mod conversation;
pub mod enums;
pub mod ids;
pub mod reference;
pub mod tasks;

pub use conversation::{ConversationMessage, UserConversation};
pub use enums::{
    ConversationRole, DimensionType, ExportArchiveMode, ExportStatus, ExportType, ImportItemStatus,
    ImportTaskStatus,
};
pub use ids::*;
pub use reference::{Catalog, CatalogNode, CatalogValidationRule, Dimension, Subject, User};
pub use tasks::{ExportSpec, ExportTask, ImportTask, ImportedItem, TaskLog};

use crate::config::IntrospectionConfig;
use crate::schema::{ConfigError, SchemaRegistry, SchemaRegistryBuilder};

/// Builder with every item-bank model registered.
pub fn registry_builder() -> SchemaRegistryBuilder {
    SchemaRegistry::builder()
        .register::<Catalog>()
        .register::<Dimension>()
        .register_indexable::<ExportTask>()
        .register_indexable::<ImportTask>()
        .register_indexable::<Subject>()
        .register_indexable::<User>()
        .register_indexable::<UserConversation>()
}

/// Build the item-bank registry.
pub fn registry(config: &IntrospectionConfig) -> Result<SchemaRegistry, ConfigError> {
    registry_builder().with_config(*config).build()
}
