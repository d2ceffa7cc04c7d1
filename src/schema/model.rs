//! Document model traits and registry entries.

use std::any::TypeId;

use super::index::IndexDeclaration;
use super::shape::{Introspect, RecordShape, TypeShape};

/// A record type stored as documents in one collection.
pub trait DocumentModel: Introspect {
    const COLLECTION_NAME: &'static str;
    const DESCRIPTION: &'static str;

    /// Carries created/updated audit fields.
    const AUDITABLE: bool = false;

    /// Can be locked against further edits.
    const FINALIZABLE: bool = false;
}

/// A document model with secondary indexes.
///
/// Implementations list only their own indexes; the default `_id_` index is
/// always added by the extractor.
pub trait Indexable: DocumentModel {
    fn declared_indexes() -> Vec<IndexDeclaration>;
}

/// Type-erased registration of one document model.
#[derive(Debug, Clone, Copy)]
pub struct ModelEntry {
    pub type_id: TypeId,
    pub collection_name: &'static str,
    pub description: &'static str,
    pub auditable: bool,
    pub finalizable: bool,
    shape: TypeShape,
    indexes: Option<fn() -> Vec<IndexDeclaration>>,
}

impl ModelEntry {
    pub fn of<M: DocumentModel>() -> Self {
        Self {
            type_id: TypeId::of::<M>(),
            collection_name: M::COLLECTION_NAME,
            description: M::DESCRIPTION,
            auditable: M::AUDITABLE,
            finalizable: M::FINALIZABLE,
            shape: M::shape(),
            indexes: None,
        }
    }

    pub fn indexable<M: Indexable>() -> Self {
        Self {
            indexes: Some(M::declared_indexes as fn() -> Vec<IndexDeclaration>),
            ..Self::of::<M>()
        }
    }

    /// Model type name, as declared by its record shape.
    pub fn model_name(&self) -> &'static str {
        self.shape.label()
    }

    /// Root record of the model. `None` if the model is not a record.
    pub fn record(&self) -> Option<&RecordShape> {
        match &self.shape {
            TypeShape::Record(record) => Some(record),
            _ => None,
        }
    }

    pub fn is_indexable(&self) -> bool {
        self.indexes.is_some()
    }

    /// Declared indexes, without the default one. `None` when not indexable.
    pub fn declared_indexes(&self) -> Option<Vec<IndexDeclaration>> {
        self.indexes.map(|declared| declared())
    }
}
