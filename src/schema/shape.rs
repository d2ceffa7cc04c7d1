//! Declared type shapes: the model registration surface.
//!
//! Every type that can appear in a document model describes itself through
//! `Introspect::shape()`. The shape classes are closed and listed in the
//! order the introspection engine considers them:
//!
//! primitive, optional, identifier, enumeration, sequence, map, record, opaque.
//!
//! Records list their fields lazily (`fn() -> Vec<FieldDecl>`), so a record
//! may refer to itself or to a record that refers back to it.

use std::any::TypeId;
use std::collections::{BTreeMap, BTreeSet, HashMap, HashSet, VecDeque};

use indexmap::IndexMap;

use crate::codec::{self, CodedEnum, ConvertibleId, EnumDictionary, EnumEncoding, IdPrimitive, IdPrimitiveKind, ObjectId};

/// A type that can describe its own shape.
pub trait Introspect: 'static {
    fn shape() -> TypeShape;
}

/// Scalar types the store understands natively.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Primitive {
    Text,
    Boolean,
    Int32,
    Int64,
    Float,
    Double,
    Decimal,
    DateTime,
    ObjectId,
}

/// A lazily evaluated shape.
#[derive(Debug, Clone, Copy)]
pub struct TypeRef(fn() -> TypeShape);

impl TypeRef {
    pub fn of<T: Introspect>() -> Self {
        TypeRef(T::shape)
    }

    pub fn resolve(&self) -> TypeShape {
        (self.0)()
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct IdentifierShape {
    pub name: &'static str,
    pub primitive: IdPrimitiveKind,
}

#[derive(Debug, Clone, Copy)]
pub struct EnumShape {
    pub type_id: TypeId,
    pub name: &'static str,
    pub encoding: EnumEncoding,
    pub dictionary: fn() -> EnumDictionary,
}

#[derive(Debug, Clone, Copy)]
pub struct RecordShape {
    pub type_id: TypeId,
    pub name: &'static str,
    pub fields: fn() -> Vec<FieldDecl>,
}

impl RecordShape {
    pub fn fields(&self) -> Vec<FieldDecl> {
        (self.fields)()
    }
}

/// Shape classification of a declared type.
#[derive(Debug, Clone, Copy)]
pub enum TypeShape {
    Primitive(Primitive),
    Optional(TypeRef),
    Identifier(IdentifierShape),
    Enumeration(EnumShape),
    Sequence(TypeRef),
    Map,
    Record(RecordShape),
    /// A type the engine cannot classify, reported as `unknown`.
    Opaque(&'static str),
}

impl TypeShape {
    pub fn identifier<T: ConvertibleId>() -> Self {
        TypeShape::Identifier(IdentifierShape {
            name: T::TYPE_NAME,
            primitive: <T::Primitive as IdPrimitive>::KIND,
        })
    }

    pub fn enumeration<E: CodedEnum>() -> Self {
        TypeShape::Enumeration(EnumShape {
            type_id: TypeId::of::<E>(),
            name: E::TYPE_NAME,
            encoding: E::ENCODING,
            dictionary: codec::dictionary::<E>,
        })
    }

    pub fn record<T: 'static>(name: &'static str, fields: fn() -> Vec<FieldDecl>) -> Self {
        TypeShape::Record(RecordShape {
            type_id: TypeId::of::<T>(),
            name,
            fields,
        })
    }

    pub fn optional<T: Introspect>() -> Self {
        TypeShape::Optional(TypeRef::of::<T>())
    }

    pub fn sequence<T: Introspect>() -> Self {
        TypeShape::Sequence(TypeRef::of::<T>())
    }

    /// Short label for log messages.
    pub fn label(&self) -> &'static str {
        match self {
            TypeShape::Primitive(_) => "primitive",
            TypeShape::Optional(_) => "optional",
            TypeShape::Identifier(id) => id.name,
            TypeShape::Enumeration(e) => e.name,
            TypeShape::Sequence(_) => "sequence",
            TypeShape::Map => "map",
            TypeShape::Record(r) => r.name,
            TypeShape::Opaque(name) => name,
        }
    }
}

/// Deprecation marker on a field.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Deprecation {
    pub note: String,
}

/// One declared field of a record.
#[derive(Debug, Clone)]
pub struct FieldDecl {
    pub name: &'static str,
    pub ty: TypeRef,
    pub description: String,
    pub nullable: bool,
    pub deprecation: Option<Deprecation>,
    /// Stores the document identity; its wire name is `_id`.
    pub identity: bool,
}

impl FieldDecl {
    pub fn new<T: Introspect>(name: &'static str) -> Self {
        Self {
            name,
            ty: TypeRef::of::<T>(),
            description: String::new(),
            nullable: false,
            deprecation: None,
            identity: false,
        }
    }

    pub fn describe(mut self, description: impl Into<String>) -> Self {
        self.description = description.into();
        self
    }

    pub fn nullable(mut self) -> Self {
        self.nullable = true;
        self
    }

    pub fn deprecated(mut self, note: impl Into<String>) -> Self {
        self.deprecation = Some(Deprecation { note: note.into() });
        self
    }

    pub fn identity(mut self) -> Self {
        self.identity = true;
        self
    }
}

macro_rules! primitive_shapes {
    ($($ty:ty => $prim:ident),* $(,)?) => {
        $(
            impl Introspect for $ty {
                fn shape() -> TypeShape {
                    TypeShape::Primitive(Primitive::$prim)
                }
            }
        )*
    };
}

primitive_shapes! {
    String => Text,
    &'static str => Text,
    bool => Boolean,
    i8 => Int32,
    i16 => Int32,
    i32 => Int32,
    i64 => Int64,
    u8 => Int32,
    u16 => Int32,
    u32 => Int64,
    u64 => Int64,
    f32 => Float,
    f64 => Double,
    chrono::DateTime<chrono::Utc> => DateTime,
    chrono::NaiveDateTime => DateTime,
    ObjectId => ObjectId,
}

impl<T: Introspect> Introspect for Option<T> {
    fn shape() -> TypeShape {
        TypeShape::optional::<T>()
    }
}

impl<T: Introspect> Introspect for Vec<T> {
    fn shape() -> TypeShape {
        TypeShape::sequence::<T>()
    }
}

impl<T: Introspect, const N: usize> Introspect for [T; N] {
    fn shape() -> TypeShape {
        TypeShape::sequence::<T>()
    }
}

impl<T: Introspect> Introspect for Box<[T]> {
    fn shape() -> TypeShape {
        TypeShape::sequence::<T>()
    }
}

impl<T: Introspect> Introspect for VecDeque<T> {
    fn shape() -> TypeShape {
        TypeShape::sequence::<T>()
    }
}

impl<T: Introspect> Introspect for BTreeSet<T> {
    fn shape() -> TypeShape {
        TypeShape::sequence::<T>()
    }
}

impl<T: Introspect> Introspect for HashSet<T> {
    fn shape() -> TypeShape {
        TypeShape::sequence::<T>()
    }
}

impl<V: 'static> Introspect for HashMap<String, V> {
    fn shape() -> TypeShape {
        TypeShape::Map
    }
}

impl<V: 'static> Introspect for BTreeMap<String, V> {
    fn shape() -> TypeShape {
        TypeShape::Map
    }
}

impl<V: 'static> Introspect for IndexMap<String, V> {
    fn shape() -> TypeShape {
        TypeShape::Map
    }
}

impl Introspect for serde_json::Value {
    fn shape() -> TypeShape {
        TypeShape::Map
    }
}
