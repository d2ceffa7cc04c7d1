//! Identifier Codec Contract.
//!
//! A typed identifier wraps exactly one wire primitive. The wrapper declares
//! which primitive it uses through `ConvertibleId::Primitive`, and values are
//! only ever constructed through `ConvertibleId::from_primitive`.
//!
//! Use `string_id!` or `object_id!` to declare an identifier type; both
//! macros also register the type with the introspection engine.

use std::fmt::Debug;

use super::value::{ObjectId, WireValue};
use super::DecodeError;

/// Which wire primitive an identifier is stored as.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum IdPrimitiveKind {
    String,
    ObjectId,
}

impl IdPrimitiveKind {
    /// Name of the wire kind, as used in schema documents and error messages.
    pub fn wire_name(&self) -> &'static str {
        match self {
            IdPrimitiveKind::String => "string",
            IdPrimitiveKind::ObjectId => "objectId",
        }
    }
}

/// A wire primitive that can back an identifier.
pub trait IdPrimitive: Clone + Eq + Debug + 'static {
    const KIND: IdPrimitiveKind;

    fn to_wire(&self) -> WireValue;

    /// Read the primitive out of a non-null wire value.
    fn from_wire(value: &WireValue, target: &str) -> Result<Self, DecodeError>;
}

impl IdPrimitive for String {
    const KIND: IdPrimitiveKind = IdPrimitiveKind::String;

    fn to_wire(&self) -> WireValue {
        WireValue::String(self.clone())
    }

    fn from_wire(value: &WireValue, target: &str) -> Result<Self, DecodeError> {
        match value {
            WireValue::String(s) => Ok(s.clone()),
            other => Err(DecodeError::WrongWireKind {
                target: target.to_string(),
                expected: Self::KIND.wire_name(),
                found: other.type_name(),
            }),
        }
    }
}

impl IdPrimitive for ObjectId {
    const KIND: IdPrimitiveKind = IdPrimitiveKind::ObjectId;

    fn to_wire(&self) -> WireValue {
        WireValue::ObjectId(*self)
    }

    /// Accepts a native object reference, or its 24-char hex string form.
    fn from_wire(value: &WireValue, target: &str) -> Result<Self, DecodeError> {
        match value {
            WireValue::ObjectId(oid) => Ok(*oid),
            WireValue::String(s) => ObjectId::parse_str(s),
            other => Err(DecodeError::WrongWireKind {
                target: target.to_string(),
                expected: Self::KIND.wire_name(),
                found: other.type_name(),
            }),
        }
    }
}

/// A typed identifier backed by a single wire primitive.
pub trait ConvertibleId: Sized + Clone + Eq + 'static {
    type Primitive: IdPrimitive;

    /// Type name reported in schema documents (e.g. `SubjectId`).
    const TYPE_NAME: &'static str;

    fn to_primitive(&self) -> Self::Primitive;

    fn from_primitive(value: Self::Primitive) -> Self;
}

/// Encode an identifier into its wire value.
pub fn encode_id<T: ConvertibleId>(id: &T) -> WireValue {
    id.to_primitive().to_wire()
}

/// Decode a non-nullable identifier.
pub fn decode_id<T: ConvertibleId>(value: &WireValue) -> Result<T, DecodeError> {
    if value.is_null() {
        return Err(DecodeError::UnexpectedNull {
            target: T::TYPE_NAME.to_string(),
        });
    }

    T::Primitive::from_wire(value, T::TYPE_NAME).map(T::from_primitive)
}

/// Decode a nullable identifier; wire null yields `None`.
pub fn decode_optional_id<T: ConvertibleId>(value: &WireValue) -> Result<Option<T>, DecodeError> {
    if value.is_null() {
        return Ok(None);
    }

    decode_id(value).map(Some)
}

/// Declare a string-backed identifier type.
///
/// ```ignore
/// string_id! {
///     /// Subject identifier
///     pub struct SubjectId;
/// }
/// ```
#[macro_export]
macro_rules! string_id {
    ($(#[$meta:meta])* $vis:vis struct $name:ident;) => {
        $(#[$meta])*
        #[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
        $vis struct $name(String);

        impl $name {
            pub fn new(value: impl Into<String>) -> Self {
                <Self as $crate::codec::ConvertibleId>::from_primitive(value.into())
            }

            pub fn as_str(&self) -> &str {
                &self.0
            }
        }

        impl $crate::codec::ConvertibleId for $name {
            type Primitive = String;
            const TYPE_NAME: &'static str = stringify!($name);

            fn to_primitive(&self) -> String {
                self.0.clone()
            }

            fn from_primitive(value: String) -> Self {
                Self(value)
            }
        }

        impl ::std::fmt::Display for $name {
            fn fmt(&self, f: &mut ::std::fmt::Formatter<'_>) -> ::std::fmt::Result {
                f.write_str(&self.0)
            }
        }

        impl $crate::schema::Introspect for $name {
            fn shape() -> $crate::schema::TypeShape {
                $crate::schema::TypeShape::identifier::<Self>()
            }
        }

        impl ::serde::Serialize for $name {
            fn serialize<S: ::serde::Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
                serializer.serialize_str(&self.0)
            }
        }

        impl<'de> ::serde::Deserialize<'de> for $name {
            fn deserialize<D: ::serde::Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
                let raw = <String as ::serde::Deserialize>::deserialize(deserializer)?;
                Ok(<Self as $crate::codec::ConvertibleId>::from_primitive(raw))
            }
        }
    };
}

/// Declare an `ObjectId`-backed identifier type.
#[macro_export]
macro_rules! object_id {
    ($(#[$meta:meta])* $vis:vis struct $name:ident;) => {
        $(#[$meta])*
        #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
        $vis struct $name($crate::codec::ObjectId);

        impl $name {
            pub fn new(value: $crate::codec::ObjectId) -> Self {
                <Self as $crate::codec::ConvertibleId>::from_primitive(value)
            }

            pub fn value(&self) -> $crate::codec::ObjectId {
                self.0
            }
        }

        impl $crate::codec::ConvertibleId for $name {
            type Primitive = $crate::codec::ObjectId;
            const TYPE_NAME: &'static str = stringify!($name);

            fn to_primitive(&self) -> $crate::codec::ObjectId {
                self.0
            }

            fn from_primitive(value: $crate::codec::ObjectId) -> Self {
                Self(value)
            }
        }

        impl ::std::fmt::Display for $name {
            fn fmt(&self, f: &mut ::std::fmt::Formatter<'_>) -> ::std::fmt::Result {
                ::std::fmt::Display::fmt(&self.0, f)
            }
        }

        impl $crate::schema::Introspect for $name {
            fn shape() -> $crate::schema::TypeShape {
                $crate::schema::TypeShape::identifier::<Self>()
            }
        }

        impl ::serde::Serialize for $name {
            fn serialize<S: ::serde::Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
                ::serde::Serialize::serialize(&self.0, serializer)
            }
        }

        impl<'de> ::serde::Deserialize<'de> for $name {
            fn deserialize<D: ::serde::Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
                let raw = <$crate::codec::ObjectId as ::serde::Deserialize>::deserialize(deserializer)?;
                Ok(<Self as $crate::codec::ConvertibleId>::from_primitive(raw))
            }
        }
    };
}
