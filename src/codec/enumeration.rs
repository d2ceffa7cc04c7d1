//! Enumeration Codec Contract.
//!
//! A coded enum is a closed set of named members, each with an explicit
//! ordinal, and one declared wire encoding:
//!
//! - `CamelString`: the member name with its first character lower-cased;
//!   decoding prefers an exact wire match, then ignores ASCII case.
//! - `VerbatimString`: the member name exactly as declared; decoding is exact.
//! - `Integer`: the member's ordinal; Int32 and Int64 wire values both decode.
//!
//! Declare coded enums with `coded_enum!`.

use std::fmt;

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

use super::value::WireValue;
use super::DecodeError;

/// Declared wire encoding of a coded enum.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EnumEncoding {
    CamelString,
    VerbatimString,
    Integer,
}

impl EnumEncoding {
    pub fn is_integer(&self) -> bool {
        matches!(self, EnumEncoding::Integer)
    }
}

/// A closed enumeration with a declared wire encoding.
pub trait CodedEnum: Copy + Eq + 'static {
    const TYPE_NAME: &'static str;
    const ENCODING: EnumEncoding;

    /// Every member, in declaration order.
    const MEMBERS: &'static [Self];

    fn member_name(self) -> &'static str;

    fn ordinal(self) -> i64;
}

/// The wire form of one enum member.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(untagged)]
pub enum EnumWireValue {
    Int(i64),
    Str(String),
}

impl EnumWireValue {
    /// Convert to a wire value, using Int32 when the ordinal fits.
    pub fn to_wire(&self) -> WireValue {
        match self {
            EnumWireValue::Str(s) => WireValue::String(s.clone()),
            EnumWireValue::Int(i) => match i32::try_from(*i) {
                Ok(narrow) => WireValue::Int32(narrow),
                Err(_) => WireValue::Int64(*i),
            },
        }
    }
}

impl fmt::Display for EnumWireValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            EnumWireValue::Str(s) => f.write_str(s),
            EnumWireValue::Int(i) => write!(f, "{}", i),
        }
    }
}

/// Member name to wire value for every member of one enum, in declaration order.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct EnumDictionary(IndexMap<String, EnumWireValue>);

impl EnumDictionary {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&mut self, member: impl Into<String>, value: EnumWireValue) {
        self.0.insert(member.into(), value);
    }

    pub fn get(&self, member: &str) -> Option<&EnumWireValue> {
        self.0.get(member)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&String, &EnumWireValue)> {
        self.0.iter()
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// First wire value shared by two members, if any.
    pub fn duplicate_wire_value(&self) -> Option<&EnumWireValue> {
        self.0
            .values()
            .enumerate()
            .find(|(i, value)| self.0.values().skip(i + 1).any(|other| other == *value))
            .map(|(_, value)| value)
    }

    /// First wire value that another member's value would decode as under
    /// `encoding`. Camel strings compare ignoring ASCII case.
    pub fn colliding_wire_value(&self, encoding: EnumEncoding) -> Option<&EnumWireValue> {
        if encoding != EnumEncoding::CamelString {
            return self.duplicate_wire_value();
        }

        self.0
            .values()
            .enumerate()
            .find(|(i, value)| {
                self.0
                    .values()
                    .skip(i + 1)
                    .any(|other| same_ignoring_case(value, other))
            })
            .map(|(_, value)| value)
    }
}

fn same_ignoring_case(a: &EnumWireValue, b: &EnumWireValue) -> bool {
    match (a, b) {
        (EnumWireValue::Str(a), EnumWireValue::Str(b)) => a.eq_ignore_ascii_case(b),
        _ => a == b,
    }
}

impl FromIterator<(String, EnumWireValue)> for EnumDictionary {
    fn from_iter<I: IntoIterator<Item = (String, EnumWireValue)>>(iter: I) -> Self {
        Self(iter.into_iter().collect())
    }
}

/// Lower-case the first character, leaving the rest untouched.
pub fn lower_first(name: &str) -> String {
    let mut chars = name.chars();
    match chars.next() {
        Some(first) => first.to_lowercase().chain(chars).collect(),
        None => String::new(),
    }
}

/// Declared encoding of `E`.
pub fn encoding<E: CodedEnum>() -> EnumEncoding {
    E::ENCODING
}

/// Encode one member according to its enum's declared encoding.
pub fn encode<E: CodedEnum>(member: E) -> EnumWireValue {
    match E::ENCODING {
        EnumEncoding::CamelString => EnumWireValue::Str(lower_first(member.member_name())),
        EnumEncoding::VerbatimString => EnumWireValue::Str(member.member_name().to_string()),
        EnumEncoding::Integer => EnumWireValue::Int(member.ordinal()),
    }
}

/// Decode a non-nullable member.
pub fn decode<E: CodedEnum>(value: &WireValue) -> Result<E, DecodeError> {
    if value.is_null() {
        return Err(DecodeError::UnexpectedNull {
            target: E::TYPE_NAME.to_string(),
        });
    }

    let found = match E::ENCODING {
        EnumEncoding::Integer => {
            let ordinal = value.as_i64().ok_or_else(|| wrong_kind::<E>(value, "integer"))?;
            E::MEMBERS.iter().copied().find(|m| m.ordinal() == ordinal)
        }
        EnumEncoding::VerbatimString => {
            let raw = value.as_str().ok_or_else(|| wrong_kind::<E>(value, "string"))?;
            E::MEMBERS.iter().copied().find(|m| m.member_name() == raw)
        }
        EnumEncoding::CamelString => {
            let raw = value.as_str().ok_or_else(|| wrong_kind::<E>(value, "string"))?;
            E::MEMBERS
                .iter()
                .copied()
                .find(|m| lower_first(m.member_name()) == raw)
                .or_else(|| {
                    E::MEMBERS
                        .iter()
                        .copied()
                        .find(|m| m.member_name().eq_ignore_ascii_case(raw))
                })
        }
    };

    found.ok_or_else(|| DecodeError::UnknownEnumValue {
        target: E::TYPE_NAME.to_string(),
        raw: value.to_string(),
    })
}

/// Decode a nullable member; wire null yields `None`.
pub fn decode_nullable<E: CodedEnum>(value: &WireValue) -> Result<Option<E>, DecodeError> {
    if value.is_null() {
        return Ok(None);
    }

    decode(value).map(Some)
}

/// Member name to wire value for every member of `E`.
pub fn dictionary<E: CodedEnum>() -> EnumDictionary {
    E::MEMBERS
        .iter()
        .map(|m| (m.member_name().to_string(), encode(*m)))
        .collect()
}

/// Check that every member of `E` decodes back to itself: no shared wire
/// values, and for camel strings no two values equal ignoring ASCII case.
///
/// Returns the colliding wire value on failure.
pub fn validate_unique_wire_values<E: CodedEnum>() -> Result<(), EnumWireValue> {
    match dictionary::<E>().colliding_wire_value(E::ENCODING) {
        Some(value) => Err(value.clone()),
        None => Ok(()),
    }
}

fn wrong_kind<E: CodedEnum>(value: &WireValue, expected: &'static str) -> DecodeError {
    DecodeError::WrongWireKind {
        target: E::TYPE_NAME.to_string(),
        expected,
        found: value.type_name(),
    }
}

/// Declare a coded enum with explicit ordinals and a wire encoding.
///
/// ```ignore
/// coded_enum! {
///     /// Export task state
///     pub enum ExportStatus: CamelString {
///         Pending = 0,
///         Running = 1,
///     }
/// }
/// ```
#[macro_export]
macro_rules! coded_enum {
    (
        $(#[$meta:meta])*
        $vis:vis enum $name:ident : $encoding:ident {
            $($(#[$vmeta:meta])* $variant:ident = $ordinal:literal),+ $(,)?
        }
    ) => {
        $(#[$meta])*
        #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
        $vis enum $name {
            $($(#[$vmeta])* $variant = $ordinal),+
        }

        impl $crate::codec::CodedEnum for $name {
            const TYPE_NAME: &'static str = stringify!($name);
            const ENCODING: $crate::codec::EnumEncoding = $crate::codec::EnumEncoding::$encoding;
            const MEMBERS: &'static [Self] = &[$($name::$variant),+];

            fn member_name(self) -> &'static str {
                match self {
                    $($name::$variant => stringify!($variant)),+
                }
            }

            fn ordinal(self) -> i64 {
                self as i64
            }
        }

        impl $crate::schema::Introspect for $name {
            fn shape() -> $crate::schema::TypeShape {
                $crate::schema::TypeShape::enumeration::<Self>()
            }
        }

        impl ::std::fmt::Display for $name {
            fn fmt(&self, f: &mut ::std::fmt::Formatter<'_>) -> ::std::fmt::Result {
                ::std::fmt::Display::fmt(&$crate::codec::encode(*self), f)
            }
        }

        impl ::serde::Serialize for $name {
            fn serialize<S: ::serde::Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
                ::serde::Serialize::serialize(&$crate::codec::encode(*self), serializer)
            }
        }
    };
}
