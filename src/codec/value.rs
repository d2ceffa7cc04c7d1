//! Wire values as the document store sees them.
//!
//! This module defines the `WireValue` enum, the subset of the store's wire
//! representation that identifier and enumeration codecs read and write, and
//! `ObjectId`, the store's native 12-byte object reference.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Deserializer, Serialize, Serializer};

use super::DecodeError;

/// A database-native 12-byte object reference.
///
/// Displays and serializes as 24 lower-case hex characters.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ObjectId([u8; 12]);

impl ObjectId {
    /// Length of the hex form.
    pub const HEX_LEN: usize = 24;

    pub const fn from_bytes(bytes: [u8; 12]) -> Self {
        Self(bytes)
    }

    pub const fn bytes(&self) -> [u8; 12] {
        self.0
    }

    /// Parse a 24-character hex string.
    pub fn parse_str(value: &str) -> Result<Self, DecodeError> {
        let malformed = || DecodeError::MalformedObjectId {
            raw: value.to_string(),
        };

        if value.len() != Self::HEX_LEN {
            return Err(malformed());
        }

        let mut bytes = [0u8; 12];
        hex::decode_to_slice(value, &mut bytes).map_err(|_| malformed())?;
        Ok(Self(bytes))
    }

    pub fn to_hex(&self) -> String {
        hex::encode(self.0)
    }
}

impl fmt::Display for ObjectId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.to_hex())
    }
}

impl FromStr for ObjectId {
    type Err = DecodeError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse_str(s)
    }
}

impl Serialize for ObjectId {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&self.to_hex())
    }
}

impl<'de> Deserialize<'de> for ObjectId {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let raw = String::deserialize(deserializer)?;
        Self::parse_str(&raw).map_err(serde::de::Error::custom)
    }
}

/// A single value in the store's wire representation.
#[derive(Debug, Clone, PartialEq)]
pub enum WireValue {
    Null,
    String(String),
    Int32(i32),
    Int64(i64),
    Double(f64),
    Boolean(bool),
    ObjectId(ObjectId),
}

impl WireValue {
    /// Extract as &str if the value is a string.
    pub fn as_str(&self) -> Option<&str> {
        match self {
            WireValue::String(s) => Some(s),
            _ => None,
        }
    }

    /// Extract as i64 if the value is an integer of either width.
    ///
    /// Doubles are not coerced; an enum ordinal stored as a double is a
    /// different wire kind.
    pub fn as_i64(&self) -> Option<i64> {
        match self {
            WireValue::Int32(i) => Some(i64::from(*i)),
            WireValue::Int64(i) => Some(*i),
            _ => None,
        }
    }

    pub fn as_object_id(&self) -> Option<ObjectId> {
        match self {
            WireValue::ObjectId(oid) => Some(*oid),
            _ => None,
        }
    }

    pub fn as_bool(&self) -> Option<bool> {
        match self {
            WireValue::Boolean(b) => Some(*b),
            _ => None,
        }
    }

    pub fn is_null(&self) -> bool {
        matches!(self, WireValue::Null)
    }

    /// Get type name for error messages.
    pub fn type_name(&self) -> &'static str {
        match self {
            WireValue::Null => "null",
            WireValue::String(_) => "string",
            WireValue::Int32(_) => "int32",
            WireValue::Int64(_) => "int64",
            WireValue::Double(_) => "double",
            WireValue::Boolean(_) => "boolean",
            WireValue::ObjectId(_) => "objectId",
        }
    }
}

impl fmt::Display for WireValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            WireValue::Null => f.write_str("null"),
            WireValue::String(s) => write!(f, "\"{}\"", s),
            WireValue::Int32(i) => write!(f, "{}", i),
            WireValue::Int64(i) => write!(f, "{}", i),
            WireValue::Double(d) => write!(f, "{}", d),
            WireValue::Boolean(b) => write!(f, "{}", b),
            WireValue::ObjectId(oid) => write!(f, "ObjectId(\"{}\")", oid),
        }
    }
}

impl From<String> for WireValue {
    fn from(value: String) -> Self {
        WireValue::String(value)
    }
}

impl From<&str> for WireValue {
    fn from(value: &str) -> Self {
        WireValue::String(value.to_string())
    }
}

impl From<i32> for WireValue {
    fn from(value: i32) -> Self {
        WireValue::Int32(value)
    }
}

impl From<i64> for WireValue {
    fn from(value: i64) -> Self {
        WireValue::Int64(value)
    }
}

impl From<ObjectId> for WireValue {
    fn from(value: ObjectId) -> Self {
        WireValue::ObjectId(value)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    const HEX: &str = "65a1b2c3d4e5f60718293a4b";

    #[test]
    fn test_object_id_parse_and_display() {
        let oid = ObjectId::parse_str(HEX).unwrap();
        assert_eq!(oid.to_string(), HEX);
        assert_eq!(oid.bytes()[0], 0x65);
        assert_eq!(oid.bytes()[11], 0x4b);
    }

    #[test]
    fn test_object_id_from_str_uppercase_normalises() {
        let oid: ObjectId = HEX.to_uppercase().parse().unwrap();
        assert_eq!(oid.to_hex(), HEX);
    }

    #[rstest]
    #[case("")]
    #[case("65a1b2c3")]
    #[case("65a1b2c3d4e5f60718293a4bff")]
    #[case("zza1b2c3d4e5f60718293a4b")]
    fn test_object_id_malformed(#[case] raw: &str) {
        let err = ObjectId::parse_str(raw).unwrap_err();
        assert!(matches!(err, DecodeError::MalformedObjectId { .. }));
        assert!(err.to_string().contains(raw));
    }

    #[test]
    fn test_object_id_serde_as_hex_string() {
        let oid = ObjectId::parse_str(HEX).unwrap();
        let json = serde_json::to_string(&oid).unwrap();
        assert_eq!(json, format!("\"{}\"", HEX));
        let back: ObjectId = serde_json::from_str(&json).unwrap();
        assert_eq!(back, oid);
    }

    #[test]
    fn test_wire_value_as_i64_accepts_both_widths() {
        assert_eq!(WireValue::Int32(7).as_i64(), Some(7));
        assert_eq!(WireValue::Int64(-3).as_i64(), Some(-3));
        assert_eq!(WireValue::Double(1.0).as_i64(), None);
    }

    #[test]
    fn test_wire_value_type_names() {
        assert_eq!(WireValue::Null.type_name(), "null");
        assert_eq!(WireValue::from("x").type_name(), "string");
        assert_eq!(WireValue::from(1).type_name(), "int32");
        assert_eq!(WireValue::from(1i64).type_name(), "int64");
        assert_eq!(WireValue::Boolean(true).type_name(), "boolean");
        assert_eq!(
            WireValue::from(ObjectId::from_bytes([0; 12])).type_name(),
            "objectId"
        );
    }

    #[test]
    fn test_wire_value_null() {
        assert!(WireValue::Null.is_null());
        assert!(!WireValue::from("").is_null());
        assert_eq!(WireValue::Null.as_str(), None);
    }
}
