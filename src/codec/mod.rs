//! Wire codecs for identifier wrappers and coded enumerations.
//!
//! Two contracts live here:
//!
//! 1. **Identifier Codec** (`identifier.rs`): a typed identifier maps to and
//!    from exactly one wire primitive, either an opaque string or a
//!    database-native `ObjectId`.
//! 2. **Enumeration Codec** (`enumeration.rs`): a closed set of named members
//!    maps to one of three wire encodings (camel string, verbatim string,
//!    integer ordinal).
//!
//! The introspection engine relies on the declared side of both contracts
//! (which primitive, which encoding) to classify fields. Decoding failures are
//! values, never panics, so a bulk read can recover per document.

pub mod enumeration;
pub mod identifier;
pub mod value;

pub use enumeration::{
    decode, decode_nullable, dictionary, encode, encoding, lower_first,
    validate_unique_wire_values, CodedEnum, EnumDictionary, EnumEncoding, EnumWireValue,
};
pub use identifier::{
    decode_id, decode_optional_id, encode_id, ConvertibleId, IdPrimitive, IdPrimitiveKind,
};
pub use value::{ObjectId, WireValue};

use thiserror::Error;

/// A wire value could not be mapped to its declared type.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum DecodeError {
    #[error("Cannot decode {found} into '{target}': expected {expected}")]
    WrongWireKind {
        target: String,
        expected: &'static str,
        found: &'static str,
    },

    #[error("Cannot decode null into non-nullable '{target}'")]
    UnexpectedNull { target: String },

    #[error("Unknown value {raw} for enum '{target}'")]
    UnknownEnumValue { target: String, raw: String },

    #[error("Malformed ObjectId '{raw}': expected 24 hex characters")]
    MalformedObjectId { raw: String },
}

impl DecodeError {
    /// Attach the name of the field being decoded.
    pub fn with_field(self, field: impl Into<String>) -> FieldDecodeError {
        FieldDecodeError {
            field: field.into(),
            source: self,
        }
    }
}

/// A decode error located at a named document field.
#[derive(Error, Debug, Clone, PartialEq)]
#[error("Field '{field}': {source}")]
pub struct FieldDecodeError {
    pub field: String,
    #[source]
    pub source: DecodeError,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_with_field_message() {
        let err = DecodeError::UnexpectedNull {
            target: "ExportStatus".to_string(),
        }
        .with_field("status");

        assert_eq!(err.field, "status");
        assert_eq!(
            err.to_string(),
            "Field 'status': Cannot decode null into non-nullable 'ExportStatus'"
        );
    }

    #[test]
    fn test_unknown_enum_value_carries_raw_and_target() {
        let err = DecodeError::UnknownEnumValue {
            target: "ExportStatus".to_string(),
            raw: "\"paused\"".to_string(),
        };
        let msg = err.to_string();
        assert!(msg.contains("ExportStatus"));
        assert!(msg.contains("paused"));
    }
}
