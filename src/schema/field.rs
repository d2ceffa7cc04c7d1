//! Canonical field schema nodes.

use std::fmt;

use indexmap::IndexMap;
use serde::{Serialize, Serializer};

/// Field name to schema node, in declaration order.
pub type FieldMap = IndexMap<String, FieldSchema>;

/// Wire-level type label of a field.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum WireKind {
    String,
    Number,
    Boolean,
    DateTime,
    ObjectId,
    Object,
    Array(Box<WireKind>),
    Unknown,
}

impl WireKind {
    pub fn is_array(&self) -> bool {
        matches!(self, WireKind::Array(_))
    }
}

impl fmt::Display for WireKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            WireKind::String => f.write_str("string"),
            WireKind::Number => f.write_str("number"),
            WireKind::Boolean => f.write_str("boolean"),
            WireKind::DateTime => f.write_str("datetime"),
            WireKind::ObjectId => f.write_str("objectId"),
            WireKind::Object => f.write_str("object"),
            WireKind::Array(inner) => write!(f, "array<{}>", inner),
            WireKind::Unknown => f.write_str("unknown"),
        }
    }
}

impl Serialize for WireKind {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

/// What a field carries beyond its wire kind. At most one applies.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum FieldDetail {
    #[default]
    None,
    /// Name of the identifier type the field holds.
    Identifier(String),
    /// Name of the enumeration the field holds.
    Enumeration(String),
    /// Schema of an embedded record. Empty when cut off by the cycle guard
    /// or the depth ceiling.
    Nested(FieldMap),
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct FieldSchema {
    #[serde(rename = "type")]
    pub kind: WireKind,
    pub description: String,
    pub detail: FieldDetail,
    pub nullable: bool,
}

impl FieldSchema {
    pub fn leaf(kind: WireKind) -> Self {
        Self {
            kind,
            description: String::new(),
            detail: FieldDetail::None,
            nullable: false,
        }
    }

    pub fn with_detail(mut self, detail: FieldDetail) -> Self {
        self.detail = detail;
        self
    }

    pub fn id_type(&self) -> Option<&str> {
        match &self.detail {
            FieldDetail::Identifier(name) => Some(name),
            _ => None,
        }
    }

    pub fn enum_type(&self) -> Option<&str> {
        match &self.detail {
            FieldDetail::Enumeration(name) => Some(name),
            _ => None,
        }
    }

    /// Nested fields of an embedded record, if any.
    pub fn fields(&self) -> Option<&FieldMap> {
        match &self.detail {
            FieldDetail::Nested(fields) => Some(fields),
            _ => None,
        }
    }
}
