//! Type Introspection Engine.
//!
//! Walks a declared `TypeShape` and produces its canonical `FieldSchema`,
//! collecting every enumeration dictionary and identifier type met on the
//! way. Each top-level call owns its own traversal state, so a `TypeMapper`
//! can be shared freely.
//!
//! Recursion is bounded twice over: a record already on the active path is
//! emitted as an empty `object` (cycle guard), and a record reached at or
//! beyond `max_depth` is emitted the same way with a warning.

use std::any::TypeId;
use std::collections::{BTreeMap, BTreeSet};

use heck::ToLowerCamelCase;
use tracing::{debug, warn};

use super::field::{FieldDetail, FieldMap, FieldSchema, WireKind};
use super::shape::{FieldDecl, Primitive, RecordShape, TypeShape};
use crate::codec::{lower_first, EnumDictionary, EnumEncoding, IdPrimitiveKind};
use crate::config::IntrospectionConfig;

/// Enumeration name to its dictionary.
pub type EnumDictionaries = BTreeMap<String, EnumDictionary>;

/// Wire name of the identity field.
pub const IDENTITY_FIELD: &str = "_id";

/// Key suffix for deprecated fields.
pub const OBSOLETE_SUFFIX: &str = " (obsolete)";

pub const DEFAULT_MAX_DEPTH: usize = 32;

/// Result of introspecting one type.
#[derive(Debug, Clone, PartialEq)]
pub struct Introspection {
    pub schema: FieldSchema,
    pub enums: EnumDictionaries,
    /// Declared encoding of every enum in `enums`.
    pub encodings: BTreeMap<String, EnumEncoding>,
    pub identifiers: BTreeSet<String>,
}

/// Result of introspecting a record's own fields.
#[derive(Debug, Clone, PartialEq)]
pub struct RecordIntrospection {
    pub fields: FieldMap,
    pub enums: EnumDictionaries,
    pub encodings: BTreeMap<String, EnumEncoding>,
    pub identifiers: BTreeSet<String>,
}

/// Maps declared shapes to canonical field schemas.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TypeMapper {
    max_depth: usize,
}

impl Default for TypeMapper {
    fn default() -> Self {
        Self {
            max_depth: DEFAULT_MAX_DEPTH,
        }
    }
}

impl TypeMapper {
    pub fn with_max_depth(max_depth: usize) -> Self {
        Self { max_depth }
    }

    pub fn from_config(config: &IntrospectionConfig) -> Self {
        Self::with_max_depth(config.max_depth)
    }

    pub fn max_depth(&self) -> usize {
        self.max_depth
    }

    /// Introspect any declared shape.
    pub fn introspect(&self, shape: &TypeShape) -> Introspection {
        let mut walk = Walk::new(self.max_depth);
        let schema = walk.shape_at(shape, 0);
        Introspection {
            schema,
            enums: walk.enums,
            encodings: walk.encodings,
            identifiers: walk.identifiers,
        }
    }

    /// Introspect the fields of a storable model's root record.
    pub fn introspect_record(&self, record: &RecordShape) -> RecordIntrospection {
        let mut walk = Walk::new(self.max_depth);
        let fields = walk.record_at(record, 0);
        RecordIntrospection {
            fields,
            enums: walk.enums,
            encodings: walk.encodings,
            identifiers: walk.identifiers,
        }
    }
}

/// Merge `from` into `into`. An existing entry is never replaced; a
/// conflicting dictionary under the same name is dropped with a warning.
pub fn merge_enums(into: &mut EnumDictionaries, from: EnumDictionaries) {
    for (name, dictionary) in from {
        match into.get(&name) {
            None => {
                into.insert(name, dictionary);
            }
            Some(existing) if *existing != dictionary => {
                warn!(enum_type = %name, "conflicting enum dictionary ignored; keeping the first one seen");
            }
            Some(_) => {}
        }
    }
}

/// Wire name of a declared field.
///
/// Snake case names become lower camel case. Any other name only has its
/// first character lower-cased, so acronyms keep their casing
/// (`URLPath` becomes `uRLPath`).
pub fn wire_name(decl: &FieldDecl) -> String {
    if decl.identity {
        IDENTITY_FIELD.to_string()
    } else if decl.name.contains('_') {
        decl.name.to_lower_camel_case()
    } else {
        lower_first(decl.name)
    }
}

/// Traversal state for one top-level call.
struct Walk {
    max_depth: usize,
    active: Vec<TypeId>,
    enums: EnumDictionaries,
    encodings: BTreeMap<String, EnumEncoding>,
    identifiers: BTreeSet<String>,
}

impl Walk {
    fn new(max_depth: usize) -> Self {
        Self {
            max_depth,
            active: Vec::new(),
            enums: EnumDictionaries::new(),
            encodings: BTreeMap::new(),
            identifiers: BTreeSet::new(),
        }
    }

    fn shape_at(&mut self, shape: &TypeShape, depth: usize) -> FieldSchema {
        match shape {
            TypeShape::Primitive(primitive) => FieldSchema::leaf(primitive_kind(*primitive)),
            // Option<Option<T>> collapses to one nullable level.
            TypeShape::Optional(inner) => {
                let mut schema = self.shape_at(&inner.resolve(), depth);
                schema.nullable = true;
                schema
            }
            TypeShape::Identifier(id) => {
                self.identifiers.insert(id.name.to_string());
                let kind = match id.primitive {
                    IdPrimitiveKind::String => WireKind::String,
                    IdPrimitiveKind::ObjectId => WireKind::ObjectId,
                };
                FieldSchema::leaf(kind).with_detail(FieldDetail::Identifier(id.name.to_string()))
            }
            TypeShape::Enumeration(shape) => {
                let mut found = EnumDictionaries::new();
                found.insert(shape.name.to_string(), (shape.dictionary)());
                merge_enums(&mut self.enums, found);
                self.encodings.entry(shape.name.to_string()).or_insert(shape.encoding);

                let kind = match shape.encoding {
                    EnumEncoding::Integer => WireKind::Number,
                    EnumEncoding::CamelString | EnumEncoding::VerbatimString => WireKind::String,
                };
                FieldSchema::leaf(kind).with_detail(FieldDetail::Enumeration(shape.name.to_string()))
            }
            TypeShape::Sequence(element) => {
                let inner = self.shape_at(&element.resolve(), depth + 1);
                FieldSchema::leaf(WireKind::Array(Box::new(inner.kind))).with_detail(inner.detail)
            }
            TypeShape::Map => FieldSchema::leaf(WireKind::Object),
            TypeShape::Record(record) => {
                let fields = self.record_at(record, depth);
                FieldSchema::leaf(WireKind::Object).with_detail(FieldDetail::Nested(fields))
            }
            TypeShape::Opaque(name) => {
                debug!(type_name = %name, "unclassifiable type reported as unknown");
                FieldSchema::leaf(WireKind::Unknown)
            }
        }
    }

    fn record_at(&mut self, record: &RecordShape, depth: usize) -> FieldMap {
        if self.active.contains(&record.type_id) {
            debug!(record = record.name, depth, "cycle detected; emitting empty object");
            return FieldMap::new();
        }

        if depth >= self.max_depth {
            warn!(
                record = record.name,
                depth,
                max_depth = self.max_depth,
                "introspection depth ceiling reached; emitting empty object"
            );
            return FieldMap::new();
        }

        debug!(record = record.name, depth, "introspecting record");
        self.active.push(record.type_id);

        let mut fields = FieldMap::new();
        for decl in record.fields() {
            let (name, schema) = self.field_at(&decl, depth + 1);
            fields.insert(name, schema);
        }

        self.active.pop();
        fields
    }

    fn field_at(&mut self, decl: &FieldDecl, depth: usize) -> (String, FieldSchema) {
        let mut schema = self.shape_at(&decl.ty.resolve(), depth);
        schema.nullable |= decl.nullable;
        schema.description = decl.description.clone();

        let mut name = wire_name(decl);
        if let Some(deprecation) = &decl.deprecation {
            name.push_str(OBSOLETE_SUFFIX);
            schema.description = match (schema.description.is_empty(), deprecation.note.is_empty()) {
                (_, true) => schema.description,
                (true, false) => deprecation.note.clone(),
                (false, false) => format!("{} {}", schema.description, deprecation.note),
            };
        }

        (name, schema)
    }
}

fn primitive_kind(primitive: Primitive) -> WireKind {
    match primitive {
        Primitive::Text => WireKind::String,
        Primitive::Boolean => WireKind::Boolean,
        Primitive::Int32
        | Primitive::Int64
        | Primitive::Float
        | Primitive::Double
        | Primitive::Decimal => WireKind::Number,
        Primitive::DateTime => WireKind::DateTime,
        Primitive::ObjectId => WireKind::ObjectId,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::codec::EnumWireValue;
    use crate::schema::{Introspect, TypeShape};
    use std::collections::HashMap;

    crate::string_id! {
        struct SubjectId;
    }

    crate::coded_enum! {
        enum ExportStatus: CamelString {
            Pending = 0,
            Running = 1,
        }
    }

    crate::coded_enum! {
        enum Role: Integer {
            User = 0,
            Assistant = 1,
        }
    }

    struct Item;

    impl Introspect for Item {
        fn shape() -> TypeShape {
            TypeShape::record::<Self>("Item", || {
                vec![
                    FieldDecl::new::<String>("name").describe("Name"),
                    FieldDecl::new::<i32>("order").describe("Order"),
                ]
            })
        }
    }

    struct Holder;

    impl Introspect for Holder {
        fn shape() -> TypeShape {
            TypeShape::record::<Self>("Holder", || {
                vec![
                    FieldDecl::new::<SubjectId>("id").describe("Id").identity(),
                    FieldDecl::new::<Vec<Item>>("items").describe("Items"),
                    FieldDecl::new::<Option<ExportStatus>>("status").describe("Status"),
                    FieldDecl::new::<Vec<Role>>("roles"),
                    FieldDecl::new::<HashMap<String, i32>>("counts"),
                    FieldDecl::new::<String>("legacy_code")
                        .describe("Legacy")
                        .deprecated("unused since v2"),
                    FieldDecl::new::<Vec<SubjectId>>("subject_ids"),
                ]
            })
        }
    }

    struct Node;

    impl Introspect for Node {
        fn shape() -> TypeShape {
            TypeShape::record::<Self>("Node", || {
                vec![
                    FieldDecl::new::<String>("label"),
                    FieldDecl::new::<Vec<Node>>("children"),
                    FieldDecl::new::<Option<Node>>("parent"),
                ]
            })
        }
    }

    struct Left;
    struct Right;

    impl Introspect for Left {
        fn shape() -> TypeShape {
            TypeShape::record::<Self>("Left", || vec![FieldDecl::new::<Right>("right")])
        }
    }

    impl Introspect for Right {
        fn shape() -> TypeShape {
            TypeShape::record::<Self>("Right", || vec![FieldDecl::new::<Left>("left")])
        }
    }

    struct Chain<const N: usize>;

    impl Introspect for Chain<0> {
        fn shape() -> TypeShape {
            TypeShape::record::<Self>("Chain0", || vec![FieldDecl::new::<String>("leaf")])
        }
    }

    impl Introspect for Chain<1> {
        fn shape() -> TypeShape {
            TypeShape::record::<Self>("Chain1", || vec![FieldDecl::new::<Chain<0>>("next")])
        }
    }

    impl Introspect for Chain<2> {
        fn shape() -> TypeShape {
            TypeShape::record::<Self>("Chain2", || vec![FieldDecl::new::<Chain<1>>("next")])
        }
    }

    fn holder_fields() -> RecordIntrospection {
        match Holder::shape() {
            TypeShape::Record(record) => TypeMapper::default().introspect_record(&record),
            other => panic!("expected record, got {:?}", other),
        }
    }

    #[test]
    fn test_identity_field_is_string_identifier() {
        let result = holder_fields();
        let id = &result.fields["_id"];
        assert_eq!(id.kind, WireKind::String);
        assert_eq!(id.id_type(), Some("SubjectId"));
        assert!(result.identifiers.contains("SubjectId"));
    }

    #[test]
    fn test_array_of_records_carries_nested_fields() {
        let result = holder_fields();
        let items = &result.fields["items"];
        assert_eq!(items.kind.to_string(), "array<object>");
        let nested = items.fields().unwrap();
        let names: Vec<_> = nested.keys().map(String::as_str).collect();
        assert_eq!(names, vec!["name", "order"]);
        assert_eq!(nested["order"].kind, WireKind::Number);
    }

    #[test]
    fn test_optional_camel_enum() {
        let result = holder_fields();
        let status = &result.fields["status"];
        assert_eq!(status.kind, WireKind::String);
        assert!(status.nullable);
        assert_eq!(status.enum_type(), Some("ExportStatus"));

        let dict = &result.enums["ExportStatus"];
        assert_eq!(dict.get("Pending"), Some(&EnumWireValue::Str("pending".into())));
        assert_eq!(dict.get("Running"), Some(&EnumWireValue::Str("running".into())));
    }

    #[test]
    fn test_array_of_integer_enum() {
        let result = holder_fields();
        let roles = &result.fields["roles"];
        assert_eq!(roles.kind.to_string(), "array<number>");
        assert_eq!(roles.enum_type(), Some("Role"));
        assert!(!roles.nullable);
    }

    #[test]
    fn test_array_of_identifiers() {
        let result = holder_fields();
        let ids = &result.fields["subjectIds"];
        assert_eq!(ids.kind.to_string(), "array<string>");
        assert_eq!(ids.id_type(), Some("SubjectId"));
    }

    #[test]
    fn test_map_is_plain_object() {
        let result = holder_fields();
        let counts = &result.fields["counts"];
        assert_eq!(counts.kind, WireKind::Object);
        assert_eq!(counts.detail, FieldDetail::None);
    }

    #[test]
    fn test_deprecated_field_suffix_and_note() {
        let result = holder_fields();
        let legacy = &result.fields["legacyCode (obsolete)"];
        assert_eq!(legacy.description, "Legacy unused since v2");
        assert!(!result.fields.contains_key("legacyCode"));
    }

    #[test]
    fn test_self_reference_terminates() {
        let result = TypeMapper::default().introspect(&Node::shape());
        let fields = result.schema.fields().unwrap();

        let children = &fields["children"];
        assert_eq!(children.kind.to_string(), "array<object>");
        assert!(children.fields().unwrap().is_empty());

        let parent = &fields["parent"];
        assert!(parent.nullable);
        assert!(parent.fields().unwrap().is_empty());
    }

    #[test]
    fn test_mutual_reference_terminates() {
        let result = TypeMapper::default().introspect(&Left::shape());
        let right = &result.schema.fields().unwrap()["right"];
        let left = &right.fields().unwrap()["left"];
        assert_eq!(left.kind, WireKind::Object);
        assert!(left.fields().unwrap().is_empty());
    }

    #[test]
    fn test_depth_ceiling_cuts_nesting() {
        let shallow = TypeMapper::with_max_depth(1).introspect(&Chain::<2>::shape());
        let next = &shallow.schema.fields().unwrap()["next"];
        assert_eq!(next.kind, WireKind::Object);
        assert!(next.fields().unwrap().is_empty());

        let deep = TypeMapper::default().introspect(&Chain::<2>::shape());
        let leaf = &deep.schema.fields().unwrap()["next"].fields().unwrap()["next"].fields().unwrap()["leaf"];
        assert_eq!(leaf.kind, WireKind::String);
    }

    #[test]
    fn test_calls_do_not_share_state() {
        let mapper = TypeMapper::default();
        let first = mapper.introspect(&Node::shape());
        let second = mapper.introspect(&Node::shape());
        assert_eq!(first, second);
    }

    #[test]
    fn test_merge_enums_first_writer_wins() {
        let mut into = EnumDictionaries::new();
        let first: EnumDictionary = [("A".to_string(), EnumWireValue::Int(0))].into_iter().collect();
        let second: EnumDictionary = [("B".to_string(), EnumWireValue::Int(0))].into_iter().collect();

        merge_enums(&mut into, [("Kind".to_string(), first.clone())].into_iter().collect());
        merge_enums(&mut into, [("Kind".to_string(), second)].into_iter().collect());

        assert_eq!(into["Kind"], first);
    }

    #[test]
    fn test_wire_name() {
        assert_eq!(wire_name(&FieldDecl::new::<String>("subject_name")), "subjectName");
        assert_eq!(wire_name(&FieldDecl::new::<String>("SubjectName")), "subjectName");
        assert_eq!(wire_name(&FieldDecl::new::<String>("id").identity()), "_id");
        assert_eq!(wire_name(&FieldDecl::new::<String>("URLPath")), "uRLPath");
        assert_eq!(wire_name(&FieldDecl::new::<String>("url_path")), "urlPath");
    }
}
