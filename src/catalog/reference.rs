//! Reference data: subjects, catalogs, dimensions and users.

use chrono::{DateTime, Utc};
use serde::Serialize;

use super::enums::DimensionType;
use super::ids::{CatalogGroupId, CatalogId, DimensionId, SubjectId, UserId, VersionId};
use crate::schema::{DocumentModel, FieldDecl, IndexDeclaration, Indexable, Introspect, TypeShape};

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Subject {
    #[serde(rename = "_id")]
    pub id: SubjectId,
    pub name: String,
    pub parent_subject_id: Option<SubjectId>,
    pub education_code: String,
    pub education_name: String,
    pub simple_name: String,
    pub education_order_index: i32,
    pub order_index: i32,
    pub area: String,
}

impl Introspect for Subject {
    fn shape() -> TypeShape {
        TypeShape::record::<Self>("Subject", || {
            vec![
                FieldDecl::new::<SubjectId>("id").describe("Id").identity(),
                FieldDecl::new::<String>("name").describe("Name"),
                FieldDecl::new::<Option<SubjectId>>("parent_subject_id").describe("Parent subject id"),
                FieldDecl::new::<String>("education_code").describe("Education code"),
                FieldDecl::new::<String>("education_name").describe("Education name"),
                FieldDecl::new::<String>("simple_name").describe("Short name"),
                FieldDecl::new::<i32>("education_order_index").describe("Education order index"),
                FieldDecl::new::<i32>("order_index").describe("Order index"),
                FieldDecl::new::<String>("area").describe("Area"),
            ]
        })
    }
}

impl DocumentModel for Subject {
    const COLLECTION_NAME: &'static str = "Subjects";
    const DESCRIPTION: &'static str = "Subjects";
}

impl Indexable for Subject {
    fn declared_indexes() -> Vec<IndexDeclaration> {
        vec![
            IndexDeclaration::builder().ascending("parentSubjectId").build(),
            IndexDeclaration::builder()
                .ascending("educationCode")
                .ascending("orderIndex")
                .build(),
        ]
    }
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Catalog {
    #[serde(rename = "_id")]
    pub id: CatalogId,
    pub catalog_group_id: CatalogGroupId,
    pub grouping_name: String,
    pub grouping_code: String,
    pub subject_id: SubjectId,
    pub subject_name: String,
    pub version_id: Option<VersionId>,
    pub year: i32,
    pub tags: Vec<String>,
    pub description: Option<String>,
    pub enabled: bool,
    pub validation_rules: Vec<CatalogValidationRule>,
    pub nodes: Vec<CatalogNode>,
}

impl Introspect for Catalog {
    fn shape() -> TypeShape {
        TypeShape::record::<Self>("Catalog", || {
            vec![
                FieldDecl::new::<CatalogId>("id").describe("Id").identity(),
                FieldDecl::new::<CatalogGroupId>("catalog_group_id").describe("Catalog group id"),
                FieldDecl::new::<String>("grouping_name").describe("Grouping name"),
                FieldDecl::new::<String>("grouping_code").describe("Grouping code"),
                FieldDecl::new::<SubjectId>("subject_id").describe("Subject id"),
                FieldDecl::new::<String>("subject_name").describe("Subject name"),
                FieldDecl::new::<Option<VersionId>>("version_id").describe("Version id"),
                FieldDecl::new::<i32>("year").describe("Year"),
                FieldDecl::new::<Vec<String>>("tags").describe("Tags"),
                FieldDecl::new::<Option<String>>("description").describe("Remarks"),
                FieldDecl::new::<bool>("enabled").describe("Enabled"),
                FieldDecl::new::<Vec<CatalogValidationRule>>("validation_rules").describe("Validation rules"),
                FieldDecl::new::<Vec<CatalogNode>>("nodes").describe("Catalog tree"),
            ]
        })
    }
}

impl DocumentModel for Catalog {
    const COLLECTION_NAME: &'static str = "Catalogs";
    const DESCRIPTION: &'static str = "Catalogs";
}

/// Validation rule derived from a validation target.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CatalogValidationRule {
    pub target_name: String,
    pub is_required: bool,
    pub value_regex: Option<String>,
    pub order_index: i32,
}

impl Introspect for CatalogValidationRule {
    fn shape() -> TypeShape {
        TypeShape::record::<Self>("CatalogValidationRule", || {
            vec![
                FieldDecl::new::<String>("target_name").describe("Target name"),
                FieldDecl::new::<bool>("is_required").describe("Required"),
                FieldDecl::new::<Option<String>>("value_regex").describe("Value pattern"),
                FieldDecl::new::<i32>("order_index").describe("Order index"),
            ]
        })
    }
}

/// One node of a catalog tree; children nest to any depth.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CatalogNode {
    pub code: String,
    pub name: String,
    pub children: Vec<CatalogNode>,
}

impl Introspect for CatalogNode {
    fn shape() -> TypeShape {
        TypeShape::record::<Self>("CatalogNode", || {
            vec![
                FieldDecl::new::<String>("code").describe("Code"),
                FieldDecl::new::<String>("name").describe("Name"),
                FieldDecl::new::<Vec<CatalogNode>>("children").describe("Child nodes"),
            ]
        })
    }
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Dimension {
    #[serde(rename = "_id")]
    pub id: DimensionId,
    #[serde(rename = "type")]
    pub kind: DimensionType,
    pub name: String,
    pub subject_ids: Vec<SubjectId>,
    pub is_finalized: bool,
    pub revision: i32,
    pub finalized_on: Option<DateTime<Utc>>,
    pub created_by: UserId,
    pub created_on: DateTime<Utc>,
    pub updated_by: UserId,
    pub updated_on: DateTime<Utc>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub allow_sub_values: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub change_track_date: Option<DateTime<Utc>>,
}

impl Introspect for Dimension {
    fn shape() -> TypeShape {
        TypeShape::record::<Self>("Dimension", || {
            vec![
                FieldDecl::new::<DimensionId>("id").describe("Id").identity(),
                FieldDecl::new::<DimensionType>("type").describe("Type"),
                FieldDecl::new::<String>("name").describe("Name"),
                FieldDecl::new::<Vec<SubjectId>>("subject_ids").describe("Subject ids"),
                FieldDecl::new::<bool>("is_finalized").describe("Finalized"),
                FieldDecl::new::<i32>("revision").describe("Revision"),
                FieldDecl::new::<Option<DateTime<Utc>>>("finalized_on").describe("Finalized at"),
                FieldDecl::new::<UserId>("created_by").describe("Created by"),
                FieldDecl::new::<DateTime<Utc>>("created_on").describe("Created at"),
                FieldDecl::new::<UserId>("updated_by").describe("Updated by"),
                FieldDecl::new::<DateTime<Utc>>("updated_on").describe("Updated at"),
                FieldDecl::new::<Option<bool>>("allow_sub_values").deprecated("purpose unknown"),
                FieldDecl::new::<Option<DateTime<Utc>>>("change_track_date")
                    .describe("Change tracking date")
                    .deprecated("unused since v2"),
            ]
        })
    }
}

impl DocumentModel for Dimension {
    const COLLECTION_NAME: &'static str = "Dimensions";
    const DESCRIPTION: &'static str = "Dimension definitions";
    const AUDITABLE: bool = true;
    const FINALIZABLE: bool = true;
}

#[derive(Debug, Clone, Serialize)]
pub struct User {
    #[serde(rename = "_id")]
    pub id: UserId,
    pub name: String,
}

impl Introspect for User {
    fn shape() -> TypeShape {
        TypeShape::record::<Self>("User", || {
            vec![
                FieldDecl::new::<UserId>("id").describe("Id").identity(),
                FieldDecl::new::<String>("name").describe("Name"),
            ]
        })
    }
}

impl DocumentModel for User {
    const COLLECTION_NAME: &'static str = "Users";
    const DESCRIPTION: &'static str = "Users";
}

impl Indexable for User {
    fn declared_indexes() -> Vec<IndexDeclaration> {
        vec![IndexDeclaration::builder().ascending("name").unique().build()]
    }
}
