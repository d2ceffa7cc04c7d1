//! Background export and import tasks.

use std::time::Duration;

use chrono::{DateTime, Utc};
use serde::Serialize;
use serde_json::json;

use super::enums::{ExportArchiveMode, ExportStatus, ExportType, ImportItemStatus, ImportTaskStatus};
use super::ids::{DocumentId, ExportTaskId, ItemId, RepositoryId, SubjectId, TaskId, UserId};
use crate::schema::{DocumentModel, FieldDecl, IndexDeclaration, Indexable, Introspect, TypeShape};

/// Finished export tasks are purged after this long.
pub const EXPORT_RETENTION: Duration = Duration::from_secs(30 * 24 * 60 * 60);

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ExportTask {
    #[serde(rename = "_id")]
    pub id: ExportTaskId,
    pub status: ExportStatus,
    pub user_id: UserId,
    pub spec: ExportSpec,
    pub received_on: DateTime<Utc>,
    pub started_on: Option<DateTime<Utc>>,
    pub finished_on: Option<DateTime<Utc>>,
    pub total_item_count: Option<i32>,
    pub filename: Option<String>,
    pub file_url: Option<String>,
    pub messages: Vec<String>,
    pub enabled: bool,
}

impl Introspect for ExportTask {
    fn shape() -> TypeShape {
        TypeShape::record::<Self>("ExportTask", || {
            vec![
                FieldDecl::new::<ExportTaskId>("id").describe("Id").identity(),
                FieldDecl::new::<ExportStatus>("status").describe("Status"),
                FieldDecl::new::<UserId>("user_id").describe("User id"),
                FieldDecl::new::<ExportSpec>("spec").describe("Export specification"),
                FieldDecl::new::<DateTime<Utc>>("received_on").describe("Received at"),
                FieldDecl::new::<Option<DateTime<Utc>>>("started_on").describe("Processing started at"),
                FieldDecl::new::<Option<DateTime<Utc>>>("finished_on").describe("Finished at"),
                FieldDecl::new::<Option<i32>>("total_item_count").describe("Total item count"),
                FieldDecl::new::<Option<String>>("filename").describe("File name"),
                FieldDecl::new::<Option<String>>("file_url").describe("File URL"),
                FieldDecl::new::<Vec<String>>("messages").describe("Messages"),
                FieldDecl::new::<bool>("enabled").describe("Enabled"),
            ]
        })
    }
}

impl DocumentModel for ExportTask {
    const COLLECTION_NAME: &'static str = "ExportTasks";
    const DESCRIPTION: &'static str = "Export tasks";
}

impl Indexable for ExportTask {
    fn declared_indexes() -> Vec<IndexDeclaration> {
        vec![
            IndexDeclaration::builder().ascending("userId").build(),
            IndexDeclaration::builder().ascending("status").build(),
            IndexDeclaration::builder()
                .ascending("finishedOn")
                .named("finishedOn_ttl")
                .expire_after(EXPORT_RETENTION)
                .partial_filter(json!({ "enabled": false }))
                .build(),
        ]
    }
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ExportSpec {
    pub export_name: Option<String>,
    pub document_ids: Vec<DocumentId>,
    pub item_ids: Vec<ItemId>,
    pub export_type: ExportType,
    pub archive_mode: ExportArchiveMode,
}

impl Introspect for ExportSpec {
    fn shape() -> TypeShape {
        TypeShape::record::<Self>("ExportSpec", || {
            vec![
                FieldDecl::new::<Option<String>>("export_name").describe("Export name"),
                FieldDecl::new::<Vec<DocumentId>>("document_ids").describe("Document ids"),
                FieldDecl::new::<Vec<ItemId>>("item_ids").describe("Item ids"),
                FieldDecl::new::<ExportType>("export_type").describe("Export type"),
                FieldDecl::new::<ExportArchiveMode>("archive_mode").describe("Archive mode"),
            ]
        })
    }
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ImportTask {
    #[serde(rename = "_id")]
    pub task_id: TaskId,
    pub catalog_group_code: String,
    pub subject_ids: Vec<SubjectId>,
    pub document_id: DocumentId,
    pub repository_id: RepositoryId,
    pub import_finished_item_count: i32,
    pub total_item_count: i32,
    pub status: ImportTaskStatus,
    pub file_name: String,
    pub uploader_id: UserId,
    pub uploader_name: String,
    pub uploaded_at: DateTime<Utc>,
    pub finished_at: Option<DateTime<Utc>>,
    pub logs: Vec<TaskLog>,
    pub items: Vec<ImportedItem>,
}

impl Introspect for ImportTask {
    fn shape() -> TypeShape {
        TypeShape::record::<Self>("ImportTask", || {
            vec![
                FieldDecl::new::<TaskId>("task_id").describe("Id").identity(),
                FieldDecl::new::<String>("catalog_group_code").describe("Catalog group code"),
                FieldDecl::new::<Vec<SubjectId>>("subject_ids").describe("Subject ids"),
                FieldDecl::new::<DocumentId>("document_id").describe("Document id"),
                FieldDecl::new::<RepositoryId>("repository_id").describe("Repository id"),
                FieldDecl::new::<i32>("import_finished_item_count").describe("Imported item count"),
                FieldDecl::new::<i32>("total_item_count").describe("Total item count"),
                FieldDecl::new::<ImportTaskStatus>("status").describe("Import status"),
                FieldDecl::new::<String>("file_name").describe("File name"),
                FieldDecl::new::<UserId>("uploader_id").describe("Uploader id"),
                FieldDecl::new::<String>("uploader_name").describe("Uploader name"),
                FieldDecl::new::<DateTime<Utc>>("uploaded_at").describe("Uploaded at"),
                FieldDecl::new::<Option<DateTime<Utc>>>("finished_at").describe("Finished at"),
                FieldDecl::new::<Vec<TaskLog>>("logs").describe("Import log"),
                FieldDecl::new::<Vec<ImportedItem>>("items").describe("Imported items"),
            ]
        })
    }
}

impl DocumentModel for ImportTask {
    const COLLECTION_NAME: &'static str = "ImportTasks";
    const DESCRIPTION: &'static str = "Import tasks";
}

impl Indexable for ImportTask {
    fn declared_indexes() -> Vec<IndexDeclaration> {
        ["items.id", "subjectIds", "catalogGroupCode", "uploadedAt", "uploaderId", "uploaderName", "fileName", "documentId"]
            .into_iter()
            .map(|field| IndexDeclaration::builder().ascending(field).build())
            .collect()
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct TaskLog {
    pub time: DateTime<Utc>,
    pub message: String,
}

impl Introspect for TaskLog {
    fn shape() -> TypeShape {
        TypeShape::record::<Self>("TaskLog", || {
            vec![
                FieldDecl::new::<DateTime<Utc>>("time").describe("Time"),
                FieldDecl::new::<String>("message").describe("Message"),
            ]
        })
    }
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ImportedItem {
    pub id: ItemId,
    pub status: ImportItemStatus,
    pub updated_at: DateTime<Utc>,
}

impl Introspect for ImportedItem {
    fn shape() -> TypeShape {
        TypeShape::record::<Self>("ImportedItem", || {
            vec![
                FieldDecl::new::<ItemId>("id").describe("Item id"),
                FieldDecl::new::<ImportItemStatus>("status").describe("Item status"),
                FieldDecl::new::<DateTime<Utc>>("updated_at").describe("Updated at"),
            ]
        })
    }
}
