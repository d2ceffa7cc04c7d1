//! Strongly-typed identifiers for the item-bank collections.

crate::string_id! {
    /// Subject identifier, stored as a string.
    pub struct SubjectId;
}

crate::string_id! {
    pub struct UserId;
}

crate::string_id! {
    pub struct CatalogId;
}

crate::string_id! {
    pub struct CatalogGroupId;
}

crate::string_id! {
    pub struct VersionId;
}

crate::string_id! {
    pub struct DimensionId;
}

crate::string_id! {
    pub struct ItemId;
}

crate::string_id! {
    pub struct DocumentId;
}

crate::string_id! {
    pub struct RepositoryId;
}

crate::object_id! {
    /// Export task identifier, stored as an ObjectId.
    pub struct ExportTaskId;
}

crate::object_id! {
    pub struct TaskId;
}

crate::object_id! {
    pub struct UserConversationId;
}

crate::object_id! {
    pub struct ConversationMessageId;
}
