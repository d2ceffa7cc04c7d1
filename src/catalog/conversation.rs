//! Assistant conversations.

use std::collections::HashMap;

use chrono::{DateTime, Utc};
use serde::Serialize;

use super::enums::ConversationRole;
use super::ids::{ConversationMessageId, UserConversationId, UserId};
use crate::schema::{DocumentModel, FieldDecl, IndexDeclaration, Indexable, Introspect, TypeShape};

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct UserConversation {
    #[serde(rename = "_id")]
    pub id: UserConversationId,
    pub user_id: UserId,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
    pub last_activity: DateTime<Utc>,
    pub is_active: bool,
    pub messages: Vec<ConversationMessage>,
    pub total_tokens: i32,
    pub requires_cleanup: bool,
    pub cleanup_reason: Option<String>,
}

impl Introspect for UserConversation {
    fn shape() -> TypeShape {
        TypeShape::record::<Self>("UserConversation", || {
            vec![
                FieldDecl::new::<UserConversationId>("id").describe("Id").identity(),
                FieldDecl::new::<UserId>("user_id").describe("User id"),
                FieldDecl::new::<DateTime<Utc>>("created_at").describe("Created at"),
                FieldDecl::new::<DateTime<Utc>>("updated_at").describe("Updated at"),
                FieldDecl::new::<DateTime<Utc>>("last_activity").describe("Last activity"),
                FieldDecl::new::<bool>("is_active").describe("Active"),
                FieldDecl::new::<Vec<ConversationMessage>>("messages").describe("Messages"),
                FieldDecl::new::<i32>("total_tokens").describe("Total tokens"),
                FieldDecl::new::<bool>("requires_cleanup").describe("Needs cleanup"),
                FieldDecl::new::<Option<String>>("cleanup_reason").describe("Cleanup reason"),
            ]
        })
    }
}

impl DocumentModel for UserConversation {
    const COLLECTION_NAME: &'static str = "UserConversations";
    const DESCRIPTION: &'static str = "User conversations";
}

impl Indexable for UserConversation {
    fn declared_indexes() -> Vec<IndexDeclaration> {
        vec![
            IndexDeclaration::builder()
                .ascending("userId")
                .descending("lastActivity")
                .build(),
            IndexDeclaration::builder()
                .text("messages.content")
                .named("messages_text")
                .weight("messages.content", 10)
                .default_language("none")
                .build(),
        ]
    }
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ConversationMessage {
    #[serde(rename = "_id")]
    pub id: ConversationMessageId,
    pub role: ConversationRole,
    pub content: String,
    pub timestamp: DateTime<Utc>,
    pub token_count: i32,
    pub used_tools: Option<Vec<String>>,
    pub tool_results: Option<HashMap<String, serde_json::Value>>,
    pub processing_time_ms: i32,
}

impl Introspect for ConversationMessage {
    fn shape() -> TypeShape {
        TypeShape::record::<Self>("ConversationMessage", || {
            vec![
                FieldDecl::new::<ConversationMessageId>("id").describe("Id").identity(),
                FieldDecl::new::<ConversationRole>("role").describe("Role"),
                FieldDecl::new::<String>("content").describe("Content"),
                FieldDecl::new::<DateTime<Utc>>("timestamp").describe("Timestamp"),
                FieldDecl::new::<i32>("token_count").describe("Token count"),
                FieldDecl::new::<Option<Vec<String>>>("used_tools").describe("Tools used"),
                FieldDecl::new::<Option<HashMap<String, serde_json::Value>>>("tool_results").describe("Tool results"),
                FieldDecl::new::<i32>("processing_time_ms").describe("Processing time (ms)"),
            ]
        })
    }
}
