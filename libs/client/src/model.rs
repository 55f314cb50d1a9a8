//! Wire models, mirroring the server's JSON bodies.

use std::collections::HashMap;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PartView {
    pub id: Uuid,
    pub name: String,
    pub role: Option<String>,
    pub description: String,
    pub feelings: Vec<String>,
    pub beliefs: Vec<String>,
    pub triggers: Vec<String>,
    pub needs: Vec<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RelationshipView {
    pub id: Uuid,
    pub source_id: Uuid,
    pub target_id: Uuid,
    pub relationship_type: String,
    pub description: String,
    pub created_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct JournalView {
    pub id: Uuid,
    pub title: String,
    pub content: String,
    pub part_id: Option<Uuid>,
    pub metadata: Option<serde_json::Value>,
    pub created_at: DateTime<Utc>,
}

/// The cached per-session snapshot of the caller's system.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SystemSnapshot {
    pub id: Uuid,
    pub user_id: Uuid,
    pub abstraction_level: String,
    pub created_at: DateTime<Utc>,
    pub parts: HashMap<Uuid, PartView>,
    pub relationships: HashMap<Uuid, RelationshipView>,
    pub part_count: usize,
    pub relationship_count: usize,
    pub journal_count: u64,
}

#[derive(Debug, Clone, Default, Serialize)]
pub struct CreatePart {
    pub name: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub role: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    pub feelings: Vec<String>,
    pub beliefs: Vec<String>,
    pub triggers: Vec<String>,
    pub needs: Vec<String>,
}

/// Partial part update; only present fields are sent.
#[derive(Debug, Clone, Default, Serialize)]
pub struct UpdatePart {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub role: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub feelings: Option<Vec<String>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub beliefs: Option<Vec<String>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub triggers: Option<Vec<String>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub needs: Option<Vec<String>>,
}

#[derive(Debug, Clone, Serialize)]
pub struct CreateRelationship {
    pub source_id: Uuid,
    pub target_id: Uuid,
    pub relationship_type: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
}

#[derive(Debug, Clone, Default, Serialize)]
pub struct UpdateRelationship {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub relationship_type: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
}

#[derive(Debug, Clone, Serialize)]
pub struct CreateJournal {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    pub content: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub part_id: Option<Uuid>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub metadata: Option<serde_json::Value>,
}

/// Partial journal update. `part_id` and `metadata` are double-optional:
/// `Some(None)` serializes as an explicit `null` and clears the field on
/// the server, while the outer `None` omits it.
#[derive(Debug, Clone, Default, Serialize)]
pub struct UpdateJournal {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub content: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub part_id: Option<Option<Uuid>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub metadata: Option<Option<serde_json::Value>>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct UserView {
    pub id: Uuid,
    pub username: String,
    pub email: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct Session {
    pub user: UserView,
    pub access_token: String,
}
