use std::collections::HashMap;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::contract::model::{
    JournalEntry, JournalPatch, NewJournal, NewPart, NewRelationship, Part, PartPatch,
    Relationship, RelationshipPatch, SystemExport, SystemOverview, SystemStats,
};

/// REST DTO for a part.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PartDto {
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

/// REST DTO for creating a part. List fields default to empty.
#[derive(Debug, Clone, Deserialize)]
pub struct CreatePartReq {
    pub name: String,
    pub role: Option<String>,
    pub description: Option<String>,
    #[serde(default)]
    pub feelings: Vec<String>,
    #[serde(default)]
    pub beliefs: Vec<String>,
    #[serde(default)]
    pub triggers: Vec<String>,
    #[serde(default)]
    pub needs: Vec<String>,
}

/// REST DTO for a partial part update; absent fields keep their value.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct UpdatePartReq {
    pub name: Option<String>,
    pub role: Option<String>,
    pub description: Option<String>,
    pub feelings: Option<Vec<String>>,
    pub beliefs: Option<Vec<String>>,
    pub triggers: Option<Vec<String>>,
    pub needs: Option<Vec<String>>,
}

/// REST DTO for a relationship.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RelationshipDto {
    pub id: Uuid,
    pub source_id: Uuid,
    pub target_id: Uuid,
    pub relationship_type: String,
    pub description: String,
    pub created_at: DateTime<Utc>,
}

/// REST DTO for creating a relationship.
#[derive(Debug, Clone, Deserialize)]
pub struct CreateRelationshipReq {
    pub source_id: Uuid,
    pub target_id: Uuid,
    pub relationship_type: String,
    pub description: Option<String>,
}

/// REST DTO for a partial relationship update. Endpoints cannot change.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct UpdateRelationshipReq {
    pub relationship_type: Option<String>,
    pub description: Option<String>,
}

/// REST DTO for a journal entry.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct JournalDto {
    pub id: Uuid,
    pub title: String,
    pub content: String,
    pub part_id: Option<Uuid>,
    pub metadata: Option<serde_json::Value>,
    pub created_at: DateTime<Utc>,
}

/// REST DTO for creating a journal entry.
#[derive(Debug, Clone, Deserialize)]
pub struct CreateJournalReq {
    pub title: Option<String>,
    pub content: String,
    pub part_id: Option<Uuid>,
    pub metadata: Option<serde_json::Value>,
}

/// REST DTO for a partial journal update. For `part_id` and `metadata`
/// an absent field leaves the value alone while an explicit `null`
/// clears it, hence the nested options.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct UpdateJournalReq {
    pub title: Option<String>,
    pub content: Option<String>,
    #[serde(default, deserialize_with = "double_option")]
    pub part_id: Option<Option<Uuid>>,
    #[serde(default, deserialize_with = "double_option")]
    pub metadata: Option<Option<serde_json::Value>>,
}

fn double_option<'de, T, D>(de: D) -> Result<Option<Option<T>>, D::Error>
where
    T: Deserialize<'de>,
    D: serde::Deserializer<'de>,
{
    Option::<T>::deserialize(de).map(Some)
}

/// REST DTO for the system overview.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SystemDto {
    pub id: Uuid,
    pub user_id: Uuid,
    pub abstraction_level: String,
    pub created_at: DateTime<Utc>,
    pub parts: HashMap<Uuid, PartDto>,
    pub relationships: HashMap<Uuid, RelationshipDto>,
    pub part_count: usize,
    pub relationship_count: usize,
    pub journal_count: u64,
}

/// REST DTO for changing the system's abstraction level.
#[derive(Debug, Clone, Deserialize)]
pub struct UpdateSystemReq {
    pub abstraction_level: String,
}

/// REST DTO for system counts.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StatsDto {
    pub part_count: u64,
    pub relationship_count: u64,
    pub journal_count: u64,
    pub created_at: DateTime<Utc>,
    pub abstraction_level: String,
}

/// REST DTO for the full export.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ExportDto {
    pub id: Uuid,
    pub user_id: Uuid,
    pub abstraction_level: String,
    pub created_at: DateTime<Utc>,
    pub parts: HashMap<Uuid, PartDto>,
    pub relationships: HashMap<Uuid, RelationshipDto>,
    pub journals: HashMap<Uuid, JournalDto>,
}

/// REST DTO for level-matched form copy.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GuidanceDto {
    pub abstraction_level: String,
    pub fields: HashMap<String, String>,
}

impl From<Part> for PartDto {
    fn from(part: Part) -> Self {
        Self {
            id: part.id,
            name: part.name,
            role: part.role.map(|r| r.as_str().to_string()),
            description: part.description,
            feelings: part.feelings,
            beliefs: part.beliefs,
            triggers: part.triggers,
            needs: part.needs,
            created_at: part.created_at,
            updated_at: part.updated_at,
        }
    }
}

impl From<CreatePartReq> for NewPart {
    fn from(req: CreatePartReq) -> Self {
        Self {
            name: req.name,
            role: req.role,
            description: req.description,
            feelings: req.feelings,
            beliefs: req.beliefs,
            triggers: req.triggers,
            needs: req.needs,
        }
    }
}

impl From<UpdatePartReq> for PartPatch {
    fn from(req: UpdatePartReq) -> Self {
        Self {
            name: req.name,
            role: req.role,
            description: req.description,
            feelings: req.feelings,
            beliefs: req.beliefs,
            triggers: req.triggers,
            needs: req.needs,
        }
    }
}

impl From<Relationship> for RelationshipDto {
    fn from(rel: Relationship) -> Self {
        Self {
            id: rel.id,
            source_id: rel.source_id,
            target_id: rel.target_id,
            relationship_type: rel.relationship_type,
            description: rel.description,
            created_at: rel.created_at,
        }
    }
}

impl From<CreateRelationshipReq> for NewRelationship {
    fn from(req: CreateRelationshipReq) -> Self {
        Self {
            source_id: req.source_id,
            target_id: req.target_id,
            relationship_type: req.relationship_type,
            description: req.description,
        }
    }
}

impl From<UpdateRelationshipReq> for RelationshipPatch {
    fn from(req: UpdateRelationshipReq) -> Self {
        Self {
            relationship_type: req.relationship_type,
            description: req.description,
        }
    }
}

impl From<JournalEntry> for JournalDto {
    fn from(entry: JournalEntry) -> Self {
        Self {
            id: entry.id,
            title: entry.title,
            content: entry.content,
            part_id: entry.part_id,
            metadata: entry.metadata,
            created_at: entry.created_at,
        }
    }
}

impl From<CreateJournalReq> for NewJournal {
    fn from(req: CreateJournalReq) -> Self {
        Self {
            title: req.title,
            content: req.content,
            part_id: req.part_id,
            metadata: req.metadata,
        }
    }
}

impl From<UpdateJournalReq> for JournalPatch {
    fn from(req: UpdateJournalReq) -> Self {
        Self {
            title: req.title,
            content: req.content,
            part_id: req.part_id,
            metadata: req.metadata,
        }
    }
}

impl From<SystemOverview> for SystemDto {
    fn from(overview: SystemOverview) -> Self {
        Self {
            id: overview.id,
            user_id: overview.user_id,
            abstraction_level: overview.abstraction_level.as_str().to_string(),
            created_at: overview.created_at,
            parts: overview
                .parts
                .into_iter()
                .map(|(id, p)| (id, p.into()))
                .collect(),
            relationships: overview
                .relationships
                .into_iter()
                .map(|(id, r)| (id, r.into()))
                .collect(),
            part_count: overview.part_count,
            relationship_count: overview.relationship_count,
            journal_count: overview.journal_count,
        }
    }
}

impl From<SystemStats> for StatsDto {
    fn from(stats: SystemStats) -> Self {
        Self {
            part_count: stats.part_count,
            relationship_count: stats.relationship_count,
            journal_count: stats.journal_count,
            created_at: stats.created_at,
            abstraction_level: stats.abstraction_level.as_str().to_string(),
        }
    }
}

impl From<SystemExport> for ExportDto {
    fn from(export: SystemExport) -> Self {
        Self {
            id: export.id,
            user_id: export.user_id,
            abstraction_level: export.abstraction_level.as_str().to_string(),
            created_at: export.created_at,
            parts: export
                .parts
                .into_iter()
                .map(|(id, p)| (id, p.into()))
                .collect(),
            relationships: export
                .relationships
                .into_iter()
                .map(|(id, r)| (id, r.into()))
                .collect(),
            journals: export
                .journals
                .into_iter()
                .map(|(id, j)| (id, j.into()))
                .collect(),
        }
    }
}
