use chrono::{DateTime, Utc};
use std::collections::HashMap;
use uuid::Uuid;

/// The IFS role of a part. `Self` is the one mandatory, non-deletable part
/// representing core compassionate awareness; everything else is optional.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PartRole {
    SelfRole,
    Manager,
    Firefighter,
    Exile,
    Protector,
    Other,
}

impl PartRole {
    pub const ALL: [PartRole; 6] = [
        PartRole::SelfRole,
        PartRole::Manager,
        PartRole::Firefighter,
        PartRole::Exile,
        PartRole::Protector,
        PartRole::Other,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            PartRole::SelfRole => "Self",
            PartRole::Manager => "Manager",
            PartRole::Firefighter => "Firefighter",
            PartRole::Exile => "Exile",
            PartRole::Protector => "Protector",
            PartRole::Other => "Other",
        }
    }

    pub fn parse(s: &str) -> Option<PartRole> {
        Self::ALL.iter().copied().find(|r| r.as_str() == s)
    }
}

/// How the UI should word its prompts for this system.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum AbstractionLevel {
    Concrete,
    Abstract,
    #[default]
    Mixed,
}

impl AbstractionLevel {
    pub const ALL: [AbstractionLevel; 3] = [
        AbstractionLevel::Concrete,
        AbstractionLevel::Abstract,
        AbstractionLevel::Mixed,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            AbstractionLevel::Concrete => "concrete",
            AbstractionLevel::Abstract => "abstract",
            AbstractionLevel::Mixed => "mixed",
        }
    }

    pub fn parse(s: &str) -> Option<AbstractionLevel> {
        Self::ALL.iter().copied().find(|l| l.as_str() == s)
    }
}

/// Pure part model for inter-module communication (no serde).
#[derive(Debug, Clone, PartialEq)]
pub struct Part {
    pub id: Uuid,
    pub name: String,
    pub role: Option<PartRole>,
    pub description: String,
    pub feelings: Vec<String>,
    pub beliefs: Vec<String>,
    pub triggers: Vec<String>,
    pub needs: Vec<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Data for creating a new part. The role arrives as a raw string and is
/// validated against [`PartRole`] by the domain service.
#[derive(Debug, Clone, Default)]
pub struct NewPart {
    pub name: String,
    pub role: Option<String>,
    pub description: Option<String>,
    pub feelings: Vec<String>,
    pub beliefs: Vec<String>,
    pub triggers: Vec<String>,
    pub needs: Vec<String>,
}

/// Partial update for a part; only supplied fields change.
#[derive(Debug, Clone, Default)]
pub struct PartPatch {
    pub name: Option<String>,
    pub role: Option<String>,
    pub description: Option<String>,
    pub feelings: Option<Vec<String>>,
    pub beliefs: Option<Vec<String>>,
    pub triggers: Option<Vec<String>>,
    pub needs: Option<Vec<String>>,
}

/// A directed, typed edge between two parts of the same system.
#[derive(Debug, Clone, PartialEq)]
pub struct Relationship {
    pub id: Uuid,
    pub source_id: Uuid,
    pub target_id: Uuid,
    pub relationship_type: String,
    pub description: String,
    pub created_at: DateTime<Utc>,
}

/// Data for creating a new relationship.
#[derive(Debug, Clone)]
pub struct NewRelationship {
    pub source_id: Uuid,
    pub target_id: Uuid,
    pub relationship_type: String,
    pub description: Option<String>,
}

/// Partial update for a relationship. Endpoints are immutable; changing
/// them is a delete plus create.
#[derive(Debug, Clone, Default)]
pub struct RelationshipPatch {
    pub relationship_type: Option<String>,
    pub description: Option<String>,
}

/// A free-text reflection, optionally tagged with a part and metadata.
#[derive(Debug, Clone, PartialEq)]
pub struct JournalEntry {
    pub id: Uuid,
    pub title: String,
    pub content: String,
    pub part_id: Option<Uuid>,
    pub metadata: Option<serde_json::Value>,
    pub created_at: DateTime<Utc>,
}

/// Data for creating a journal entry; a missing title is derived from the
/// creation timestamp.
#[derive(Debug, Clone, Default)]
pub struct NewJournal {
    pub title: Option<String>,
    pub content: String,
    pub part_id: Option<Uuid>,
    pub metadata: Option<serde_json::Value>,
}

/// Partial update for a journal entry. The part tag and metadata are
/// double-optional: the outer `None` leaves the field alone, an inner
/// `None` clears it.
#[derive(Debug, Clone, Default)]
pub struct JournalPatch {
    pub title: Option<String>,
    pub content: Option<String>,
    pub part_id: Option<Option<Uuid>>,
    pub metadata: Option<Option<serde_json::Value>>,
}

/// Serializable snapshot of a system for client consumption: the system
/// row plus maps of parts and relationships keyed by id, with counts.
#[derive(Debug, Clone)]
pub struct SystemOverview {
    pub id: Uuid,
    pub user_id: Uuid,
    pub abstraction_level: AbstractionLevel,
    pub created_at: DateTime<Utc>,
    pub parts: HashMap<Uuid, Part>,
    pub relationships: HashMap<Uuid, Relationship>,
    pub part_count: usize,
    pub relationship_count: usize,
    pub journal_count: u64,
}

/// Counts only, for the stats endpoint.
#[derive(Debug, Clone, PartialEq)]
pub struct SystemStats {
    pub part_count: u64,
    pub relationship_count: u64,
    pub journal_count: u64,
    pub created_at: DateTime<Utc>,
    pub abstraction_level: AbstractionLevel,
}

/// Full export of a system, journals included.
#[derive(Debug, Clone)]
pub struct SystemExport {
    pub id: Uuid,
    pub user_id: Uuid,
    pub abstraction_level: AbstractionLevel,
    pub created_at: DateTime<Utc>,
    pub parts: HashMap<Uuid, Part>,
    pub relationships: HashMap<Uuid, Relationship>,
    pub journals: HashMap<Uuid, JournalEntry>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn part_role_round_trips_through_strings() {
        for role in PartRole::ALL {
            assert_eq!(PartRole::parse(role.as_str()), Some(role));
        }
        assert_eq!(PartRole::parse("Gatekeeper"), None);
        assert_eq!(PartRole::parse("self"), None); // case-sensitive on purpose
    }

    #[test]
    fn abstraction_level_round_trips_through_strings() {
        for level in AbstractionLevel::ALL {
            assert_eq!(AbstractionLevel::parse(level.as_str()), Some(level));
        }
        assert_eq!(AbstractionLevel::parse("vague"), None);
        assert_eq!(AbstractionLevel::default(), AbstractionLevel::Mixed);
    }
}
