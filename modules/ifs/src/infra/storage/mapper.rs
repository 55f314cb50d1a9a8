//! Conversions between storage rows and contract models.

use crate::contract::model::{JournalEntry, Part, PartRole, Relationship};
use crate::infra::storage::entity::{journal, part, relationship};

impl From<part::Model> for Part {
    fn from(row: part::Model) -> Self {
        Part {
            id: row.id,
            name: row.name,
            // Unknown strings cannot appear here (the service validates on
            // write), but a hand-edited database should not panic the server.
            role: row.role.as_deref().and_then(PartRole::parse),
            description: row.description,
            feelings: row.feelings.0,
            beliefs: row.beliefs.0,
            triggers: row.triggers.0,
            needs: row.needs.0,
            created_at: row.created_at,
            updated_at: row.updated_at,
        }
    }
}

impl From<relationship::Model> for Relationship {
    fn from(row: relationship::Model) -> Self {
        Relationship {
            id: row.id,
            source_id: row.source_id,
            target_id: row.target_id,
            relationship_type: row.relationship_type,
            description: row.description,
            created_at: row.created_at,
        }
    }
}

impl From<journal::Model> for JournalEntry {
    fn from(row: journal::Model) -> Self {
        JournalEntry {
            id: row.id,
            title: row.title,
            content: row.content,
            part_id: row.part_id,
            metadata: row.metadata,
            created_at: row.created_at,
        }
    }
}
