use async_trait::async_trait;
use uuid::Uuid;

use crate::contract::model::{
    JournalEntry, JournalPatch, NewJournal, NewPart, NewRelationship, Part, PartPatch,
    Relationship, RelationshipPatch, SystemExport, SystemOverview, SystemStats,
};

/// Public API trait for the parts-map module that other modules can use.
/// Every call is scoped to the system owned by `user_id`.
#[async_trait]
pub trait IfsApi: Send + Sync {
    /// Get the user's system, creating it on first access.
    async fn get_system(&self, user_id: Uuid) -> anyhow::Result<SystemOverview>;

    /// Reset the system to a lone Self part.
    async fn reset_system(&self, user_id: Uuid) -> anyhow::Result<SystemOverview>;

    /// Counts and metadata for the system.
    async fn system_stats(&self, user_id: Uuid) -> anyhow::Result<SystemStats>;

    /// Full export, journals included.
    async fn export_system(&self, user_id: Uuid) -> anyhow::Result<SystemExport>;

    /// Create a new part.
    async fn create_part(&self, user_id: Uuid, new_part: NewPart) -> anyhow::Result<Part>;

    /// List all parts.
    async fn list_parts(&self, user_id: Uuid) -> anyhow::Result<Vec<Part>>;

    /// Get a part by ID.
    async fn get_part(&self, user_id: Uuid, part_id: Uuid) -> anyhow::Result<Part>;

    /// Update a part with partial data.
    async fn update_part(
        &self,
        user_id: Uuid,
        part_id: Uuid,
        patch: PartPatch,
    ) -> anyhow::Result<Part>;

    /// Delete a part and its relationships.
    async fn delete_part(&self, user_id: Uuid, part_id: Uuid) -> anyhow::Result<()>;

    /// Create a relationship between two parts.
    async fn create_relationship(
        &self,
        user_id: Uuid,
        new_rel: NewRelationship,
    ) -> anyhow::Result<Relationship>;

    /// List all relationships.
    async fn list_relationships(&self, user_id: Uuid) -> anyhow::Result<Vec<Relationship>>;

    /// Get a relationship by ID.
    async fn get_relationship(
        &self,
        user_id: Uuid,
        relationship_id: Uuid,
    ) -> anyhow::Result<Relationship>;

    /// Update a relationship's type or description.
    async fn update_relationship(
        &self,
        user_id: Uuid,
        relationship_id: Uuid,
        patch: RelationshipPatch,
    ) -> anyhow::Result<Relationship>;

    /// Delete a relationship by ID.
    async fn delete_relationship(&self, user_id: Uuid, relationship_id: Uuid)
        -> anyhow::Result<()>;

    /// Create a journal entry.
    async fn create_journal(
        &self,
        user_id: Uuid,
        new_journal: NewJournal,
    ) -> anyhow::Result<JournalEntry>;

    /// List journal entries, newest first.
    async fn list_journals(&self, user_id: Uuid) -> anyhow::Result<Vec<JournalEntry>>;

    /// Get a journal entry by ID.
    async fn get_journal(&self, user_id: Uuid, journal_id: Uuid) -> anyhow::Result<JournalEntry>;

    /// Update a journal entry with partial data.
    async fn update_journal(
        &self,
        user_id: Uuid,
        journal_id: Uuid,
        patch: JournalPatch,
    ) -> anyhow::Result<JournalEntry>;

    /// Delete a journal entry by ID.
    async fn delete_journal(&self, user_id: Uuid, journal_id: Uuid) -> anyhow::Result<()>;
}
