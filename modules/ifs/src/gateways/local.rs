use async_trait::async_trait;
use std::sync::Arc;
use uuid::Uuid;

use crate::contract::{
    client::IfsApi,
    error::IfsError,
    model::{
        JournalEntry, JournalPatch, NewJournal, NewPart, NewRelationship, Part, PartPatch,
        Relationship, RelationshipPatch, SystemExport, SystemOverview, SystemStats,
    },
};
use crate::domain::{error::DomainError, service::Service};

/// Local implementation of [`IfsApi`] that delegates to the domain service.
pub struct IfsLocalClient {
    service: Arc<Service>,
}

impl IfsLocalClient {
    pub fn new(service: Arc<Service>) -> Self {
        Self { service }
    }
}

#[async_trait]
impl IfsApi for IfsLocalClient {
    async fn get_system(&self, user_id: Uuid) -> anyhow::Result<SystemOverview> {
        self.service
            .get_or_create_system(user_id)
            .await
            .map_err(map_domain_error)
    }

    async fn reset_system(&self, user_id: Uuid) -> anyhow::Result<SystemOverview> {
        self.service
            .reset_system(user_id)
            .await
            .map_err(map_domain_error)
    }

    async fn system_stats(&self, user_id: Uuid) -> anyhow::Result<SystemStats> {
        self.service
            .system_stats(user_id)
            .await
            .map_err(map_domain_error)
    }

    async fn export_system(&self, user_id: Uuid) -> anyhow::Result<SystemExport> {
        self.service
            .export_system(user_id)
            .await
            .map_err(map_domain_error)
    }

    async fn create_part(&self, user_id: Uuid, new_part: NewPart) -> anyhow::Result<Part> {
        self.service
            .create_part(user_id, new_part)
            .await
            .map_err(map_domain_error)
    }

    async fn list_parts(&self, user_id: Uuid) -> anyhow::Result<Vec<Part>> {
        self.service
            .list_parts(user_id)
            .await
            .map_err(map_domain_error)
    }

    async fn get_part(&self, user_id: Uuid, part_id: Uuid) -> anyhow::Result<Part> {
        self.service
            .get_part(user_id, part_id)
            .await
            .map_err(map_domain_error)
    }

    async fn update_part(
        &self,
        user_id: Uuid,
        part_id: Uuid,
        patch: PartPatch,
    ) -> anyhow::Result<Part> {
        self.service
            .update_part(user_id, part_id, patch)
            .await
            .map_err(map_domain_error)
    }

    async fn delete_part(&self, user_id: Uuid, part_id: Uuid) -> anyhow::Result<()> {
        self.service
            .delete_part(user_id, part_id)
            .await
            .map_err(map_domain_error)
    }

    async fn create_relationship(
        &self,
        user_id: Uuid,
        new_rel: NewRelationship,
    ) -> anyhow::Result<Relationship> {
        self.service
            .create_relationship(user_id, new_rel)
            .await
            .map_err(map_domain_error)
    }

    async fn list_relationships(&self, user_id: Uuid) -> anyhow::Result<Vec<Relationship>> {
        self.service
            .list_relationships(user_id)
            .await
            .map_err(map_domain_error)
    }

    async fn get_relationship(
        &self,
        user_id: Uuid,
        relationship_id: Uuid,
    ) -> anyhow::Result<Relationship> {
        self.service
            .get_relationship(user_id, relationship_id)
            .await
            .map_err(map_domain_error)
    }

    async fn update_relationship(
        &self,
        user_id: Uuid,
        relationship_id: Uuid,
        patch: RelationshipPatch,
    ) -> anyhow::Result<Relationship> {
        self.service
            .update_relationship(user_id, relationship_id, patch)
            .await
            .map_err(map_domain_error)
    }

    async fn delete_relationship(
        &self,
        user_id: Uuid,
        relationship_id: Uuid,
    ) -> anyhow::Result<()> {
        self.service
            .delete_relationship(user_id, relationship_id)
            .await
            .map_err(map_domain_error)
    }

    async fn create_journal(
        &self,
        user_id: Uuid,
        new_journal: NewJournal,
    ) -> anyhow::Result<JournalEntry> {
        self.service
            .create_journal(user_id, new_journal)
            .await
            .map_err(map_domain_error)
    }

    async fn list_journals(&self, user_id: Uuid) -> anyhow::Result<Vec<JournalEntry>> {
        self.service
            .list_journals(user_id)
            .await
            .map_err(map_domain_error)
    }

    async fn get_journal(&self, user_id: Uuid, journal_id: Uuid) -> anyhow::Result<JournalEntry> {
        self.service
            .get_journal(user_id, journal_id)
            .await
            .map_err(map_domain_error)
    }

    async fn update_journal(
        &self,
        user_id: Uuid,
        journal_id: Uuid,
        patch: JournalPatch,
    ) -> anyhow::Result<JournalEntry> {
        self.service
            .update_journal(user_id, journal_id, patch)
            .await
            .map_err(map_domain_error)
    }

    async fn delete_journal(&self, user_id: Uuid, journal_id: Uuid) -> anyhow::Result<()> {
        self.service
            .delete_journal(user_id, journal_id)
            .await
            .map_err(map_domain_error)
    }
}

/// Map domain errors to contract errors wrapped in anyhow.
fn map_domain_error(domain_error: DomainError) -> anyhow::Error {
    let contract_error = match domain_error {
        DomainError::SystemNotFound => IfsError::SystemNotFound,
        DomainError::PartNotFound { id }
        | DomainError::RelationshipNotFound { id }
        | DomainError::JournalNotFound { id } => IfsError::not_found(id),
        DomainError::SelfPartProtected | DomainError::DuplicateSelfPart => {
            IfsError::conflict(domain_error.to_string())
        }
        DomainError::Validation { field, message } => {
            IfsError::validation(format!("{field}: {message}"))
        }
        DomainError::Database { .. } => IfsError::internal(),
    };

    anyhow::Error::new(contract_error)
}
