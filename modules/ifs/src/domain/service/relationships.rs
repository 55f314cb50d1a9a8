use chrono::Utc;
use tracing::instrument;
use uuid::Uuid;

use crate::contract::model::{NewRelationship, Relationship, RelationshipPatch};
use crate::domain::error::DomainError;
use crate::domain::service::Service;
use crate::infra::storage::entity;

impl Service {
    /// Create an edge between two parts of the caller's system. Both
    /// endpoints must exist there; self-loops are allowed (a part can
    /// relate to itself).
    #[instrument(name = "ifs.service.create_relationship", skip(self, new_rel))]
    pub async fn create_relationship(
        &self,
        user_id: Uuid,
        new_rel: NewRelationship,
    ) -> Result<Relationship, DomainError> {
        if new_rel.relationship_type.trim().is_empty() {
            return Err(DomainError::validation(
                "relationship_type",
                "must not be empty",
            ));
        }
        let sys = self.ensure_system(user_id).await?;
        self.check_endpoint(sys.id, new_rel.source_id, "source_id")
            .await?;
        self.check_endpoint(sys.id, new_rel.target_id, "target_id")
            .await?;

        let row = entity::relationship::insert(
            &self.db,
            entity::relationship::Model {
                id: Uuid::new_v4(),
                system_id: sys.id,
                source_id: new_rel.source_id,
                target_id: new_rel.target_id,
                relationship_type: new_rel.relationship_type,
                description: new_rel.description.unwrap_or_default(),
                created_at: Utc::now(),
            },
        )
        .await?;
        Ok(row.into())
    }

    #[instrument(name = "ifs.service.list_relationships", skip(self))]
    pub async fn list_relationships(&self, user_id: Uuid) -> Result<Vec<Relationship>, DomainError> {
        let sys = self.ensure_system(user_id).await?;
        let rows = entity::relationship::list_by_system(&self.db, sys.id).await?;
        Ok(rows.into_iter().map(Relationship::from).collect())
    }

    #[instrument(name = "ifs.service.get_relationship", skip(self))]
    pub async fn get_relationship(
        &self,
        user_id: Uuid,
        relationship_id: Uuid,
    ) -> Result<Relationship, DomainError> {
        let sys = self.ensure_system(user_id).await?;
        let row = self.owned_relationship(sys.id, relationship_id).await?;
        Ok(row.into())
    }

    /// Change type or description of an edge. Endpoints are immutable;
    /// rewiring is a delete plus create.
    #[instrument(name = "ifs.service.update_relationship", skip(self, patch))]
    pub async fn update_relationship(
        &self,
        user_id: Uuid,
        relationship_id: Uuid,
        patch: RelationshipPatch,
    ) -> Result<Relationship, DomainError> {
        let sys = self.ensure_system(user_id).await?;
        let mut row = self.owned_relationship(sys.id, relationship_id).await?;

        if let Some(relationship_type) = patch.relationship_type {
            if relationship_type.trim().is_empty() {
                return Err(DomainError::validation(
                    "relationship_type",
                    "must not be empty",
                ));
            }
            row.relationship_type = relationship_type;
        }
        if let Some(description) = patch.description {
            row.description = description;
        }

        let row = entity::relationship::update(&self.db, row).await?;
        Ok(row.into())
    }

    #[instrument(name = "ifs.service.delete_relationship", skip(self))]
    pub async fn delete_relationship(
        &self,
        user_id: Uuid,
        relationship_id: Uuid,
    ) -> Result<(), DomainError> {
        let sys = self.ensure_system(user_id).await?;
        // Ownership check first so foreign IDs read as not-found.
        self.owned_relationship(sys.id, relationship_id).await?;
        entity::relationship::delete_by_id(&self.db, relationship_id).await?;
        Ok(())
    }

    async fn owned_relationship(
        &self,
        system_id: Uuid,
        relationship_id: Uuid,
    ) -> Result<entity::relationship::Model, DomainError> {
        match entity::relationship::find_by_id(&self.db, relationship_id).await? {
            Some(row) if row.system_id == system_id => Ok(row),
            _ => Err(DomainError::relationship_not_found(relationship_id)),
        }
    }

    /// An endpoint of a new edge must be a part of the same system.
    async fn check_endpoint(
        &self,
        system_id: Uuid,
        part_id: Uuid,
        field: &str,
    ) -> Result<(), DomainError> {
        match entity::part::find_by_id(&self.db, part_id).await? {
            Some(row) if row.system_id == system_id => Ok(()),
            _ => Err(DomainError::validation(
                field,
                format!("part {part_id} does not exist in this system"),
            )),
        }
    }
}
