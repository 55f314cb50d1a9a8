use chrono::Utc;
use sea_orm::TransactionTrait;
use tracing::instrument;
use uuid::Uuid;

use crate::contract::model::{NewPart, Part, PartPatch, PartRole};
use crate::domain::error::DomainError;
use crate::domain::service::Service;
use crate::infra::storage::entity;
use crate::infra::storage::entity::part::StringList;

/// Validate a raw role string from a request. `None` means "no role yet",
/// which is allowed; an unknown string is a 400, not silently kept.
fn parse_role(raw: Option<&str>) -> Result<Option<PartRole>, DomainError> {
    match raw {
        None => Ok(None),
        Some(s) => PartRole::parse(s).map(Some).ok_or_else(|| {
            DomainError::validation(
                "role",
                "must be one of: Self, Manager, Firefighter, Exile, Protector, Other",
            )
        }),
    }
}

impl Service {
    #[instrument(name = "ifs.service.create_part", skip(self, new_part))]
    pub async fn create_part(&self, user_id: Uuid, new_part: NewPart) -> Result<Part, DomainError> {
        if new_part.name.trim().is_empty() {
            return Err(DomainError::validation("name", "must not be empty"));
        }
        let role = parse_role(new_part.role.as_deref())?;
        let sys = self.ensure_system(user_id).await?;

        // Only one Self per system, and ensure_system already seeded it.
        if role == Some(PartRole::SelfRole)
            && entity::part::find_self_part(&self.db, sys.id).await?.is_some()
        {
            return Err(DomainError::DuplicateSelfPart);
        }

        let now = Utc::now();
        let row = entity::part::insert(
            &self.db,
            entity::part::Model {
                id: Uuid::new_v4(),
                system_id: sys.id,
                name: new_part.name,
                role: role.map(|r| r.as_str().to_string()),
                description: new_part.description.unwrap_or_default(),
                feelings: StringList(new_part.feelings),
                beliefs: StringList(new_part.beliefs),
                triggers: StringList(new_part.triggers),
                needs: StringList(new_part.needs),
                created_at: now,
                updated_at: now,
            },
        )
        .await?;
        Ok(row.into())
    }

    #[instrument(name = "ifs.service.list_parts", skip(self))]
    pub async fn list_parts(&self, user_id: Uuid) -> Result<Vec<Part>, DomainError> {
        let sys = self.ensure_system(user_id).await?;
        let rows = entity::part::list_by_system(&self.db, sys.id).await?;
        Ok(rows.into_iter().map(Part::from).collect())
    }

    #[instrument(name = "ifs.service.get_part", skip(self))]
    pub async fn get_part(&self, user_id: Uuid, part_id: Uuid) -> Result<Part, DomainError> {
        let sys = self.ensure_system(user_id).await?;
        let row = self.owned_part(sys.id, part_id).await?;
        Ok(row.into())
    }

    /// Merge a patch into a part. Last write wins on concurrent edits.
    #[instrument(name = "ifs.service.update_part", skip(self, patch))]
    pub async fn update_part(
        &self,
        user_id: Uuid,
        part_id: Uuid,
        patch: PartPatch,
    ) -> Result<Part, DomainError> {
        let sys = self.ensure_system(user_id).await?;
        let mut row = self.owned_part(sys.id, part_id).await?;

        if let Some(role_raw) = patch.role.as_deref() {
            let new_role = parse_role(Some(role_raw))?;
            let was_self = row.role.as_deref() == Some("Self");
            if was_self && new_role != Some(PartRole::SelfRole) {
                return Err(DomainError::SelfPartProtected);
            }
            if !was_self && new_role == Some(PartRole::SelfRole) {
                return Err(DomainError::DuplicateSelfPart);
            }
            row.role = new_role.map(|r| r.as_str().to_string());
        }
        if let Some(name) = patch.name {
            if name.trim().is_empty() {
                return Err(DomainError::validation("name", "must not be empty"));
            }
            row.name = name;
        }
        if let Some(description) = patch.description {
            row.description = description;
        }
        if let Some(feelings) = patch.feelings {
            row.feelings = StringList(feelings);
        }
        if let Some(beliefs) = patch.beliefs {
            row.beliefs = StringList(beliefs);
        }
        if let Some(triggers) = patch.triggers {
            row.triggers = StringList(triggers);
        }
        if let Some(needs) = patch.needs {
            row.needs = StringList(needs);
        }
        row.updated_at = Utc::now();

        let row = entity::part::update(&self.db, row).await?;
        Ok(row.into())
    }

    /// Delete a part together with every relationship touching it.
    /// Journal entries tagged with the part survive, untagged.
    #[instrument(name = "ifs.service.delete_part", skip(self))]
    pub async fn delete_part(&self, user_id: Uuid, part_id: Uuid) -> Result<(), DomainError> {
        let sys = self.ensure_system(user_id).await?;
        let row = self.owned_part(sys.id, part_id).await?;
        if row.role.as_deref() == Some("Self") {
            return Err(DomainError::SelfPartProtected);
        }

        let system_id = sys.id;
        self.db
            .transaction::<_, (), DomainError>(move |txn| {
                Box::pin(async move {
                    entity::relationship::delete_referencing_part(txn, system_id, part_id).await?;
                    entity::journal::detach_part(txn, part_id).await?;
                    entity::part::delete_by_id(txn, part_id).await?;
                    Ok(())
                })
            })
            .await?;
        Ok(())
    }

    /// A part row that exists AND belongs to the given system. A part in
    /// someone else's system reads as not-found, never as forbidden.
    async fn owned_part(
        &self,
        system_id: Uuid,
        part_id: Uuid,
    ) -> Result<entity::part::Model, DomainError> {
        match entity::part::find_by_id(&self.db, part_id).await? {
            Some(row) if row.system_id == system_id => Ok(row),
            _ => Err(DomainError::part_not_found(part_id)),
        }
    }
}
