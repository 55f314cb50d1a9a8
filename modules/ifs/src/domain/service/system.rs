use std::collections::HashMap;

use sea_orm::TransactionTrait;
use tracing::instrument;
use uuid::Uuid;

use crate::contract::model::{
    AbstractionLevel, JournalEntry, SystemExport, SystemOverview, SystemStats,
};
use crate::domain::error::DomainError;
use crate::domain::language;
use crate::domain::service::Service;
use crate::infra::storage::entity;

impl Service {
    /// Fetch the caller's system, creating it (Self part included) on
    /// first access.
    #[instrument(name = "ifs.service.get_system", skip(self))]
    pub async fn get_or_create_system(&self, user_id: Uuid) -> Result<SystemOverview, DomainError> {
        let sys = self.ensure_system(user_id).await?;
        self.overview_of(&sys).await
    }

    /// Change the wording level the UI should use for this system.
    #[instrument(name = "ifs.service.set_abstraction_level", skip(self))]
    pub async fn set_abstraction_level(
        &self,
        user_id: Uuid,
        level: &str,
    ) -> Result<SystemOverview, DomainError> {
        let parsed = AbstractionLevel::parse(level).ok_or_else(|| {
            DomainError::validation(
                "abstraction_level",
                "must be one of: concrete, abstract, mixed",
            )
        })?;
        let sys = self.ensure_system(user_id).await?;
        let sys = entity::system::set_abstraction_level(&self.db, sys.id, parsed.as_str()).await?;
        self.overview_of(&sys).await
    }

    /// Wipe the system back to its starting state: every part except Self
    /// goes, and with them every relationship. Journal entries stay but
    /// lose their tags to deleted parts. Unlike the other operations this
    /// never creates the system; resetting nothing is an error.
    #[instrument(name = "ifs.service.reset_system", skip(self))]
    pub async fn reset_system(&self, user_id: Uuid) -> Result<SystemOverview, DomainError> {
        let sys = entity::system::find_by_user(&self.db, user_id)
            .await?
            .ok_or(DomainError::SystemNotFound)?;
        let system_id = sys.id;

        self.db
            .transaction::<_, (), DomainError>(move |txn| {
                Box::pin(async move {
                    let keep = match entity::part::find_self_part(txn, system_id).await? {
                        Some(found) => found,
                        // Self row missing means a hand-edited database;
                        // reseed it rather than fail the reset.
                        None => {
                            let now = chrono::Utc::now();
                            entity::part::insert(
                                txn,
                                entity::part::Model {
                                    id: Uuid::new_v4(),
                                    system_id,
                                    name: "Self".to_string(),
                                    role: Some("Self".to_string()),
                                    description: "The compassionate core consciousness that can \
                                                  observe and interact with other parts"
                                        .to_string(),
                                    feelings: Default::default(),
                                    beliefs: Default::default(),
                                    triggers: Default::default(),
                                    needs: Default::default(),
                                    created_at: now,
                                    updated_at: now,
                                },
                            )
                            .await?
                        }
                    };
                    entity::relationship::delete_by_system(txn, system_id).await?;
                    entity::journal::detach_parts_except(txn, system_id, keep.id).await?;
                    entity::part::delete_all_except(txn, system_id, keep.id).await?;
                    Ok(())
                })
            })
            .await?;

        self.overview_of(&sys).await
    }

    /// Counts and metadata, without materializing the parts map.
    #[instrument(name = "ifs.service.system_stats", skip(self))]
    pub async fn system_stats(&self, user_id: Uuid) -> Result<SystemStats, DomainError> {
        let sys = self.ensure_system(user_id).await?;
        Ok(SystemStats {
            part_count: entity::part::count_by_system(&self.db, sys.id).await?,
            relationship_count: entity::relationship::count_by_system(&self.db, sys.id).await?,
            journal_count: entity::journal::count_by_system(&self.db, sys.id).await?,
            created_at: sys.created_at,
            abstraction_level: AbstractionLevel::parse(&sys.abstraction_level).unwrap_or_default(),
        })
    }

    /// Everything the user owns in one payload, journals included, for
    /// backup or migration.
    #[instrument(name = "ifs.service.export_system", skip(self))]
    pub async fn export_system(&self, user_id: Uuid) -> Result<SystemExport, DomainError> {
        let sys = self.ensure_system(user_id).await?;
        let overview = self.overview_of(&sys).await?;
        let journals: HashMap<Uuid, JournalEntry> =
            entity::journal::list_by_system(&self.db, sys.id)
                .await?
                .into_iter()
                .map(|row| (row.id, JournalEntry::from(row)))
                .collect();

        Ok(SystemExport {
            id: overview.id,
            user_id: overview.user_id,
            abstraction_level: overview.abstraction_level,
            created_at: overview.created_at,
            parts: overview.parts,
            relationships: overview.relationships,
            journals,
        })
    }

    /// Form copy matched to the system's abstraction level.
    #[instrument(name = "ifs.service.guidance", skip(self))]
    pub async fn guidance(
        &self,
        user_id: Uuid,
    ) -> Result<(AbstractionLevel, HashMap<&'static str, &'static str>), DomainError> {
        let sys = self.ensure_system(user_id).await?;
        let level = AbstractionLevel::parse(&sys.abstraction_level).unwrap_or_default();
        Ok((level, language::copy_for_level(level)))
    }
}
