use chrono::Utc;
use tracing::instrument;
use uuid::Uuid;

use crate::contract::model::{JournalEntry, JournalPatch, NewJournal};
use crate::domain::error::DomainError;
use crate::domain::service::Service;
use crate::infra::storage::entity;

impl Service {
    /// Write a journal entry. Title defaults to the creation timestamp;
    /// a part tag must point at a part of the caller's system.
    #[instrument(name = "ifs.service.create_journal", skip(self, new_journal))]
    pub async fn create_journal(
        &self,
        user_id: Uuid,
        new_journal: NewJournal,
    ) -> Result<JournalEntry, DomainError> {
        if new_journal.content.trim().is_empty() {
            return Err(DomainError::validation("content", "must not be empty"));
        }
        let sys = self.ensure_system(user_id).await?;
        if let Some(part_id) = new_journal.part_id {
            self.check_part_tag(sys.id, part_id).await?;
        }

        let now = Utc::now();
        let title = match new_journal.title {
            Some(title) if !title.trim().is_empty() => title,
            _ => format!("Journal {}", now.format("%Y-%m-%d %H:%M")),
        };
        let row = entity::journal::insert(
            &self.db,
            entity::journal::Model {
                id: Uuid::new_v4(),
                system_id: sys.id,
                part_id: new_journal.part_id,
                title,
                content: new_journal.content,
                metadata: new_journal.metadata,
                created_at: now,
            },
        )
        .await?;
        Ok(row.into())
    }

    /// All entries of the caller's journal, newest first.
    #[instrument(name = "ifs.service.list_journals", skip(self))]
    pub async fn list_journals(&self, user_id: Uuid) -> Result<Vec<JournalEntry>, DomainError> {
        let sys = self.ensure_system(user_id).await?;
        let rows = entity::journal::list_by_system(&self.db, sys.id).await?;
        Ok(rows.into_iter().map(JournalEntry::from).collect())
    }

    #[instrument(name = "ifs.service.get_journal", skip(self))]
    pub async fn get_journal(
        &self,
        user_id: Uuid,
        journal_id: Uuid,
    ) -> Result<JournalEntry, DomainError> {
        let sys = self.ensure_system(user_id).await?;
        let row = self.owned_journal(sys.id, journal_id).await?;
        Ok(row.into())
    }

    #[instrument(name = "ifs.service.update_journal", skip(self, patch))]
    pub async fn update_journal(
        &self,
        user_id: Uuid,
        journal_id: Uuid,
        patch: JournalPatch,
    ) -> Result<JournalEntry, DomainError> {
        let sys = self.ensure_system(user_id).await?;
        let mut row = self.owned_journal(sys.id, journal_id).await?;

        if let Some(title) = patch.title {
            if title.trim().is_empty() {
                return Err(DomainError::validation("title", "must not be empty"));
            }
            row.title = title;
        }
        if let Some(content) = patch.content {
            if content.trim().is_empty() {
                return Err(DomainError::validation("content", "must not be empty"));
            }
            row.content = content;
        }
        match patch.part_id {
            Some(Some(part_id)) => {
                self.check_part_tag(sys.id, part_id).await?;
                row.part_id = Some(part_id);
            }
            Some(None) => row.part_id = None,
            None => {}
        }
        if let Some(metadata) = patch.metadata {
            row.metadata = metadata;
        }

        let row = entity::journal::update(&self.db, row).await?;
        Ok(row.into())
    }

    #[instrument(name = "ifs.service.delete_journal", skip(self))]
    pub async fn delete_journal(&self, user_id: Uuid, journal_id: Uuid) -> Result<(), DomainError> {
        let sys = self.ensure_system(user_id).await?;
        self.owned_journal(sys.id, journal_id).await?;
        entity::journal::delete_by_id(&self.db, journal_id).await?;
        Ok(())
    }

    async fn owned_journal(
        &self,
        system_id: Uuid,
        journal_id: Uuid,
    ) -> Result<entity::journal::Model, DomainError> {
        match entity::journal::find_by_id(&self.db, journal_id).await? {
            Some(row) if row.system_id == system_id => Ok(row),
            _ => Err(DomainError::journal_not_found(journal_id)),
        }
    }

    async fn check_part_tag(&self, system_id: Uuid, part_id: Uuid) -> Result<(), DomainError> {
        match entity::part::find_by_id(&self.db, part_id).await? {
            Some(row) if row.system_id == system_id => Ok(()),
            _ => Err(DomainError::validation(
                "part_id",
                format!("part {part_id} does not exist in this system"),
            )),
        }
    }
}
