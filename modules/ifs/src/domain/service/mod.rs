mod journals;
mod parts;
mod relationships;
mod system;

use std::collections::HashMap;

use chrono::Utc;
use sea_orm::{DatabaseConnection, TransactionTrait};
use uuid::Uuid;

use crate::contract::model::{AbstractionLevel, Part, Relationship, SystemOverview};
use crate::domain::error::DomainError;
use crate::infra::storage::entity;
use crate::infra::storage::entity::part::StringList;

/// Domain service for a user's parts map: the system row, its parts and
/// relationships, and the journal attached to it. One instance is shared
/// across handlers; all state lives in the database.
#[derive(Clone)]
pub struct Service {
    db: DatabaseConnection,
}

impl Service {
    pub fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }

    /// The system owned by `user_id`, created on first access.
    ///
    /// Creation seeds the mandatory Self part in the same transaction.
    /// The unique index on `systems.user_id` makes two concurrent first
    /// requests safe: the loser re-selects the winner's row.
    pub(crate) async fn ensure_system(
        &self,
        user_id: Uuid,
    ) -> Result<entity::system::Model, DomainError> {
        if let Some(found) = entity::system::find_by_user(&self.db, user_id).await? {
            return Ok(found);
        }

        let created = self
            .db
            .transaction::<_, entity::system::Model, DomainError>(move |txn| {
                Box::pin(async move {
                    let now = Utc::now();
                    let sys = entity::system::insert(
                        txn,
                        entity::system::Model {
                            id: Uuid::new_v4(),
                            user_id,
                            abstraction_level: AbstractionLevel::default().as_str().to_string(),
                            created_at: now,
                        },
                    )
                    .await?;
                    entity::part::insert(
                        txn,
                        entity::part::Model {
                            id: Uuid::new_v4(),
                            system_id: sys.id,
                            name: "Self".to_string(),
                            role: Some("Self".to_string()),
                            description: "The compassionate core consciousness that can observe \
                                          and interact with other parts"
                                .to_string(),
                            feelings: StringList::default(),
                            beliefs: StringList::default(),
                            triggers: StringList::default(),
                            needs: StringList::default(),
                            created_at: now,
                            updated_at: now,
                        },
                    )
                    .await?;
                    Ok(sys)
                })
            })
            .await;

        match created {
            Ok(sys) => Ok(sys),
            Err(err) => match entity::system::find_by_user(&self.db, user_id).await? {
                Some(found) => Ok(found),
                None => Err(err.into()),
            },
        }
    }

    /// Assemble the full overview of a system row: parts and relationships
    /// keyed by id, plus counts.
    pub(crate) async fn overview_of(
        &self,
        sys: &entity::system::Model,
    ) -> Result<SystemOverview, DomainError> {
        let parts: HashMap<Uuid, Part> = entity::part::list_by_system(&self.db, sys.id)
            .await?
            .into_iter()
            .map(|row| (row.id, Part::from(row)))
            .collect();
        let relationships: HashMap<Uuid, Relationship> =
            entity::relationship::list_by_system(&self.db, sys.id)
                .await?
                .into_iter()
                .map(|row| (row.id, Relationship::from(row)))
                .collect();
        let journal_count = entity::journal::count_by_system(&self.db, sys.id).await?;

        Ok(SystemOverview {
            id: sys.id,
            user_id: sys.user_id,
            abstraction_level: AbstractionLevel::parse(&sys.abstraction_level)
                .unwrap_or_default(),
            created_at: sys.created_at,
            part_count: parts.len(),
            relationship_count: relationships.len(),
            journal_count,
            parts,
            relationships,
        })
    }
}
