use chrono::{DateTime, Utc};
use sea_orm::entity::prelude::*;
use sea_orm::{ColumnTrait, ConnectionTrait, EntityTrait, QueryFilter, Set};
use uuid::Uuid;

#[derive(Clone, Debug, PartialEq, DeriveEntityModel)]
#[sea_orm(table_name = "systems")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: Uuid,
    /// Unique: the constraint that makes concurrent get-or-create race-safe.
    #[sea_orm(unique)]
    pub user_id: Uuid,
    pub abstraction_level: String,
    pub created_at: DateTime<Utc>,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {}

impl ActiveModelBehavior for ActiveModel {}

/// Find the system owned by a user.
pub async fn find_by_user<C: ConnectionTrait>(db: &C, user_id: Uuid) -> Result<Option<Model>, DbErr> {
    Entity::find()
        .filter(Column::UserId.eq(user_id))
        .one(db)
        .await
}

/// Insert a new system row.
pub async fn insert<C: ConnectionTrait>(db: &C, model: Model) -> Result<Model, DbErr> {
    let active = ActiveModel {
        id: Set(model.id),
        user_id: Set(model.user_id),
        abstraction_level: Set(model.abstraction_level),
        created_at: Set(model.created_at),
    };
    active.insert(db).await
}

/// Update a system's abstraction level.
pub async fn set_abstraction_level<C: ConnectionTrait>(
    db: &C,
    id: Uuid,
    level: &str,
) -> Result<Model, DbErr> {
    let active = ActiveModel {
        id: Set(id),
        abstraction_level: Set(level.to_string()),
        ..Default::default()
    };
    active.update(db).await
}
