use chrono::{DateTime, Utc};
use sea_orm::entity::prelude::*;
use sea_orm::{
    ColumnTrait, Condition, ConnectionTrait, EntityTrait, PaginatorTrait, QueryFilter, QueryOrder,
    Set,
};
use uuid::Uuid;

#[derive(Clone, Debug, PartialEq, DeriveEntityModel)]
#[sea_orm(table_name = "relationships")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: Uuid,
    pub system_id: Uuid,
    pub source_id: Uuid,
    pub target_id: Uuid,
    pub relationship_type: String,
    pub description: String,
    pub created_at: DateTime<Utc>,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {}

impl ActiveModelBehavior for ActiveModel {}

fn to_active(model: Model) -> ActiveModel {
    ActiveModel {
        id: Set(model.id),
        system_id: Set(model.system_id),
        source_id: Set(model.source_id),
        target_id: Set(model.target_id),
        relationship_type: Set(model.relationship_type),
        description: Set(model.description),
        created_at: Set(model.created_at),
    }
}

/// Find a relationship by ID.
pub async fn find_by_id<C: ConnectionTrait>(db: &C, id: Uuid) -> Result<Option<Model>, DbErr> {
    Entity::find_by_id(id).one(db).await
}

/// All relationships of a system in insertion order.
pub async fn list_by_system<C: ConnectionTrait>(
    db: &C,
    system_id: Uuid,
) -> Result<Vec<Model>, DbErr> {
    Entity::find()
        .filter(Column::SystemId.eq(system_id))
        .order_by_asc(Column::CreatedAt)
        .all(db)
        .await
}

/// Insert a new relationship.
pub async fn insert<C: ConnectionTrait>(db: &C, model: Model) -> Result<Model, DbErr> {
    to_active(model).insert(db).await
}

/// Persist a fully merged relationship model.
pub async fn update<C: ConnectionTrait>(db: &C, model: Model) -> Result<Model, DbErr> {
    to_active(model).update(db).await
}

/// Delete a relationship by ID, returns true if a row was deleted.
pub async fn delete_by_id<C: ConnectionTrait>(db: &C, id: Uuid) -> Result<bool, DbErr> {
    let result = Entity::delete_by_id(id).exec(db).await?;
    Ok(result.rows_affected > 0)
}

/// Delete every relationship of a system (on reset).
pub async fn delete_by_system<C: ConnectionTrait>(db: &C, system_id: Uuid) -> Result<u64, DbErr> {
    let result = Entity::delete_many()
        .filter(Column::SystemId.eq(system_id))
        .exec(db)
        .await?;
    Ok(result.rows_affected)
}

/// Delete every relationship touching a part as source or target.
/// Keeps the no-orphan-edges invariant when a part is deleted.
pub async fn delete_referencing_part<C: ConnectionTrait>(
    db: &C,
    system_id: Uuid,
    part_id: Uuid,
) -> Result<u64, DbErr> {
    let result = Entity::delete_many()
        .filter(
            Condition::all().add(Column::SystemId.eq(system_id)).add(
                Condition::any()
                    .add(Column::SourceId.eq(part_id))
                    .add(Column::TargetId.eq(part_id)),
            ),
        )
        .exec(db)
        .await?;
    Ok(result.rows_affected)
}

/// Number of relationships in a system.
pub async fn count_by_system<C: ConnectionTrait>(db: &C, system_id: Uuid) -> Result<u64, DbErr> {
    Entity::find()
        .filter(Column::SystemId.eq(system_id))
        .count(db)
        .await
}
