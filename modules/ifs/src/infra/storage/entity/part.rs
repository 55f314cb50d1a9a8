use chrono::{DateTime, Utc};
use sea_orm::entity::prelude::*;
use sea_orm::{
    ColumnTrait, Condition, ConnectionTrait, EntityTrait, FromJsonQueryResult, PaginatorTrait,
    QueryFilter, QueryOrder, Set,
};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Ordered list of strings stored as a JSON column.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize, FromJsonQueryResult)]
pub struct StringList(pub Vec<String>);

#[derive(Clone, Debug, PartialEq, DeriveEntityModel)]
#[sea_orm(table_name = "parts")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: Uuid,
    pub system_id: Uuid,
    pub name: String,
    pub role: Option<String>,
    pub description: String,
    pub feelings: StringList,
    pub beliefs: StringList,
    pub triggers: StringList,
    pub needs: StringList,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {}

impl ActiveModelBehavior for ActiveModel {}

fn to_active(model: Model) -> ActiveModel {
    ActiveModel {
        id: Set(model.id),
        system_id: Set(model.system_id),
        name: Set(model.name),
        role: Set(model.role),
        description: Set(model.description),
        feelings: Set(model.feelings),
        beliefs: Set(model.beliefs),
        triggers: Set(model.triggers),
        needs: Set(model.needs),
        created_at: Set(model.created_at),
        updated_at: Set(model.updated_at),
    }
}

/// Find a part by ID.
pub async fn find_by_id<C: ConnectionTrait>(db: &C, id: Uuid) -> Result<Option<Model>, DbErr> {
    Entity::find_by_id(id).one(db).await
}

/// All parts of a system in insertion order.
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

/// The Self part of a system.
pub async fn find_self_part<C: ConnectionTrait>(
    db: &C,
    system_id: Uuid,
) -> Result<Option<Model>, DbErr> {
    Entity::find()
        .filter(Column::SystemId.eq(system_id))
        .filter(Column::Role.eq("Self"))
        .one(db)
        .await
}

/// Insert a new part.
pub async fn insert<C: ConnectionTrait>(db: &C, model: Model) -> Result<Model, DbErr> {
    to_active(model).insert(db).await
}

/// Persist a fully merged part model.
pub async fn update<C: ConnectionTrait>(db: &C, model: Model) -> Result<Model, DbErr> {
    to_active(model).update(db).await
}

/// Delete a part by ID, returns true if a row was deleted.
pub async fn delete_by_id<C: ConnectionTrait>(db: &C, id: Uuid) -> Result<bool, DbErr> {
    let result = Entity::delete_by_id(id).exec(db).await?;
    Ok(result.rows_affected > 0)
}

/// Delete every part of a system except one (the Self part on reset).
pub async fn delete_all_except<C: ConnectionTrait>(
    db: &C,
    system_id: Uuid,
    keep_id: Uuid,
) -> Result<u64, DbErr> {
    let result = Entity::delete_many()
        .filter(
            Condition::all()
                .add(Column::SystemId.eq(system_id))
                .add(Column::Id.ne(keep_id)),
        )
        .exec(db)
        .await?;
    Ok(result.rows_affected)
}

/// Number of parts in a system.
pub async fn count_by_system<C: ConnectionTrait>(db: &C, system_id: Uuid) -> Result<u64, DbErr> {
    Entity::find()
        .filter(Column::SystemId.eq(system_id))
        .count(db)
        .await
}
