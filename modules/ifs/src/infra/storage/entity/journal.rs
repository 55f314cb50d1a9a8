use chrono::{DateTime, Utc};
use sea_orm::entity::prelude::*;
use sea_orm::sea_query::Expr;
use sea_orm::{
    ColumnTrait, Condition, ConnectionTrait, EntityTrait, PaginatorTrait, QueryFilter, QueryOrder,
    Set,
};
use uuid::Uuid;

#[derive(Clone, Debug, PartialEq, DeriveEntityModel)]
#[sea_orm(table_name = "journals")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: Uuid,
    pub system_id: Uuid,
    pub part_id: Option<Uuid>,
    pub title: String,
    #[sea_orm(column_type = "Text")]
    pub content: String,
    pub metadata: Option<Json>,
    pub created_at: DateTime<Utc>,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {}

impl ActiveModelBehavior for ActiveModel {}

fn to_active(model: Model) -> ActiveModel {
    ActiveModel {
        id: Set(model.id),
        system_id: Set(model.system_id),
        part_id: Set(model.part_id),
        title: Set(model.title),
        content: Set(model.content),
        metadata: Set(model.metadata),
        created_at: Set(model.created_at),
    }
}

/// Find a journal entry by ID.
pub async fn find_by_id<C: ConnectionTrait>(db: &C, id: Uuid) -> Result<Option<Model>, DbErr> {
    Entity::find_by_id(id).one(db).await
}

/// All journal entries of a system, newest first.
pub async fn list_by_system<C: ConnectionTrait>(
    db: &C,
    system_id: Uuid,
) -> Result<Vec<Model>, DbErr> {
    Entity::find()
        .filter(Column::SystemId.eq(system_id))
        .order_by_desc(Column::CreatedAt)
        .all(db)
        .await
}

/// Insert a new journal entry.
pub async fn insert<C: ConnectionTrait>(db: &C, model: Model) -> Result<Model, DbErr> {
    to_active(model).insert(db).await
}

/// Persist a fully merged journal model.
pub async fn update<C: ConnectionTrait>(db: &C, model: Model) -> Result<Model, DbErr> {
    to_active(model).update(db).await
}

/// Delete a journal entry by ID, returns true if a row was deleted.
pub async fn delete_by_id<C: ConnectionTrait>(db: &C, id: Uuid) -> Result<bool, DbErr> {
    let result = Entity::delete_by_id(id).exec(db).await?;
    Ok(result.rows_affected > 0)
}

/// Clear the part reference on journals pointing at one part.
/// Journals survive part deletion; only the tag goes away.
pub async fn detach_part<C: ConnectionTrait>(db: &C, part_id: Uuid) -> Result<u64, DbErr> {
    let result = Entity::update_many()
        .col_expr(Column::PartId, Expr::value(Option::<Uuid>::None))
        .filter(Column::PartId.eq(part_id))
        .exec(db)
        .await?;
    Ok(result.rows_affected)
}

/// Clear part references for every journal of a system except those
/// pointing at one kept part (the Self part on reset).
pub async fn detach_parts_except<C: ConnectionTrait>(
    db: &C,
    system_id: Uuid,
    keep_part_id: Uuid,
) -> Result<u64, DbErr> {
    let result = Entity::update_many()
        .col_expr(Column::PartId, Expr::value(Option::<Uuid>::None))
        .filter(
            Condition::all()
                .add(Column::SystemId.eq(system_id))
                .add(Column::PartId.is_not_null())
                .add(Column::PartId.ne(keep_part_id)),
        )
        .exec(db)
        .await?;
    Ok(result.rows_affected)
}

/// Number of journal entries in a system.
pub async fn count_by_system<C: ConnectionTrait>(db: &C, system_id: Uuid) -> Result<u64, DbErr> {
    Entity::find()
        .filter(Column::SystemId.eq(system_id))
        .count(db)
        .await
}
