use chrono::{DateTime, Utc};
use sea_orm::entity::prelude::*;
use sea_orm::{ColumnTrait, ConnectionTrait, EntityTrait, PaginatorTrait, QueryFilter, Set};
use uuid::Uuid;

use crate::contract::model::User;

#[derive(Clone, Debug, PartialEq, DeriveEntityModel)]
#[sea_orm(table_name = "users")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: Uuid,
    #[sea_orm(unique)]
    pub username: String,
    #[sea_orm(unique)]
    pub email: String,
    pub password_hash: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {}

impl ActiveModelBehavior for ActiveModel {}

impl From<Model> for User {
    fn from(m: Model) -> Self {
        Self {
            id: m.id,
            username: m.username,
            email: m.email,
            created_at: m.created_at,
            updated_at: m.updated_at,
        }
    }
}

/// Find a user by ID.
pub async fn find_by_id<C: ConnectionTrait>(db: &C, id: Uuid) -> Result<Option<Model>, DbErr> {
    Entity::find_by_id(id).one(db).await
}

/// Find a user by username.
pub async fn find_by_username<C: ConnectionTrait>(
    db: &C,
    username: &str,
) -> Result<Option<Model>, DbErr> {
    Entity::find()
        .filter(Column::Username.eq(username))
        .one(db)
        .await
}

/// Check if a username is already registered.
pub async fn username_exists<C: ConnectionTrait>(db: &C, username: &str) -> Result<bool, DbErr> {
    let count = Entity::find()
        .filter(Column::Username.eq(username))
        .count(db)
        .await?;
    Ok(count > 0)
}

/// Check if an email is already registered.
pub async fn email_exists<C: ConnectionTrait>(db: &C, email: &str) -> Result<bool, DbErr> {
    let count = Entity::find()
        .filter(Column::Email.eq(email))
        .count(db)
        .await?;
    Ok(count > 0)
}

/// Insert a new user row.
pub async fn insert<C: ConnectionTrait>(db: &C, model: Model) -> Result<Model, DbErr> {
    let active = ActiveModel {
        id: Set(model.id),
        username: Set(model.username),
        email: Set(model.email),
        password_hash: Set(model.password_hash),
        created_at: Set(model.created_at),
        updated_at: Set(model.updated_at),
    };
    active.insert(db).await
}
