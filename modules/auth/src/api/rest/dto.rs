use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::contract::model::{Credentials, NewAccount, User};

/// REST DTO for the account profile.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UserDto {
    pub id: Uuid,
    pub username: String,
    pub email: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// REST DTO for registration.
#[derive(Debug, Clone, Deserialize)]
pub struct RegisterReq {
    pub username: String,
    pub email: String,
    pub password: String,
}

/// REST DTO for login.
#[derive(Debug, Clone, Deserialize)]
pub struct LoginReq {
    pub username: String,
    pub password: String,
}

/// REST DTO for register/login responses.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SessionDto {
    pub user: UserDto,
    pub access_token: String,
}

impl From<User> for UserDto {
    fn from(user: User) -> Self {
        Self {
            id: user.id,
            username: user.username,
            email: user.email,
            created_at: user.created_at,
            updated_at: user.updated_at,
        }
    }
}

impl From<RegisterReq> for NewAccount {
    fn from(req: RegisterReq) -> Self {
        Self {
            username: req.username,
            email: req.email,
            password: req.password,
        }
    }
}

impl From<LoginReq> for Credentials {
    fn from(req: LoginReq) -> Self {
        Self {
            username: req.username,
            password: req.password,
        }
    }
}
