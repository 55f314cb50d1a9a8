use std::sync::Arc;

use chrono::Utc;
use sea_orm::DatabaseConnection;
use tracing::{debug, info, instrument};
use uuid::Uuid;

use crate::contract::model::{Credentials, NewAccount, User};
use crate::domain::error::AuthError;
use crate::infra::storage::entity;
use crate::token::{self, TokenKeys};

/// Domain service for account registration and credential verification.
#[derive(Clone)]
pub struct Service {
    db: DatabaseConnection,
    keys: Arc<TokenKeys>,
}

impl Service {
    pub fn new(db: DatabaseConnection, keys: Arc<TokenKeys>) -> Self {
        Self { db, keys }
    }

    #[instrument(name = "auth.service.register", skip(self, account), fields(username = %account.username))]
    pub async fn register(&self, account: NewAccount) -> Result<(User, String), AuthError> {
        info!("Registering new account");

        validate_new_account(&account)?;

        if entity::username_exists(&self.db, &account.username)
            .await
            .map_err(|e| AuthError::database(e.to_string()))?
        {
            return Err(AuthError::username_taken(account.username));
        }
        if entity::email_exists(&self.db, &account.email)
            .await
            .map_err(|e| AuthError::database(e.to_string()))?
        {
            return Err(AuthError::email_taken(account.email));
        }

        let now = Utc::now();
        let model = entity::Model {
            id: Uuid::new_v4(),
            username: account.username,
            email: account.email,
            password_hash: token::hash_password(&account.password)?,
            created_at: now,
            updated_at: now,
        };

        let created = entity::insert(&self.db, model)
            .await
            .map_err(|e| AuthError::database(e.to_string()))?;

        let access_token = self.keys.issue(created.id)?;

        info!("Registered account with id={}", created.id);
        Ok((created.into(), access_token))
    }

    #[instrument(name = "auth.service.login", skip(self, credentials), fields(username = %credentials.username))]
    pub async fn login(&self, credentials: Credentials) -> Result<(User, String), AuthError> {
        debug!("Login attempt");

        // Unknown user and wrong password are deliberately indistinguishable.
        let user = entity::find_by_username(&self.db, &credentials.username)
            .await
            .map_err(|e| AuthError::database(e.to_string()))?
            .ok_or(AuthError::InvalidCredentials)?;

        if !token::verify_password(&credentials.password, &user.password_hash)? {
            return Err(AuthError::InvalidCredentials);
        }

        let access_token = self.keys.issue(user.id)?;

        info!("Login succeeded for user id={}", user.id);
        Ok((user.into(), access_token))
    }

    #[instrument(name = "auth.service.current_user", skip(self), fields(user_id = %id))]
    pub async fn current_user(&self, id: Uuid) -> Result<User, AuthError> {
        let user = entity::find_by_id(&self.db, id)
            .await
            .map_err(|e| AuthError::database(e.to_string()))?
            .ok_or_else(|| AuthError::user_not_found(id))?;
        Ok(user.into())
    }
}

// --- validation helpers ---

fn validate_new_account(account: &NewAccount) -> Result<(), AuthError> {
    let username = account.username.trim();
    if username.len() < 3 || username.len() > 80 {
        return Err(AuthError::validation(
            "username",
            "must be between 3 and 80 characters",
        ));
    }

    if account.email.is_empty() || !account.email.contains('@') || !account.email.contains('.') {
        return Err(AuthError::validation("email", "must be a valid email address"));
    }

    if account.password.len() < 8 {
        return Err(AuthError::validation(
            "password",
            "must be at least 8 characters long",
        ));
    }

    Ok(())
}
