use axum::async_trait;
use sqlx::{Pool, Postgres};

use crate::{
    entities::{access_rights_to_codes, CredentialRow, SessionTokenRow, UserRow},
    error::Result,
    model::{SessionToken, User, UserCredential},
};

#[async_trait]
pub trait CredentialsStore: Send + Sync {
    async fn get_user_credential(&self, username: &str) -> Result<Option<UserCredential>>;
}

#[async_trait]
pub trait SessionTokenStore: Send + Sync {
    async fn store_session_token(&self, token: &SessionToken) -> Result<()>;
    async fn get_session_token(&self, token_id: &str) -> Result<Option<SessionToken>>;
}

#[async_trait]
pub trait UsersStore: Send + Sync {
    /// Users whose name contains `name`, ordered by id.
    async fn get_users_by_name(&self, name: &str) -> Result<Vec<User>>;
}

/// Postgres-backed implementation of every store.
#[derive(Debug, Clone)]
pub struct PgStore {
    pool: Pool<Postgres>,
}

impl PgStore {
    pub fn new(pool: Pool<Postgres>) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl CredentialsStore for PgStore {
    async fn get_user_credential(&self, username: &str) -> Result<Option<UserCredential>> {
        sqlx::query_as::<_, CredentialRow>(
            r#"
            SELECT username, digest, access_rights
            FROM UserCredentials
            WHERE username = $1
            "#,
        )
        .bind(username)
        .fetch_optional(&self.pool)
        .await?
        .map(UserCredential::try_from)
        .transpose()
    }
}

#[async_trait]
impl SessionTokenStore for PgStore {
    async fn store_session_token(&self, token: &SessionToken) -> Result<()> {
        sqlx::query(
            r#"
            INSERT INTO SessionTokens (token_id, user_name, valid, expiration_time, access_rights)
                        VALUES ($1, $2, $3, $4, $5)
            "#,
        )
        .bind(&token.token_id)
        .bind(&token.user_name)
        .bind(token.valid)
        .bind(token.expiration_time)
        .bind(access_rights_to_codes(&token.access_rights))
        .execute(&self.pool)
        .await?;

        Ok(())
    }

    async fn get_session_token(&self, token_id: &str) -> Result<Option<SessionToken>> {
        sqlx::query_as::<_, SessionTokenRow>(
            r#"
            SELECT token_id, user_name, valid, expiration_time, access_rights
            FROM SessionTokens
            WHERE token_id = $1
            "#,
        )
        .bind(token_id)
        .fetch_optional(&self.pool)
        .await?
        .map(SessionToken::try_from)
        .transpose()
    }
}

#[async_trait]
impl UsersStore for PgStore {
    async fn get_users_by_name(&self, name: &str) -> Result<Vec<User>> {
        sqlx::query_as::<_, UserRow>(
            r#"
            SELECT id, name, age, email, working_position
            FROM Users
            WHERE POSITION($1 IN name) > 0
            ORDER BY id
            "#,
        )
        .bind(name)
        .fetch_all(&self.pool)
        .await?
        .into_iter()
        .map(User::try_from)
        .collect()
    }
}
