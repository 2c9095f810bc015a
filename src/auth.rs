use std::sync::Arc;

use argon2::{Argon2, PasswordHash, PasswordVerifier};
use axum::async_trait;
use chrono::{DateTime, Duration, Utc};
use rand::Rng;

use crate::{
    config,
    error::{Error, Result},
    model::{Account, SessionToken, TokenRights, TokenState, UserCredential},
    store::{CredentialsStore, SessionTokenStore},
};

pub trait Clock: Send + Sync {
    fn now(&self) -> DateTime<Utc>;
}

#[derive(Debug, Default)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn now(&self) -> DateTime<Utc> {
        Utc::now()
    }
}

pub trait TokenIdGenerator: Send + Sync {
    fn generate(&self, now: DateTime<Utc>) -> String;
}

/// Issue time in hex followed by 24 random bytes in hex.
#[derive(Debug, Default)]
pub struct RandomTokenIds;

impl TokenIdGenerator for RandomTokenIds {
    fn generate(&self, now: DateTime<Utc>) -> String {
        format!(
            "{:x}{}",
            now.timestamp_millis(),
            hex::encode(rand::thread_rng().gen::<[u8; 24]>())
        )
    }
}

#[async_trait]
pub trait TokenIssuer: Send + Sync {
    /// `Ok(None)` when the credentials do not match.
    async fn generate_token(&self, account: &Account) -> Result<Option<SessionToken>>;
}

#[async_trait]
pub trait TokenValidator: Send + Sync {
    async fn validate_token(&self, token_id: &str) -> Result<TokenRights>;
}

pub struct Authorizer {
    sessions: Arc<dyn SessionTokenStore>,
    credentials: Arc<dyn CredentialsStore>,
    token_ids: Arc<dyn TokenIdGenerator>,
    clock: Arc<dyn Clock>,
}

impl Authorizer {
    pub fn new(
        sessions: Arc<dyn SessionTokenStore>,
        credentials: Arc<dyn CredentialsStore>,
        token_ids: Arc<dyn TokenIdGenerator>,
        clock: Arc<dyn Clock>,
    ) -> Self {
        Self {
            sessions,
            credentials,
            token_ids,
            clock,
        }
    }
}

fn password_matches(credential: &UserCredential, password: &str) -> Result<bool> {
    let digest = PasswordHash::new(&credential.digest).map_err(Error::Hashing)?;
    Ok(Argon2::default()
        .verify_password(password.as_bytes(), &digest)
        .is_ok())
}

#[async_trait]
impl TokenIssuer for Authorizer {
    async fn generate_token(&self, account: &Account) -> Result<Option<SessionToken>> {
        // Retrieve stored credential.
        let credential = match self
            .credentials
            .get_user_credential(&account.username)
            .await?
        {
            Some(credential) => credential,
            None => {
                tracing::debug!("no credential stored for {}", account.username);
                return Ok(None);
            }
        };

        // Verify password.
        if !password_matches(&credential, &account.password)? {
            tracing::debug!("password mismatch for {}", account.username);
            return Ok(None);
        }

        // Generate token.
        let now = self.clock.now();
        let token = SessionToken {
            token_id: self.token_ids.generate(now),
            user_name: credential.username,
            valid: true,
            expiration_time: now + Duration::milliseconds(config::SESSION_TOKEN_TTL_MS),
            access_rights: credential.access_rights,
        };

        // Push token to store.
        self.sessions.store_session_token(&token).await?;
        tracing::info!("issued session token for {}", token.user_name);

        Ok(Some(token))
    }
}

#[async_trait]
impl TokenValidator for Authorizer {
    async fn validate_token(&self, token_id: &str) -> Result<TokenRights> {
        let token = match self.sessions.get_session_token(token_id).await? {
            Some(token) if token.valid => token,
            _ => return Ok(TokenRights::denied(TokenState::Invalid)),
        };

        if token.expiration_time <= self.clock.now() {
            return Ok(TokenRights::denied(TokenState::Expired));
        }

        Ok(TokenRights {
            access_rights: token.access_rights,
            state: TokenState::Valid,
        })
    }
}
