//! In-memory collaborators for handler and authorizer tests.

use std::{
    collections::HashMap,
    sync::{
        atomic::{AtomicBool, AtomicUsize, Ordering},
        Mutex,
    },
};

use argon2::{password_hash::SaltString, Argon2, PasswordHasher};
use axum::async_trait;
use chrono::{DateTime, Duration, Utc};

use crate::{
    auth::{Clock, TokenIdGenerator, TokenIssuer, TokenValidator},
    error::{Error, Result},
    model::{Account, SessionToken, TokenRights, User, UserCredential},
    store::{CredentialsStore, SessionTokenStore, UsersStore},
};

pub fn digest_of(password: &str) -> String {
    let salt = SaltString::new("c29tZXNhbHRzb21lc2FsdA").unwrap();
    Argon2::default()
        .hash_password(password.as_bytes(), &salt)
        .unwrap()
        .to_string()
}

pub fn store_failure() -> Error {
    Error::Database(sqlx::Error::PoolTimedOut)
}

#[derive(Default)]
pub struct FakeCredentials {
    credentials: Mutex<HashMap<String, UserCredential>>,
}

impl FakeCredentials {
    pub fn insert(&self, credential: UserCredential) {
        self.credentials
            .lock()
            .unwrap()
            .insert(credential.username.clone(), credential);
    }
}

#[async_trait]
impl CredentialsStore for FakeCredentials {
    async fn get_user_credential(&self, username: &str) -> Result<Option<UserCredential>> {
        Ok(self.credentials.lock().unwrap().get(username).cloned())
    }
}

#[derive(Default)]
pub struct FakeSessions {
    tokens: Mutex<Vec<SessionToken>>,
    failing: AtomicBool,
}

impl FakeSessions {
    pub fn stored(&self) -> Vec<SessionToken> {
        self.tokens.lock().unwrap().clone()
    }

    pub fn fail_writes(&self) {
        self.failing.store(true, Ordering::SeqCst);
    }
}

#[async_trait]
impl SessionTokenStore for FakeSessions {
    async fn store_session_token(&self, token: &SessionToken) -> Result<()> {
        if self.failing.load(Ordering::SeqCst) {
            return Err(store_failure());
        }
        self.tokens.lock().unwrap().push(token.clone());
        Ok(())
    }

    async fn get_session_token(&self, token_id: &str) -> Result<Option<SessionToken>> {
        Ok(self
            .tokens
            .lock()
            .unwrap()
            .iter()
            .find(|token| token.token_id == token_id)
            .cloned())
    }
}

/// Returns a canned user list and records every queried name.
#[derive(Default)]
pub struct FakeUsers {
    users: Vec<User>,
    queries: Mutex<Vec<String>>,
    failing: bool,
}

impl FakeUsers {
    pub fn with(users: Vec<User>) -> Self {
        Self {
            users,
            ..Self::default()
        }
    }

    pub fn failing() -> Self {
        Self {
            failing: true,
            ..Self::default()
        }
    }

    pub fn queries(&self) -> Vec<String> {
        self.queries.lock().unwrap().clone()
    }
}

#[async_trait]
impl UsersStore for FakeUsers {
    async fn get_users_by_name(&self, name: &str) -> Result<Vec<User>> {
        self.queries.lock().unwrap().push(name.to_string());
        if self.failing {
            return Err(store_failure());
        }
        Ok(self.users.clone())
    }
}

pub struct FixedClock(Mutex<DateTime<Utc>>);

impl FixedClock {
    pub fn at(now: DateTime<Utc>) -> Self {
        Self(Mutex::new(now))
    }

    pub fn advance(&self, by: Duration) {
        let mut now = self.0.lock().unwrap();
        *now = *now + by;
    }
}

impl Clock for FixedClock {
    fn now(&self) -> DateTime<Utc> {
        *self.0.lock().unwrap()
    }
}

pub struct FixedTokenIds(pub &'static str);

impl TokenIdGenerator for FixedTokenIds {
    fn generate(&self, _now: DateTime<Utc>) -> String {
        self.0.to_string()
    }
}

/// Issuer with a preset outcome; counts calls.
pub struct StubIssuer {
    outcome: fn() -> Result<Option<SessionToken>>,
    calls: AtomicUsize,
}

impl StubIssuer {
    pub fn new(outcome: fn() -> Result<Option<SessionToken>>) -> Self {
        Self {
            outcome,
            calls: AtomicUsize::new(0),
        }
    }

    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl TokenIssuer for StubIssuer {
    async fn generate_token(&self, _account: &Account) -> Result<Option<SessionToken>> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        (self.outcome)()
    }
}

/// Validator with preset rights; records presented token ids.
pub struct StubValidator {
    rights: Option<TokenRights>,
    presented: Mutex<Vec<String>>,
}

impl StubValidator {
    pub fn granting(rights: TokenRights) -> Self {
        Self {
            rights: Some(rights),
            presented: Mutex::new(Vec::new()),
        }
    }

    pub fn failing() -> Self {
        Self {
            rights: None,
            presented: Mutex::new(Vec::new()),
        }
    }

    pub fn presented(&self) -> Vec<String> {
        self.presented.lock().unwrap().clone()
    }
}

#[async_trait]
impl TokenValidator for StubValidator {
    async fn validate_token(&self, token_id: &str) -> Result<TokenRights> {
        self.presented.lock().unwrap().push(token_id.to_string());
        self.rights.clone().ok_or_else(store_failure)
    }
}

pub async fn body_text(response: axum::response::Response) -> String {
    let bytes = hyper::body::to_bytes(response.into_body()).await.unwrap();
    String::from_utf8(bytes.to_vec()).unwrap()
}
