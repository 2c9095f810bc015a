use std::net::SocketAddr;

pub const LOGIN_ROUTE: &str = "/login";
pub const USERS_ROUTE: &str = "/users";

pub const DEFAULT_BIND_ADDR: &str = "127.0.0.1:8080";
pub const DEFAULT_MAX_CONNECTIONS: u32 = 64;

pub const SESSION_TOKEN_TTL_MS: i64 = 60 * 60 * 1000;
pub const BEARER_PREFIX: &str = "Bearer ";

pub const WRONG_CREDENTIALS: &str = "wrong username or password";
pub const UNAUTHORIZED_OPERATION: &str = "Unauthorized operation!";
pub const MISSING_NAME_PARAMETER: &str = "Missing name parameter in the request!";
pub const INTERNAL_ERROR_PREFIX: &str = "Internal error: ";

/// Runtime settings read from the environment (after `.env` is loaded).
#[derive(Debug, Clone)]
pub struct Settings {
    pub database_url: String,
    pub max_connections: u32,
    pub bind_addr: SocketAddr,
    pub tls: Option<(String, String)>,
}

#[derive(Debug, thiserror::Error)]
pub enum SettingsError {
    #[error("DATABASE_URL must be set")]
    MissingDatabaseUrl,
    #[error("invalid {0}: {1}")]
    Invalid(&'static str, String),
}

impl Settings {
    pub fn from_env() -> Result<Self, SettingsError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    fn from_lookup<F>(lookup: F) -> Result<Self, SettingsError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let database_url = lookup("DATABASE_URL").ok_or(SettingsError::MissingDatabaseUrl)?;

        let max_connections = match lookup("DATABASE_MAX_CONNECTIONS") {
            Some(raw) => raw
                .parse()
                .map_err(|_| SettingsError::Invalid("DATABASE_MAX_CONNECTIONS", raw))?,
            None => DEFAULT_MAX_CONNECTIONS,
        };

        let raw_addr = lookup("BIND_ADDR").unwrap_or_else(|| DEFAULT_BIND_ADDR.to_string());
        let bind_addr = raw_addr
            .parse()
            .map_err(|_| SettingsError::Invalid("BIND_ADDR", raw_addr.clone()))?;

        // TLS is only enabled when both halves are present.
        let tls = match (lookup("CERT_PATH"), lookup("KEY_PATH")) {
            (Some(cert), Some(key)) => Some((cert, key)),
            _ => None,
        };

        Ok(Self {
            database_url,
            max_connections,
            bind_addr,
            tls,
        })
    }
}
