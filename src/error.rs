use axum::extract::rejection::BytesRejection;

pub type Result<T, E = Error> = std::result::Result<T, E>;

#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error(transparent)]
    Database(#[from] sqlx::Error),
    #[error("{0}")]
    Hashing(argon2::password_hash::Error),
    #[error("{0}")]
    Body(BytesRejection),
    #[error(transparent)]
    Json(#[from] serde_json::Error),
    #[error("corrupt record: {0}")]
    Corrupt(String),
}

impl From<BytesRejection> for Error {
    fn from(rejection: BytesRejection) -> Self {
        Self::Body(rejection)
    }
}
