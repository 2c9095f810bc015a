use chrono::{DateTime, Utc};

use crate::{
    error::{Error, Result},
    model::{AccessRight, SessionToken, User, UserCredential, WorkingPosition},
};

#[derive(Debug, sqlx::FromRow)]
pub struct CredentialRow {
    pub username: String,
    pub digest: String,
    pub access_rights: Vec<i16>,
}

#[derive(Debug, sqlx::FromRow)]
pub struct SessionTokenRow {
    pub token_id: String,
    pub user_name: String,
    pub valid: bool,
    pub expiration_time: DateTime<Utc>,
    pub access_rights: Vec<i16>,
}

#[derive(Debug, sqlx::FromRow)]
pub struct UserRow {
    pub id: String,
    pub name: String,
    pub age: i32,
    pub email: String,
    pub working_position: i16,
}

pub fn access_rights_from_codes(codes: Vec<i16>) -> Result<Vec<AccessRight>> {
    codes
        .into_iter()
        .map(|code| AccessRight::try_from(code).map_err(Error::Corrupt))
        .collect()
}

pub fn access_rights_to_codes(rights: &[AccessRight]) -> Vec<i16> {
    rights.iter().map(|&right| i16::from(right)).collect()
}

impl TryFrom<CredentialRow> for UserCredential {
    type Error = Error;

    fn try_from(row: CredentialRow) -> Result<Self> {
        Ok(Self {
            username: row.username,
            digest: row.digest,
            access_rights: access_rights_from_codes(row.access_rights)?,
        })
    }
}

impl TryFrom<SessionTokenRow> for SessionToken {
    type Error = Error;

    fn try_from(row: SessionTokenRow) -> Result<Self> {
        Ok(Self {
            token_id: row.token_id,
            user_name: row.user_name,
            valid: row.valid,
            expiration_time: row.expiration_time,
            access_rights: access_rights_from_codes(row.access_rights)?,
        })
    }
}

impl TryFrom<UserRow> for User {
    type Error = Error;

    fn try_from(row: UserRow) -> Result<Self> {
        Ok(Self {
            id: row.id,
            name: row.name,
            age: row.age,
            email: row.email,
            working_position: WorkingPosition::try_from(row.working_position)
                .map_err(Error::Corrupt)?,
        })
    }
}
