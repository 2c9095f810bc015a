use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::utility::serialize_iso_millis;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(into = "i16", try_from = "i16")]
pub enum AccessRight {
    Create,
    Read,
    Update,
    Delete,
}

impl From<AccessRight> for i16 {
    fn from(right: AccessRight) -> Self {
        match right {
            AccessRight::Create => 0,
            AccessRight::Read => 1,
            AccessRight::Update => 2,
            AccessRight::Delete => 3,
        }
    }
}

impl TryFrom<i16> for AccessRight {
    type Error = String;

    fn try_from(code: i16) -> Result<Self, Self::Error> {
        match code {
            0 => Ok(Self::Create),
            1 => Ok(Self::Read),
            2 => Ok(Self::Update),
            3 => Ok(Self::Delete),
            _ => Err(format!("unknown access right {}", code)),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(into = "i16", try_from = "i16")]
pub enum WorkingPosition {
    Junior,
    Programmer,
    Engineer,
    Expert,
    Manager,
}

impl From<WorkingPosition> for i16 {
    fn from(position: WorkingPosition) -> Self {
        match position {
            WorkingPosition::Junior => 0,
            WorkingPosition::Programmer => 1,
            WorkingPosition::Engineer => 2,
            WorkingPosition::Expert => 3,
            WorkingPosition::Manager => 4,
        }
    }
}

impl TryFrom<i16> for WorkingPosition {
    type Error = String;

    fn try_from(code: i16) -> Result<Self, Self::Error> {
        match code {
            0 => Ok(Self::Junior),
            1 => Ok(Self::Programmer),
            2 => Ok(Self::Engineer),
            3 => Ok(Self::Expert),
            4 => Ok(Self::Manager),
            _ => Err(format!("unknown working position {}", code)),
        }
    }
}

/// Credentials submitted to the login endpoint.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct Account {
    pub username: String,
    pub password: String,
}

/// Reference credential held by the credentials store. `digest` is an argon2
/// PHC string.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UserCredential {
    pub username: String,
    pub digest: String,
    pub access_rights: Vec<AccessRight>,
}

/// Issued on a successful login. Fields serialize in declaration order.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SessionToken {
    pub token_id: String,
    pub user_name: String,
    pub valid: bool,
    #[serde(serialize_with = "serialize_iso_millis")]
    pub expiration_time: DateTime<Utc>,
    pub access_rights: Vec<AccessRight>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum TokenState {
    Valid,
    Invalid,
    Expired,
}

/// Outcome of validating a presented token id. Denials never carry rights.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TokenRights {
    pub access_rights: Vec<AccessRight>,
    pub state: TokenState,
}

impl TokenRights {
    pub fn denied(state: TokenState) -> Self {
        Self {
            access_rights: Vec::new(),
            state,
        }
    }

    pub fn grants(&self, right: AccessRight) -> bool {
        self.access_rights.contains(&right)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct User {
    pub id: String,
    pub name: String,
    pub age: i32,
    pub email: String,
    pub working_position: WorkingPosition,
}
