use std::fmt;
use std::str::FromStr;

use serde::Deserialize;
use serde::Serialize;

use super::errors::RoleError;

/// Account role carried in every session token.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    User,
    Admin,
}

impl Role {
    /// Get the wire name of the role ("user" or "admin").
    pub fn as_str(&self) -> &'static str {
        match self {
            Role::User => "user",
            Role::Admin => "admin",
        }
    }
}

impl fmt::Display for Role {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Role {
    type Err = RoleError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "user" => Ok(Role::User),
            "admin" => Ok(Role::Admin),
            other => Err(RoleError::Unknown(other.to_string())),
        }
    }
}

/// Identity recovered from a verified token.
///
/// The token is the only representation of a session, so this record is all
/// a request handler knows about the caller.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct IdentityClaim {
    /// Account identifier (the email address the account was registered with)
    pub primary_identifier: String,
    pub role: Role,
}

impl IdentityClaim {
    pub fn new(primary_identifier: impl ToString, role: Role) -> Self {
        Self {
            primary_identifier: primary_identifier.to_string(),
            role,
        }
    }
}

/// Wire payload of a session token.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub(crate) struct TokenPayload {
    /// Subject (primary identifier)
    pub sub: String,

    pub role: Role,

    /// Expiration time (Unix timestamp), only set when a lifetime is configured
    #[serde(skip_serializing_if = "Option::is_none")]
    pub exp: Option<i64>,
}

impl TokenPayload {
    pub fn from_claim(claim: &IdentityClaim) -> Self {
        Self {
            sub: claim.primary_identifier.clone(),
            role: claim.role,
            exp: None,
        }
    }

    pub fn with_expiration(mut self, exp: i64) -> Self {
        self.exp = Some(exp);
        self
    }

    pub fn into_claim(self) -> IdentityClaim {
        IdentityClaim {
            primary_identifier: self.sub,
            role: self.role,
        }
    }
}
