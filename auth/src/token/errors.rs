use thiserror::Error;

/// Error type for token issuance.
#[derive(Debug, Clone, Error)]
pub enum IssueError {
    #[error("Failed to encode token: {0}")]
    EncodingFailed(String),
}

/// Outcome of a failed token verification.
///
/// Verification is total: every presented value ends up either as a decoded
/// claim or as one of these variants.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum VerifyError {
    #[error("No token provided")]
    MissingToken,

    #[error("Token signature is invalid")]
    InvalidSignature,

    #[error("Token is malformed: {0}")]
    Malformed(String),

    #[error("Token is expired")]
    Expired,
}

/// Error for signing key construction.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum SigningKeyError {
    #[error("Signing secret must not be empty")]
    Empty,
}

/// Error for role parsing.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum RoleError {
    #[error("Unknown role: {0}")]
    Unknown(String),
}
