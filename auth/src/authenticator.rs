use chrono::Duration;
use chrono::Utc;

use crate::password::PasswordError;
use crate::password::PasswordHasher;
use crate::token;
use crate::token::IdentityClaim;
use crate::token::IssueError;
use crate::token::SigningKey;
use crate::token::VerifyError;

/// Authentication coordinator combining password verification and token issuance.
///
/// Holds the process-wide signing key and hasher; cheap to share behind an `Arc`.
#[derive(Debug, Clone)]
pub struct Authenticator {
    password_hasher: PasswordHasher,
    signing_key: SigningKey,
    token_lifetime: Option<Duration>,
}

/// Authentication operation errors.
#[derive(Debug, thiserror::Error)]
pub enum AuthenticationError {
    #[error("Invalid credentials")]
    InvalidCredentials,

    #[error("Password error: {0}")]
    PasswordError(#[from] PasswordError),

    #[error("Token error: {0}")]
    IssueError(#[from] IssueError),
}

impl Authenticator {
    /// Create a new authenticator issuing tokens without expiration.
    ///
    /// # Arguments
    /// * `signing_key` - Key used to sign and verify session tokens
    /// * `password_hasher` - Configured credential hasher
    pub fn new(signing_key: SigningKey, password_hasher: PasswordHasher) -> Self {
        Self {
            password_hasher,
            signing_key,
            token_lifetime: None,
        }
    }

    /// Bound the lifetime of every token issued from now on.
    pub fn with_token_lifetime(mut self, lifetime: Duration) -> Self {
        self.token_lifetime = Some(lifetime);
        self
    }

    /// Hash a password for storage.
    ///
    /// # Errors
    /// * `PasswordError` - Hashing operation failed
    pub fn hash_password(&self, password: &str) -> Result<String, PasswordError> {
        self.password_hasher.hash(password)
    }

    /// Check a password against a stored hash.
    ///
    /// # Errors
    /// * `PasswordError` - Stored hash is malformed
    pub fn verify_password(&self, password: &str, stored_hash: &str) -> Result<bool, PasswordError> {
        self.password_hasher.verify(password, stored_hash)
    }

    /// Verify credentials and issue a session token.
    ///
    /// # Arguments
    /// * `password` - Plaintext password to verify
    /// * `stored_hash` - Stored password hash
    /// * `claim` - Identity to encode in the token
    ///
    /// # Errors
    /// * `InvalidCredentials` - Password does not match
    /// * `PasswordError` - Stored hash is malformed
    /// * `IssueError` - Token generation failed
    pub fn authenticate(
        &self,
        password: &str,
        stored_hash: &str,
        claim: &IdentityClaim,
    ) -> Result<String, AuthenticationError> {
        if !self.password_hasher.verify(password, stored_hash)? {
            return Err(AuthenticationError::InvalidCredentials);
        }

        Ok(self.issue_token(claim)?)
    }

    /// Issue a session token without password verification.
    ///
    /// Used right after signup, where the password has just been hashed.
    ///
    /// # Errors
    /// * `EncodingFailed` - Token generation failed
    pub fn issue_token(&self, claim: &IdentityClaim) -> Result<String, IssueError> {
        match self.token_lifetime {
            Some(lifetime) => token::issue_expiring(claim, &self.signing_key, Utc::now() + lifetime),
            None => token::issue(claim, &self.signing_key),
        }
    }

    /// Validate a presented token and decode its claim.
    ///
    /// # Errors
    /// * `VerifyError` - Token absent, forged, malformed or expired
    pub fn verify_token(&self, token: Option<&str>) -> Result<IdentityClaim, VerifyError> {
        token::verify(token, &self.signing_key)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::password::HashCost;
    use crate::token::Role;

    fn authenticator() -> Authenticator {
        let hasher = PasswordHasher::new(HashCost {
            memory_kib: 1024,
            iterations: 1,
            parallelism: 1,
        })
        .unwrap();
        Authenticator::new(
            SigningKey::from_secret(b"test_secret_key_at_least_32_bytes!").unwrap(),
            hasher,
        )
    }

    #[test]
    fn test_authenticate_success() {
        let authenticator = authenticator();

        let password = "my_password";
        let hash = authenticator
            .hash_password(password)
            .expect("Failed to hash password");

        let claim = IdentityClaim::new("user@example.com", Role::User);
        let token = authenticator
            .authenticate(password, &hash, &claim)
            .expect("Authentication failed");

        let decoded = authenticator
            .verify_token(Some(&token))
            .expect("Token validation failed");
        assert_eq!(decoded, claim);
    }

    #[test]
    fn test_authenticate_invalid_password() {
        let authenticator = authenticator();

        let hash = authenticator.hash_password("my_password").unwrap();
        let claim = IdentityClaim::new("user@example.com", Role::User);

        let result = authenticator.authenticate("wrong_password", &hash, &claim);
        assert!(matches!(
            result,
            Err(AuthenticationError::InvalidCredentials)
        ));
    }

    #[test]
    fn test_authenticate_malformed_stored_hash() {
        let authenticator = authenticator();
        let claim = IdentityClaim::new("user@example.com", Role::User);

        let result = authenticator.authenticate("my_password", "not-a-hash", &claim);
        assert!(matches!(result, Err(AuthenticationError::PasswordError(_))));
    }

    #[test]
    fn test_issued_tokens_expire_when_lifetime_configured() {
        let authenticator = authenticator().with_token_lifetime(Duration::seconds(-120));
        let claim = IdentityClaim::new("admin@example.com", Role::Admin);

        let token = authenticator.issue_token(&claim).unwrap();
        assert_eq!(
            authenticator.verify_token(Some(&token)),
            Err(VerifyError::Expired)
        );
    }

    #[test]
    fn test_verify_invalid_token() {
        let authenticator = authenticator();

        assert_eq!(
            authenticator.verify_token(None),
            Err(VerifyError::MissingToken)
        );
        assert!(authenticator
            .verify_token(Some("invalid.token.here"))
            .is_err());
    }
}
