use std::sync::Arc;

use auth::Authenticator;
use auth::IdentityClaim;
use tokio::sync::Semaphore;

use crate::account::errors::AccountError;
use crate::domain::account::models::Password;

/// Runs password hashing off the async executor.
///
/// Every hash or verify runs on the blocking pool, with at most
/// `max_concurrent` of them in flight.
#[derive(Clone)]
pub struct CredentialPool {
    authenticator: Arc<Authenticator>,
    permits: Arc<Semaphore>,
}

impl CredentialPool {
    /// # Arguments
    /// * `authenticator` - Shared hasher and token signer
    /// * `max_concurrent` - Upper bound on simultaneous hash computations (minimum 1)
    pub fn new(authenticator: Arc<Authenticator>, max_concurrent: usize) -> Self {
        Self {
            authenticator,
            permits: Arc::new(Semaphore::new(max_concurrent.max(1))),
        }
    }

    /// Hash a password on the blocking pool.
    pub async fn hash(&self, password: Password) -> Result<String, AccountError> {
        let _permit = self
            .permits
            .acquire()
            .await
            .map_err(|e| AccountError::Unknown(e.to_string()))?;

        let authenticator = Arc::clone(&self.authenticator);
        tokio::task::spawn_blocking(move || authenticator.hash_password(password.expose()))
            .await
            .map_err(|e| AccountError::Unknown(format!("Hashing task failed: {}", e)))?
            .map_err(|e| AccountError::Credential(e.to_string()))
    }

    /// Check a password against a stored hash on the blocking pool.
    pub async fn verify(
        &self,
        password: Password,
        stored_hash: String,
    ) -> Result<bool, AccountError> {
        let _permit = self
            .permits
            .acquire()
            .await
            .map_err(|e| AccountError::Unknown(e.to_string()))?;

        let authenticator = Arc::clone(&self.authenticator);
        tokio::task::spawn_blocking(move || {
            authenticator.verify_password(password.expose(), &stored_hash)
        })
        .await
        .map_err(|e| AccountError::Unknown(format!("Verification task failed: {}", e)))?
        .map_err(|e| AccountError::Credential(e.to_string()))
    }

    /// Issue a session token. Signing is cheap and runs inline.
    pub fn issue_token(&self, claim: &IdentityClaim) -> Result<String, AccountError> {
        self.authenticator
            .issue_token(claim)
            .map_err(|e| AccountError::Token(e.to_string()))
    }

    pub fn available_permits(&self) -> usize {
        self.permits.available_permits()
    }
}

#[cfg(test)]
mod tests {
    use auth::HashCost;
    use auth::PasswordHasher;
    use auth::Role;
    use auth::SigningKey;

    use super::*;

    fn pool(max_concurrent: usize) -> CredentialPool {
        let hasher = PasswordHasher::new(HashCost {
            memory_kib: 1024,
            iterations: 1,
            parallelism: 1,
        })
        .unwrap();
        let key = SigningKey::from_secret(b"credential-pool-test-secret").unwrap();
        CredentialPool::new(Arc::new(Authenticator::new(key, hasher)), max_concurrent)
    }

    #[tokio::test]
    async fn test_hash_then_verify() {
        let pool = pool(2);

        let hash = pool
            .hash(Password::new("secret".to_string()).unwrap())
            .await
            .unwrap();

        assert!(pool
            .verify(Password::new("secret".to_string()).unwrap(), hash.clone())
            .await
            .unwrap());
        assert!(!pool
            .verify(Password::new("other".to_string()).unwrap(), hash)
            .await
            .unwrap());
    }

    #[tokio::test]
    async fn test_concurrent_hashes_release_permits() {
        let pool = pool(2);

        let tasks: Vec<_> = (0..6)
            .map(|i| {
                let pool = pool.clone();
                tokio::spawn(async move {
                    pool.hash(Password::new(format!("password-{}", i)).unwrap())
                        .await
                })
            })
            .collect();

        for task in tasks {
            assert!(task.await.unwrap().is_ok());
        }
        assert_eq!(pool.available_permits(), 2);
    }

    #[tokio::test]
    async fn test_zero_concurrency_is_clamped() {
        let pool = pool(0);
        assert_eq!(pool.available_permits(), 1);
        assert!(pool
            .hash(Password::new("secret".to_string()).unwrap())
            .await
            .is_ok());
    }

    #[tokio::test]
    async fn test_verify_malformed_hash() {
        let pool = pool(1);
        let result = pool
            .verify(
                Password::new("secret".to_string()).unwrap(),
                "garbage".to_string(),
            )
            .await;
        assert!(matches!(result, Err(AccountError::Credential(_))));
    }

    #[test]
    fn test_issue_token() {
        let pool = pool(1);
        let token = pool
            .issue_token(&IdentityClaim::new("a@example.com", Role::User))
            .unwrap();
        assert_eq!(token.split('.').count(), 3);
    }
}
