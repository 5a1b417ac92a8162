//! Credential and session-token core
//!
//! Provides the authentication building blocks used by the account service:
//! - Password hashing (Argon2id, configurable cost)
//! - Session token issuance and verification (HS256, shared signing key)
//! - Authentication coordination
//!
//! Nothing here holds mutable state. The signing key is built once at startup
//! and passed explicitly, which keeps every operation independently testable.
//!
//! # Examples
//!
//! ## Password Hashing
//! ```
//! use auth::PasswordHasher;
//!
//! let hasher = PasswordHasher::default();
//! let hash = hasher.hash("my_password").unwrap();
//! let is_valid = hasher.verify("my_password", &hash).unwrap();
//! assert!(is_valid);
//! ```
//!
//! ## Session Tokens
//! ```
//! use auth::{IdentityClaim, Role, SigningKey};
//!
//! let key = SigningKey::from_secret(b"secret_key_at_least_32_bytes_long!").unwrap();
//! let claim = IdentityClaim::new("a@example.com", Role::User);
//! let token = auth::token::issue(&claim, &key).unwrap();
//! let decoded = auth::token::verify(Some(&token), &key).unwrap();
//! assert_eq!(decoded, claim);
//! ```
//!
//! ## Complete Authentication Flow
//! ```
//! use auth::{Authenticator, IdentityClaim, PasswordHasher, Role, SigningKey};
//!
//! let key = SigningKey::from_secret(b"secret_key_at_least_32_bytes_long!").unwrap();
//! let auth = Authenticator::new(key, PasswordHasher::default());
//!
//! // Signup: hash password
//! let hash = auth.hash_password("password123").unwrap();
//!
//! // Login: verify and issue token
//! let claim = IdentityClaim::new("a@example.com", Role::User);
//! let token = auth.authenticate("password123", &hash, &claim).unwrap();
//!
//! // Gate a request
//! let decoded = auth.verify_token(Some(&token)).unwrap();
//! assert_eq!(decoded.primary_identifier, "a@example.com");
//! ```

pub mod authenticator;
pub mod password;
pub mod token;

// Re-export commonly used items
pub use authenticator::AuthenticationError;
pub use authenticator::Authenticator;
pub use password::HashCost;
pub use password::PasswordError;
pub use password::PasswordHasher;
pub use token::IdentityClaim;
pub use token::IssueError;
pub use token::Role;
pub use token::RoleError;
pub use token::SigningKey;
pub use token::SigningKeyError;
pub use token::VerifyError;
