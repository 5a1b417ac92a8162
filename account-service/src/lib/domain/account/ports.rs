use async_trait::async_trait;
use auth::IdentityClaim;
use auth::Role;

use crate::domain::account::models::Account;
use crate::domain::account::models::EmailAddress;
use crate::domain::account::models::LoginCommand;
use crate::domain::account::models::PhoneNumber;
use crate::domain::account::models::ProfileImage;
use crate::domain::account::models::SignupCommand;
use crate::domain::account::models::UpdateProfileCommand;
use crate::account::errors::AccountError;
use crate::account::errors::ImageStoreError;

/// Account created or authenticated together with its fresh session token.
#[derive(Debug, Clone)]
pub struct Session {
    pub account: Account,
    pub token: String,
}

/// Port for account domain service operations.
#[async_trait]
pub trait AccountServicePort: Send + Sync + 'static {
    /// Register a new account and open a session for it.
    ///
    /// # Errors
    /// * `AlreadyExists` - Email or phone already registered for this role
    /// * `ImageStore` - Profile image could not be stored
    /// * `DatabaseError` - Database operation failed
    async fn signup(&self, command: SignupCommand) -> Result<Session, AccountError>;

    /// Check credentials and open a session.
    ///
    /// # Errors
    /// * `NotFound` - No account with this email for the role
    /// * `InvalidCredentials` - Password does not match
    /// * `DatabaseError` - Database operation failed
    async fn login(&self, command: LoginCommand) -> Result<Session, AccountError>;

    /// Update the profile of the account identified by the claim.
    ///
    /// # Errors
    /// * `NotFound` - Account no longer exists
    /// * `ImageStore` - Profile image could not be stored
    /// * `DatabaseError` - Database operation failed
    async fn update_profile(
        &self,
        claim: &IdentityClaim,
        command: UpdateProfileCommand,
    ) -> Result<Account, AccountError>;

    /// Delete the account identified by the claim.
    ///
    /// # Errors
    /// * `NotFound` - Account does not exist
    /// * `DatabaseError` - Database operation failed
    async fn delete_profile(&self, claim: &IdentityClaim) -> Result<(), AccountError>;
}

/// Persistence operations for the account aggregate.
#[async_trait]
pub trait AccountRepository: Send + Sync + 'static {
    /// Persist a new account.
    ///
    /// # Errors
    /// * `AlreadyExists` - Email or phone already taken for this role
    /// * `DatabaseError` - Database operation failed
    async fn create(&self, account: Account) -> Result<Account, AccountError>;

    /// Retrieve an account by role and email.
    ///
    /// # Returns
    /// Optional account (None if not found)
    async fn find_by_email(
        &self,
        role: Role,
        email: &str,
    ) -> Result<Option<Account>, AccountError>;

    /// Retrieve any account of the role that uses either the email or the phone.
    async fn find_by_email_or_phone(
        &self,
        role: Role,
        email: &EmailAddress,
        phone: &PhoneNumber,
    ) -> Result<Option<Account>, AccountError>;

    /// Update an existing account.
    ///
    /// # Errors
    /// * `NotFound` - Account does not exist
    /// * `DatabaseError` - Database operation failed
    async fn update(&self, account: Account) -> Result<Account, AccountError>;

    /// Remove an account by role and email.
    ///
    /// # Errors
    /// * `NotFound` - Account does not exist
    /// * `DatabaseError` - Database operation failed
    async fn delete(&self, role: Role, email: &str) -> Result<(), AccountError>;
}

/// Storage for uploaded profile images.
#[async_trait]
pub trait ProfileImageStore: Send + Sync + 'static {
    /// Store image bytes under the given name.
    ///
    /// # Errors
    /// * `WriteFailed` - The backing store rejected the write
    async fn save(&self, name: &ProfileImage, bytes: &[u8]) -> Result<(), ImageStoreError>;

    /// Remove a stored image. Removing an image that is already gone succeeds.
    ///
    /// # Errors
    /// * `DeleteFailed` - The backing store rejected the removal
    async fn delete(&self, name: &ProfileImage) -> Result<(), ImageStoreError>;
}
