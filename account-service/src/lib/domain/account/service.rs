use std::sync::Arc;

use async_trait::async_trait;
use auth::IdentityClaim;
use chrono::Utc;

use crate::account::errors::AccountError;
use crate::account::ports::AccountRepository;
use crate::account::ports::AccountServicePort;
use crate::account::ports::ProfileImageStore;
use crate::account::ports::Session;
use crate::domain::account::credentials::CredentialPool;
use crate::domain::account::models::Account;
use crate::domain::account::models::AccountId;
use crate::domain::account::models::ImageUpload;
use crate::domain::account::models::LoginCommand;
use crate::domain::account::models::ProfileImage;
use crate::domain::account::models::SignupCommand;
use crate::domain::account::models::UpdateProfileCommand;

/// Domain service implementation for account operations.
///
/// Concrete implementation of AccountServicePort with dependency injection.
pub struct AccountService<AR, IS>
where
    AR: AccountRepository,
    IS: ProfileImageStore,
{
    repository: Arc<AR>,
    image_store: Arc<IS>,
    credentials: CredentialPool,
}

impl<AR, IS> AccountService<AR, IS>
where
    AR: AccountRepository,
    IS: ProfileImageStore,
{
    /// Create a new account service with injected dependencies.
    ///
    /// # Arguments
    /// * `repository` - Account persistence implementation
    /// * `image_store` - Profile image storage implementation
    /// * `credentials` - Bounded password hashing and token issuance
    pub fn new(repository: Arc<AR>, image_store: Arc<IS>, credentials: CredentialPool) -> Self {
        Self {
            repository,
            image_store,
            credentials,
        }
    }

    async fn store_image(
        &self,
        upload: Option<ImageUpload>,
    ) -> Result<Option<ProfileImage>, AccountError> {
        let Some(upload) = upload else {
            return Ok(None);
        };

        let name = ProfileImage::generate(upload.original_file_name.as_deref());
        self.image_store.save(&name, &upload.bytes).await?;
        tracing::debug!(image = %name.as_str(), size = upload.bytes.len(), "Profile image stored");

        Ok(Some(name))
    }

    /// Best-effort removal of an image no account refers to.
    async fn discard_image(&self, image: &ProfileImage) {
        if let Err(e) = self.image_store.delete(image).await {
            tracing::warn!(image = %image.as_str(), error = %e, "Failed to discard profile image");
        }
    }

    fn open_session(&self, account: Account) -> Result<Session, AccountError> {
        let claim = IdentityClaim::new(account.email.as_str(), account.role);
        let token = self.credentials.issue_token(&claim)?;
        Ok(Session { account, token })
    }
}

#[async_trait]
impl<AR, IS> AccountServicePort for AccountService<AR, IS>
where
    AR: AccountRepository,
    IS: ProfileImageStore,
{
    async fn signup(&self, command: SignupCommand) -> Result<Session, AccountError> {
        if self
            .repository
            .find_by_email_or_phone(command.role, &command.email, &command.phone)
            .await?
            .is_some()
        {
            tracing::info!(role = %command.role, "Signup rejected: account already exists");
            return Err(AccountError::AlreadyExists);
        }

        let password_hash = self.credentials.hash(command.password).await?;
        let profile_image = self.store_image(command.profile_image).await?;

        let account = Account {
            id: AccountId::new(),
            role: command.role,
            email: command.email,
            phone: command.phone,
            name: command.name,
            profile_image,
            password_hash,
            created_at: Utc::now(),
        };

        let stored_image = account.profile_image.clone();
        let created = match self.repository.create(account).await {
            Ok(created) => created,
            Err(e) => {
                if let Some(image) = &stored_image {
                    self.discard_image(image).await;
                }
                return Err(e);
            }
        };
        tracing::info!(account_id = %created.id, role = %created.role, "Account created");

        self.open_session(created)
    }

    async fn login(&self, command: LoginCommand) -> Result<Session, AccountError> {
        let account = self
            .repository
            .find_by_email(command.role, command.email.as_str())
            .await?
            .ok_or_else(|| AccountError::NotFound(command.role.to_string()))?;

        let is_valid = self
            .credentials
            .verify(command.password, account.password_hash.clone())
            .await?;

        if !is_valid {
            tracing::warn!(account_id = %account.id, role = %account.role, "Login rejected: password mismatch");
            return Err(AccountError::InvalidCredentials);
        }

        tracing::info!(account_id = %account.id, role = %account.role, "Login succeeded");
        self.open_session(account)
    }

    async fn update_profile(
        &self,
        claim: &IdentityClaim,
        command: UpdateProfileCommand,
    ) -> Result<Account, AccountError> {
        let mut account = self
            .repository
            .find_by_email(claim.role, &claim.primary_identifier)
            .await?
            .ok_or_else(|| AccountError::NotFound(claim.role.to_string()))?;

        if let Some(name) = command.name {
            account.name = name;
        }

        let new_image = self.store_image(command.profile_image).await?;
        let previous_image = match &new_image {
            Some(image) => account.profile_image.replace(image.clone()),
            None => None,
        };

        let updated = match self.repository.update(account).await {
            Ok(updated) => updated,
            Err(e) => {
                if let Some(image) = &new_image {
                    self.discard_image(image).await;
                }
                return Err(e);
            }
        };
        tracing::info!(account_id = %updated.id, "Profile updated");

        if let Some(image) = &previous_image {
            self.discard_image(image).await;
        }

        Ok(updated)
    }

    async fn delete_profile(&self, claim: &IdentityClaim) -> Result<(), AccountError> {
        self.repository
            .delete(claim.role, &claim.primary_identifier)
            .await?;
        tracing::info!(role = %claim.role, "Account deleted");

        Ok(())
    }
}
