use std::collections::HashMap;

use async_trait::async_trait;
use auth::Role;
use tokio::sync::RwLock;

use crate::account::errors::AccountError;
use crate::domain::account::models::Account;
use crate::domain::account::models::AccountId;
use crate::domain::account::models::EmailAddress;
use crate::domain::account::models::PhoneNumber;
use crate::domain::account::ports::AccountRepository;

/// Process-local account store.
///
/// Used when no database is configured and by the API tests. Enforces the
/// same per-role uniqueness of email and phone as the Postgres schema.
#[derive(Default)]
pub struct InMemoryAccountRepository {
    accounts: RwLock<HashMap<AccountId, Account>>,
}

impl InMemoryAccountRepository {
    pub fn new() -> Self {
        Self::default()
    }

    pub async fn count(&self) -> usize {
        self.accounts.read().await.len()
    }
}

#[async_trait]
impl AccountRepository for InMemoryAccountRepository {
    async fn create(&self, account: Account) -> Result<Account, AccountError> {
        let mut accounts = self.accounts.write().await;

        let taken = accounts.values().any(|existing| {
            existing.role == account.role
                && (existing.email == account.email || existing.phone == account.phone)
        });
        if taken {
            return Err(AccountError::AlreadyExists);
        }

        accounts.insert(account.id, account.clone());
        Ok(account)
    }

    async fn find_by_email(
        &self,
        role: Role,
        email: &str,
    ) -> Result<Option<Account>, AccountError> {
        let accounts = self.accounts.read().await;
        Ok(accounts
            .values()
            .find(|account| account.role == role && account.email.as_str() == email)
            .cloned())
    }

    async fn find_by_email_or_phone(
        &self,
        role: Role,
        email: &EmailAddress,
        phone: &PhoneNumber,
    ) -> Result<Option<Account>, AccountError> {
        let accounts = self.accounts.read().await;
        Ok(accounts
            .values()
            .find(|account| {
                account.role == role && (&account.email == email || &account.phone == phone)
            })
            .cloned())
    }

    async fn update(&self, account: Account) -> Result<Account, AccountError> {
        let mut accounts = self.accounts.write().await;

        match accounts.get_mut(&account.id) {
            Some(stored) => {
                *stored = account.clone();
                Ok(account)
            }
            None => Err(AccountError::NotFound(account.role.to_string())),
        }
    }

    async fn delete(&self, role: Role, email: &str) -> Result<(), AccountError> {
        let mut accounts = self.accounts.write().await;

        let id = accounts
            .values()
            .find(|account| account.role == role && account.email.as_str() == email)
            .map(|account| account.id)
            .ok_or_else(|| AccountError::NotFound(role.to_string()))?;

        accounts.remove(&id);
        Ok(())
    }
}
