use async_trait::async_trait;
use auth::Role;
use chrono::DateTime;
use chrono::Utc;
use sqlx::PgPool;
use uuid::Uuid;

use crate::domain::account::models::Account;
use crate::domain::account::models::AccountId;
use crate::domain::account::models::DisplayName;
use crate::domain::account::models::EmailAddress;
use crate::domain::account::models::PhoneNumber;
use crate::domain::account::models::ProfileImage;
use crate::domain::account::ports::AccountRepository;
use crate::account::errors::AccountError;

const SELECT_ACCOUNT: &str = r#"
    SELECT id, role, email, phone, name, profile_image, password_hash, created_at
    FROM accounts
"#;

pub struct PostgresAccountRepository {
    pool: PgPool,
}

impl PostgresAccountRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[derive(sqlx::FromRow)]
struct AccountRow {
    id: Uuid,
    role: String,
    email: String,
    phone: String,
    name: String,
    profile_image: Option<String>,
    password_hash: String,
    created_at: DateTime<Utc>,
}

impl TryFrom<AccountRow> for Account {
    type Error = AccountError;

    fn try_from(row: AccountRow) -> Result<Self, Self::Error> {
        Ok(Account {
            id: AccountId(row.id),
            role: row.role.parse()?,
            email: EmailAddress::new(row.email)?,
            phone: PhoneNumber::new(row.phone)?,
            name: DisplayName::new(row.name)?,
            profile_image: row.profile_image.map(ProfileImage::from_stored),
            password_hash: row.password_hash,
            created_at: row.created_at,
        })
    }
}

fn map_write_error(e: sqlx::Error) -> AccountError {
    if let Some(db_err) = e.as_database_error() {
        if db_err.is_unique_violation() {
            return AccountError::AlreadyExists;
        }
    }
    AccountError::DatabaseError(e.to_string())
}

#[async_trait]
impl AccountRepository for PostgresAccountRepository {
    async fn create(&self, account: Account) -> Result<Account, AccountError> {
        sqlx::query(
            r#"
            INSERT INTO accounts (id, role, email, phone, name, profile_image, password_hash, created_at)
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8)
            "#,
        )
        .bind(account.id.0)
        .bind(account.role.as_str())
        .bind(account.email.as_str())
        .bind(account.phone.as_str())
        .bind(account.name.as_str())
        .bind(account.profile_image.as_ref().map(|image| image.as_str()))
        .bind(&account.password_hash)
        .bind(account.created_at)
        .execute(&self.pool)
        .await
        .map_err(map_write_error)?;

        Ok(account)
    }

    async fn find_by_email(
        &self,
        role: Role,
        email: &str,
    ) -> Result<Option<Account>, AccountError> {
        let row = sqlx::query_as::<_, AccountRow>(&format!(
            "{} WHERE role = $1 AND email = $2",
            SELECT_ACCOUNT
        ))
        .bind(role.as_str())
        .bind(email)
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| AccountError::DatabaseError(e.to_string()))?;

        row.map(Account::try_from).transpose()
    }

    async fn find_by_email_or_phone(
        &self,
        role: Role,
        email: &EmailAddress,
        phone: &PhoneNumber,
    ) -> Result<Option<Account>, AccountError> {
        let row = sqlx::query_as::<_, AccountRow>(&format!(
            "{} WHERE role = $1 AND (email = $2 OR phone = $3) LIMIT 1",
            SELECT_ACCOUNT
        ))
        .bind(role.as_str())
        .bind(email.as_str())
        .bind(phone.as_str())
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| AccountError::DatabaseError(e.to_string()))?;

        row.map(Account::try_from).transpose()
    }

    async fn update(&self, account: Account) -> Result<Account, AccountError> {
        let result = sqlx::query(
            r#"
            UPDATE accounts
            SET name = $2, profile_image = $3, password_hash = $4
            WHERE id = $1
            "#,
        )
        .bind(account.id.0)
        .bind(account.name.as_str())
        .bind(account.profile_image.as_ref().map(|image| image.as_str()))
        .bind(&account.password_hash)
        .execute(&self.pool)
        .await
        .map_err(map_write_error)?;

        if result.rows_affected() == 0 {
            return Err(AccountError::NotFound(account.role.to_string()));
        }

        Ok(account)
    }

    async fn delete(&self, role: Role, email: &str) -> Result<(), AccountError> {
        let result = sqlx::query(
            r#"
            DELETE FROM accounts
            WHERE role = $1 AND email = $2
            "#,
        )
        .bind(role.as_str())
        .bind(email)
        .execute(&self.pool)
        .await
        .map_err(|e| AccountError::DatabaseError(e.to_string()))?;

        if result.rows_affected() == 0 {
            return Err(AccountError::NotFound(role.to_string()));
        }

        Ok(())
    }
}
