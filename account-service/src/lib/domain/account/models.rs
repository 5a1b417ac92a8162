use std::fmt;
use std::path::Path;
use std::str::FromStr;

use auth::Role;
use chrono::DateTime;
use chrono::Utc;
use secrecy::ExposeSecret;
use secrecy::SecretString;
use uuid::Uuid;

use crate::account::errors::EmailError;
use crate::account::errors::NameError;
use crate::account::errors::PasswordError;
use crate::account::errors::PhoneError;

/// Account aggregate entity.
///
/// Users and admins live in separate namespaces: the pair `(role, email)`
/// identifies an account.
#[derive(Debug, Clone, PartialEq)]
pub struct Account {
    pub id: AccountId,
    pub role: Role,
    pub email: EmailAddress,
    pub phone: PhoneNumber,
    pub name: DisplayName,
    pub profile_image: Option<ProfileImage>,
    pub password_hash: String,
    pub created_at: DateTime<Utc>,
}

/// Account unique identifier type
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct AccountId(pub Uuid);

impl AccountId {
    /// Generate a new random account ID.
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }
}

impl Default for AccountId {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Display for AccountId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.0.fmt(f)
    }
}

/// Email address type
///
/// Validates email format using RFC 5322 compliant parser.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EmailAddress(String);

impl EmailAddress {
    /// Create a new validated email address.
    ///
    /// # Errors
    /// * `InvalidFormat` - Email does not conform to RFC 5322
    pub fn new(email: String) -> Result<Self, EmailError> {
        email_address::EmailAddress::from_str(&email)
            .map(|_| EmailAddress(email))
            .map_err(|e| EmailError::InvalidFormat(e.to_string()))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for EmailAddress {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.0.fmt(f)
    }
}

/// Phone number value type
///
/// Accepts the loosely formatted numbers people type (`+1 (555) 010-9999`),
/// but nothing that is not a phone number.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PhoneNumber(String);

impl PhoneNumber {
    const MAX_LENGTH: usize = 32;

    /// Create a new validated phone number.
    ///
    /// # Errors
    /// * `Empty` - No digits supplied
    /// * `TooLong` - Longer than 32 characters
    /// * `InvalidCharacters` - Contains anything but digits, spaces, `+ - ( )`
    pub fn new(phone: String) -> Result<Self, PhoneError> {
        let phone = phone.trim().to_string();
        if phone.is_empty() {
            return Err(PhoneError::Empty);
        }
        if phone.len() > Self::MAX_LENGTH {
            return Err(PhoneError::TooLong {
                max: Self::MAX_LENGTH,
                actual: phone.len(),
            });
        }
        if !phone
            .chars()
            .all(|c| c.is_ascii_digit() || matches!(c, ' ' | '+' | '-' | '(' | ')'))
        {
            return Err(PhoneError::InvalidCharacters);
        }
        if !phone.chars().any(|c| c.is_ascii_digit()) {
            return Err(PhoneError::Empty);
        }
        Ok(Self(phone))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

/// Display name value type
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DisplayName(String);

impl DisplayName {
    const MAX_LENGTH: usize = 100;

    /// Create a new validated display name.
    ///
    /// # Errors
    /// * `Empty` - Blank after trimming
    /// * `TooLong` - Longer than 100 characters
    pub fn new(name: String) -> Result<Self, NameError> {
        let name = name.trim().to_string();
        let length = name.chars().count();
        if length == 0 {
            Err(NameError::Empty)
        } else if length > Self::MAX_LENGTH {
            Err(NameError::TooLong {
                max: Self::MAX_LENGTH,
                actual: length,
            })
        } else {
            Ok(Self(name))
        }
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

/// Plaintext password as received from the client.
///
/// Never persisted and never printed; `Debug` output is redacted.
#[derive(Debug)]
pub struct Password(SecretString);

impl Password {
    /// # Errors
    /// * `Empty` - Zero-length password
    pub fn new(password: String) -> Result<Self, PasswordError> {
        if password.is_empty() {
            return Err(PasswordError::Empty);
        }
        Ok(Self(SecretString::from(password)))
    }

    pub fn expose(&self) -> &str {
        self.0.expose_secret()
    }
}

/// Stored name of an uploaded profile image.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProfileImage(String);

impl ProfileImage {
    /// Generate a unique file name for a fresh upload.
    ///
    /// The name is `<unix millis>-<random hex>` followed by the extension of
    /// the client's file name, if it had one.
    pub fn generate(original_file_name: Option<&str>) -> Self {
        let extension = original_file_name
            .and_then(|name| Path::new(name).extension())
            .and_then(|ext| ext.to_str())
            .filter(|ext| ext.chars().all(|c| c.is_ascii_alphanumeric()))
            .map(|ext| format!(".{}", ext.to_ascii_lowercase()))
            .unwrap_or_default();

        Self(format!(
            "{}-{}{}",
            Utc::now().timestamp_millis(),
            Uuid::new_v4().simple(),
            extension
        ))
    }

    /// Wrap a name read back from storage.
    pub fn from_stored(name: String) -> Self {
        Self(name)
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

/// Raw uploaded image, before it is named and stored.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ImageUpload {
    pub original_file_name: Option<String>,
    pub bytes: Vec<u8>,
}

/// Command to register a new account
#[derive(Debug)]
pub struct SignupCommand {
    pub role: Role,
    pub email: EmailAddress,
    pub phone: PhoneNumber,
    pub name: DisplayName,
    pub password: Password,
    pub profile_image: Option<ImageUpload>,
}

/// Command to authenticate an existing account
#[derive(Debug)]
pub struct LoginCommand {
    pub role: Role,
    pub email: EmailAddress,
    pub password: Password,
}

/// Command to update the caller's profile.
///
/// Only provided fields will be updated.
#[derive(Debug, Default)]
pub struct UpdateProfileCommand {
    pub name: Option<DisplayName>,
    pub profile_image: Option<ImageUpload>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_email_validation() {
        assert!(EmailAddress::new("a@example.com".to_string()).is_ok());
        assert!(matches!(
            EmailAddress::new("not-an-email".to_string()),
            Err(EmailError::InvalidFormat(_))
        ));
    }

    #[test]
    fn test_phone_accepts_common_formats() {
        for phone in ["5550109999", "+1 (555) 010-9999", " 555-0100 "] {
            assert!(PhoneNumber::new(phone.to_string()).is_ok(), "{}", phone);
        }
        assert_eq!(
            PhoneNumber::new(" 555-0100 ".to_string()).unwrap().as_str(),
            "555-0100"
        );
    }

    #[test]
    fn test_phone_rejects_garbage() {
        assert_eq!(PhoneNumber::new("".to_string()), Err(PhoneError::Empty));
        assert_eq!(PhoneNumber::new("+-()".to_string()), Err(PhoneError::Empty));
        assert_eq!(
            PhoneNumber::new("call me".to_string()),
            Err(PhoneError::InvalidCharacters)
        );
        assert!(matches!(
            PhoneNumber::new("1".repeat(40)),
            Err(PhoneError::TooLong { max: 32, actual: 40 })
        ));
    }

    #[test]
    fn test_display_name_validation() {
        assert_eq!(
            DisplayName::new("  Ada  ".to_string()).unwrap().as_str(),
            "Ada"
        );
        assert_eq!(DisplayName::new("   ".to_string()), Err(NameError::Empty));
        assert!(matches!(
            DisplayName::new("x".repeat(101)),
            Err(NameError::TooLong { .. })
        ));
    }

    #[test]
    fn test_password_is_redacted() {
        let password = Password::new("hunter2".to_string()).unwrap();
        assert_eq!(password.expose(), "hunter2");
        assert!(!format!("{:?}", password).contains("hunter2"));
        assert_eq!(Password::new(String::new()).unwrap_err(), PasswordError::Empty);
    }

    #[test]
    fn test_profile_image_keeps_extension() {
        let image = ProfileImage::generate(Some("Avatar.PNG"));
        assert!(image.as_str().ends_with(".png"));

        let (millis, _) = image.as_str().split_once('-').unwrap();
        assert!(millis.parse::<i64>().is_ok());
    }

    #[test]
    fn test_profile_image_names_are_unique() {
        let first = ProfileImage::generate(Some("a.jpg"));
        let second = ProfileImage::generate(Some("a.jpg"));
        assert_ne!(first, second);
    }

    #[test]
    fn test_profile_image_without_extension() {
        assert!(!ProfileImage::generate(None).as_str().contains('.'));
        assert!(!ProfileImage::generate(Some("../../etc/passwd"))
            .as_str()
            .contains('/'));
        assert!(!ProfileImage::generate(Some("evil.p/ng")).as_str().contains('/'));
    }
}
