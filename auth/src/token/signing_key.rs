use std::fmt;

use jsonwebtoken::DecodingKey;
use jsonwebtoken::EncodingKey;

use super::errors::SigningKeyError;

/// Process-wide HMAC secret used to sign and check session tokens.
///
/// Built once at startup and passed by reference into `issue` and `verify`.
/// The secret should be at least 256 bits (32 bytes) for HS256.
#[derive(Clone)]
pub struct SigningKey {
    encoding_key: EncodingKey,
    decoding_key: DecodingKey,
}

impl SigningKey {
    /// Build a signing key from raw secret bytes.
    ///
    /// # Errors
    /// * `Empty` - The secret has no bytes
    pub fn from_secret(secret: &[u8]) -> Result<Self, SigningKeyError> {
        if secret.is_empty() {
            return Err(SigningKeyError::Empty);
        }

        Ok(Self {
            encoding_key: EncodingKey::from_secret(secret),
            decoding_key: DecodingKey::from_secret(secret),
        })
    }

    pub(crate) fn encoding_key(&self) -> &EncodingKey {
        &self.encoding_key
    }

    pub(crate) fn decoding_key(&self) -> &DecodingKey {
        &self.decoding_key
    }
}

impl fmt::Debug for SigningKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("SigningKey([REDACTED])")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_secret_rejected() {
        assert!(matches!(
            SigningKey::from_secret(b""),
            Err(SigningKeyError::Empty)
        ));
    }

    #[test]
    fn test_debug_does_not_leak_secret() {
        let key = SigningKey::from_secret(b"super-secret-value").unwrap();
        let printed = format!("{:?}", key);
        assert!(!printed.contains("super-secret-value"));
        assert!(printed.contains("REDACTED"));
    }
}
