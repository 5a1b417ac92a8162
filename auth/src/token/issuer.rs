use chrono::DateTime;
use chrono::Utc;
use jsonwebtoken::decode;
use jsonwebtoken::decode_header;
use jsonwebtoken::encode;
use jsonwebtoken::errors::ErrorKind;
use jsonwebtoken::Algorithm;
use jsonwebtoken::Header;
use jsonwebtoken::Validation;

use super::claims::IdentityClaim;
use super::claims::TokenPayload;
use super::errors::IssueError;
use super::errors::VerifyError;
use super::signing_key::SigningKey;

const ALGORITHM: Algorithm = Algorithm::HS256;

/// Mint a session token for an identity claim.
///
/// The token carries no expiration; use [`issue_expiring`] to bound its
/// lifetime. Identical claims signed with the same key yield identical tokens.
///
/// # Errors
/// * `EncodingFailed` - Claim serialization or signing failed
pub fn issue(claim: &IdentityClaim, key: &SigningKey) -> Result<String, IssueError> {
    sign(&TokenPayload::from_claim(claim), key)
}

/// Mint a session token that stops verifying after `expires_at`.
///
/// # Errors
/// * `EncodingFailed` - Claim serialization or signing failed
pub fn issue_expiring(
    claim: &IdentityClaim,
    key: &SigningKey,
    expires_at: DateTime<Utc>,
) -> Result<String, IssueError> {
    let payload = TokenPayload::from_claim(claim).with_expiration(expires_at.timestamp());
    sign(&payload, key)
}

fn sign(payload: &TokenPayload, key: &SigningKey) -> Result<String, IssueError> {
    encode(&Header::new(ALGORITHM), payload, key.encoding_key())
        .map_err(|e| IssueError::EncodingFailed(e.to_string()))
}

/// Check a presented token and recover its identity claim.
///
/// # Arguments
/// * `token` - Raw token as presented by the client, `None` when absent
/// * `key` - Key the token must have been signed with
///
/// # Errors
/// * `MissingToken` - Nothing (or only whitespace) was presented
/// * `InvalidSignature` - Signature does not match header and payload
/// * `Malformed` - Token or payload cannot be decoded
/// * `Expired` - Token carries an expiration in the past
///
/// Everything after the second `.` is the signature, so a stray `.` inside it
/// is a signature mismatch rather than a malformed token.
pub fn verify(token: Option<&str>, key: &SigningKey) -> Result<IdentityClaim, VerifyError> {
    let token = match token.map(str::trim) {
        Some(token) if !token.is_empty() => token,
        _ => return Err(VerifyError::MissingToken),
    };

    let mut segments = token.splitn(3, '.');
    if let (Some(header), Some(payload), Some(signature)) =
        (segments.next(), segments.next(), segments.next())
    {
        if signature.contains('.') {
            return match decode_header(&format!("{}.{}.", header, payload)) {
                Ok(_) => Err(VerifyError::InvalidSignature),
                Err(e) => Err(VerifyError::Malformed(e.to_string())),
            };
        }
    }

    let mut validation = Validation::new(ALGORITHM);
    // Tokens without 'exp' are valid; 'exp' is enforced only when present
    validation.required_spec_claims.clear();
    validation.leeway = 0;

    decode::<TokenPayload>(token, key.decoding_key(), &validation)
        .map(|data| data.claims.into_claim())
        .map_err(|e| match e.kind() {
            ErrorKind::InvalidSignature => VerifyError::InvalidSignature,
            ErrorKind::ExpiredSignature => VerifyError::Expired,
            _ => VerifyError::Malformed(e.to_string()),
        })
}
