pub mod claims;
pub mod errors;
pub mod issuer;
pub mod signing_key;

pub use claims::IdentityClaim;
pub use claims::Role;
pub use errors::IssueError;
pub use errors::RoleError;
pub use errors::SigningKeyError;
pub use errors::VerifyError;
pub use issuer::issue;
pub use issuer::issue_expiring;
pub use issuer::verify;
pub use signing_key::SigningKey;
