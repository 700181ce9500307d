/// Authentication module
///
/// Handles password hashing, JWT access token issue/validation,
/// refresh token management, and bearer credential extraction.

mod bearer;
mod claims;
mod error;
mod jwt;
mod password;
mod refresh_token;

pub use bearer::extract_bearer;
pub use claims::{Claims, ISSUER};
pub use error::{AuthError, AuthErrorKind, AuthResult};
pub use jwt::issue_access_token;
pub use jwt::validate_access_token;
pub use jwt::validate_access_token_with_leeway;
pub use password::hash_password;
pub use password::verify_password;
pub use refresh_token::default_refresh_token_ttl;
pub use refresh_token::generate_refresh_token;
pub use refresh_token::hash_token;
pub use refresh_token::lookup_refresh_token;
pub use refresh_token::revoke_refresh_token;
pub use refresh_token::save_refresh_token;
pub use refresh_token::validate_refresh_token;
pub use refresh_token::{RefreshTokenRecord, RevokeOutcome};
