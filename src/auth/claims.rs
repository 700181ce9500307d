/// JWT Claims structure
///
/// The payload of an access token: registered claims only (RFC 7519).

use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::auth::error::{AuthError, AuthResult};

/// Issuer embedded in, and demanded of, every access token.
pub const ISSUER: &str = "chirpy";

/// JWT Claims for access tokens
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq, Eq)]
pub struct Claims {
    /// Issuer
    pub iss: String,
    /// Subject (user ID as UUID string)
    pub sub: String,
    /// Issued at (Unix timestamp)
    pub iat: i64,
    /// Expiration time (Unix timestamp)
    pub exp: i64,
}

impl Claims {
    /// Create claims for `user_id`, valid from `now` for `ttl`
    ///
    /// # Errors
    /// Returns `AuthError::LifetimeOutOfRange` if `now + ttl` overflows
    pub fn new(
        user_id: Uuid,
        now: chrono::DateTime<chrono::Utc>,
        ttl: chrono::Duration,
    ) -> AuthResult<Self> {
        let exp = now
            .checked_add_signed(ttl)
            .ok_or(AuthError::LifetimeOutOfRange)?;

        Ok(Self {
            iss: ISSUER.to_string(),
            sub: user_id.to_string(),
            iat: now.timestamp(),
            exp: exp.timestamp(),
        })
    }

    /// Extract user ID from claims
    ///
    /// # Errors
    /// Returns `AuthError::InvalidSubject` if the subject is not a UUID
    pub fn user_id(&self) -> AuthResult<Uuid> {
        Uuid::parse_str(&self.sub).map_err(|_| AuthError::InvalidSubject)
    }

    /// Expired once `now` reaches `exp`, after allowing `leeway_seconds`
    pub fn is_expired_at(&self, now: i64, leeway_seconds: i64) -> bool {
        now >= self.exp.saturating_add(leeway_seconds)
    }
}
