/// Refresh Token Management
///
/// Handles refresh token generation, storage, validation, and revocation.
/// Refresh tokens are:
/// - 32 random bytes from the OS entropy source, hex encoded (64 chars)
/// - Stored keyed by their SHA-256 digest (the plaintext only lives with the client)
/// - Soft revoked: records are never deleted, `revoked_at` is set instead
/// - Not rotated on use

use chrono::{DateTime, Duration, Utc};
use rand::rngs::OsRng;
use rand::RngCore;
use sha2::{Digest, Sha256};
use uuid::Uuid;

use crate::auth::error::{AuthError, AuthResult};
use crate::store::{Store, StoreError};

const TOKEN_BYTES: usize = 32;

/// Default refresh token lifetime.
pub fn default_refresh_token_ttl() -> Duration {
    Duration::days(60)
}

/// A persisted refresh token
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RefreshTokenRecord {
    /// SHA-256 of the token value, hex encoded
    pub token_hash: String,
    pub user_id: Uuid,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
    pub expires_at: DateTime<Utc>,
    pub revoked_at: Option<DateTime<Utc>>,
}

impl RefreshTokenRecord {
    /// Usable only while unexpired and never revoked
    pub fn is_valid_at(&self, now: DateTime<Utc>) -> bool {
        now < self.expires_at && self.revoked_at.is_none()
    }
}

/// Result of a revoke call
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RevokeOutcome {
    Revoked,
    /// The token had been revoked before; its timestamp was reset to now.
    AlreadyRevoked,
}

/// Generate a new refresh token
///
/// # Errors
/// Returns `AuthError::EntropyUnavailable` if the OS RNG fails
pub fn generate_refresh_token() -> AuthResult<String> {
    let mut bytes = [0u8; TOKEN_BYTES];
    OsRng
        .try_fill_bytes(&mut bytes)
        .map_err(|e| AuthError::EntropyUnavailable(e.to_string()))?;
    Ok(hex::encode(bytes))
}

/// Hash a refresh token using SHA-256
pub fn hash_token(token: &str) -> String {
    let mut hasher = Sha256::new();
    hasher.update(token.as_bytes());
    hex::encode(hasher.finalize())
}

/// Save a refresh token for `user_id`, expiring `ttl` from now
///
/// A key collision is reported as a storage failure; an existing record is
/// never overwritten.
///
/// # Errors
/// * `LifetimeOutOfRange` - `ttl` pushes `expires_at` past the representable range
/// * `Storage` - the store rejects the insert
pub async fn save_refresh_token(
    store: &dyn Store,
    token: &str,
    user_id: Uuid,
    ttl: Duration,
) -> AuthResult<RefreshTokenRecord> {
    let now = Utc::now();
    let expires_at = now
        .checked_add_signed(ttl)
        .ok_or(AuthError::LifetimeOutOfRange)?;
    let record = RefreshTokenRecord {
        token_hash: hash_token(token),
        user_id,
        created_at: now,
        updated_at: now,
        expires_at,
        revoked_at: None,
    };

    store.insert_refresh_token(&record).await.map_err(|e| {
        if let StoreError::Duplicate(_) = e {
            tracing::error!(user_id = %user_id, "Refresh token key collision");
        }
        AuthError::Storage(e)
    })?;

    Ok(record)
}

/// Look up the record for a presented refresh token
///
/// # Errors
/// Returns `AuthError::NotFound` if no record matches. Callers must treat
/// that exactly like a forged token.
pub async fn lookup_refresh_token(store: &dyn Store, token: &str) -> AuthResult<RefreshTokenRecord> {
    store
        .find_refresh_token(&hash_token(token))
        .await?
        .ok_or(AuthError::NotFound)
}

/// Check a looked-up record against the current time
pub fn validate_refresh_token(record: &RefreshTokenRecord) -> bool {
    record.is_valid_at(Utc::now())
}

/// Revoke a refresh token
///
/// Revoking an already revoked token succeeds and moves `revoked_at` to now.
///
/// # Errors
/// Returns `AuthError::NotFound` if the token is unknown
pub async fn revoke_refresh_token(store: &dyn Store, token: &str) -> AuthResult<RevokeOutcome> {
    let previous = store
        .revoke_refresh_token(&hash_token(token), Utc::now())
        .await?
        .ok_or(AuthError::NotFound)?;

    Ok(match previous {
        Some(_) => RevokeOutcome::AlreadyRevoked,
        None => RevokeOutcome::Revoked,
    })
}
