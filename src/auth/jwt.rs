/// JWT Token Generation and Validation
///
/// Access tokens are HS256-signed JWTs. Both directions take the signing
/// secret as an explicit argument; nothing here reads global configuration.

use chrono::{Duration, Utc};
use jsonwebtoken::errors::ErrorKind;
use jsonwebtoken::{decode, encode, Algorithm, DecodingKey, EncodingKey, Header, Validation};
use uuid::Uuid;

use crate::auth::claims::{Claims, ISSUER};
use crate::auth::error::{AuthError, AuthResult};

/// Generate a new access token for a user
///
/// # Arguments
/// * `user_id` - User's UUID, becomes the `sub` claim
/// * `secret` - HMAC signing secret
/// * `ttl` - Lifetime from now; negative values yield an already expired token
///
/// # Errors
/// * `LifetimeOutOfRange` - `ttl` pushes `exp` past the representable range
/// * `Signing` - the claims cannot be encoded
pub fn issue_access_token(user_id: Uuid, secret: &str, ttl: Duration) -> AuthResult<String> {
    let claims = Claims::new(user_id, Utc::now(), ttl)?;

    encode(
        &Header::new(Algorithm::HS256),
        &claims,
        &EncodingKey::from_secret(secret.as_bytes()),
    )
    .map_err(|e| AuthError::Signing(e.to_string()))
}

/// Validate an access token and return the user it was issued to
///
/// Expiry is checked against the local clock with no grace window.
pub fn validate_access_token(token: &str, secret: &str) -> AuthResult<Uuid> {
    validate_access_token_with_leeway(token, secret, 0)
}

/// Validate an access token, accepting it for `leeway_seconds` past `exp`
///
/// # Errors
/// * `MalformedToken` - not a decodable JWT with the expected claims
/// * `BadSignature` - MAC does not match `secret`
/// * `WrongIssuer` - `iss` is not `"chirpy"`
/// * `Expired` - `now >= exp + leeway_seconds`
/// * `InvalidSubject` - `sub` is not a UUID
pub fn validate_access_token_with_leeway(
    token: &str,
    secret: &str,
    leeway_seconds: i64,
) -> AuthResult<Uuid> {
    let mut validation = Validation::new(Algorithm::HS256);
    validation.set_issuer(&[ISSUER]);
    validation.set_required_spec_claims(&["exp", "iss", "sub"]);
    // Expiry is evaluated below so that `exp == now` counts as expired.
    validation.validate_exp = false;
    validation.leeway = 0;

    let claims = decode::<Claims>(
        token,
        &DecodingKey::from_secret(secret.as_bytes()),
        &validation,
    )
    .map(|data| data.claims)
    .map_err(|e| {
        let err = match e.kind() {
            ErrorKind::InvalidSignature => AuthError::BadSignature,
            ErrorKind::InvalidIssuer => AuthError::WrongIssuer,
            ErrorKind::ExpiredSignature => AuthError::Expired,
            _ => AuthError::MalformedToken,
        };
        tracing::debug!(error = %e, "JWT decoding rejected token");
        err
    })?;

    if claims.is_expired_at(Utc::now().timestamp(), leeway_seconds) {
        return Err(AuthError::Expired);
    }

    claims.user_id()
}
