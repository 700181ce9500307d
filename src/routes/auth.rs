/// Authentication Routes
///
/// Login, access token refresh, and refresh token revocation.

use actix_web::{web, HttpRequest, HttpResponse};
use chrono::{DateTime, Utc};
use lazy_static::lazy_static;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::auth::{
    extract_bearer, generate_refresh_token, hash_password, issue_access_token,
    lookup_refresh_token, revoke_refresh_token, save_refresh_token, validate_refresh_token,
    verify_password, AuthError, RevokeOutcome,
};
use crate::configuration::JwtSettings;
use crate::error::{AppError, ErrorContext};
use crate::store::Store;

lazy_static! {
    /// Verified against when the email is unknown, so both failure paths
    /// pay for one argon2 evaluation.
    static ref DUMMY_VERIFIER: Option<String> = match hash_password("chirpy-dummy-password") {
        Ok(verifier) => Some(verifier),
        Err(e) => {
            tracing::error!(error = %e, "Dummy verifier unavailable, unknown-email logins skip hashing");
            None
        }
    };
}

/// User login request
#[derive(Deserialize)]
pub struct LoginRequest {
    pub email: String,
    pub password: String,
}

/// Login response: the user plus an access/refresh token pair
#[derive(Debug, Serialize, Deserialize)]
pub struct LoginResponse {
    pub id: Uuid,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
    pub email: String,
    pub token: String,
    pub refresh_token: String,
}

/// Fresh access token
#[derive(Debug, Serialize, Deserialize)]
pub struct RefreshResponse {
    pub token: String,
}

/// POST /api/login
///
/// # Errors
/// - 401: Unknown email or wrong password (same message for both)
/// - 500: Internal server error
pub async fn login(
    form: web::Json<LoginRequest>,
    store: web::Data<dyn Store>,
    jwt_config: web::Data<JwtSettings>,
) -> Result<HttpResponse, AppError> {
    let context = ErrorContext::new("user_login");

    let user = store.find_user_by_email(form.email.trim()).await?;

    let user = match user {
        Some(user) => {
            if !verify_password(&form.password, &user.hashed_password)? {
                tracing::warn!(
                    request_id = %context.request_id,
                    operation = %context.operation,
                    user_id = %user.id,
                    "Password mismatch"
                );
                return Err(AuthError::InvalidCredentials.into());
            }
            user
        }
        None => {
            if let Some(dummy) = DUMMY_VERIFIER.as_deref() {
                let _ = verify_password(&form.password, dummy);
            }
            tracing::warn!(
                request_id = %context.request_id,
                operation = %context.operation,
                "Login for unknown email"
            );
            return Err(AuthError::InvalidCredentials.into());
        }
    };

    let token = issue_access_token(user.id, &jwt_config.secret, jwt_config.access_token_ttl())?;
    let refresh_token = generate_refresh_token()?;
    save_refresh_token(
        store.get_ref(),
        &refresh_token,
        user.id,
        jwt_config.refresh_token_ttl(),
    )
    .await?;

    tracing::info!(
        request_id = %context.request_id,
        operation = %context.operation,
        user_id = %user.id,
        "User logged in successfully"
    );

    Ok(HttpResponse::Ok().json(LoginResponse {
        id: user.id,
        created_at: user.created_at,
        updated_at: user.updated_at,
        email: user.email,
        token,
        refresh_token,
    }))
}

/// POST /api/refresh
///
/// Mint a new access token from the refresh token in the Authorization
/// header. The refresh token itself is not rotated.
///
/// # Errors
/// - 401: Missing, unknown, expired, or revoked refresh token
/// - 500: Internal server error
pub async fn refresh(
    req: HttpRequest,
    store: web::Data<dyn Store>,
    jwt_config: web::Data<JwtSettings>,
) -> Result<HttpResponse, AppError> {
    let context = ErrorContext::new("token_refresh");

    let presented = extract_bearer(req.headers())?;
    let record = lookup_refresh_token(store.get_ref(), &presented).await?;

    if !validate_refresh_token(&record) {
        tracing::warn!(
            request_id = %context.request_id,
            operation = %context.operation,
            user_id = %record.user_id,
            revoked = record.revoked_at.is_some(),
            "Refresh token no longer usable"
        );
        return Err(AuthError::RefreshTokenRejected.into());
    }

    let token = issue_access_token(
        record.user_id,
        &jwt_config.secret,
        jwt_config.access_token_ttl(),
    )?;

    tracing::info!(
        request_id = %context.request_id,
        operation = %context.operation,
        user_id = %record.user_id,
        "Access token refreshed"
    );

    Ok(HttpResponse::Ok().json(RefreshResponse { token }))
}

/// POST /api/revoke
///
/// Revoke the refresh token in the Authorization header. Revoking twice
/// succeeds.
///
/// # Errors
/// - 401: Missing or unknown refresh token
/// - 500: Internal server error
pub async fn revoke(
    req: HttpRequest,
    store: web::Data<dyn Store>,
) -> Result<HttpResponse, AppError> {
    let context = ErrorContext::new("token_revoke");

    let presented = extract_bearer(req.headers())?;
    let outcome = revoke_refresh_token(store.get_ref(), &presented).await?;

    match outcome {
        RevokeOutcome::Revoked => {
            tracing::info!(
                request_id = %context.request_id,
                operation = %context.operation,
                "Refresh token revoked"
            );
        }
        RevokeOutcome::AlreadyRevoked => {
            tracing::info!(
                request_id = %context.request_id,
                operation = %context.operation,
                "Refresh token was already revoked"
            );
        }
    }

    Ok(HttpResponse::NoContent().finish())
}
