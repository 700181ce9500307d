use actix_web::{web, HttpResponse};
use serde::Deserialize;
use uuid::Uuid;

use crate::auth::AuthError;
use crate::error::{AppError, ErrorContext, ValidationError};
use crate::middleware::AuthenticatedUser;
use crate::store::{Store, StoreError};
use crate::validators::clean_chirp;

#[derive(Deserialize)]
pub struct CreateChirpRequest {
    pub body: String,
}

/// POST /api/chirps
///
/// **Requires a valid access token**; the author is taken from the token,
/// never from the request body.
///
/// # Errors
/// - 400: Empty or over-long chirp
/// - 401: Missing or invalid token (handled by middleware), or the token's
///   user no longer exists
pub async fn create_chirp(
    user: web::ReqData<AuthenticatedUser>,
    form: web::Json<CreateChirpRequest>,
    store: web::Data<dyn Store>,
) -> Result<HttpResponse, AppError> {
    let context = ErrorContext::new("chirp_creation").with_user_id(user.user_id.to_string());

    let body = clean_chirp(&form.body)?;
    let chirp = store
        .insert_chirp(user.user_id, &body)
        .await
        .map_err(|e| match e {
            // The token is genuine but its user has been deleted.
            StoreError::MissingReference(_) => AppError::from(AuthError::UnknownSubject),
            other => AppError::from(other),
        })?;

    tracing::info!(
        request_id = %context.request_id,
        operation = %context.operation,
        user_id = ?context.user_id,
        chirp_id = %chirp.id,
        "Chirp created"
    );

    Ok(HttpResponse::Created().json(chirp))
}

/// GET /api/chirps
pub async fn list_chirps(store: web::Data<dyn Store>) -> Result<HttpResponse, AppError> {
    let chirps = store.list_chirps().await?;
    Ok(HttpResponse::Ok().json(chirps))
}

/// GET /api/chirps/{chirp_id}
pub async fn get_chirp(
    path: web::Path<String>,
    store: web::Data<dyn Store>,
) -> Result<HttpResponse, AppError> {
    let chirp_id = Uuid::parse_str(&path.into_inner())
        .map_err(|_| ValidationError::InvalidFormat("chirp id".to_string()))?;

    let chirp = store
        .find_chirp(chirp_id)
        .await?
        .ok_or_else(|| AppError::NotFound("Chirp not found".to_string()))?;

    Ok(HttpResponse::Ok().json(chirp))
}
