/// Application Error Handling
///
/// One error type for every handler. It maps onto HTTP responses with a
/// `{ "error": "..." }` body and decides how loudly each failure is logged:
/// 1. Input problems (validation, malformed credentials) - `debug`/`warn`
/// 2. Authentication failures - `warn`, with the exact reason kept server-side
/// 3. Infrastructure failures - `error`, with a generic message to the client

use actix_web::{error::ResponseError, http::StatusCode, HttpResponse};
use thiserror::Error;

use crate::auth::{AuthError, AuthErrorKind};
use crate::store::StoreError;

// ============================================================================
// 1. DOMAIN-SPECIFIC ERROR TYPES
// ============================================================================

/// Validation errors for input data
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum ValidationError {
    #[error("{0} is empty")]
    EmptyField(String),
    #[error("{0} is too long (maximum {1} characters)")]
    TooLong(String, usize),
    #[error("{0} has invalid format")]
    InvalidFormat(String),
}

// ============================================================================
// 2. UNIFIED APPLICATION ERROR TYPE
// ============================================================================

#[derive(Debug, Error)]
pub enum AppError {
    #[error(transparent)]
    Validation(#[from] ValidationError),
    #[error(transparent)]
    Auth(#[from] AuthError),
    #[error(transparent)]
    Store(#[from] StoreError),
    #[error("conflict: {0}")]
    Conflict(String),
    #[error("not found: {0}")]
    NotFound(String),
    #[error("forbidden: {0}")]
    Forbidden(String),
}

// ============================================================================
// 3. HTTP RESPONSE MAPPING
// ============================================================================

/// Error body returned to clients
#[derive(Debug, serde::Serialize, serde::Deserialize)]
pub struct ErrorResponse {
    pub error: String,
}

impl AppError {
    /// Message safe to show to clients
    pub fn public_message(&self) -> String {
        match self {
            AppError::Validation(e) => e.to_string(),
            AppError::Auth(e) => e.public_message().to_string(),
            AppError::Store(_) => "Internal server error".to_string(),
            AppError::Conflict(msg) | AppError::NotFound(msg) | AppError::Forbidden(msg) => {
                msg.clone()
            }
        }
    }

    fn log(&self, context: &ErrorContext) {
        let request_id = context.request_id.as_str();
        match self {
            AppError::Validation(e) => {
                tracing::debug!(request_id = request_id, error = %e, "Validation error");
            }
            AppError::Auth(e) => match e.kind() {
                AuthErrorKind::Input => {
                    tracing::debug!(request_id = request_id, error = %e, "Rejected credential input");
                }
                AuthErrorKind::Authentication => {
                    tracing::warn!(request_id = request_id, error = %e, "Authentication failed");
                }
                AuthErrorKind::Infrastructure => {
                    tracing::error!(request_id = request_id, error = %e, "Authentication infrastructure error");
                }
            },
            AppError::Store(e) => {
                tracing::error!(request_id = request_id, error = %e, "Storage error");
            }
            AppError::Conflict(_) | AppError::NotFound(_) | AppError::Forbidden(_) => {
                tracing::info!(request_id = request_id, error = %self, "Request refused");
            }
        }
    }
}

/// Implement ResponseError for Actix-web integration
impl ResponseError for AppError {
    fn status_code(&self) -> StatusCode {
        match self {
            AppError::Validation(_) => StatusCode::BAD_REQUEST,
            AppError::Auth(e) => match e.kind() {
                AuthErrorKind::Infrastructure => StatusCode::INTERNAL_SERVER_ERROR,
                _ => StatusCode::UNAUTHORIZED,
            },
            AppError::Store(_) => StatusCode::INTERNAL_SERVER_ERROR,
            AppError::Conflict(_) => StatusCode::CONFLICT,
            AppError::NotFound(_) => StatusCode::NOT_FOUND,
            AppError::Forbidden(_) => StatusCode::FORBIDDEN,
        }
    }

    fn error_response(&self) -> HttpResponse {
        let context = ErrorContext::new("error_response");
        self.log(&context);

        HttpResponse::build(self.status_code()).json(ErrorResponse {
            error: self.public_message(),
        })
    }
}

// ============================================================================
// 4. ERROR CONTEXT ENRICHMENT
// ============================================================================

/// Correlates the log lines of one operation
#[derive(Debug, Clone)]
pub struct ErrorContext {
    pub request_id: String,
    pub user_id: Option<String>,
    pub operation: String,
}

impl ErrorContext {
    pub fn new(operation: impl Into<String>) -> Self {
        Self {
            request_id: uuid::Uuid::new_v4().to_string(),
            user_id: None,
            operation: operation.into(),
        }
    }

    pub fn with_user_id(mut self, user_id: String) -> Self {
        self.user_id = Some(user_id);
        self
    }
}
