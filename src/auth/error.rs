/// Authentication error taxonomy
///
/// Every failure the authentication core can produce. Variants fall into
/// three classes (see [`AuthErrorKind`]) which decide how the failure is
/// logged and what the client gets to see.

use thiserror::Error;

use crate::store::StoreError;

pub type AuthResult<T> = Result<T, AuthError>;

#[derive(Debug, Error)]
pub enum AuthError {
    #[error("password hashing failed: {0}")]
    Hashing(String),
    #[error("stored password verifier has an invalid format")]
    InvalidVerifierFormat,
    #[error("access token is malformed")]
    MalformedToken,
    #[error("access token signature does not match")]
    BadSignature,
    #[error("access token has expired")]
    Expired,
    #[error("access token issuer is not accepted")]
    WrongIssuer,
    #[error("access token subject is not a valid user id")]
    InvalidSubject,
    #[error("access token subject does not exist")]
    UnknownSubject,
    #[error("authorization token is missing")]
    MissingToken,
    #[error("refresh token not found")]
    NotFound,
    #[error("email or password did not match")]
    InvalidCredentials,
    #[error("refresh token is expired or revoked")]
    RefreshTokenRejected,
    #[error("entropy source unavailable: {0}")]
    EntropyUnavailable(String),
    #[error("token signing failed: {0}")]
    Signing(String),
    #[error("token lifetime out of range")]
    LifetimeOutOfRange,
    #[error("storage error: {0}")]
    Storage(#[from] StoreError),
}

/// How a failure is surfaced.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AuthErrorKind {
    /// Unparseable or absent client input.
    Input,
    /// The credential was understood but did not check out.
    Authentication,
    /// Something on our side broke.
    Infrastructure,
}

impl AuthError {
    pub fn kind(&self) -> AuthErrorKind {
        match self {
            AuthError::InvalidVerifierFormat
            | AuthError::MalformedToken
            | AuthError::MissingToken => AuthErrorKind::Input,
            AuthError::BadSignature
            | AuthError::Expired
            | AuthError::WrongIssuer
            | AuthError::InvalidSubject
            | AuthError::UnknownSubject
            | AuthError::NotFound
            | AuthError::InvalidCredentials
            | AuthError::RefreshTokenRejected => AuthErrorKind::Authentication,
            AuthError::Hashing(_)
            | AuthError::EntropyUnavailable(_)
            | AuthError::Signing(_)
            | AuthError::LifetimeOutOfRange
            | AuthError::Storage(_) => AuthErrorKind::Infrastructure,
        }
    }

    /// Message shown to clients.
    ///
    /// Distinct checks collapse into the same text so a caller cannot tell
    /// a wrong password from an unknown account, or an expired token from
    /// a revoked one.
    pub fn public_message(&self) -> &'static str {
        match self {
            AuthError::InvalidCredentials | AuthError::InvalidVerifierFormat => {
                "Incorrect email or password"
            }
            AuthError::MissingToken => "Missing authorization token",
            AuthError::MalformedToken
            | AuthError::BadSignature
            | AuthError::Expired
            | AuthError::WrongIssuer
            | AuthError::InvalidSubject
            | AuthError::UnknownSubject
            | AuthError::NotFound
            | AuthError::RefreshTokenRejected => "Invalid authorization token",
            AuthError::Hashing(_)
            | AuthError::EntropyUnavailable(_)
            | AuthError::Signing(_)
            | AuthError::LifetimeOutOfRange
            | AuthError::Storage(_) => "Internal server error",
        }
    }
}
