/// Persistence seam
///
/// Handlers and the authentication core only talk to storage through the
/// [`Store`] trait. `PgStore` is the production backend; `MemoryStore`
/// keeps everything in process for tests and local runs.

mod memory;
mod postgres;

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use serde::Serialize;
use thiserror::Error;
use uuid::Uuid;

use crate::auth::RefreshTokenRecord;

pub use memory::MemoryStore;
pub use postgres::PgStore;

#[derive(Debug, Error)]
pub enum StoreError {
    /// A unique key already exists.
    #[error("duplicate entry: {0}")]
    Duplicate(String),
    /// A foreign key points at a row that does not exist.
    #[error("missing reference: {0}")]
    MissingReference(String),
    #[error("database error: {0}")]
    Database(sqlx::Error),
    #[error("store unavailable: {0}")]
    Unavailable(String),
}

impl From<sqlx::Error> for StoreError {
    fn from(err: sqlx::Error) -> Self {
        if let sqlx::Error::Database(db_err) = &err {
            match db_err.code().as_deref() {
                // unique_violation
                Some("23505") => return StoreError::Duplicate(db_err.message().to_string()),
                // foreign_key_violation
                Some("23503") => {
                    return StoreError::MissingReference(db_err.message().to_string())
                }
                _ => {}
            }
        }
        StoreError::Database(err)
    }
}

pub type StoreResult<T> = Result<T, StoreError>;

#[derive(Debug, Clone, PartialEq, Eq, sqlx::FromRow)]
pub struct User {
    pub id: Uuid,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
    pub email: String,
    pub hashed_password: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, sqlx::FromRow)]
pub struct Chirp {
    pub id: Uuid,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
    pub body: String,
    pub user_id: Uuid,
}

#[async_trait]
pub trait Store: Send + Sync {
    /// Fails with `StoreError::Duplicate` if the email is taken.
    async fn insert_user(&self, email: &str, hashed_password: &str) -> StoreResult<User>;

    async fn find_user_by_email(&self, email: &str) -> StoreResult<Option<User>>;

    /// Removes every user together with their refresh tokens and chirps.
    async fn delete_all_users(&self) -> StoreResult<u64>;

    /// Fails with `StoreError::Duplicate` if the token hash already exists.
    async fn insert_refresh_token(&self, record: &RefreshTokenRecord) -> StoreResult<()>;

    async fn find_refresh_token(&self, token_hash: &str) -> StoreResult<Option<RefreshTokenRecord>>;

    /// Sets `revoked_at` to `at`.
    ///
    /// Returns `None` if the token is unknown, otherwise the `revoked_at`
    /// value the record had before this call.
    async fn revoke_refresh_token(
        &self,
        token_hash: &str,
        at: DateTime<Utc>,
    ) -> StoreResult<Option<Option<DateTime<Utc>>>>;

    /// Fails with `StoreError::MissingReference` if the user does not exist.
    async fn insert_chirp(&self, user_id: Uuid, body: &str) -> StoreResult<Chirp>;

    /// Oldest first.
    async fn list_chirps(&self) -> StoreResult<Vec<Chirp>>;

    async fn find_chirp(&self, id: Uuid) -> StoreResult<Option<Chirp>>;
}
