use std::collections::HashMap;
use std::sync::{Mutex, MutexGuard};

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use uuid::Uuid;

use crate::auth::RefreshTokenRecord;
use crate::store::{Chirp, Store, StoreError, StoreResult, User};

#[derive(Default)]
struct Tables {
    users: HashMap<Uuid, User>,
    refresh_tokens: HashMap<String, RefreshTokenRecord>,
    chirps: Vec<Chirp>,
}

/// In-process store with the same uniqueness and cascade rules as the
/// Postgres schema.
#[derive(Default)]
pub struct MemoryStore {
    tables: Mutex<Tables>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    fn lock(&self) -> StoreResult<MutexGuard<'_, Tables>> {
        self.tables
            .lock()
            .map_err(|_| StoreError::Unavailable("memory store lock poisoned".to_string()))
    }
}

#[async_trait]
impl Store for MemoryStore {
    async fn insert_user(&self, email: &str, hashed_password: &str) -> StoreResult<User> {
        let mut tables = self.lock()?;
        if tables.users.values().any(|u| u.email == email) {
            return Err(StoreError::Duplicate(format!("users.email = {}", email)));
        }

        let now = Utc::now();
        let user = User {
            id: Uuid::new_v4(),
            created_at: now,
            updated_at: now,
            email: email.to_string(),
            hashed_password: hashed_password.to_string(),
        };
        tables.users.insert(user.id, user.clone());
        Ok(user)
    }

    async fn find_user_by_email(&self, email: &str) -> StoreResult<Option<User>> {
        let tables = self.lock()?;
        Ok(tables.users.values().find(|u| u.email == email).cloned())
    }

    async fn delete_all_users(&self) -> StoreResult<u64> {
        let mut tables = self.lock()?;
        let removed = tables.users.len() as u64;
        tables.users.clear();
        tables.refresh_tokens.clear();
        tables.chirps.clear();
        Ok(removed)
    }

    async fn insert_refresh_token(&self, record: &RefreshTokenRecord) -> StoreResult<()> {
        let mut tables = self.lock()?;
        if !tables.users.contains_key(&record.user_id) {
            return Err(StoreError::MissingReference(format!(
                "refresh_tokens.user_id references missing user {}",
                record.user_id
            )));
        }
        if tables.refresh_tokens.contains_key(&record.token_hash) {
            return Err(StoreError::Duplicate("refresh_tokens.token_hash".to_string()));
        }
        tables
            .refresh_tokens
            .insert(record.token_hash.clone(), record.clone());
        Ok(())
    }

    async fn find_refresh_token(&self, token_hash: &str) -> StoreResult<Option<RefreshTokenRecord>> {
        let tables = self.lock()?;
        Ok(tables.refresh_tokens.get(token_hash).cloned())
    }

    async fn revoke_refresh_token(
        &self,
        token_hash: &str,
        at: DateTime<Utc>,
    ) -> StoreResult<Option<Option<DateTime<Utc>>>> {
        let mut tables = self.lock()?;
        Ok(tables.refresh_tokens.get_mut(token_hash).map(|record| {
            let previous = record.revoked_at.replace(at);
            record.updated_at = at;
            previous
        }))
    }

    async fn insert_chirp(&self, user_id: Uuid, body: &str) -> StoreResult<Chirp> {
        let mut tables = self.lock()?;
        if !tables.users.contains_key(&user_id) {
            return Err(StoreError::MissingReference(format!(
                "chirps.user_id references missing user {}",
                user_id
            )));
        }

        let now = Utc::now();
        let chirp = Chirp {
            id: Uuid::new_v4(),
            created_at: now,
            updated_at: now,
            body: body.to_string(),
            user_id,
        };
        tables.chirps.push(chirp.clone());
        Ok(chirp)
    }

    async fn list_chirps(&self) -> StoreResult<Vec<Chirp>> {
        let tables = self.lock()?;
        let mut chirps = tables.chirps.clone();
        chirps.sort_by_key(|c| c.created_at);
        Ok(chirps)
    }

    async fn find_chirp(&self, id: Uuid) -> StoreResult<Option<Chirp>> {
        let tables = self.lock()?;
        Ok(tables.chirps.iter().find(|c| c.id == id).cloned())
    }
}
