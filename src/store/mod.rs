//! Persistence for registered users.
//!
//! Handlers only talk to [`UserStore`]; the server wires in [`PgUserStore`]
//! while tests use [`MemoryUserStore`].

mod memory;
mod postgres;

pub use self::memory::MemoryUserStore;
pub use self::postgres::{PgUserStore, SCHEMA_SQL};

use async_trait::async_trait;
use std::fmt;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum StoreError {
    #[error("user with this email already exists")]
    Duplicate,
    #[error("database error: {0}")]
    Database(#[from] sqlx::Error),
}

/// A registered account. The password is kept exactly as submitted.
#[derive(Clone, PartialEq, Eq)]
pub struct User {
    pub id: i64,
    pub email: String,
    pub password: String,
}

impl fmt::Debug for User {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("User")
            .field("id", &self.id)
            .field("email", &self.email)
            .field("password", &"[REDACTED]")
            .finish()
    }
}

impl fmt::Display for User {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.email)
    }
}

#[async_trait]
pub trait UserStore: Send + Sync {
    /// Whether a user with this email is already registered.
    async fn exists(&self, email: &str) -> Result<bool, StoreError>;

    /// Persist a new user.
    ///
    /// # Errors
    /// Returns [`StoreError::Duplicate`] if the email is already taken.
    async fn insert(&self, email: &str, password: &str) -> Result<User, StoreError>;

    /// Find the user whose email and password both match exactly.
    async fn find_by_credentials(
        &self,
        email: &str,
        password: &str,
    ) -> Result<Option<User>, StoreError>;

    /// Check the backing storage is reachable.
    async fn ping(&self) -> Result<(), StoreError>;
}
