use super::{StoreError, User, UserStore};
use async_trait::async_trait;
use std::collections::HashMap;
use tokio::sync::RwLock;

/// Process-local store keyed by email.
#[derive(Debug, Default)]
pub struct MemoryUserStore {
    users: RwLock<HashMap<String, User>>,
}

impl MemoryUserStore {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    pub async fn len(&self) -> usize {
        self.users.read().await.len()
    }

    pub async fn is_empty(&self) -> bool {
        self.users.read().await.is_empty()
    }
}

#[async_trait]
impl UserStore for MemoryUserStore {
    async fn exists(&self, email: &str) -> Result<bool, StoreError> {
        Ok(self.users.read().await.contains_key(email))
    }

    async fn insert(&self, email: &str, password: &str) -> Result<User, StoreError> {
        let mut users = self.users.write().await;
        if users.contains_key(email) {
            return Err(StoreError::Duplicate);
        }

        let id = i64::try_from(users.len()).unwrap_or(i64::MAX - 1) + 1;
        let user = User {
            id,
            email: email.to_string(),
            password: password.to_string(),
        };
        users.insert(user.email.clone(), user.clone());

        Ok(user)
    }

    async fn find_by_credentials(
        &self,
        email: &str,
        password: &str,
    ) -> Result<Option<User>, StoreError> {
        Ok(self
            .users
            .read()
            .await
            .get(email)
            .filter(|user| user.password == password)
            .cloned())
    }

    async fn ping(&self) -> Result<(), StoreError> {
        Ok(())
    }
}
