use std::sync::Arc;

use async_trait::async_trait;

use crate::modules::user::domain::{entities::user::User, repositories::UserRepository};
use crate::shared::errors::AppResult;
use crate::shared::infrastructure::memory_store::InMemoryStore;

pub struct InMemoryUserRepository {
    store: Arc<InMemoryStore>,
}

impl InMemoryUserRepository {
    pub fn new(store: Arc<InMemoryStore>) -> Self {
        Self { store }
    }
}

#[async_trait]
impl UserRepository for InMemoryUserRepository {
    async fn find_by_email(&self, email: &str) -> AppResult<Option<User>> {
        Ok(self.store.user_by_email(email))
    }
}
