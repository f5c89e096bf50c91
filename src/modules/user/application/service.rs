use super::ports::AuthenticatedUserProvider;
use crate::modules::user::domain::{entities::User, repositories::UserRepository};
use crate::shared::errors::{AppError, AppResult};
use crate::{log_debug, log_warn};
use async_trait::async_trait;
use std::sync::Arc;

/// Resolves the logged-in user for one request
pub struct UserService {
    user_repo: Arc<dyn UserRepository>,
    username: String,
}

impl UserService {
    pub fn new(user_repo: Arc<dyn UserRepository>, username: impl Into<String>) -> Self {
        Self {
            user_repo,
            username: username.into(),
        }
    }
}

#[async_trait]
impl AuthenticatedUserProvider for UserService {
    async fn authenticated(&self) -> AppResult<User> {
        log_debug!("Resolving authenticated user '{}'", self.username);

        match self.user_repo.find_by_email(&self.username).await? {
            Some(user) => Ok(user),
            None => {
                log_warn!("Authenticated username '{}' has no account", self.username);
                Err(AppError::Unauthorized(format!(
                    "Invalid user: {}",
                    self.username
                )))
            }
        }
    }
}
