use async_trait::async_trait;

use crate::modules::user::domain::entities::User;
use crate::shared::errors::AppResult;

/// Capability to resolve the user behind the current request.
/// The session itself is established upstream.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait AuthenticatedUserProvider: Send + Sync {
    async fn authenticated(&self) -> AppResult<User>;
}
