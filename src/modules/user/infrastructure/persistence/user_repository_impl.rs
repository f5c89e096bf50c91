use std::sync::Arc;

use async_trait::async_trait;
use diesel::prelude::*;
use tokio::task;

use crate::modules::user::domain::{entities::user::User, repositories::UserRepository};
use crate::modules::user::infrastructure::models::UserModel;
use crate::schema::tb_user;
use crate::shared::errors::AppResult;
use crate::shared::infrastructure::database::Database;

pub struct UserRepositoryImpl {
    db: Arc<Database>,
}

impl UserRepositoryImpl {
    pub fn new(db: Arc<Database>) -> Self {
        Self { db }
    }
}

#[async_trait]
impl UserRepository for UserRepositoryImpl {
    async fn find_by_email(&self, email: &str) -> AppResult<Option<User>> {
        let db = Arc::clone(&self.db);
        let email = email.to_string();

        task::spawn_blocking(move || -> AppResult<Option<User>> {
            let mut conn = db.get_connection()?;
            let model = tb_user::table
                .filter(tb_user::email.eq(&email))
                .select(UserModel::as_select())
                .first::<UserModel>(&mut conn)
                .optional()?;
            Ok(model.map(User::from))
        })
        .await?
    }
}
