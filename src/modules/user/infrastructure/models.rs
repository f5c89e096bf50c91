use crate::modules::user::domain::entities::User;
use crate::schema::tb_user;
use diesel::prelude::*;

#[derive(Queryable, Selectable, Identifiable, Debug, Clone)]
#[diesel(table_name = tb_user)]
pub struct UserModel {
    pub id: i64,
    pub name: String,
    pub email: String,
}

impl From<UserModel> for User {
    fn from(model: UserModel) -> Self {
        User::new(model.id, model.name, model.email)
    }
}
