pub mod entities;
pub mod repositories;

pub use entities::user::User;
pub use repositories::user_repository::UserRepository;
