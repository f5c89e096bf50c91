pub mod authenticated_user;

pub use authenticated_user::AuthenticatedUserProvider;
#[cfg(test)]
pub use authenticated_user::MockAuthenticatedUserProvider;
