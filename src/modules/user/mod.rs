pub mod application;
pub mod domain;
pub mod infrastructure;

// Re-exports for easy external access
pub use application::{AuthenticatedUserProvider, UserService};
pub use domain::{User, UserRepository};
pub use infrastructure::{InMemoryUserRepository, UserRepositoryImpl};
