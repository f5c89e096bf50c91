pub mod ports;
pub mod service;

pub use ports::AuthenticatedUserProvider;
pub use service::UserService;
