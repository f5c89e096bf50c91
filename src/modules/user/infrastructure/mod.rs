pub mod memory;
pub mod models;
pub mod persistence;

pub use memory::InMemoryUserRepository;
pub use persistence::UserRepositoryImpl;
