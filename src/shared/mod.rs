// Shared Kernel - Domain Driven Design
// Following Clean Architecture + Hexagonal Architecture patterns

pub mod application;      // Shared application layer patterns
pub mod errors;          // Shared error types
pub mod infrastructure;  // Shared infrastructure (database, in-memory store)
pub mod utils;           // Shared utilities

// Re-exports for convenience
pub use infrastructure::database::{Database, DatabaseConfig, DbPool};
pub use infrastructure::memory_store::InMemoryStore;
