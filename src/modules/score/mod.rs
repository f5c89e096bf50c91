pub mod application;
pub mod domain;
pub mod infrastructure;

// Re-exports for easy external access
pub use application::{ScoreDto, ScoreService};
pub use domain::{Score, ScoreKey, ScoreRepository};
pub use infrastructure::{InMemoryScoreRepository, ScoreRepositoryImpl};
