pub mod memory;
pub mod models;
pub mod persistence;

pub use memory::InMemoryScoreRepository;
pub use persistence::ScoreRepositoryImpl;
