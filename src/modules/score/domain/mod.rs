pub mod entities;
pub mod repositories;

pub use entities::score::{Score, ScoreKey};
pub use repositories::score_repository::ScoreRepository;
