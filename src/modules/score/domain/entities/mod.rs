pub mod score;

pub use score::{Score, ScoreKey};
