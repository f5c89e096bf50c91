use serde::{Deserialize, Serialize};

use crate::shared::errors::AppResult;
use crate::shared::utils::Validator;

/// A user's rating submission for one movie
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ScoreDto {
    pub movie_id: i64,
    pub score: f64,
}

impl ScoreDto {
    pub fn new(movie_id: i64, score: f64) -> Self {
        Self { movie_id, score }
    }

    pub fn validate(&self) -> AppResult<()> {
        Validator::validate_score(self.score)
    }
}
