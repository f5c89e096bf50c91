use serde::{Deserialize, Serialize};

/// Composite identity of a score: one row per (movie, user) pair
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ScoreKey {
    pub movie_id: i64,
    pub user_id: i64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Score {
    pub movie_id: i64,
    pub user_id: i64,
    pub value: f64,
}

impl Score {
    pub fn new(movie_id: i64, user_id: i64, value: f64) -> Self {
        Self {
            movie_id,
            user_id,
            value,
        }
    }

    pub fn key(&self) -> ScoreKey {
        ScoreKey {
            movie_id: self.movie_id,
            user_id: self.user_id,
        }
    }

    pub fn belongs_to(&self, movie_id: i64, user_id: i64) -> bool {
        self.movie_id == movie_id && self.user_id == user_id
    }
}
