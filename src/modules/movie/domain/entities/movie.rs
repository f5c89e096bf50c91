use serde::{Deserialize, Serialize};

use crate::modules::score::domain::entities::Score;

/// Id carried by a movie that has not been persisted yet
pub const UNSAVED_ID: i64 = 0;

/// Movie aggregate root. Owns its score set and the derived rating.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Movie {
    pub id: i64,
    pub title: String,
    /// Mean of `scores`; `None` while the movie has no scores
    pub score: Option<f64>,
    pub count: i32,
    pub image: Option<String>,
    #[serde(default)]
    pub scores: Vec<Score>,
}

impl Movie {
    pub fn new(title: String) -> Self {
        Self {
            id: UNSAVED_ID,
            title,
            score: None,
            count: 0,
            image: None,
            scores: Vec::new(),
        }
    }

    pub fn is_new(&self) -> bool {
        self.id == UNSAVED_ID
    }

    /// Overwrite the user-editable fields. The rating aggregate is left alone.
    pub fn update_details(&mut self, title: String, image: Option<String>) {
        self.title = title;
        self.image = image;
    }

    /// Record `value` for `user_id`, replacing that user's previous score.
    /// Returns `true` when an existing score was overwritten.
    pub fn upsert_score(&mut self, user_id: i64, value: f64) -> bool {
        let movie_id = self.id;
        let replaced = match self
            .scores
            .iter_mut()
            .find(|s| s.belongs_to(movie_id, user_id))
        {
            Some(existing) => {
                existing.value = value;
                true
            }
            None => {
                self.scores.push(Score::new(movie_id, user_id, value));
                false
            }
        };

        self.recompute_aggregate();
        replaced
    }

    /// Full recomputation over the score set
    pub fn recompute_aggregate(&mut self) {
        self.count = self.scores.len() as i32;
        self.score = mean(&self.scores);
    }
}

fn mean(scores: &[Score]) -> Option<f64> {
    if scores.is_empty() {
        return None;
    }
    let sum: f64 = scores.iter().map(|s| s.value).sum();
    Some(sum / scores.len() as f64)
}
