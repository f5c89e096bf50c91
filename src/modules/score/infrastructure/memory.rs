use std::sync::Arc;

use async_trait::async_trait;

use crate::modules::score::domain::{entities::score::Score, repositories::ScoreRepository};
use crate::shared::errors::AppResult;
use crate::shared::infrastructure::memory_store::InMemoryStore;

pub struct InMemoryScoreRepository {
    store: Arc<InMemoryStore>,
}

impl InMemoryScoreRepository {
    pub fn new(store: Arc<InMemoryStore>) -> Self {
        Self { store }
    }
}

#[async_trait]
impl ScoreRepository for InMemoryScoreRepository {
    async fn save_all_and_flush(&self, scores: &[Score]) -> AppResult<Vec<Score>> {
        self.store.put_scores(scores)
    }
}
