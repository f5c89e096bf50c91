use super::super::entities::score::Score;
use crate::shared::errors::AppResult;
use async_trait::async_trait;

#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait ScoreRepository: Send + Sync {
    /// Upsert every score on its (movie, user) key and flush immediately.
    ///
    /// Each touched movie is locked for the duration and its `score`/`count`
    /// are rewritten from the full stored score set in the same unit of work.
    /// Fails with `NotFound` for an unknown movie and writes nothing then.
    async fn save_all_and_flush(&self, scores: &[Score]) -> AppResult<Vec<Score>>;
}
