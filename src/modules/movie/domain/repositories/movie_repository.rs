use super::super::entities::movie::Movie;
use crate::shared::application::pagination::{PaginatedResult, PaginationParams};
use crate::shared::errors::AppResult;
use async_trait::async_trait;

/// Port for movie persistence. Infrastructure provides the implementation.
///
/// Movies are returned with their score set loaded.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait MovieRepository: Send + Sync {
    async fn find_by_id(&self, id: i64) -> AppResult<Option<Movie>>;

    /// Case-insensitive substring match on the title, ordered by id
    async fn search_by_title(
        &self,
        title: &str,
        pagination: PaginationParams,
    ) -> AppResult<PaginatedResult<Movie>>;

    /// Insert when the movie is new. Otherwise overwrite title and image only;
    /// the rating is maintained by `ScoreRepository::save_all_and_flush`.
    /// Returns the stored state.
    async fn save(&self, movie: &Movie) -> AppResult<Movie>;

    /// Load a movie that is expected to exist; `NotFound` otherwise
    async fn get_reference_by_id(&self, id: i64) -> AppResult<Movie>;

    async fn exists_by_id(&self, id: i64) -> AppResult<bool>;

    /// `IntegrityConflict` when scores still reference the movie
    async fn delete_by_id(&self, id: i64) -> AppResult<()>;
}
