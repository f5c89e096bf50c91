use std::sync::Arc;

use async_trait::async_trait;

use crate::modules::movie::domain::{entities::movie::Movie, repositories::MovieRepository};
use crate::shared::application::pagination::{PaginatedResult, PaginationParams};
use crate::shared::errors::{AppError, AppResult};
use crate::shared::infrastructure::memory_store::InMemoryStore;

/// `MovieRepository` over the shared in-memory store
pub struct InMemoryMovieRepository {
    store: Arc<InMemoryStore>,
}

impl InMemoryMovieRepository {
    pub fn new(store: Arc<InMemoryStore>) -> Self {
        Self { store }
    }
}

#[async_trait]
impl MovieRepository for InMemoryMovieRepository {
    async fn find_by_id(&self, id: i64) -> AppResult<Option<Movie>> {
        Ok(self.store.movie(id))
    }

    async fn search_by_title(
        &self,
        title: &str,
        pagination: PaginationParams,
    ) -> AppResult<PaginatedResult<Movie>> {
        let needle = title.to_lowercase();
        let matches: Vec<Movie> = self
            .store
            .movies()
            .into_iter()
            .filter(|m| m.title.to_lowercase().contains(&needle))
            .collect();

        let total = matches.len() as u64;
        let items = matches
            .into_iter()
            .skip(pagination.offset() as usize)
            .take(pagination.limit() as usize)
            .collect();

        Ok(PaginatedResult::new(items, total, &pagination))
    }

    async fn save(&self, movie: &Movie) -> AppResult<Movie> {
        self.store.put_movie(movie)
    }

    async fn get_reference_by_id(&self, id: i64) -> AppResult<Movie> {
        self.store
            .movie(id)
            .ok_or_else(|| AppError::NotFound(format!("Movie with ID {} not found", id)))
    }

    async fn exists_by_id(&self, id: i64) -> AppResult<bool> {
        Ok(self.store.contains_movie(id))
    }

    async fn delete_by_id(&self, id: i64) -> AppResult<()> {
        self.store.remove_movie(id)
    }
}
