use super::dto::MovieDto;
use crate::modules::movie::domain::{entities::movie::Movie, repositories::MovieRepository};
use crate::shared::application::pagination::{PaginatedResult, PaginationParams};
use crate::shared::errors::{AppError, AppResult};
use crate::shared::utils::logger::LogContext;
use crate::{log_debug, log_info, log_warn};
use std::sync::Arc;

pub struct MovieService {
    movie_repo: Arc<dyn MovieRepository>,
}

impl MovieService {
    pub fn new(movie_repo: Arc<dyn MovieRepository>) -> Self {
        Self { movie_repo }
    }

    pub async fn find_all(
        &self,
        title: &str,
        pagination: PaginationParams,
    ) -> AppResult<PaginatedResult<MovieDto>> {
        LogContext::search_operation(title, None);

        let page = self.movie_repo.search_by_title(title, pagination).await?;

        LogContext::search_operation(title, Some(page.len()));
        Ok(page.map(MovieDto::from))
    }

    pub async fn find_by_id(&self, id: i64) -> AppResult<MovieDto> {
        let movie = self
            .movie_repo
            .find_by_id(id)
            .await?
            .ok_or_else(|| AppError::NotFound(format!("Movie with ID {} not found", id)))?;

        Ok(MovieDto::from(movie))
    }

    pub async fn insert(&self, dto: MovieDto) -> AppResult<MovieDto> {
        dto.validate()?;

        let mut movie = Movie::new(dto.title);
        movie.image = dto.image;

        let saved = self.movie_repo.save(&movie).await?;

        log_info!("Created movie {} '{}'", saved.id, saved.title);
        Ok(MovieDto::from(saved))
    }

    pub async fn update(&self, id: i64, dto: MovieDto) -> AppResult<MovieDto> {
        dto.validate()?;

        // Fails with NotFound for unknown ids
        let mut movie = self.movie_repo.get_reference_by_id(id).await?;
        movie.update_details(dto.title, dto.image);

        let updated = self.movie_repo.save(&movie).await?;

        log_info!("Updated movie {}", updated.id);
        Ok(MovieDto::from(updated))
    }

    pub async fn delete(&self, id: i64) -> AppResult<()> {
        if !self.movie_repo.exists_by_id(id).await? {
            return Err(AppError::NotFound(format!("Movie with ID {} not found", id)));
        }

        log_debug!("Deleting movie {}", id);
        match self.movie_repo.delete_by_id(id).await {
            Ok(()) => {
                log_info!("Deleted movie {}", id);
                Ok(())
            }
            Err(AppError::IntegrityConflict(reason)) => {
                log_warn!("Refusing to delete movie {}: {}", id, reason);
                Err(AppError::IntegrityConflict(format!(
                    "Movie with ID {} is still referenced by scores",
                    id
                )))
            }
            Err(e) => Err(e),
        }
    }
}
