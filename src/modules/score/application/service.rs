use super::dto::ScoreDto;
use crate::modules::movie::application::dto::MovieDto;
use crate::modules::movie::domain::repositories::MovieRepository;
use crate::modules::score::domain::{entities::Score, repositories::ScoreRepository};
use crate::modules::user::application::ports::AuthenticatedUserProvider;
use crate::shared::errors::{AppError, AppResult};
use crate::{log_debug, log_info};
use std::sync::Arc;

pub struct ScoreService {
    score_repo: Arc<dyn ScoreRepository>,
    movie_repo: Arc<dyn MovieRepository>,
    user_provider: Arc<dyn AuthenticatedUserProvider>,
}

impl ScoreService {
    pub fn new(
        score_repo: Arc<dyn ScoreRepository>,
        movie_repo: Arc<dyn MovieRepository>,
        user_provider: Arc<dyn AuthenticatedUserProvider>,
    ) -> Self {
        Self {
            score_repo,
            movie_repo,
            user_provider,
        }
    }

    /// Record the current user's score and return the movie with its new rating
    pub async fn save_score(&self, dto: ScoreDto) -> AppResult<MovieDto> {
        dto.validate()?;

        let user = self.user_provider.authenticated().await?;

        // Nothing is written before the movie is known to exist
        if !self.movie_repo.exists_by_id(dto.movie_id).await? {
            return Err(AppError::NotFound(format!(
                "Movie with ID {} not found",
                dto.movie_id
            )));
        }

        // Upsert and rating recomputation run as one unit of work per movie
        let score = Score::new(dto.movie_id, user.id, dto.score);
        self.score_repo
            .save_all_and_flush(std::slice::from_ref(&score))
            .await?;
        log_debug!(
            "User {} scored movie {} with {}",
            user.id,
            score.movie_id,
            score.value
        );

        let movie = self
            .movie_repo
            .find_by_id(dto.movie_id)
            .await?
            .ok_or_else(|| {
                AppError::NotFound(format!("Movie with ID {} not found", dto.movie_id))
            })?;

        log_info!(
            "Movie {} now rated {:?} over {} scores",
            movie.id,
            movie.score,
            movie.count
        );
        Ok(MovieDto::from(movie))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::modules::movie::domain::{entities::Movie, repositories::MockMovieRepository};
    use crate::modules::score::domain::repositories::MockScoreRepository;
    use crate::modules::user::application::ports::MockAuthenticatedUserProvider;
    use crate::modules::user::domain::entities::User;
    use mockall::predicate::eq;
    use mockall::Sequence;

    const EXISTING_MOVIE_ID: i64 = 1;
    const NON_EXISTING_MOVIE_ID: i64 = 2;
    const USER_ID: i64 = 1;

    fn user() -> User {
        User::new(USER_ID, "Maria", "maria@gmail.com")
    }

    /// Stored state after the given scores were flushed
    fn rated_movie(scores: &[(i64, f64)]) -> Movie {
        let mut movie = Movie {
            id: EXISTING_MOVIE_ID,
            ..Movie::new("Test Movie".to_string())
        };
        for (user_id, value) in scores {
            movie.upsert_score(*user_id, *value);
        }
        movie
    }

    fn authenticated_user() -> MockAuthenticatedUserProvider {
        let mut provider = MockAuthenticatedUserProvider::new();
        provider.expect_authenticated().returning(|| Ok(user()));
        provider
    }

    fn movie_repository(stored: Movie) -> MockMovieRepository {
        let mut repo = MockMovieRepository::new();
        repo.expect_exists_by_id()
            .with(eq(EXISTING_MOVIE_ID))
            .returning(|_| Ok(true));
        repo.expect_find_by_id()
            .with(eq(EXISTING_MOVIE_ID))
            .returning(move |_| Ok(Some(stored.clone())));
        repo.expect_save().never();
        repo
    }

    fn score_repository() -> MockScoreRepository {
        let mut repo = MockScoreRepository::new();
        repo.expect_save_all_and_flush()
            .returning(|scores| Ok(scores.to_vec()));
        repo
    }

    #[tokio::test]
    async fn save_score_returns_movie_dto() {
        let service = ScoreService::new(
            Arc::new(score_repository()),
            Arc::new(movie_repository(rated_movie(&[(USER_ID, 5.0)]))),
            Arc::new(authenticated_user()),
        );

        let result = service
            .save_score(ScoreDto::new(EXISTING_MOVIE_ID, 5.0))
            .await
            .unwrap();

        assert_eq!(result.id, EXISTING_MOVIE_ID);
        assert_eq!(result.score, Some(5.0));
        assert_eq!(result.count, 1);
    }

    #[tokio::test]
    async fn save_score_flushes_only_the_submitted_score_before_reading_back() {
        let mut seq = Sequence::new();

        let mut movies = MockMovieRepository::new();
        movies
            .expect_exists_by_id()
            .times(1)
            .in_sequence(&mut seq)
            .returning(|_| Ok(true));

        let mut scores = MockScoreRepository::new();
        scores
            .expect_save_all_and_flush()
            .withf(|scores| {
                scores.len() == 1
                    && scores[0].movie_id == EXISTING_MOVIE_ID
                    && scores[0].user_id == USER_ID
                    && scores[0].value == 4.0
            })
            .times(1)
            .in_sequence(&mut seq)
            .returning(|scores| Ok(scores.to_vec()));

        let stored = rated_movie(&[(2, 3.0), (USER_ID, 4.0)]);
        movies
            .expect_find_by_id()
            .times(1)
            .in_sequence(&mut seq)
            .returning(move |_| Ok(Some(stored.clone())));
        movies.expect_save().never();

        let service = ScoreService::new(
            Arc::new(scores),
            Arc::new(movies),
            Arc::new(authenticated_user()),
        );

        let result = service
            .save_score(ScoreDto::new(EXISTING_MOVIE_ID, 4.0))
            .await
            .unwrap();
        assert_eq!(result.score, Some(3.5));
        assert_eq!(result.count, 2);
    }

    #[tokio::test]
    async fn save_score_fails_with_not_found_when_non_existing_movie_id() {
        let mut scores = MockScoreRepository::new();
        scores.expect_save_all_and_flush().never();

        let mut movies = MockMovieRepository::new();
        movies
            .expect_exists_by_id()
            .with(eq(NON_EXISTING_MOVIE_ID))
            .returning(|_| Ok(false));
        movies.expect_find_by_id().never();
        movies.expect_save().never();

        let service = ScoreService::new(
            Arc::new(scores),
            Arc::new(movies),
            Arc::new(authenticated_user()),
        );

        let err = service
            .save_score(ScoreDto::new(NON_EXISTING_MOVIE_ID, 5.0))
            .await
            .unwrap_err();
        assert!(err.is_not_found());
    }

    #[tokio::test]
    async fn save_score_propagates_movie_deleted_during_flush() {
        let mut scores = MockScoreRepository::new();
        scores.expect_save_all_and_flush().returning(|scores| {
            Err(AppError::NotFound(format!(
                "Movie with ID {} not found",
                scores[0].movie_id
            )))
        });

        let mut movies = MockMovieRepository::new();
        movies.expect_exists_by_id().returning(|_| Ok(true));
        movies.expect_find_by_id().never();

        let service = ScoreService::new(
            Arc::new(scores),
            Arc::new(movies),
            Arc::new(authenticated_user()),
        );

        let err = service
            .save_score(ScoreDto::new(EXISTING_MOVIE_ID, 2.0))
            .await
            .unwrap_err();
        assert!(err.is_not_found());
    }

    #[tokio::test]
    async fn save_score_rejects_out_of_range_value() {
        let mut provider = MockAuthenticatedUserProvider::new();
        provider.expect_authenticated().never();

        let service = ScoreService::new(
            Arc::new(MockScoreRepository::new()),
            Arc::new(MockMovieRepository::new()),
            Arc::new(provider),
        );

        let err = service
            .save_score(ScoreDto::new(EXISTING_MOVIE_ID, 7.5))
            .await
            .unwrap_err();
        assert!(matches!(err, AppError::ValidationError(_)));
    }

    #[tokio::test]
    async fn save_score_propagates_unauthorized_user() {
        let mut provider = MockAuthenticatedUserProvider::new();
        provider
            .expect_authenticated()
            .returning(|| Err(AppError::Unauthorized("Invalid user".to_string())));

        let mut movies = MockMovieRepository::new();
        movies.expect_exists_by_id().never();

        let service = ScoreService::new(
            Arc::new(MockScoreRepository::new()),
            Arc::new(movies),
            Arc::new(provider),
        );

        let err = service
            .save_score(ScoreDto::new(EXISTING_MOVIE_ID, 3.0))
            .await
            .unwrap_err();
        assert!(matches!(err, AppError::Unauthorized(_)));
    }
}
