pub mod modules;
mod schema;
pub mod shared;

use modules::{
    movie::{InMemoryMovieRepository, MovieRepository, MovieRepositoryImpl, MovieService},
    score::{InMemoryScoreRepository, ScoreRepository, ScoreRepositoryImpl, ScoreService},
    user::{InMemoryUserRepository, UserRepository, UserRepositoryImpl, UserService},
};
use shared::errors::AppResult;
use shared::utils::logger::init_logger;
use shared::{Database, DatabaseConfig, InMemoryStore};
use std::sync::Arc;

/// Composition root: repositories wired into the services
pub struct AppContext {
    movie_service: Arc<MovieService>,
    movie_repo: Arc<dyn MovieRepository>,
    score_repo: Arc<dyn ScoreRepository>,
    user_repo: Arc<dyn UserRepository>,
}

impl AppContext {
    /// Load `.env`, start logging, connect to PostgreSQL and apply migrations
    pub fn bootstrap() -> AppResult<Self> {
        dotenvy::dotenv().ok();
        init_logger();

        let config = DatabaseConfig::from_env()?;
        let database = Arc::new(Database::new(&config)?);

        let applied = database.run_migrations()?;
        log::info!("Database ready ({} migrations applied)", applied);

        Ok(Self::with_database(database))
    }

    pub fn with_database(database: Arc<Database>) -> Self {
        Self::from_repositories(
            Arc::new(MovieRepositoryImpl::new(Arc::clone(&database))),
            Arc::new(ScoreRepositoryImpl::new(Arc::clone(&database))),
            Arc::new(UserRepositoryImpl::new(database)),
        )
    }

    pub fn in_memory(store: Arc<InMemoryStore>) -> Self {
        Self::from_repositories(
            Arc::new(InMemoryMovieRepository::new(Arc::clone(&store))),
            Arc::new(InMemoryScoreRepository::new(Arc::clone(&store))),
            Arc::new(InMemoryUserRepository::new(store)),
        )
    }

    pub fn from_repositories(
        movie_repo: Arc<dyn MovieRepository>,
        score_repo: Arc<dyn ScoreRepository>,
        user_repo: Arc<dyn UserRepository>,
    ) -> Self {
        let movie_service = Arc::new(MovieService::new(Arc::clone(&movie_repo)));
        Self {
            movie_service,
            movie_repo,
            score_repo,
            user_repo,
        }
    }

    pub fn movie_service(&self) -> Arc<MovieService> {
        Arc::clone(&self.movie_service)
    }

    /// Score service bound to the user authenticated upstream for this request
    pub fn score_service(&self, username: &str) -> ScoreService {
        let user_provider = Arc::new(UserService::new(Arc::clone(&self.user_repo), username));
        ScoreService::new(
            Arc::clone(&self.score_repo),
            Arc::clone(&self.movie_repo),
            user_provider,
        )
    }
}
