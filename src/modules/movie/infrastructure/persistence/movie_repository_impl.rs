use std::collections::HashMap;
use std::sync::Arc;

use async_trait::async_trait;
use diesel::prelude::*;
use tokio::task;

use crate::modules::movie::domain::{entities::movie::Movie, repositories::MovieRepository};
use crate::modules::movie::infrastructure::models::{
    MovieChangeset, MovieModel, NewMovie, RatingChangeset,
};
use crate::modules::score::domain::entities::Score;
use crate::modules::score::infrastructure::models::ScoreModel;
use crate::schema::{tb_movie, tb_score};
use crate::shared::application::pagination::{PaginatedResult, PaginationParams};
use crate::shared::errors::{AppError, AppResult};
use crate::shared::infrastructure::database::{Database, DbConnection};
use crate::shared::utils::logger::TimedOperation;

pub struct MovieRepositoryImpl {
    db: Arc<Database>,
}

impl MovieRepositoryImpl {
    pub fn new(db: Arc<Database>) -> Self {
        Self { db }
    }

    /// Score sets for the given movies, keyed by movie id
    pub(crate) fn load_scores(
        conn: &mut DbConnection,
        movie_ids: &[i64],
    ) -> AppResult<HashMap<i64, Vec<Score>>> {
        let rows = tb_score::table
            .filter(tb_score::movie_id.eq_any(movie_ids.to_vec()))
            .order((tb_score::movie_id.asc(), tb_score::user_id.asc()))
            .select(ScoreModel::as_select())
            .load::<ScoreModel>(conn)?;

        let mut by_movie: HashMap<i64, Vec<Score>> = HashMap::new();
        for row in rows {
            by_movie.entry(row.movie_id).or_default().push(row.into());
        }
        Ok(by_movie)
    }

    fn find_with_scores(conn: &mut DbConnection, id: i64) -> AppResult<Option<Movie>> {
        let Some(model) = tb_movie::table
            .find(id)
            .select(MovieModel::as_select())
            .first::<MovieModel>(conn)
            .optional()?
        else {
            return Ok(None);
        };

        let scores = Self::load_scores(conn, &[model.id])?
            .remove(&model.id)
            .unwrap_or_default();
        Ok(Some(model.into_entity(scores)))
    }

    /// Like `find_with_scores`, but takes a row lock on the movie that is held
    /// until the surrounding transaction ends. Concurrent rating updates for
    /// the same movie queue up here.
    pub(crate) fn lock_with_scores(conn: &mut DbConnection, id: i64) -> AppResult<Option<Movie>> {
        let Some(model) = tb_movie::table
            .find(id)
            .select(MovieModel::as_select())
            .for_update()
            .first::<MovieModel>(conn)
            .optional()?
        else {
            return Ok(None);
        };

        let scores = Self::load_scores(conn, &[model.id])?
            .remove(&model.id)
            .unwrap_or_default();
        Ok(Some(model.into_entity(scores)))
    }

    /// Persist `score` and `count` only
    pub(crate) fn write_rating(conn: &mut DbConnection, movie: &Movie) -> AppResult<()> {
        diesel::update(tb_movie::table.find(movie.id))
            .set(RatingChangeset::from(movie))
            .execute(conn)?;
        Ok(())
    }
}

/// Escape LIKE wildcards so the search text matches literally
fn like_pattern(text: &str) -> String {
    let escaped = text
        .replace('\\', "\\\\")
        .replace('%', "\\%")
        .replace('_', "\\_");
    format!("%{}%", escaped)
}

#[async_trait]
impl MovieRepository for MovieRepositoryImpl {
    async fn find_by_id(&self, id: i64) -> AppResult<Option<Movie>> {
        let db = Arc::clone(&self.db);

        task::spawn_blocking(move || -> AppResult<Option<Movie>> {
            let mut conn = db.get_connection()?;
            Self::find_with_scores(&mut conn, id)
        })
        .await?
    }

    async fn search_by_title(
        &self,
        title: &str,
        pagination: PaginationParams,
    ) -> AppResult<PaginatedResult<Movie>> {
        let db = Arc::clone(&self.db);
        let pattern = like_pattern(title);

        task::spawn_blocking(move || -> AppResult<PaginatedResult<Movie>> {
            let timer = TimedOperation::new("movie_search");
            let mut conn = db.get_connection()?;

            let total: i64 = tb_movie::table
                .filter(tb_movie::title.ilike(&pattern))
                .count()
                .get_result(&mut conn)?;

            let models = tb_movie::table
                .filter(tb_movie::title.ilike(&pattern))
                .order(tb_movie::id.asc())
                .limit(pagination.limit())
                .offset(pagination.offset())
                .select(MovieModel::as_select())
                .load::<MovieModel>(&mut conn)?;

            let ids: Vec<i64> = models.iter().map(|m| m.id).collect();
            let mut scores = Self::load_scores(&mut conn, &ids)?;

            let movies = models
                .into_iter()
                .map(|m| {
                    let movie_scores = scores.remove(&m.id).unwrap_or_default();
                    m.into_entity(movie_scores)
                })
                .collect();

            timer.finish_with_info(&format!("{} of {} rows", ids.len(), total));
            Ok(PaginatedResult::new(movies, total as u64, &pagination))
        })
        .await?
    }

    async fn save(&self, movie: &Movie) -> AppResult<Movie> {
        let db = Arc::clone(&self.db);
        let movie = movie.clone();

        task::spawn_blocking(move || -> AppResult<Movie> {
            let mut conn = db.get_connection()?;

            if movie.is_new() {
                let model = diesel::insert_into(tb_movie::table)
                    .values(NewMovie::from(&movie))
                    .returning(MovieModel::as_returning())
                    .get_result::<MovieModel>(&mut conn)?;
                return Ok(model.into_entity(Vec::new()));
            }

            // The returned row carries the rating as currently stored
            let model = diesel::update(tb_movie::table.find(movie.id))
                .set(MovieChangeset::from(&movie))
                .returning(MovieModel::as_returning())
                .get_result::<MovieModel>(&mut conn)
                .optional()?
                .ok_or_else(|| {
                    AppError::NotFound(format!("Movie with ID {} not found", movie.id))
                })?;

            let scores = Self::load_scores(&mut conn, &[model.id])?
                .remove(&model.id)
                .unwrap_or_default();
            Ok(model.into_entity(scores))
        })
        .await?
    }

    async fn get_reference_by_id(&self, id: i64) -> AppResult<Movie> {
        self.find_by_id(id)
            .await?
            .ok_or_else(|| AppError::NotFound(format!("Movie with ID {} not found", id)))
    }

    async fn exists_by_id(&self, id: i64) -> AppResult<bool> {
        let db = Arc::clone(&self.db);

        task::spawn_blocking(move || -> AppResult<bool> {
            let mut conn = db.get_connection()?;
            let exists =
                diesel::select(diesel::dsl::exists(tb_movie::table.find(id))).get_result(&mut conn)?;
            Ok(exists)
        })
        .await?
    }

    async fn delete_by_id(&self, id: i64) -> AppResult<()> {
        let db = Arc::clone(&self.db);

        task::spawn_blocking(move || -> AppResult<()> {
            let mut conn = db.get_connection()?;
            // A foreign key violation from tb_score surfaces as IntegrityConflict
            let deleted = diesel::delete(tb_movie::table.find(id)).execute(&mut conn)?;
            if deleted == 0 {
                return Err(AppError::NotFound(format!(
                    "Movie with ID {} not found",
                    id
                )));
            }
            Ok(())
        })
        .await?
    }
}
