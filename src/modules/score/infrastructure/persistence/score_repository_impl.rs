use std::collections::BTreeMap;
use std::sync::Arc;

use async_trait::async_trait;
use diesel::prelude::*;
use diesel::upsert::excluded;
use tokio::task;

use crate::modules::movie::infrastructure::persistence::MovieRepositoryImpl;
use crate::modules::score::domain::{entities::score::Score, repositories::ScoreRepository};
use crate::modules::score::infrastructure::models::ScoreModel;
use crate::schema::tb_score;
use crate::shared::errors::{AppError, AppResult};
use crate::shared::infrastructure::database::{Database, DbConnection};
use crate::shared::utils::logger::LogContext;

pub struct ScoreRepositoryImpl {
    db: Arc<Database>,
}

impl ScoreRepositoryImpl {
    pub fn new(db: Arc<Database>) -> Self {
        Self { db }
    }

    fn upsert(conn: &mut DbConnection, rows: &[ScoreModel]) -> AppResult<Vec<ScoreModel>> {
        let saved = diesel::insert_into(tb_score::table)
            .values(rows)
            .on_conflict((tb_score::movie_id, tb_score::user_id))
            .do_update()
            .set(tb_score::value.eq(excluded(tb_score::value)))
            .returning(ScoreModel::as_returning())
            .get_results::<ScoreModel>(conn)?;
        Ok(saved)
    }
}

#[async_trait]
impl ScoreRepository for ScoreRepositoryImpl {
    async fn save_all_and_flush(&self, scores: &[Score]) -> AppResult<Vec<Score>> {
        if scores.is_empty() {
            return Ok(Vec::new());
        }

        let db = Arc::clone(&self.db);
        // Ascending movie ids so concurrent batches take row locks in one order
        let mut by_movie: BTreeMap<i64, Vec<ScoreModel>> = BTreeMap::new();
        for score in scores {
            by_movie
                .entry(score.movie_id)
                .or_default()
                .push(ScoreModel::from(score));
        }

        task::spawn_blocking(move || -> AppResult<Vec<Score>> {
            LogContext::db_operation("upsert", "tb_score", Some(by_movie.len()));
            let mut conn = db.get_connection()?;

            conn.transaction::<_, AppError, _>(|conn| {
                let mut saved = Vec::new();

                for (movie_id, rows) in &by_movie {
                    let mut movie = MovieRepositoryImpl::lock_with_scores(conn, *movie_id)?
                        .ok_or_else(|| {
                            AppError::NotFound(format!("Movie with ID {} not found", movie_id))
                        })?;

                    for row in rows {
                        movie.upsert_score(row.user_id, row.value);
                    }
                    saved.extend(Self::upsert(conn, rows)?.into_iter().map(Score::from));
                    MovieRepositoryImpl::write_rating(conn, &movie)?;

                    LogContext::rating_refreshed(movie.id, movie.score, movie.count);
                }

                Ok(saved)
            })
        })
        .await?
    }
}
