/// Process-local storage backing the in-memory repositories
///
/// Mirrors the relational constraints of the PostgreSQL schema:
/// - movie ids come from a sequence starting at 1
/// - scores are keyed by (movie_id, user_id)
/// - a score must reference an existing movie and user
/// - a movie that still has scores cannot be deleted
/// - emails are unique
///
/// Writes touching one movie hold that movie's map entry, so a score upsert
/// and the rating rewrite it triggers are seen as one step by other callers.
/// Lock order is always movies, then users, then scores.
use std::collections::BTreeMap;
use std::sync::atomic::{AtomicI64, Ordering};
use std::sync::Arc;

use dashmap::mapref::entry::Entry;
use dashmap::DashMap;

use crate::modules::movie::domain::entities::Movie;
use crate::modules::score::domain::entities::{Score, ScoreKey};
use crate::modules::user::domain::entities::User;
use crate::shared::errors::{AppError, AppResult};

#[derive(Debug, Default)]
pub struct InMemoryStore {
    movies: DashMap<i64, Movie>,
    scores: DashMap<ScoreKey, Score>,
    users: DashMap<i64, User>,
    user_ids_by_email: DashMap<String, i64>,
    movie_seq: AtomicI64,
    user_seq: AtomicI64,
}

fn movie_not_found(id: i64) -> AppError {
    AppError::NotFound(format!("Movie with ID {} not found", id))
}

impl InMemoryStore {
    pub fn new() -> Arc<Self> {
        Arc::new(Self::default())
    }

    // ---------------------------------------------------------------------
    // Movies
    // ---------------------------------------------------------------------

    /// Movie with its score set attached
    pub fn movie(&self, id: i64) -> Option<Movie> {
        let mut movie = self.movies.get(&id)?.value().clone();
        movie.scores = self.scores_for(id);
        Some(movie)
    }

    /// All movies ordered by id, with score sets attached
    pub fn movies(&self) -> Vec<Movie> {
        let mut ids: Vec<i64> = self.movies.iter().map(|entry| *entry.key()).collect();
        ids.sort_unstable();
        ids.into_iter().filter_map(|id| self.movie(id)).collect()
    }

    pub fn contains_movie(&self, id: i64) -> bool {
        self.movies.contains_key(&id)
    }

    /// Insert when new. For a stored movie only title and image are
    /// overwritten; the rating belongs to `put_scores`.
    pub fn put_movie(&self, movie: &Movie) -> AppResult<Movie> {
        let id = if movie.is_new() {
            let mut row = movie.clone();
            row.scores = Vec::new();
            row.id = self.movie_seq.fetch_add(1, Ordering::SeqCst) + 1;
            let id = row.id;
            self.movies.insert(id, row);
            id
        } else {
            let mut row = self
                .movies
                .get_mut(&movie.id)
                .ok_or_else(|| movie_not_found(movie.id))?;
            row.title = movie.title.clone();
            row.image = movie.image.clone();
            movie.id
        };

        self.movie(id).ok_or_else(|| movie_not_found(id))
    }

    pub fn remove_movie(&self, id: i64) -> AppResult<()> {
        // The predicate runs under the entry's write lock, so no score can
        // land between the check and the removal.
        if self
            .movies
            .remove_if(&id, |_, _| !self.has_scores(id))
            .is_some()
        {
            return Ok(());
        }

        if self.movies.contains_key(&id) {
            Err(AppError::IntegrityConflict(format!(
                "Movie {} is still referenced from scores",
                id
            )))
        } else {
            Err(movie_not_found(id))
        }
    }

    // ---------------------------------------------------------------------
    // Scores
    // ---------------------------------------------------------------------

    /// Scores of one movie ordered by user id
    pub fn scores_for(&self, movie_id: i64) -> Vec<Score> {
        let mut scores: Vec<Score> = self
            .scores
            .iter()
            .filter(|entry| entry.key().movie_id == movie_id)
            .map(|entry| entry.value().clone())
            .collect();
        scores.sort_by_key(|s| s.user_id);
        scores
    }

    fn has_scores(&self, movie_id: i64) -> bool {
        self.scores.iter().any(|entry| entry.key().movie_id == movie_id)
    }

    pub fn score_count(&self) -> usize {
        self.scores.len()
    }

    /// Upsert on the composite key and rewrite each touched movie's rating
    /// from its full score set. Every referenced row is checked before
    /// anything is written.
    pub fn put_scores(&self, scores: &[Score]) -> AppResult<Vec<Score>> {
        let mut by_movie: BTreeMap<i64, Vec<&Score>> = BTreeMap::new();
        for score in scores {
            if !self.movies.contains_key(&score.movie_id) {
                return Err(movie_not_found(score.movie_id));
            }
            if !self.users.contains_key(&score.user_id) {
                return Err(AppError::IntegrityConflict(format!(
                    "Score references unknown user {}",
                    score.user_id
                )));
            }
            by_movie.entry(score.movie_id).or_default().push(score);
        }

        let mut saved = Vec::with_capacity(scores.len());
        for (movie_id, batch) in by_movie {
            let mut row = self
                .movies
                .get_mut(&movie_id)
                .ok_or_else(|| movie_not_found(movie_id))?;

            let mut movie = row.value().clone();
            movie.scores = self.scores_for(movie_id);
            for score in batch {
                movie.upsert_score(score.user_id, score.value);
                self.scores.insert(score.key(), score.clone());
                saved.push(score.clone());
            }

            row.score = movie.score;
            row.count = movie.count;
        }
        Ok(saved)
    }

    // ---------------------------------------------------------------------
    // Users
    // ---------------------------------------------------------------------

    pub fn add_user(&self, name: &str, email: &str) -> AppResult<User> {
        match self.user_ids_by_email.entry(email.to_string()) {
            Entry::Occupied(_) => Err(AppError::IntegrityConflict(format!(
                "Email {} is already registered",
                email
            ))),
            Entry::Vacant(slot) => {
                let id = self.user_seq.fetch_add(1, Ordering::SeqCst) + 1;
                let user = User::new(id, name, email);
                self.users.insert(id, user.clone());
                slot.insert(id);
                Ok(user)
            }
        }
    }

    pub fn user_by_email(&self, email: &str) -> Option<User> {
        let id = *self.user_ids_by_email.get(email)?;
        self.users.get(&id).map(|user| user.value().clone())
    }
}
