//! Test data factories using builder pattern
//!
//! Provides convenient methods to create test data with sensible defaults
#![allow(dead_code)]

use std::sync::atomic::{AtomicU32, Ordering};

use dsmovie_lib::modules::{
    movie::{Movie, MovieDto},
    score::ScoreDto,
    user::User,
};
use dsmovie_lib::shared::InMemoryStore;

pub const DEFAULT_TITLE: &str = "Test Movie";
pub const DEFAULT_IMAGE: &str =
    "https://www.themoviedb.org/t/p/w533_and_h300_bestv2/jBJWaqoSCiARWtfV0GlqHrcdidd.jpg";

pub struct MovieFactory {
    title: String,
    image: Option<String>,
}

impl Default for MovieFactory {
    fn default() -> Self {
        Self {
            title: DEFAULT_TITLE.to_string(),
            image: Some(DEFAULT_IMAGE.to_string()),
        }
    }
}

impl MovieFactory {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_title(mut self, title: &str) -> Self {
        self.title = title.to_string();
        self
    }

    pub fn with_image(mut self, image: &str) -> Self {
        self.image = Some(image.to_string());
        self
    }

    pub fn without_image(mut self) -> Self {
        self.image = None;
        self
    }

    pub fn dto(&self) -> MovieDto {
        MovieDto::new(self.title.clone(), self.image.clone())
    }

    /// Persist the movie straight into the store
    pub fn insert_into(self, store: &InMemoryStore) -> Movie {
        let mut movie = Movie::new(self.title);
        movie.image = self.image;
        store.put_movie(&movie).expect("Failed to insert movie")
    }
}

pub struct UserFactory {
    name: String,
    email: String,
}

impl Default for UserFactory {
    fn default() -> Self {
        Self {
            name: "Maria Brown".to_string(),
            email: "maria@gmail.com".to_string(),
        }
    }
}

impl UserFactory {
    pub fn new() -> Self {
        Self::default()
    }

    /// Unique email so several users can live in one store
    pub fn random() -> Self {
        static NEXT: AtomicU32 = AtomicU32::new(1);
        let n = NEXT.fetch_add(1, Ordering::SeqCst);
        let tag = rand::random::<u16>();
        Self {
            name: format!("User {}", n),
            email: format!("user{}_{}@gmail.com", n, tag),
        }
    }

    pub fn with_email(mut self, email: &str) -> Self {
        self.email = email.to_string();
        self
    }

    pub fn insert_into(self, store: &InMemoryStore) -> User {
        store
            .add_user(&self.name, &self.email)
            .expect("Failed to insert user")
    }
}

pub struct ScoreFactory;

impl ScoreFactory {
    pub fn dto(movie_id: i64, score: f64) -> ScoreDto {
        ScoreDto::new(movie_id, score)
    }
}
