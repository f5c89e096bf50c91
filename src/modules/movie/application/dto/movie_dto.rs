use serde::{Deserialize, Serialize};

use crate::modules::movie::domain::entities::Movie;
use crate::shared::errors::AppResult;
use crate::shared::utils::Validator;

/// Movie projection crossing the service boundary
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MovieDto {
    #[serde(default)]
    pub id: i64,
    pub title: String,
    #[serde(default)]
    pub score: Option<f64>,
    #[serde(default)]
    pub count: i32,
    #[serde(default)]
    pub image: Option<String>,
}

impl MovieDto {
    /// Input shape for insert/update: only the editable fields matter
    pub fn new(title: impl Into<String>, image: Option<String>) -> Self {
        Self {
            id: 0,
            title: title.into(),
            score: None,
            count: 0,
            image,
        }
    }

    /// Field checks applied before insert and update
    pub fn validate(&self) -> AppResult<()> {
        Validator::validate_movie_title(&self.title)?;
        if let Some(image) = &self.image {
            Validator::validate_image_url(image)?;
        }
        Ok(())
    }
}

impl From<Movie> for MovieDto {
    fn from(movie: Movie) -> Self {
        Self {
            id: movie.id,
            title: movie.title,
            score: movie.score,
            count: movie.count,
            image: movie.image,
        }
    }
}

impl From<&Movie> for MovieDto {
    fn from(movie: &Movie) -> Self {
        Self {
            id: movie.id,
            title: movie.title.clone(),
            score: movie.score,
            count: movie.count,
            image: movie.image.clone(),
        }
    }
}
