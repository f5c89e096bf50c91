use crate::modules::movie::domain::entities::Movie;
use crate::modules::score::domain::entities::Score;
use crate::schema::tb_movie;
use diesel::prelude::*;

// For reading from database
#[derive(Queryable, Selectable, Identifiable, Debug, Clone)]
#[diesel(table_name = tb_movie)]
pub struct MovieModel {
    pub id: i64,
    pub title: String,
    pub score: Option<f64>,
    pub score_count: i32,
    pub image: Option<String>,
}

// For inserting new movies; the id comes from the sequence
#[derive(Insertable, Debug, Clone)]
#[diesel(table_name = tb_movie)]
pub struct NewMovie<'a> {
    pub title: &'a str,
    pub score: Option<f64>,
    pub score_count: i32,
    pub image: Option<&'a str>,
}

// For updating the editable fields of existing movies. The rating columns
// are only written by the score upsert transaction.
#[derive(AsChangeset, Debug, Clone)]
#[diesel(table_name = tb_movie)]
#[diesel(treat_none_as_null = true)]
pub struct MovieChangeset<'a> {
    pub title: &'a str,
    pub image: Option<&'a str>,
}

// Rating columns, rewritten together
#[derive(AsChangeset, Debug, Clone, Copy)]
#[diesel(table_name = tb_movie)]
#[diesel(treat_none_as_null = true)]
pub struct RatingChangeset {
    pub score: Option<f64>,
    pub score_count: i32,
}

impl MovieModel {
    pub fn into_entity(self, scores: Vec<Score>) -> Movie {
        Movie {
            id: self.id,
            title: self.title,
            score: self.score,
            count: self.score_count,
            image: self.image,
            scores,
        }
    }
}

impl<'a> From<&'a Movie> for NewMovie<'a> {
    fn from(movie: &'a Movie) -> Self {
        Self {
            title: &movie.title,
            score: movie.score,
            score_count: movie.count,
            image: movie.image.as_deref(),
        }
    }
}

impl<'a> From<&'a Movie> for MovieChangeset<'a> {
    fn from(movie: &'a Movie) -> Self {
        Self {
            title: &movie.title,
            image: movie.image.as_deref(),
        }
    }
}

impl From<&Movie> for RatingChangeset {
    fn from(movie: &Movie) -> Self {
        Self {
            score: movie.score,
            score_count: movie.count,
        }
    }
}
