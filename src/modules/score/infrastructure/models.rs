use crate::modules::score::domain::entities::Score;
use crate::schema::tb_score;
use diesel::prelude::*;

#[derive(Queryable, Selectable, Insertable, Debug, Clone, PartialEq)]
#[diesel(table_name = tb_score)]
pub struct ScoreModel {
    pub movie_id: i64,
    pub user_id: i64,
    pub value: f64,
}

impl From<ScoreModel> for Score {
    fn from(model: ScoreModel) -> Self {
        Score::new(model.movie_id, model.user_id, model.value)
    }
}

impl From<&Score> for ScoreModel {
    fn from(score: &Score) -> Self {
        Self {
            movie_id: score.movie_id,
            user_id: score.user_id,
            value: score.value,
        }
    }
}
