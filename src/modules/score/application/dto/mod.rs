pub mod score_dto;

pub use score_dto::ScoreDto;
