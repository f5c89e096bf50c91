pub mod movie_dto;

pub use movie_dto::MovieDto;
