pub mod movie_repository;

pub use movie_repository::MovieRepository;
#[cfg(test)]
pub use movie_repository::MockMovieRepository;
