pub mod application;
pub mod domain;
pub mod infrastructure;

// Re-exports for easy external access
pub use application::{MovieDto, MovieService};
pub use domain::{Movie, MovieRepository};
pub use infrastructure::{InMemoryMovieRepository, MovieRepositoryImpl};
