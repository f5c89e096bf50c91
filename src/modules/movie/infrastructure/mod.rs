pub mod memory;
pub mod models;
pub mod persistence;

pub use memory::InMemoryMovieRepository;
pub use persistence::MovieRepositoryImpl;
