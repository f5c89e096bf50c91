pub mod score_repository_impl;

pub use score_repository_impl::ScoreRepositoryImpl;
