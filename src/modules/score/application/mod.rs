pub mod dto;
pub mod service;

pub use dto::ScoreDto;
pub use service::ScoreService;
