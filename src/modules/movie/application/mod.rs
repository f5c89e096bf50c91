pub mod dto;
pub mod service;

pub use dto::MovieDto;
pub use service::MovieService;
