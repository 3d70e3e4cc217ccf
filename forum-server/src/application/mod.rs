pub mod media_service;
pub mod post_service;
