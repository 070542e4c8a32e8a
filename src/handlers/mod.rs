pub mod ad_handler;
pub mod auth_handler;
pub mod bookmark_handler;
pub mod chapter_handler;
pub mod comic_handler;
pub mod health_handler;
pub mod reader_handler;
