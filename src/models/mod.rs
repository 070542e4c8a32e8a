pub mod ad_model;
pub mod bookmark_model;
pub mod chapter_model;
pub mod comic_model;
pub mod paging;
pub mod response_model;
pub mod tracker_model;
pub mod user_model;
