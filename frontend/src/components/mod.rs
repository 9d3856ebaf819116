pub mod handlers;
pub mod header;
pub mod results;
pub mod sample_gallery;
pub mod upload_section;
pub mod utils;
