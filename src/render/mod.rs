//! Output of extracted images: JSON documents and image files.

mod files;
mod json;

pub use files::write_images;
pub use json::{from_json, report_to_json, to_json, JsonFormat};
