mod document;
mod nested;

pub use document::{Collections, Document};
pub use nested::set_field_path;
