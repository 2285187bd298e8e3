/// Fixed addressing prefix the rules service expects on every document path.
pub const DOCUMENT_PATH_PREFIX: &str = "/databases/(default)/documents/";

/// Absolute wire path for a logical `collection/key/...` path.
pub fn wire_path(logical: &str) -> String {
    format!("{DOCUMENT_PATH_PREFIX}{logical}")
}
