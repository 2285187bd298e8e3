use bson::{Bson, Document};

/// Assign a value at a dotted field path, creating intermediate documents
/// as needed.
///
/// `set_field_path(doc, "a.b", 1)` sets nested field `b` under `a`. An
/// intermediate that exists but is not a document is replaced by a fresh
/// document so the write always lands.
pub fn set_field_path(doc: &mut Document, path: &str, value: Bson) {
    match path.split_once('.') {
        None => {
            doc.insert(path.to_string(), value);
        }
        Some((head, rest)) => {
            if !matches!(doc.get(head), Some(Bson::Document(_))) {
                doc.insert(head.to_string(), Document::new());
            }
            if let Some(Bson::Document(sub)) = doc.get_mut(head) {
                set_field_path(sub, rest, value);
            }
        }
    }
}
