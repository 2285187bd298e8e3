use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

/// A keyed record with field data and optional nested sub-collections.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Document {
    pub key: String,
    #[serde(default)]
    pub fields: bson::Document,
    #[serde(default, skip_serializing_if = "Collections::is_empty")]
    pub collections: Collections,
}

impl Document {
    pub fn new(key: impl Into<String>, fields: bson::Document) -> Self {
        Self {
            key: key.into(),
            fields,
            collections: Collections::default(),
        }
    }

    /// Attach a nested sub-collection.
    pub fn with_collection(mut self, name: impl Into<String>, docs: Vec<Document>) -> Self {
        self.collections.0.insert(name.into(), docs);
        self
    }
}

/// A dataset: named collections of documents, each document possibly owning
/// further collections. The root of a fixture tree is a `Collections` value.
///
/// Backed by a `BTreeMap` so enumeration order is deterministic. Within one
/// collection, document order is fixture insertion order; lookups are by key
/// and the first match wins.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Collections(pub BTreeMap<String, Vec<Document>>);

impl Collections {
    pub fn new() -> Self {
        Self::default()
    }

    /// Builder-style insert of a top-level collection.
    pub fn with(mut self, name: impl Into<String>, docs: Vec<Document>) -> Self {
        self.0.insert(name.into(), docs);
        self
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Resolve a slash-delimited path to a collection.
    ///
    /// A single segment names a top-level collection; otherwise the leading
    /// segments must address a document and the last one a sub-collection of
    /// it. Absence at any step yields an empty slice, never an error.
    pub fn collection(&self, path: &str) -> &[Document] {
        match path.rsplit_once('/') {
            None => self.0.get(path).map(Vec::as_slice).unwrap_or(&[]),
            Some((parent, name)) => match self.document(parent) {
                Some(doc) => doc
                    .collections
                    .0
                    .get(name)
                    .map(Vec::as_slice)
                    .unwrap_or(&[]),
                None => &[],
            },
        }
    }

    /// Resolve a slash-delimited path to a document, or `None` if absent.
    ///
    /// The path must end in a document key; a bare collection name is not a
    /// document path and resolves to `None`.
    pub fn document(&self, path: &str) -> Option<&Document> {
        let (collection_path, key) = path.rsplit_once('/')?;
        self.collection(collection_path)
            .iter()
            .find(|doc| doc.key == key)
    }

    pub fn has_document(&self, path: &str) -> bool {
        self.document(path).is_some()
    }

    /// Enumerate every document in the tree with its absolute path.
    ///
    /// Parents precede their nested documents; each document appears exactly
    /// once. Order is otherwise implementation-defined but stable.
    pub fn documents(&self) -> Vec<(String, &Document)> {
        let mut out = Vec::new();
        self.collect_documents("", &mut out);
        out
    }

    fn collect_documents<'a>(&'a self, prefix: &str, out: &mut Vec<(String, &'a Document)>) {
        for (name, docs) in &self.0 {
            for doc in docs {
                let path = if prefix.is_empty() {
                    format!("{name}/{}", doc.key)
                } else {
                    format!("{prefix}/{name}/{}", doc.key)
                };
                out.push((path.clone(), doc));
                doc.collections.collect_documents(&path, out);
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use bson::doc;

    use super::*;

    fn fixture() -> Collections {
        Collections::new()
            .with(
                "users",
                vec![
                    Document::new("userA", doc! { "name": "Alice" }).with_collection(
                        "favorites",
                        vec![
                            Document::new("fav1", doc! { "title": "First" }),
                            Document::new("fav2", doc! { "title": "Second" }),
                        ],
                    ),
                    Document::new("userB", doc! { "name": "Bob" }),
                ],
            )
            .with(
                "settings",
                vec![Document::new("userA", doc! { "theme": "dark" })],
            )
    }

    #[test]
    fn resolves_top_level_collection() {
        let data = fixture();
        assert_eq!(data.collection("users").len(), 2);
        assert_eq!(data.collection("settings").len(), 1);
    }

    #[test]
    fn resolves_nested_collection() {
        let data = fixture();
        let favorites = data.collection("users/userA/favorites");
        assert_eq!(favorites.len(), 2);
        assert_eq!(favorites[0].key, "fav1");
    }

    #[test]
    fn missing_collection_is_empty() {
        let data = fixture();
        assert!(data.collection("missing").is_empty());
        assert!(data.collection("users/userB/favorites").is_empty());
        assert!(data.collection("users/ghost/favorites").is_empty());
    }

    #[test]
    fn resolves_document_by_key() {
        let data = fixture();
        let doc = data.document("users/userA").unwrap();
        assert_eq!(doc.fields.get_str("name").unwrap(), "Alice");

        let nested = data.document("users/userA/favorites/fav2").unwrap();
        assert_eq!(nested.fields.get_str("title").unwrap(), "Second");
    }

    #[test]
    fn absent_document_is_none() {
        let data = fixture();
        assert!(data.document("users/ghost").is_none());
        assert!(data.document("missing/doc").is_none());
        assert!(!data.has_document("users/ghost"));
        assert!(data.has_document("users/userB"));
    }

    #[test]
    fn bare_segment_is_not_a_document() {
        let data = fixture();
        assert!(data.document("users").is_none());
    }

    #[test]
    fn duplicate_keys_first_match_wins() {
        let data = Collections::new().with(
            "users",
            vec![
                Document::new("dup", doc! { "n": 1 }),
                Document::new("dup", doc! { "n": 2 }),
            ],
        );
        let doc = data.document("users/dup").unwrap();
        assert_eq!(doc.fields.get_i32("n").unwrap(), 1);
    }

    #[test]
    fn enumerates_every_document_once() {
        let data = fixture();
        let all = data.documents();
        assert_eq!(all.len(), 5);

        let paths: Vec<&str> = all.iter().map(|(p, _)| p.as_str()).collect();
        assert!(paths.contains(&"users/userA"));
        assert!(paths.contains(&"users/userB"));
        assert!(paths.contains(&"users/userA/favorites/fav1"));
        assert!(paths.contains(&"users/userA/favorites/fav2"));
        assert!(paths.contains(&"settings/userA"));
    }

    #[test]
    fn enumeration_paths_resolve_back_to_the_same_entry() {
        let data = fixture();
        for (path, doc) in data.documents() {
            let resolved = data.document(&path).unwrap();
            assert!(std::ptr::eq(resolved, doc));
        }
    }

    #[test]
    fn enumeration_is_deterministic() {
        let data = fixture();
        let first: Vec<String> = data.documents().into_iter().map(|(p, _)| p).collect();
        let second: Vec<String> = data.documents().into_iter().map(|(p, _)| p).collect();
        assert_eq!(first, second);
    }

    #[test]
    fn fixture_round_trips_through_json() {
        let data = fixture();
        let json = serde_json::to_string(&data).unwrap();
        let back: Collections = serde_json::from_str(&json).unwrap();
        assert_eq!(back, data);
    }
}
