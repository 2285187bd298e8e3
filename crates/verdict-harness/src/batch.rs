use bson::Document;

/// A single write within a batch commit, addressed by logical path.
#[derive(Debug, Clone, PartialEq)]
pub enum WriteOp {
    /// Replace the document's fields wholesale. Creates the document when
    /// absent, updates it otherwise.
    Set { path: String, data: Document },
    /// Merge into existing fields; keys use dotted-path assignment semantics
    /// (`"a.b"` sets nested field `b` under `a`).
    Update { path: String, data: Document },
    /// Remove all field data; the document reads as absent afterwards.
    Delete { path: String },
}

impl WriteOp {
    pub fn set(path: impl Into<String>, data: Document) -> Self {
        WriteOp::Set {
            path: path.into(),
            data,
        }
    }

    pub fn update(path: impl Into<String>, data: Document) -> Self {
        WriteOp::Update {
            path: path.into(),
            data,
        }
    }

    pub fn delete(path: impl Into<String>) -> Self {
        WriteOp::Delete { path: path.into() }
    }

    pub fn path(&self) -> &str {
        match self {
            WriteOp::Set { path, .. } | WriteOp::Update { path, .. } | WriteOp::Delete { path } => {
                path
            }
        }
    }
}
