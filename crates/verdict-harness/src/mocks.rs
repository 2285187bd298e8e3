use serde_json::{Value, json};
use verdict_fixture::{Collections, set_field_path};
use verdict_oracle::wire::FunctionMock;

use crate::batch::WriteOp;
use crate::path::wire_path;

/// Field data as the JSON the service consumes. String-keyed bson maps
/// always serialize, so this cannot fail for fixture data.
pub(crate) fn json_fields(fields: &bson::Document) -> Value {
    serde_json::to_value(fields).unwrap_or(Value::Null)
}

/// Callable stand-ins for the current dataset: three wildcard defaults
/// (`get` → null, `getAfter` → null, `exists` → false) so unmodeled paths
/// read as absent, then an exact `get`/`exists` pair per document in
/// enumeration order. For N documents that is 3 + 2N mocks.
pub fn base_mocks(data: &Collections) -> Vec<FunctionMock> {
    let mut mocks = vec![
        FunctionMock::wildcard("get", Value::Null),
        FunctionMock::wildcard("getAfter", Value::Null),
        FunctionMock::wildcard("exists", json!(false)),
    ];

    for (path, doc) in data.documents() {
        let wire = wire_path(&path);
        mocks.push(FunctionMock::exact(
            "get",
            wire.clone(),
            json!({ "data": json_fields(&doc.fields) }),
        ));
        mocks.push(FunctionMock::exact("exists", wire, json!(true)));
    }

    mocks
}

/// Projected post-write state: one exact `getAfter` per batch operation, so
/// rule expressions can see the would-be state of every write in the batch.
pub fn after_mocks(data: &Collections, batch: &[WriteOp]) -> Vec<FunctionMock> {
    batch
        .iter()
        .map(|op| {
            let value = match after_state(data, op) {
                Some(fields) => json!({ "data": fields }),
                None => Value::Null,
            };
            FunctionMock::exact("getAfter", wire_path(op.path()), value)
        })
        .collect()
}

/// Field state after applying one operation; `None` means absent.
fn after_state(data: &Collections, op: &WriteOp) -> Option<Value> {
    match op {
        WriteOp::Set { data: payload, .. } => Some(json_fields(payload)),
        WriteOp::Delete { .. } => None,
        WriteOp::Update {
            path,
            data: payload,
        } => {
            let mut fields = data
                .document(path)
                .map(|doc| doc.fields.clone())
                .unwrap_or_default();
            for (key, value) in payload {
                set_field_path(&mut fields, key, value.clone());
            }
            Some(json_fields(&fields))
        }
    }
}
