use serde_json::Value;
use verdict_fixture::Collections;
use verdict_oracle::wire::{Auth, Expectation, Method, Resource, TestCase, TestRequest};

use crate::batch::WriteOp;
use crate::mocks::{after_mocks, base_mocks, json_fields};
use crate::path::wire_path;

/// The single case for a simulated read: resource data is the document's
/// current fields, or null when absent.
pub fn get_case(expectation: Expectation, auth: Auth, path: &str, data: &Collections) -> TestCase {
    let resource = Resource {
        data: data
            .document(path)
            .map(|doc| json_fields(&doc.fields))
            .unwrap_or(Value::Null),
    };

    TestCase {
        expectation,
        request: TestRequest {
            auth,
            path: wire_path(path),
            method: Method::Get,
        },
        resource: Some(resource),
        function_mocks: base_mocks(data),
    }
}

/// One case per write in a batch. A `Set` becomes `create` when the target
/// does not currently exist and `update` otherwise; `Update` and `Delete`
/// pass their method through. Every case carries the after-mocks for the
/// whole batch, so rules referencing sibling writes evaluate consistently.
pub fn commit_cases(
    expectation: Expectation,
    auth: &Auth,
    batch: &[WriteOp],
    data: &Collections,
) -> Vec<TestCase> {
    let mut mocks = base_mocks(data);
    mocks.extend(after_mocks(data, batch));

    batch
        .iter()
        .map(|op| {
            let (method, resource_data) = match op {
                WriteOp::Set {
                    path,
                    data: payload,
                } => {
                    let method = if data.has_document(path) {
                        Method::Update
                    } else {
                        Method::Create
                    };
                    (method, json_fields(payload))
                }
                WriteOp::Update { data: payload, .. } => (Method::Update, json_fields(payload)),
                WriteOp::Delete { .. } => (Method::Delete, Value::Null),
            };

            TestCase {
                expectation,
                request: TestRequest {
                    auth: auth.clone(),
                    path: wire_path(op.path()),
                    method,
                },
                resource: Some(Resource {
                    data: resource_data,
                }),
                function_mocks: mocks.clone(),
            }
        })
        .collect()
}
