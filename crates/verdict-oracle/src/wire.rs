//! Wire schema for the rules-evaluation service.
//!
//! One request carries the rules source plus a list of test cases; the
//! response carries one result per case, in order, or a list of issues when
//! the rules source itself fails to compile.

use serde::{Deserialize, Serialize};

/// Whether a simulated request is expected to be allowed or denied.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum Expectation {
    Allow,
    Deny,
}

/// Request method of a simulated operation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Method {
    Get,
    Create,
    Update,
    Delete,
    List,
    Read,
    Write,
}

impl Method {
    /// Lowercase wire name, used verbatim in assertion messages.
    pub fn as_str(self) -> &'static str {
        match self {
            Method::Get => "get",
            Method::Create => "create",
            Method::Update => "update",
            Method::Delete => "delete",
            Method::List => "list",
            Method::Read => "read",
            Method::Write => "write",
        }
    }
}

/// Simulated identity of the request; `uid: None` means unauthenticated.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Auth {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub uid: Option<String>,
}

impl Auth {
    pub fn user(uid: impl Into<String>) -> Self {
        Self {
            uid: Some(uid.into()),
        }
    }

    pub fn anonymous() -> Self {
        Self { uid: None }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TestRequest {
    pub auth: Auth,
    pub path: String,
    pub method: Method,
}

/// Resource payload attached to a case; `data` is null when the document is
/// absent (reads) or the operation carries no payload (deletes).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Resource {
    pub data: serde_json::Value,
}

/// Argument matcher of a function mock: either an exact value or any value.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum ArgSpec {
    #[serde(rename = "exact_value")]
    ExactValue(serde_json::Value),
    #[serde(rename = "anyValue")]
    AnyValue {},
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MockResult {
    pub value: serde_json::Value,
}

/// Declarative stub for a callable referenced inside rule expressions: for
/// the named function invoked with matching args, return `result.value`.
/// The service matches exact entries first and falls back to the wildcard.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FunctionMock {
    pub function: String,
    pub args: Vec<ArgSpec>,
    pub result: MockResult,
}

impl FunctionMock {
    /// Mock matching any argument.
    pub fn wildcard(function: impl Into<String>, value: serde_json::Value) -> Self {
        Self {
            function: function.into(),
            args: vec![ArgSpec::AnyValue {}],
            result: MockResult { value },
        }
    }

    /// Mock matching one exact path argument.
    pub fn exact(
        function: impl Into<String>,
        path: impl Into<String>,
        value: serde_json::Value,
    ) -> Self {
        Self {
            function: function.into(),
            args: vec![ArgSpec::ExactValue(serde_json::Value::String(path.into()))],
            result: MockResult { value },
        }
    }
}

/// One simulated request with its expectation and the mocks the service
/// needs to answer in-rule data lookups.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TestCase {
    pub expectation: Expectation,
    pub request: TestRequest,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub resource: Option<Resource>,
    pub function_mocks: Vec<FunctionMock>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ResultState {
    Success,
    Failure,
}

/// Per-case verdict from the service.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TestResult {
    pub state: ResultState,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub debug_messages: Vec<String>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SourcePosition {
    pub line: u32,
    pub column: u32,
}

/// A compilation problem in the rules source itself. Fatal to the whole
/// call, not a per-case failure.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Issue {
    pub source_position: SourcePosition,
    pub description: String,
}

#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EvaluateResponse {
    #[serde(default)]
    pub issues: Vec<Issue>,
    #[serde(default)]
    pub test_results: Vec<TestResult>,
}

// ── Request envelope ────────────────────────────────────────────

#[derive(Debug, Clone, Serialize)]
pub(crate) struct RulesFile {
    pub name: String,
    pub content: String,
}

#[derive(Debug, Clone, Serialize)]
pub(crate) struct Source {
    pub files: Vec<RulesFile>,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub(crate) struct TestSuite {
    pub test_cases: Vec<TestCase>,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub(crate) struct EvaluateRequest {
    pub source: Source,
    pub test_suite: TestSuite,
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::*;

    #[test]
    fn expectation_wire_names() {
        assert_eq!(serde_json::to_value(Expectation::Allow).unwrap(), json!("ALLOW"));
        assert_eq!(serde_json::to_value(Expectation::Deny).unwrap(), json!("DENY"));
    }

    #[test]
    fn method_wire_names_are_lowercase() {
        assert_eq!(serde_json::to_value(Method::Get).unwrap(), json!("get"));
        assert_eq!(serde_json::to_value(Method::Create).unwrap(), json!("create"));
        assert_eq!(Method::Delete.as_str(), "delete");
    }

    #[test]
    fn arg_spec_shapes() {
        let exact = ArgSpec::ExactValue(json!("/databases/(default)/documents/users/userA"));
        assert_eq!(
            serde_json::to_value(&exact).unwrap(),
            json!({ "exact_value": "/databases/(default)/documents/users/userA" })
        );

        let any = ArgSpec::AnyValue {};
        assert_eq!(serde_json::to_value(&any).unwrap(), json!({ "anyValue": {} }));
    }

    #[test]
    fn test_case_serializes_camel_case() {
        let case = TestCase {
            expectation: Expectation::Allow,
            request: TestRequest {
                auth: Auth::user("userA"),
                path: "/databases/(default)/documents/users/userA".into(),
                method: Method::Get,
            },
            resource: Some(Resource { data: json!({ "name": "Alice" }) }),
            function_mocks: vec![FunctionMock::wildcard("exists", json!(false))],
        };

        let value = serde_json::to_value(&case).unwrap();
        assert_eq!(value["expectation"], json!("ALLOW"));
        assert_eq!(value["request"]["auth"]["uid"], json!("userA"));
        assert_eq!(value["request"]["method"], json!("get"));
        assert!(value.get("functionMocks").is_some());
        assert!(value.get("function_mocks").is_none());
    }

    #[test]
    fn anonymous_auth_omits_uid() {
        let value = serde_json::to_value(Auth::anonymous()).unwrap();
        assert_eq!(value, json!({}));
    }

    #[test]
    fn response_decodes_results_and_issues() {
        let body = json!({
            "testResults": [
                { "state": "SUCCESS" },
                { "state": "FAILURE", "debugMessages": ["rule denied at line 3"] }
            ]
        });
        let response: EvaluateResponse = serde_json::from_value(body).unwrap();
        assert!(response.issues.is_empty());
        assert_eq!(response.test_results.len(), 2);
        assert_eq!(response.test_results[0].state, ResultState::Success);
        assert_eq!(
            response.test_results[1].debug_messages,
            vec!["rule denied at line 3"]
        );

        let body = json!({
            "issues": [
                { "sourcePosition": { "line": 4, "column": 12 }, "description": "unexpected token" }
            ]
        });
        let response: EvaluateResponse = serde_json::from_value(body).unwrap();
        assert_eq!(response.issues.len(), 1);
        assert_eq!(response.issues[0].source_position.line, 4);
        assert!(response.test_results.is_empty());
    }
}
