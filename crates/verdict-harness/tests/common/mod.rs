use std::collections::VecDeque;
use std::sync::Mutex;
use std::sync::atomic::{AtomicUsize, Ordering};

use bson::doc;
use verdict_fixture::{Collections, Document};
use verdict_oracle::wire::{EvaluateResponse, ResultState, TestCase, TestResult};
use verdict_oracle::{Credential, Oracle, OracleError};

/// One recorded `evaluate` call.
#[derive(Debug, Clone)]
pub struct RecordedCall {
    pub project_id: String,
    pub rules: String,
    pub cases: Vec<TestCase>,
}

/// Canned stand-in for the remote rules service. Answers from a script of
/// responses (every case succeeds once the script runs dry) and records
/// each call for inspection.
#[derive(Default)]
pub struct MockOracle {
    script: Mutex<VecDeque<EvaluateResponse>>,
    calls: Mutex<Vec<RecordedCall>>,
    authorize_count: AtomicUsize,
    fail_authorize: bool,
}

impl MockOracle {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn failing_authorize() -> Self {
        Self {
            fail_authorize: true,
            ..Self::default()
        }
    }

    pub fn with_response(self, response: EvaluateResponse) -> Self {
        self.script.lock().unwrap().push_back(response);
        self
    }

    pub fn calls(&self) -> Vec<RecordedCall> {
        self.calls.lock().unwrap().clone()
    }

    pub fn authorize_count(&self) -> usize {
        self.authorize_count.load(Ordering::SeqCst)
    }
}

impl Oracle for MockOracle {
    async fn authorize(&mut self, _credential: &Credential) -> Result<(), OracleError> {
        if self.fail_authorize {
            return Err(OracleError::Token("mock authorize failure".into()));
        }
        self.authorize_count.fetch_add(1, Ordering::SeqCst);
        Ok(())
    }

    async fn evaluate(
        &self,
        project_id: &str,
        rules: &str,
        cases: &[TestCase],
    ) -> Result<EvaluateResponse, OracleError> {
        self.calls.lock().unwrap().push(RecordedCall {
            project_id: project_id.to_string(),
            rules: rules.to_string(),
            cases: cases.to_vec(),
        });

        let scripted = self.script.lock().unwrap().pop_front();
        Ok(scripted.unwrap_or_else(|| EvaluateResponse {
            issues: vec![],
            test_results: cases
                .iter()
                .map(|_| TestResult {
                    state: ResultState::Success,
                    debug_messages: vec![],
                })
                .collect(),
        }))
    }
}

pub fn failure(debug_messages: Vec<String>) -> EvaluateResponse {
    EvaluateResponse {
        issues: vec![],
        test_results: vec![TestResult {
            state: ResultState::Failure,
            debug_messages,
        }],
    }
}

pub fn credential() -> Credential {
    Credential::new("demo-project", "tester@demo.test", "unused-in-mock")
}

/// Two users, one with nested favorites, plus a settings document.
pub fn fixture() -> Collections {
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
