use std::fmt;

use verdict_oracle::wire::{Expectation, ResultState, TestCase, TestResult};

/// One case paired with the service's verdict for it.
#[derive(Debug, Clone, PartialEq)]
pub struct CaseOutcome {
    pub case: TestCase,
    pub result: TestResult,
}

/// Aggregate verdict over one or more cases: success iff every case
/// succeeded. Individual outcomes are retained for inspection.
#[derive(Debug, Clone, PartialEq)]
pub struct TestSummary {
    pub success: bool,
    pub tests: Vec<CaseOutcome>,
}

impl TestSummary {
    pub fn new(cases: Vec<TestCase>, results: Vec<TestResult>) -> Self {
        let success = results.iter().all(|r| r.state == ResultState::Success);
        let tests = cases
            .into_iter()
            .zip(results)
            .map(|(case, result)| CaseOutcome { case, result })
            .collect();
        Self { success, tests }
    }

    /// No-op on success; otherwise an error explaining the first failing
    /// case, preferring the service's own diagnostics when it sent any.
    pub fn expect(&self) -> Result<(), ExpectationError> {
        match self
            .tests
            .iter()
            .find(|outcome| outcome.result.state == ResultState::Failure)
        {
            Some(outcome) => Err(ExpectationError::for_case(&outcome.case, &outcome.result)),
            None => Ok(()),
        }
    }
}

/// Single-result assertion, used by the simple get/set call forms.
pub fn expect_case(case: &TestCase, result: &TestResult) -> Result<(), ExpectationError> {
    match result.state {
        ResultState::Success => Ok(()),
        ResultState::Failure => Err(ExpectationError::for_case(case, result)),
    }
}

/// A test's actual outcome did not match its expectation. Caller-facing;
/// not a harness fault.
#[derive(Debug, Clone, PartialEq)]
pub struct ExpectationError(String);

impl ExpectationError {
    fn for_case(case: &TestCase, result: &TestResult) -> Self {
        if result.debug_messages.is_empty() {
            let direction = match case.expectation {
                Expectation::Allow => "succeed",
                Expectation::Deny => "fail",
            };
            Self(format!(
                "Expected the {} operation to {}.",
                case.request.method.as_str(),
                direction
            ))
        } else {
            Self(result.debug_messages.join("\n\n"))
        }
    }

    pub fn message(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for ExpectationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl std::error::Error for ExpectationError {}
