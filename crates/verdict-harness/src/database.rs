use std::path::Path;
use std::sync::Arc;

use arc_swap::ArcSwap;
use bson::Document;
use verdict_fixture::Collections;
use verdict_oracle::wire::{Auth, Expectation, TestCase, TestResult};
use verdict_oracle::{Credential, Oracle};

use crate::batch::WriteOp;
use crate::cases::{commit_cases, get_case};
use crate::error::HarnessError;
use crate::summary::TestSummary;

/// Construction inputs for a [`Database`]; dataset and rules default empty.
pub struct DatabaseConfig {
    pub credential: Credential,
    pub data: Option<Collections>,
    pub rules: Option<String>,
}

impl DatabaseConfig {
    pub fn new(credential: Credential) -> Self {
        Self {
            credential,
            data: None,
            rules: None,
        }
    }

    pub fn with_data(mut self, data: Collections) -> Self {
        self.data = Some(data);
        self
    }

    pub fn with_rules(mut self, rules: impl Into<String>) -> Self {
        self.rules = Some(rules.into());
        self
    }
}

/// The harness facade: owns the fixture dataset, the rules source, and an
/// authorized client to the rules service, and answers can/cannot questions
/// about simulated requests.
///
/// Dataset and rules live behind [`ArcSwap`]: setters replace the whole
/// value, test calls snapshot at entry, so a concurrent replace never
/// corrupts an in-flight call (it just keeps the snapshot it loaded).
pub struct Database<O> {
    credential: Credential,
    oracle: O,
    authorized: bool,
    data: ArcSwap<Collections>,
    rules: ArcSwap<String>,
}

impl<O: Oracle> Database<O> {
    pub fn new(config: DatabaseConfig, oracle: O) -> Self {
        Self {
            credential: config.credential,
            oracle,
            authorized: false,
            data: ArcSwap::from_pointee(config.data.unwrap_or_default()),
            rules: ArcSwap::from_pointee(config.rules.unwrap_or_default()),
        }
    }

    /// Access the underlying service client.
    pub fn oracle(&self) -> &O {
        &self.oracle
    }

    pub fn is_authorized(&self) -> bool {
        self.authorized
    }

    // ── State ───────────────────────────────────────────────────

    /// Replace the whole dataset.
    pub fn set_data(&self, data: Collections) {
        self.data.store(Arc::new(data));
    }

    /// Replace the rules source.
    pub fn set_rules(&self, rules: impl Into<String>) {
        self.rules.store(Arc::new(rules.into()));
    }

    /// Read a rules file as text and replace the rules source with it.
    pub fn set_rules_from_file(&self, path: impl AsRef<Path>) -> Result<(), HarnessError> {
        let rules = std::fs::read_to_string(path)?;
        self.set_rules(rules);
        Ok(())
    }

    // ── Lifecycle ───────────────────────────────────────────────

    /// Authorize against the rules service. Idempotent: once a client is
    /// authorized, further calls are no-ops.
    pub async fn authorize(&mut self) -> Result<(), HarnessError> {
        if self.authorized {
            return Ok(());
        }
        self.oracle.authorize(&self.credential).await?;
        self.authorized = true;
        Ok(())
    }

    // ── Test operations ─────────────────────────────────────────

    /// Submit prepared cases to the service. Compilation issues in the
    /// rules source are fatal to the whole call.
    pub async fn test_rules(&self, cases: Vec<TestCase>) -> Result<Vec<TestResult>, HarnessError> {
        if !self.authorized {
            return Err(HarnessError::NotAuthorized);
        }

        let rules = self.rules.load_full();
        tracing::debug!(cases = cases.len(), "submitting test cases");
        let response = self
            .oracle
            .evaluate(&self.credential.project_id, &rules, &cases)
            .await?;

        if !response.issues.is_empty() {
            return Err(HarnessError::Rules(response.issues));
        }
        Ok(response.test_results)
    }

    pub async fn can_get(&self, auth: Auth, path: &str) -> Result<TestSummary, HarnessError> {
        self.read(Expectation::Allow, auth, path).await
    }

    pub async fn cannot_get(&self, auth: Auth, path: &str) -> Result<TestSummary, HarnessError> {
        self.read(Expectation::Deny, auth, path).await
    }

    pub async fn can_set(
        &self,
        auth: Auth,
        path: &str,
        data: Document,
    ) -> Result<TestSummary, HarnessError> {
        self.commit(Expectation::Allow, auth, vec![WriteOp::set(path, data)])
            .await
    }

    pub async fn cannot_set(
        &self,
        auth: Auth,
        path: &str,
        data: Document,
    ) -> Result<TestSummary, HarnessError> {
        self.commit(Expectation::Deny, auth, vec![WriteOp::set(path, data)])
            .await
    }

    pub async fn can_update(
        &self,
        auth: Auth,
        path: &str,
        data: Document,
    ) -> Result<TestSummary, HarnessError> {
        self.commit(Expectation::Allow, auth, vec![WriteOp::update(path, data)])
            .await
    }

    pub async fn cannot_update(
        &self,
        auth: Auth,
        path: &str,
        data: Document,
    ) -> Result<TestSummary, HarnessError> {
        self.commit(Expectation::Deny, auth, vec![WriteOp::update(path, data)])
            .await
    }

    pub async fn can_commit(
        &self,
        auth: Auth,
        batch: Vec<WriteOp>,
    ) -> Result<TestSummary, HarnessError> {
        self.commit(Expectation::Allow, auth, batch).await
    }

    pub async fn cannot_commit(
        &self,
        auth: Auth,
        batch: Vec<WriteOp>,
    ) -> Result<TestSummary, HarnessError> {
        self.commit(Expectation::Deny, auth, batch).await
    }

    // ── Private helpers ─────────────────────────────────────────

    async fn read(
        &self,
        expectation: Expectation,
        auth: Auth,
        path: &str,
    ) -> Result<TestSummary, HarnessError> {
        if !self.authorized {
            return Err(HarnessError::NotAuthorized);
        }
        let data = self.data.load_full();
        let case = get_case(expectation, auth, path, &data);
        self.run(vec![case]).await
    }

    async fn commit(
        &self,
        expectation: Expectation,
        auth: Auth,
        batch: Vec<WriteOp>,
    ) -> Result<TestSummary, HarnessError> {
        if !self.authorized {
            return Err(HarnessError::NotAuthorized);
        }
        let data = self.data.load_full();
        let cases = commit_cases(expectation, &auth, &batch, &data);
        self.run(cases).await
    }

    async fn run(&self, cases: Vec<TestCase>) -> Result<TestSummary, HarnessError> {
        let results = self.test_rules(cases.clone()).await?;
        Ok(TestSummary::new(cases, results))
    }
}
