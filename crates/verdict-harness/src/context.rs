use bson::Document;
use verdict_fixture::Collections;
use verdict_oracle::Oracle;
use verdict_oracle::wire::Auth;

use crate::database::{Database, DatabaseConfig};
use crate::error::HarnessError;
use crate::summary::TestSummary;

/// Per-suite harness state, passed explicitly through suite setup and
/// teardown hooks: `new → authorize → (set_rules/set_data)* → run tests →
/// dispose`. Rules and data survive re-authorization, and every test
/// operation before the first `authorize` fails with
/// [`HarnessError::NotAuthorized`].
pub struct TestContext<O> {
    db: Database<O>,
}

impl<O: Oracle> TestContext<O> {
    pub fn new(config: DatabaseConfig, oracle: O) -> Self {
        Self {
            db: Database::new(config, oracle),
        }
    }

    pub async fn authorize(&mut self) -> Result<(), HarnessError> {
        self.db.authorize().await
    }

    pub fn set_data(&self, data: Collections) {
        self.db.set_data(data);
    }

    pub fn set_rules(&self, rules: impl Into<String>) {
        self.db.set_rules(rules);
    }

    pub async fn can_get(&self, auth: Auth, path: &str) -> Result<TestSummary, HarnessError> {
        self.db.can_get(auth, path).await
    }

    pub async fn cannot_get(&self, auth: Auth, path: &str) -> Result<TestSummary, HarnessError> {
        self.db.cannot_get(auth, path).await
    }

    pub async fn can_set(
        &self,
        auth: Auth,
        path: &str,
        data: Document,
    ) -> Result<TestSummary, HarnessError> {
        self.db.can_set(auth, path, data).await
    }

    pub async fn cannot_set(
        &self,
        auth: Auth,
        path: &str,
        data: Document,
    ) -> Result<TestSummary, HarnessError> {
        self.db.cannot_set(auth, path, data).await
    }

    /// The full database surface, for operations beyond the context's
    /// convenience set.
    pub fn database(&self) -> &Database<O> {
        &self.db
    }

    /// Tear down at the end of the suite.
    pub fn dispose(self) {}
}
