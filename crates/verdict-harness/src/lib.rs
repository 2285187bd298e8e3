mod batch;
mod cases;
mod context;
mod database;
mod error;
mod mocks;
mod path;
mod summary;

pub use batch::WriteOp;
pub use cases::{commit_cases, get_case};
pub use context::TestContext;
pub use database::{Database, DatabaseConfig};
pub use error::HarnessError;
pub use mocks::{after_mocks, base_mocks};
pub use path::{DOCUMENT_PATH_PREFIX, wire_path};
pub use summary::{CaseOutcome, ExpectationError, TestSummary, expect_case};

pub use verdict_fixture::{Collections, Document, set_field_path};
pub use verdict_oracle::wire::{Auth, Expectation, Method};
pub use verdict_oracle::{Credential, HttpOracle, Oracle, OracleError};
