use std::fmt;

use verdict_oracle::OracleError;
use verdict_oracle::wire::Issue;

#[derive(Debug)]
pub enum HarnessError {
    /// A test operation ran before `authorize()`.
    NotAuthorized,
    /// The rules source failed to compile; fatal to the whole call.
    Rules(Vec<Issue>),
    /// Authorization, transport, or evaluation failure from the service.
    Oracle(OracleError),
    /// Reading a rules file failed.
    Io(std::io::Error),
}

impl fmt::Display for HarnessError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            HarnessError::NotAuthorized => {
                write!(f, "not authorized: call authorize() before running tests")
            }
            HarnessError::Rules(issues) => {
                write!(f, "rules compilation failed:")?;
                for issue in issues {
                    write!(
                        f,
                        "\nLine {}, column {}: {}",
                        issue.source_position.line,
                        issue.source_position.column,
                        issue.description
                    )?;
                }
                Ok(())
            }
            HarnessError::Oracle(e) => write!(f, "oracle error: {e}"),
            HarnessError::Io(e) => write!(f, "io error: {e}"),
        }
    }
}

impl std::error::Error for HarnessError {}

impl From<OracleError> for HarnessError {
    fn from(e: OracleError) -> Self {
        HarnessError::Oracle(e)
    }
}

impl From<std::io::Error> for HarnessError {
    fn from(e: std::io::Error) -> Self {
        HarnessError::Io(e)
    }
}
