mod client;
mod credential;
mod error;
pub mod wire;

pub use client::{DEFAULT_API_BASE_URL, DEFAULT_TOKEN_URL, HttpOracle, Oracle};
pub use credential::Credential;
pub use error::OracleError;
