use std::fmt;

#[derive(Debug)]
pub enum OracleError {
    /// Credential is malformed or missing required fields.
    InvalidCredential(String),
    /// Signing the authorization claim failed.
    Jwt(String),
    /// Token exchange failed, or a call was made without a token.
    Token(String),
    /// Transport-level failure talking to the service.
    Http {
        status: Option<u16>,
        message: String,
    },
    /// The service answered with a body we could not decode.
    Decode(String),
}

impl fmt::Display for OracleError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            OracleError::InvalidCredential(msg) => write!(f, "invalid credential: {msg}"),
            OracleError::Jwt(msg) => write!(f, "jwt signing error: {msg}"),
            OracleError::Token(msg) => write!(f, "token error: {msg}"),
            OracleError::Http {
                status: Some(status),
                message,
            } => write!(f, "http error ({status}): {message}"),
            OracleError::Http {
                status: None,
                message,
            } => write!(f, "http error: {message}"),
            OracleError::Decode(msg) => write!(f, "decode error: {msg}"),
        }
    }
}

impl std::error::Error for OracleError {}

impl From<reqwest::Error> for OracleError {
    fn from(e: reqwest::Error) -> Self {
        OracleError::Http {
            status: e.status().map(|s| s.as_u16()),
            message: e.to_string(),
        }
    }
}
