use std::future::Future;
use std::time::{Duration, SystemTime, UNIX_EPOCH};

use jsonwebtoken::{Algorithm, EncodingKey, Header};
use serde::{Deserialize, Serialize};

use crate::credential::Credential;
use crate::error::OracleError;
use crate::wire::{EvaluateRequest, EvaluateResponse, RulesFile, Source, TestCase, TestSuite};

pub const DEFAULT_API_BASE_URL: &str = "https://firebaserules.googleapis.com";
pub const DEFAULT_TOKEN_URL: &str = "https://oauth2.googleapis.com/token";

const OAUTH_SCOPE: &str = "https://www.googleapis.com/auth/firebase";
const JWT_BEARER_GRANT: &str = "urn:ietf:params:oauth:grant-type:jwt-bearer";

/// The rules-evaluation service, seen as a black box: authorize once, then
/// submit rules source plus test cases and get one verdict per case back.
pub trait Oracle {
    fn authorize(
        &mut self,
        credential: &Credential,
    ) -> impl Future<Output = Result<(), OracleError>> + Send;

    fn evaluate(
        &self,
        project_id: &str,
        rules: &str,
        cases: &[TestCase],
    ) -> impl Future<Output = Result<EvaluateResponse, OracleError>> + Send;
}

/// Production client for the remote rules service.
pub struct HttpOracle {
    http: reqwest::Client,
    api_base_url: String,
    token_url: String,
    token: Option<String>,
}

impl HttpOracle {
    pub fn new() -> Result<Self, OracleError> {
        Self::with_endpoints(DEFAULT_API_BASE_URL, DEFAULT_TOKEN_URL)
    }

    /// Build a client against explicit endpoints (emulators, test servers).
    pub fn with_endpoints(
        api_base_url: impl Into<String>,
        token_url: impl Into<String>,
    ) -> Result<Self, OracleError> {
        let http = reqwest::Client::builder()
            .connect_timeout(Duration::from_secs(15))
            .timeout(Duration::from_secs(60))
            .build()
            .map_err(|e| OracleError::Http {
                status: None,
                message: e.to_string(),
            })?;

        Ok(Self {
            http,
            api_base_url: api_base_url.into(),
            token_url: token_url.into(),
            token: None,
        })
    }

    /// Sign the OAuth assertion claim over the credential's RSA key.
    fn signed_assertion(
        &self,
        credential: &Credential,
        now: u64,
    ) -> Result<String, OracleError> {
        #[derive(Debug, Serialize)]
        struct Claims<'a> {
            iss: &'a str,
            scope: &'a str,
            aud: &'a str,
            iat: u64,
            exp: u64,
        }

        let claims = Claims {
            iss: &credential.client_email,
            scope: OAUTH_SCOPE,
            aud: &self.token_url,
            iat: now,
            exp: now + 3600,
        };

        let key = EncodingKey::from_rsa_pem(credential.private_key.as_bytes())
            .map_err(|e| OracleError::Jwt(e.to_string()))?;
        jsonwebtoken::encode(&Header::new(Algorithm::RS256), &claims, &key)
            .map_err(|e| OracleError::Jwt(e.to_string()))
    }
}

impl Oracle for HttpOracle {
    async fn authorize(&mut self, credential: &Credential) -> Result<(), OracleError> {
        credential.validate()?;

        let now = SystemTime::now()
            .duration_since(UNIX_EPOCH)
            .map_err(|e| OracleError::Token(e.to_string()))?
            .as_secs();
        let assertion = self.signed_assertion(credential, now)?;

        #[derive(Debug, Deserialize)]
        struct TokenResponse {
            access_token: String,
        }

        let response = self
            .http
            .post(&self.token_url)
            .form(&[("grant_type", JWT_BEARER_GRANT), ("assertion", assertion.as_str())])
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            let message = response
                .text()
                .await
                .unwrap_or_else(|_| "unable to read token response body".to_string());
            return Err(OracleError::Token(format!("exchange failed ({status}): {message}")));
        }

        let payload: TokenResponse = response
            .json()
            .await
            .map_err(|e| OracleError::Decode(e.to_string()))?;
        self.token = Some(payload.access_token);
        tracing::info!(client_email = %credential.client_email, "authorized rules service client");
        Ok(())
    }

    async fn evaluate(
        &self,
        project_id: &str,
        rules: &str,
        cases: &[TestCase],
    ) -> Result<EvaluateResponse, OracleError> {
        let token = self
            .token
            .as_deref()
            .ok_or_else(|| OracleError::Token("no access token, authorize first".into()))?;

        let body = EvaluateRequest {
            source: Source {
                files: vec![RulesFile {
                    name: "security.rules".to_string(),
                    content: rules.to_string(),
                }],
            },
            test_suite: TestSuite {
                test_cases: cases.to_vec(),
            },
        };

        let url = format!(
            "{}/v1/projects/{}:test",
            self.api_base_url.trim_end_matches('/'),
            project_id
        );
        tracing::debug!(project_id, cases = cases.len(), "evaluating test cases");

        let response = self
            .http
            .post(url)
            .bearer_auth(token)
            .json(&body)
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            let message = response
                .text()
                .await
                .unwrap_or_else(|_| "unable to read response body".to_string());
            return Err(OracleError::Http {
                status: Some(status.as_u16()),
                message,
            });
        }

        response
            .json()
            .await
            .map_err(|e| OracleError::Decode(e.to_string()))
    }
}
