//! Bearer token acquisition
//!
//! The account service channel is bearer-authenticated with short-lived
//! service-account tokens (client-credentials grant). Tokens are fetched
//! per call and never cached: their TTL is deliberately shorter than any
//! caching would be worth, and an expired cached token would turn every
//! settlement into a transport failure.

use async_trait::async_trait;
use serde::Deserialize;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum TokenError {
    #[error("Token endpoint unreachable: {0}")]
    Unreachable(String),

    #[error("Token endpoint returned status {0}")]
    Rejected(u16),

    #[error("Malformed token response: {0}")]
    Malformed(String),
}

/// Capability that produces a bearer credential for one outbound call.
///
/// Injected into the probe at construction; implementations must not hold
/// process-global mutable token state.
#[async_trait]
pub trait TokenSource: Send + Sync {
    async fn bearer_token(&self) -> Result<String, TokenError>;
}

#[derive(Debug, Deserialize)]
struct TokenResponse {
    access_token: String,
}

/// Client-credentials grant against the authorization server
pub struct HttpTokenSource {
    client: reqwest::Client,
    token_url: String,
    client_id: String,
    client_secret: String,
}

impl HttpTokenSource {
    pub fn new(
        client: reqwest::Client,
        token_url: impl Into<String>,
        client_id: impl Into<String>,
        client_secret: impl Into<String>,
    ) -> Self {
        Self {
            client,
            token_url: token_url.into(),
            client_id: client_id.into(),
            client_secret: client_secret.into(),
        }
    }
}

#[async_trait]
impl TokenSource for HttpTokenSource {
    async fn bearer_token(&self) -> Result<String, TokenError> {
        let response = self
            .client
            .post(&self.token_url)
            .form(&[
                ("grant_type", "client_credentials"),
                ("client_id", self.client_id.as_str()),
                ("client_secret", self.client_secret.as_str()),
            ])
            .send()
            .await
            .map_err(|e| TokenError::Unreachable(e.to_string()))?;

        if !response.status().is_success() {
            return Err(TokenError::Rejected(response.status().as_u16()));
        }

        let body: TokenResponse = response
            .json()
            .await
            .map_err(|e| TokenError::Malformed(e.to_string()))?;

        Ok(body.access_token)
    }
}

/// Fixed token, for tests and local development without an auth server
pub struct StaticTokenSource(pub String);

#[async_trait]
impl TokenSource for StaticTokenSource {
    async fn bearer_token(&self) -> Result<String, TokenError> {
        Ok(self.0.clone())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_static_source_returns_fixed_token() {
        let source = StaticTokenSource("t-123".to_string());
        assert_eq!(source.bearer_token().await.unwrap(), "t-123");
    }

    #[test]
    fn test_token_response_parse() {
        let body: TokenResponse =
            serde_json::from_str(r#"{"access_token":"abc","token_type":"Bearer","expires_in":60}"#)
                .unwrap();
        assert_eq!(body.access_token, "abc");
    }
}
