//! Settlement transport
//!
//! The wire strategy behind the account probe. Two variants:
//! [`DirectTransport`] performs the real HTTP calls against the account
//! service; [`OpenCircuitTransport`] is the fallback selected by policy
//! when the account service is known to be down, and refuses every call as
//! a transport failure so settlements fail fast instead of hanging.

use std::time::Duration;

use async_trait::async_trait;
use rust_decimal::Decimal;
use serde::Deserialize;
use thiserror::Error;

use crate::api::error_codes;

/// One settlement attempt's failure, regardless of where it failed.
///
/// The orchestrator treats every variant the same way (transaction goes
/// FAILED); the variants exist for the audit record and the caller's error
/// message.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum SettlementFailure {
    #[error("Account not found")]
    AccountNotFound,

    #[error("Account is not active")]
    AccountNotActive,

    #[error("Insufficient funds")]
    InsufficientFunds,

    /// Ledger unreachable, timeout, auth rejection, 5xx, malformed body.
    /// No idempotency token is sent on the mutation call, so a timeout here
    /// may race a late success at the ledger; the transaction is still
    /// deterministically FAILED.
    #[error("Account service transport failure: {0}")]
    Transport(String),
}

/// Point-in-time echo of an account returned by the ledger.
///
/// Never a writable copy; the transaction service only reads it.
#[derive(Debug, Clone, Deserialize)]
pub struct AccountSnapshot {
    pub id: i64,
    pub account_number: String,
    pub balance: Decimal,
    pub status: String,
}

/// Wire strategy for the two remote ledger endpoints
#[async_trait]
pub trait SettlementTransport: Send + Sync {
    fn name(&self) -> &'static str;

    /// GET /api/accounts/exists/{id} — positive confirmation only
    async fn check_exists(
        &self,
        account_id: i64,
        bearer: &str,
    ) -> Result<bool, SettlementFailure>;

    /// PATCH /api/accounts/{id}/balance with a signed delta
    async fn apply_delta(
        &self,
        account_id: i64,
        delta: Decimal,
        bearer: &str,
    ) -> Result<AccountSnapshot, SettlementFailure>;
}

#[derive(Debug, Deserialize)]
struct Envelope<T> {
    code: i32,
    data: Option<T>,
    msg: Option<String>,
}

#[derive(Debug, serde::Serialize)]
struct DeltaBody {
    delta: Decimal,
}

/// Classify a non-success HTTP response from the ledger.
///
/// Business rejections are recognized by their envelope code; everything
/// else (5xx, auth failures, unparseable bodies) is a transport failure.
fn classify_rejection(status: u16, code: Option<i32>, msg: &str) -> SettlementFailure {
    match code {
        Some(error_codes::ACCOUNT_NOT_FOUND) => SettlementFailure::AccountNotFound,
        Some(error_codes::ACCOUNT_NOT_ACTIVE) => SettlementFailure::AccountNotActive,
        Some(error_codes::INSUFFICIENT_FUNDS) => SettlementFailure::InsufficientFunds,
        _ => SettlementFailure::Transport(format!(
            "account service returned status {}: {}",
            status, msg
        )),
    }
}

/// Real HTTP transport against the account service
pub struct DirectTransport {
    client: reqwest::Client,
    base_url: String,
}

impl DirectTransport {
    /// Build with a bounded per-request timeout; a timed-out call surfaces
    /// as [`SettlementFailure::Transport`].
    pub fn new(base_url: impl Into<String>, timeout: Duration) -> Result<Self, reqwest::Error> {
        let client = reqwest::Client::builder().timeout(timeout).build()?;
        Ok(Self {
            client,
            base_url: base_url.into(),
        })
    }
}

#[async_trait]
impl SettlementTransport for DirectTransport {
    fn name(&self) -> &'static str {
        "direct"
    }

    async fn check_exists(&self, account_id: i64, bearer: &str) -> Result<bool, SettlementFailure> {
        let url = format!("{}/api/accounts/exists/{}", self.base_url, account_id);

        let response = self
            .client
            .get(&url)
            .bearer_auth(bearer)
            .send()
            .await
            .map_err(|e| SettlementFailure::Transport(e.to_string()))?;

        if !response.status().is_success() {
            let status = response.status().as_u16();
            return Err(SettlementFailure::Transport(format!(
                "exists check returned status {}",
                status
            )));
        }

        let body: Envelope<bool> = response
            .json()
            .await
            .map_err(|e| SettlementFailure::Transport(e.to_string()))?;

        // Only an explicit positive confirmation counts
        Ok(body.code == 0 && body.data == Some(true))
    }

    async fn apply_delta(
        &self,
        account_id: i64,
        delta: Decimal,
        bearer: &str,
    ) -> Result<AccountSnapshot, SettlementFailure> {
        let url = format!("{}/api/accounts/{}/balance", self.base_url, account_id);

        let response = self
            .client
            .patch(&url)
            .bearer_auth(bearer)
            .json(&DeltaBody { delta })
            .send()
            .await
            .map_err(|e| SettlementFailure::Transport(e.to_string()))?;

        let status = response.status().as_u16();

        if response.status().is_success() {
            let body: Envelope<AccountSnapshot> = response
                .json()
                .await
                .map_err(|e| SettlementFailure::Transport(e.to_string()))?;

            return match body.data {
                Some(snapshot) if body.code == 0 => Ok(snapshot),
                _ => Err(SettlementFailure::Transport(format!(
                    "2xx response without account snapshot (code {})",
                    body.code
                ))),
            };
        }

        // Business rejection or server failure: classify by envelope code
        match response.json::<Envelope<serde_json::Value>>().await {
            Ok(body) => Err(classify_rejection(
                status,
                Some(body.code),
                body.msg.as_deref().unwrap_or(""),
            )),
            Err(_) => Err(classify_rejection(status, None, "unreadable body")),
        }
    }
}

/// Fallback transport selected when the circuit to the account service is
/// open. Every call fails fast as a transport failure.
pub struct OpenCircuitTransport;

#[async_trait]
impl SettlementTransport for OpenCircuitTransport {
    fn name(&self) -> &'static str {
        "open-circuit"
    }

    async fn check_exists(&self, account_id: i64, _bearer: &str) -> Result<bool, SettlementFailure> {
        tracing::error!(account_id, "Account service circuit open - exists check refused");
        Err(SettlementFailure::Transport(
            "account service is currently unavailable".to_string(),
        ))
    }

    async fn apply_delta(
        &self,
        account_id: i64,
        _delta: Decimal,
        _bearer: &str,
    ) -> Result<AccountSnapshot, SettlementFailure> {
        tracing::error!(account_id, "Account service circuit open - delta refused");
        Err(SettlementFailure::Transport(
            "account service is currently unavailable".to_string(),
        ))
    }
}


#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_classify_business_rejections() {
        assert_eq!(
            classify_rejection(404, Some(error_codes::ACCOUNT_NOT_FOUND), "nope"),
            SettlementFailure::AccountNotFound
        );
        assert_eq!(
            classify_rejection(409, Some(error_codes::INSUFFICIENT_FUNDS), "broke"),
            SettlementFailure::InsufficientFunds
        );
        assert_eq!(
            classify_rejection(422, Some(error_codes::ACCOUNT_NOT_ACTIVE), "closed"),
            SettlementFailure::AccountNotActive
        );
    }

    #[test]
    fn test_classify_server_failures_as_transport() {
        assert!(matches!(
            classify_rejection(500, Some(error_codes::INTERNAL_ERROR), "boom"),
            SettlementFailure::Transport(_)
        ));
        assert!(matches!(
            classify_rejection(401, None, "unauthorized"),
            SettlementFailure::Transport(_)
        ));
        assert!(matches!(
            classify_rejection(503, None, "unreadable body"),
            SettlementFailure::Transport(_)
        ));
    }

    #[tokio::test]
    async fn test_open_circuit_refuses_everything() {
        let transport = OpenCircuitTransport;
        assert!(matches!(
            transport.check_exists(1, "t").await,
            Err(SettlementFailure::Transport(_))
        ));
        assert!(matches!(
            transport.apply_delta(1, Decimal::ONE, "t").await,
            Err(SettlementFailure::Transport(_))
        ));
    }

    #[test]
    fn test_snapshot_parses_ledger_response() {
        let json = r#"{
            "code": 0,
            "data": {
                "id": 3,
                "account_number": "NL42BANK0123456789",
                "customer_id": 9,
                "account_type": "SAVINGS",
                "balance": "150.00",
                "status": "ACTIVE",
                "created_at": "2026-01-01T00:00:00Z",
                "updated_at": "2026-01-01T00:00:00Z"
            }
        }"#;
        let envelope: Envelope<AccountSnapshot> = serde_json::from_str(json).unwrap();
        let snapshot = envelope.data.unwrap();
        assert_eq!(snapshot.id, 3);
        assert_eq!(snapshot.balance, Decimal::new(15_000, 2));
        assert_eq!(snapshot.status, "ACTIVE");
    }
}
