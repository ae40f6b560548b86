//! Account probe
//!
//! Client used by the transaction service for every look at remote account
//! state. Normalizes all failure modes:
//!
//! - `check_exists` is fail-closed: only an explicit positive confirmation
//!   from the ledger yields `true`. An unreachable ledger must never be
//!   treated as "account exists", or a transaction could settle against an
//!   account whose real state is unknown.
//! - `apply_delta` folds business rejections and transport failures into
//!   one [`SettlementFailure`]; the orchestrator reacts identically to
//!   both.

use std::sync::Arc;

use rust_decimal::Decimal;
use tracing::warn;

use super::token::TokenSource;
use super::transport::{AccountSnapshot, SettlementFailure, SettlementTransport};

pub struct AccountProbe {
    transport: Arc<dyn SettlementTransport>,
    tokens: Arc<dyn TokenSource>,
}

impl AccountProbe {
    pub fn new(transport: Arc<dyn SettlementTransport>, tokens: Arc<dyn TokenSource>) -> Self {
        Self { transport, tokens }
    }

    /// True only on explicit positive confirmation from the ledger.
    ///
    /// Deliberately not a pre-flight inside the settlement path: because
    /// this check fails closed, an unreachable ledger would reject the
    /// transaction before the PENDING row exists, leaving no audit record,
    /// whereas the delta call itself already reports a missing account and
    /// settles as FAILED with the row kept. Exposed for callers that want a
    /// cheap account validation before submitting a transaction.
    pub async fn check_exists(&self, account_id: i64) -> bool {
        let token = match self.tokens.bearer_token().await {
            Ok(t) => t,
            Err(e) => {
                warn!(account_id, error = %e, "Token fetch failed, treating account as absent");
                return false;
            }
        };

        match self.transport.check_exists(account_id, &token).await {
            Ok(found) => found,
            Err(e) => {
                warn!(
                    account_id,
                    transport = self.transport.name(),
                    error = %e,
                    "Existence probe failed, treating account as absent"
                );
                false
            }
        }
    }

    /// Forward a signed delta to the ledger.
    ///
    /// A failed token fetch counts as a transport failure: the mutation was
    /// never attempted, which settles the same way as an unreachable ledger.
    pub async fn apply_delta(
        &self,
        account_id: i64,
        delta: Decimal,
    ) -> Result<AccountSnapshot, SettlementFailure> {
        let token = self
            .tokens
            .bearer_token()
            .await
            .map_err(|e| SettlementFailure::Transport(format!("token fetch failed: {}", e)))?;

        self.transport.apply_delta(account_id, delta, &token).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::settlement::token::{StaticTokenSource, TokenError};
    use crate::settlement::transport::mock::MockTransport;
    use async_trait::async_trait;

    struct BrokenTokenSource;

    #[async_trait]
    impl TokenSource for BrokenTokenSource {
        async fn bearer_token(&self) -> Result<String, TokenError> {
            Err(TokenError::Unreachable("connection refused".to_string()))
        }
    }

    fn probe_with(transport: MockTransport) -> AccountProbe {
        AccountProbe::new(
            Arc::new(transport),
            Arc::new(StaticTokenSource("test-token".to_string())),
        )
    }

    #[tokio::test]
    async fn test_exists_positive_confirmation() {
        let probe = probe_with(MockTransport::succeeding(Decimal::ZERO));
        assert!(probe.check_exists(1).await);
    }

    #[tokio::test]
    async fn test_exists_fail_closed_on_transport_failure() {
        let probe = probe_with(MockTransport::failing(SettlementFailure::Transport(
            "timeout".to_string(),
        )));
        assert!(!probe.check_exists(1).await);
    }

    #[tokio::test]
    async fn test_exists_fail_closed_on_token_failure() {
        let probe = AccountProbe::new(
            Arc::new(MockTransport::succeeding(Decimal::ZERO)),
            Arc::new(BrokenTokenSource),
        );
        assert!(!probe.check_exists(1).await);
    }

    #[tokio::test]
    async fn test_delta_success_returns_snapshot() {
        let probe = probe_with(MockTransport::succeeding(Decimal::new(15_000, 2)));
        let snapshot = probe.apply_delta(1, Decimal::new(5_000, 2)).await.unwrap();
        assert_eq!(snapshot.balance, Decimal::new(15_000, 2));
    }

    #[tokio::test]
    async fn test_delta_business_rejection_passes_through() {
        let probe = probe_with(MockTransport::failing(SettlementFailure::InsufficientFunds));
        let err = probe.apply_delta(1, Decimal::new(-5_000, 2)).await.unwrap_err();
        assert_eq!(err, SettlementFailure::InsufficientFunds);
    }

    #[tokio::test]
    async fn test_delta_token_failure_is_transport_failure() {
        let probe = AccountProbe::new(
            Arc::new(MockTransport::succeeding(Decimal::ZERO)),
            Arc::new(BrokenTokenSource),
        );
        let err = probe.apply_delta(1, Decimal::ONE).await.unwrap_err();
        assert!(matches!(err, SettlementFailure::Transport(_)));
    }
}
