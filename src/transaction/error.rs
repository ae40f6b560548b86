//! Transaction error types

use thiserror::Error;

use crate::settlement::SettlementFailure;

use super::types::TransactionStatus;

#[derive(Error, Debug)]
pub enum TransactionError {
    #[error("Invalid transaction amount: {0}")]
    InvalidAmount(String),

    #[error("Transaction not found: {0}")]
    NotFound(i64),

    #[error("Transaction not found with reference: {0}")]
    NotFoundByReference(String),

    /// Attempted amend/cancel on a transaction that already left PENDING
    #[error(
        "Cannot modify a transaction with status {current}. Only PENDING transactions can be amended or cancelled"
    )]
    InvalidStateTransition { current: TransactionStatus },

    /// The single settlement attempt failed; the transaction is FAILED and
    /// kept as an audit record. Resubmitting creates a new transaction with
    /// a new reference number.
    #[error("Settlement failed for transaction {reference}: {cause}")]
    SettlementFailed {
        reference: String,
        cause: SettlementFailure,
    },

    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),

    #[error("Internal system error: {0}")]
    SystemError(String),
}

impl TransactionError {
    /// Stable error code for API responses
    pub fn code(&self) -> &'static str {
        match self {
            TransactionError::InvalidAmount(_) => "INVALID_AMOUNT",
            TransactionError::NotFound(_) | TransactionError::NotFoundByReference(_) => {
                "TRANSACTION_NOT_FOUND"
            }
            TransactionError::InvalidStateTransition { .. } => "INVALID_STATE_TRANSITION",
            TransactionError::SettlementFailed { .. } => "SETTLEMENT_FAILED",
            TransactionError::Database(_) => "DATABASE_ERROR",
            TransactionError::SystemError(_) => "SYSTEM_ERROR",
        }
    }

    /// HTTP status for the transaction service API
    pub fn http_status(&self) -> u16 {
        match self {
            TransactionError::InvalidAmount(_) => 400,
            TransactionError::NotFound(_) | TransactionError::NotFoundByReference(_) => 404,
            TransactionError::InvalidStateTransition { .. } => 409,
            // Settlement failure is a business outcome, not a server fault
            TransactionError::SettlementFailed { .. } => 422,
            TransactionError::Database(_) => 500,
            TransactionError::SystemError(_) => 500,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_invalid_transition_names_current_status() {
        let e = TransactionError::InvalidStateTransition {
            current: TransactionStatus::Success,
        };
        assert!(e.to_string().contains("SUCCESS"));
        assert_eq!(e.http_status(), 409);
    }

    #[test]
    fn test_settlement_failure_is_unprocessable_not_server_error() {
        let e = TransactionError::SettlementFailed {
            reference: "ref-1".to_string(),
            cause: SettlementFailure::InsufficientFunds,
        };
        assert_eq!(e.http_status(), 422);
        assert_eq!(e.code(), "SETTLEMENT_FAILED");
        assert!(e.to_string().contains("Insufficient funds"));
    }
}
