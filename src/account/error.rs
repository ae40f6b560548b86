//! Ledger error types

use thiserror::Error;

/// Errors raised by the account ledger
///
/// Business rejections carry stable codes so the HTTP layer and the remote
/// settlement probe can classify them without string matching.
#[derive(Error, Debug)]
pub enum LedgerError {
    #[error("Account not found: {0}")]
    AccountNotFound(i64),

    #[error("Account {0} is not active")]
    AccountNotActive(i64),

    #[error("Insufficient funds on account {0}")]
    InsufficientFunds(i64),

    #[error("Business rule violation: {0}")]
    BusinessRuleViolation(String),

    #[error("Duplicate account number: {0}")]
    DuplicateAccountNumber(String),

    #[error("Invalid account type: {0}")]
    InvalidAccountType(String),

    #[error("Invalid balance delta: {0}")]
    InvalidDelta(String),

    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),

    #[error("Internal system error: {0}")]
    SystemError(String),
}

impl LedgerError {
    /// Stable error code for API responses
    pub fn code(&self) -> &'static str {
        match self {
            LedgerError::AccountNotFound(_) => "ACCOUNT_NOT_FOUND",
            LedgerError::AccountNotActive(_) => "ACCOUNT_NOT_ACTIVE",
            LedgerError::InsufficientFunds(_) => "INSUFFICIENT_FUNDS",
            LedgerError::BusinessRuleViolation(_) => "BUSINESS_RULE_VIOLATION",
            LedgerError::DuplicateAccountNumber(_) => "DUPLICATE_ACCOUNT_NUMBER",
            LedgerError::InvalidAccountType(_) => "INVALID_ACCOUNT_TYPE",
            LedgerError::InvalidDelta(_) => "INVALID_DELTA",
            LedgerError::Database(_) => "DATABASE_ERROR",
            LedgerError::SystemError(_) => "SYSTEM_ERROR",
        }
    }

    /// HTTP status for the account service API
    pub fn http_status(&self) -> u16 {
        match self {
            LedgerError::AccountNotFound(_) => 404,
            LedgerError::AccountNotActive(_) => 422,
            LedgerError::InsufficientFunds(_) => 409,
            LedgerError::BusinessRuleViolation(_) => 422,
            LedgerError::DuplicateAccountNumber(_) => 409,
            LedgerError::InvalidAccountType(_) => 400,
            LedgerError::InvalidDelta(_) => 400,
            LedgerError::Database(_) => 500,
            LedgerError::SystemError(_) => 500,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_business_rejections_are_client_errors() {
        assert_eq!(LedgerError::AccountNotFound(1).http_status(), 404);
        assert_eq!(LedgerError::InsufficientFunds(1).http_status(), 409);
        assert_eq!(LedgerError::AccountNotActive(1).http_status(), 422);
        assert_eq!(
            LedgerError::Database(sqlx::Error::PoolClosed).http_status(),
            500
        );
    }

    #[test]
    fn test_codes_are_stable() {
        assert_eq!(LedgerError::InsufficientFunds(9).code(), "INSUFFICIENT_FUNDS");
        assert_eq!(LedgerError::AccountNotActive(9).code(), "ACCOUNT_NOT_ACTIVE");
    }
}
