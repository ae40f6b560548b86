//! Transaction core types
//!
//! Status and type enums are stored as SMALLINT in PostgreSQL; terminal
//! statuses carry negative or large-positive ids so PENDING stays 0.

use std::fmt;

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::Serialize;

/// Transaction type (direction of the balance delta)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[repr(i16)]
pub enum TransactionType {
    Deposit = 1,
    Withdrawal = 2,
    Transfer = 3,
}

impl TransactionType {
    #[inline]
    pub fn id(&self) -> i16 {
        *self as i16
    }

    pub fn from_id(id: i16) -> Option<Self> {
        match id {
            1 => Some(TransactionType::Deposit),
            2 => Some(TransactionType::Withdrawal),
            3 => Some(TransactionType::Transfer),
            _ => None,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            TransactionType::Deposit => "DEPOSIT",
            TransactionType::Withdrawal => "WITHDRAWAL",
            TransactionType::Transfer => "TRANSFER",
        }
    }

    pub fn parse(s: &str) -> Option<Self> {
        match s.to_uppercase().as_str() {
            "DEPOSIT" => Some(TransactionType::Deposit),
            "WITHDRAWAL" => Some(TransactionType::Withdrawal),
            "TRANSFER" => Some(TransactionType::Transfer),
            _ => None,
        }
    }

    /// The signed delta this transaction applies to the account:
    /// deposits credit, withdrawals and transfers debit.
    pub fn signed_delta(&self, amount: Decimal) -> Decimal {
        match self {
            TransactionType::Deposit => amount,
            TransactionType::Withdrawal | TransactionType::Transfer => -amount,
        }
    }
}

impl fmt::Display for TransactionType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Transaction lifecycle status
///
/// ```text
/// PENDING ──▶ SUCCESS
///    │ └────▶ FAILED
///    └──────▶ CANCELLED
/// ```
///
/// SUCCESS, FAILED and CANCELLED are terminal; nothing transitions out of
/// them, ever.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[repr(i16)]
pub enum TransactionStatus {
    Pending = 0,
    Success = 10,
    Failed = -10,
    Cancelled = -20,
}

impl TransactionStatus {
    #[inline]
    pub fn id(&self) -> i16 {
        *self as i16
    }

    pub fn from_id(id: i16) -> Option<Self> {
        match id {
            0 => Some(TransactionStatus::Pending),
            10 => Some(TransactionStatus::Success),
            -10 => Some(TransactionStatus::Failed),
            -20 => Some(TransactionStatus::Cancelled),
            _ => None,
        }
    }

    #[inline]
    pub fn is_terminal(&self) -> bool {
        !matches!(self, TransactionStatus::Pending)
    }

    /// The full transition relation of the state machine
    pub fn can_transition_to(&self, next: TransactionStatus) -> bool {
        matches!(
            (self, next),
            (
                TransactionStatus::Pending,
                TransactionStatus::Success
                    | TransactionStatus::Failed
                    | TransactionStatus::Cancelled
            )
        )
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            TransactionStatus::Pending => "PENDING",
            TransactionStatus::Success => "SUCCESS",
            TransactionStatus::Failed => "FAILED",
            TransactionStatus::Cancelled => "CANCELLED",
        }
    }
}

impl fmt::Display for TransactionStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Settlement request from the API layer
#[derive(Debug, Clone)]
pub struct SettlementRequest {
    pub account_id: i64,
    pub tx_type: TransactionType,
    pub amount: Decimal,
    pub description: Option<String>,
}

/// Transaction record stored in `transactions_tb`
///
/// The reference number is globally unique and assigned at creation; the
/// transaction date is set once and never touched again, including by
/// amendments.
#[derive(Debug, Clone, Serialize)]
pub struct TransactionRecord {
    pub id: i64,
    pub reference_number: String,
    pub account_id: i64,
    #[serde(serialize_with = "serialize_tx_type", rename = "type")]
    pub tx_type: TransactionType,
    pub amount: Decimal,
    #[serde(serialize_with = "serialize_tx_status")]
    pub status: TransactionStatus,
    pub description: Option<String>,
    /// Settlement failure cause, kept for the audit trail
    pub error: Option<String>,
    pub transaction_date: DateTime<Utc>,
}

fn serialize_tx_type<S: serde::Serializer>(t: &TransactionType, s: S) -> Result<S::Ok, S::Error> {
    s.serialize_str(t.as_str())
}

fn serialize_tx_status<S: serde::Serializer>(
    st: &TransactionStatus,
    s: S,
) -> Result<S::Ok, S::Error> {
    s.serialize_str(st.as_str())
}

impl fmt::Display for TransactionRecord {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "Transaction[{}] ref={} account={} {} {} status={}",
            self.id, self.reference_number, self.account_id, self.tx_type, self.amount, self.status
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_type_id_roundtrip() {
        for t in [
            TransactionType::Deposit,
            TransactionType::Withdrawal,
            TransactionType::Transfer,
        ] {
            assert_eq!(TransactionType::from_id(t.id()), Some(t));
        }
        assert_eq!(TransactionType::from_id(0), None);
        assert_eq!(TransactionType::from_id(4), None);
    }

    #[test]
    fn test_status_id_roundtrip() {
        for s in [
            TransactionStatus::Pending,
            TransactionStatus::Success,
            TransactionStatus::Failed,
            TransactionStatus::Cancelled,
        ] {
            assert_eq!(TransactionStatus::from_id(s.id()), Some(s));
        }
        assert_eq!(TransactionStatus::from_id(5), None);
    }

    #[test]
    fn test_terminal_states() {
        assert!(!TransactionStatus::Pending.is_terminal());
        assert!(TransactionStatus::Success.is_terminal());
        assert!(TransactionStatus::Failed.is_terminal());
        assert!(TransactionStatus::Cancelled.is_terminal());
    }

    #[test]
    fn test_no_transition_out_of_terminal() {
        let all = [
            TransactionStatus::Pending,
            TransactionStatus::Success,
            TransactionStatus::Failed,
            TransactionStatus::Cancelled,
        ];
        for from in all {
            for to in all {
                let allowed = from.can_transition_to(to);
                if from.is_terminal() {
                    assert!(!allowed, "{} -> {} must be rejected", from, to);
                }
                if from == TransactionStatus::Pending && to != TransactionStatus::Pending {
                    assert!(allowed, "{} -> {} must be permitted", from, to);
                }
            }
        }
    }

    #[test]
    fn test_signed_delta() {
        let amount = Decimal::new(5_000, 2);
        assert_eq!(TransactionType::Deposit.signed_delta(amount), amount);
        assert_eq!(TransactionType::Withdrawal.signed_delta(amount), -amount);
        assert_eq!(TransactionType::Transfer.signed_delta(amount), -amount);
    }

    #[test]
    fn test_type_parse() {
        assert_eq!(TransactionType::parse("deposit"), Some(TransactionType::Deposit));
        assert_eq!(TransactionType::parse("WITHDRAWAL"), Some(TransactionType::Withdrawal));
        assert_eq!(TransactionType::parse("refund"), None);
    }
}
