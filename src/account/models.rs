//! Account model types
//!
//! Status and type enums are stored as SMALLINT in PostgreSQL.

use std::fmt;

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::Serialize;

/// Account lifecycle status
///
/// An account is created ACTIVE and transitions to CLOSED exactly once,
/// never back. A CLOSED account accepts no further balance mutation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[repr(i16)]
pub enum AccountStatus {
    Closed = 0,
    Active = 1,
}

impl AccountStatus {
    #[inline]
    pub fn id(&self) -> i16 {
        *self as i16
    }

    pub fn from_id(id: i16) -> Option<Self> {
        match id {
            0 => Some(AccountStatus::Closed),
            1 => Some(AccountStatus::Active),
            _ => None,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            AccountStatus::Closed => "CLOSED",
            AccountStatus::Active => "ACTIVE",
        }
    }
}

impl fmt::Display for AccountStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Account product type
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[repr(i16)]
pub enum AccountType {
    Savings = 1,
    Current = 2,
}

impl AccountType {
    #[inline]
    pub fn id(&self) -> i16 {
        *self as i16
    }

    pub fn from_id(id: i16) -> Option<Self> {
        match id {
            1 => Some(AccountType::Savings),
            2 => Some(AccountType::Current),
            _ => None,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            AccountType::Savings => "SAVINGS",
            AccountType::Current => "CURRENT",
        }
    }

    /// Parse from the wire representation (case-insensitive)
    pub fn parse(s: &str) -> Option<Self> {
        match s.to_uppercase().as_str() {
            "SAVINGS" => Some(AccountType::Savings),
            "CURRENT" => Some(AccountType::Current),
            _ => None,
        }
    }
}

impl fmt::Display for AccountType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Account snapshot as stored in `accounts_tb`
///
/// Balance is a scale-2 decimal and is never negative; the invariant is
/// enforced by the mutation statement in [`crate::account::AccountLedger`],
/// not here.
#[derive(Debug, Clone, Serialize)]
pub struct Account {
    pub id: i64,
    /// Human-readable number, pattern NL<2 digits>BANK<10 digits>, unique
    pub account_number: String,
    pub customer_id: i64,
    #[serde(serialize_with = "serialize_account_type")]
    pub account_type: AccountType,
    pub balance: Decimal,
    #[serde(serialize_with = "serialize_account_status")]
    pub status: AccountStatus,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

fn serialize_account_type<S: serde::Serializer>(t: &AccountType, s: S) -> Result<S::Ok, S::Error> {
    s.serialize_str(t.as_str())
}

fn serialize_account_status<S: serde::Serializer>(
    st: &AccountStatus,
    s: S,
) -> Result<S::Ok, S::Error> {
    s.serialize_str(st.as_str())
}

impl Account {
    #[inline]
    pub fn is_active(&self) -> bool {
        self.status == AccountStatus::Active
    }
}

impl fmt::Display for Account {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "Account[{}] number={} customer={} balance={} status={}",
            self.id, self.account_number, self.customer_id, self.balance, self.status
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_status_id_roundtrip() {
        assert_eq!(AccountStatus::from_id(0), Some(AccountStatus::Closed));
        assert_eq!(AccountStatus::from_id(1), Some(AccountStatus::Active));
        assert_eq!(AccountStatus::from_id(2), None);
        assert_eq!(AccountStatus::from_id(-1), None);
    }

    #[test]
    fn test_type_id_roundtrip() {
        assert_eq!(AccountType::from_id(1), Some(AccountType::Savings));
        assert_eq!(AccountType::from_id(2), Some(AccountType::Current));
        assert_eq!(AccountType::from_id(0), None);
    }

    #[test]
    fn test_type_parse() {
        assert_eq!(AccountType::parse("savings"), Some(AccountType::Savings));
        assert_eq!(AccountType::parse("CURRENT"), Some(AccountType::Current));
        assert_eq!(AccountType::parse("checking"), None);
    }

    #[test]
    fn test_serialized_shape() {
        let account = Account {
            id: 7,
            account_number: "NL01BANK0000000007".to_string(),
            customer_id: 42,
            account_type: AccountType::Savings,
            balance: Decimal::new(10_050, 2),
            status: AccountStatus::Active,
            created_at: Utc::now(),
            updated_at: Utc::now(),
        };
        let json = serde_json::to_value(&account).unwrap();
        assert_eq!(json["account_type"], "SAVINGS");
        assert_eq!(json["status"], "ACTIVE");
        assert_eq!(json["balance"], "100.50");
    }
}
