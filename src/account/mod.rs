//! Account service
//!
//! PostgreSQL-backed account ledger plus its HTTP surface. The ledger is
//! the only writer of account rows; the transaction service sees accounts
//! exclusively through point-in-time snapshots returned over HTTP.

pub mod api;
pub mod error;
pub mod ledger;
pub mod models;

pub use error::LedgerError;
pub use ledger::AccountLedger;
pub use models::{Account, AccountStatus, AccountType};
