//! Transaction service
//!
//! Records monetary transactions and settles each one against the account
//! ledger exactly once. The store owns persistence, the orchestrator owns
//! the state machine and the single settlement attempt, the API layer maps
//! outcomes onto the shared response envelope.

pub mod api;
pub mod error;
pub mod orchestrator;
pub mod store;
pub mod types;

pub use error::TransactionError;
pub use orchestrator::TransactionOrchestrator;
pub use store::TransactionStore;
pub use types::{SettlementRequest, TransactionRecord, TransactionStatus, TransactionType};
