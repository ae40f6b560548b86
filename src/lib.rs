//! bankcore - Multi-Service Ledger Demo
//!
//! Separate services own accounts and transactions; the core is the
//! settlement protocol between them.
//!
//! # Modules
//!
//! - [`account`] - Account ledger: balance-owning store and its HTTP surface
//! - [`settlement`] - Account probe: authenticated client with token/transport seams
//! - [`transaction`] - Transaction orchestrator and store
//! - [`config`] - YAML application configuration
//! - [`db`] - PostgreSQL connection management
//! - [`logging`] - tracing initialization

pub mod api;
pub mod config;
pub mod db;
pub mod logging;

pub mod account;
pub mod settlement;
pub mod transaction;

// Convenient re-exports at crate root
pub use account::{Account, AccountLedger, AccountStatus, AccountType, LedgerError};
pub use db::Database;
pub use settlement::{
    AccountProbe, DirectTransport, OpenCircuitTransport, SettlementFailure, SettlementTransport,
    TokenSource,
};
pub use transaction::{
    TransactionError, TransactionOrchestrator, TransactionRecord, TransactionStatus,
    TransactionStore, TransactionType,
};
