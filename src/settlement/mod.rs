//! Settlement client
//!
//! The transaction service's view of the remote account ledger: a probe
//! over an authenticated HTTP channel, with the token and wire strategies
//! injected as capabilities.
//!
//! ```text
//! TransactionOrchestrator
//!         │
//!         ▼
//!   AccountProbe ──▶ TokenSource (fresh bearer per call)
//!         │
//!         ▼
//!   SettlementTransport (direct HTTP | open-circuit fallback)
//!         │
//!         ▼
//!   account service
//! ```

pub mod probe;
pub mod token;
pub mod transport;

pub use probe::AccountProbe;
pub use token::{HttpTokenSource, StaticTokenSource, TokenError, TokenSource};
pub use transport::{
    AccountSnapshot, DirectTransport, OpenCircuitTransport, SettlementFailure, SettlementTransport,
};
