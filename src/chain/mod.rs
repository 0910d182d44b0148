//! Ledger interaction subsystem.
//!
//! # Data Flow
//! ```text
//! Environment variable (private key)
//!     → wallet.rs (signer loading)
//!     → session.rs (account + provider, signer-capable or read-only)
//!     → guard.rs (connected chain must match the expected chain)
//!     → lifecycle.rs (submit → pending → confirmed | failed)
//! ```
//!
//! # Constraints
//! - Private keys come ONLY from the environment and are never logged
//! - The guard re-queries the connected chain per mutating call; the
//!   answer is never cached
//! - A terminal transaction is never reused or retried automatically

pub mod client;
pub mod guard;
pub mod lifecycle;
pub mod session;
pub mod types;
pub mod wallet;

pub use client::ChainClient;
pub use guard::NetworkGuard;
pub use lifecycle::TxLifecycle;
pub use session::Session;
pub use types::{
    ChainError, ChainId, ChainResult, OperationKind, PendingTransaction, TxOutcome, TxStatus,
};
