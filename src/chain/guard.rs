//! Network guard.
//!
//! Verifies that the connected session targets the expected chain. Pure
//! read with no side effects; a mismatch blocks only the action being
//! guarded, never the process. The connected chain is re-queried on every
//! check rather than cached, because the endpoint may front an external
//! wallet that switches networks between calls.

use crate::chain::client::ChainClient;
use crate::chain::types::{ChainError, ChainId, ChainResult};

/// Guard holding the expected chain id.
#[derive(Debug, Clone, Copy)]
pub struct NetworkGuard {
    expected: ChainId,
}

/// Outcome of a guard check, suitable for a status display.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct GuardReport {
    pub ok: bool,
    pub observed: ChainId,
    pub expected: ChainId,
}

impl NetworkGuard {
    pub fn new(expected_chain_id: u64) -> Self {
        Self { expected: ChainId(expected_chain_id) }
    }

    /// Compare an observed chain id against the expectation.
    pub fn check(&self, observed: u64) -> GuardReport {
        GuardReport {
            ok: observed == self.expected.0,
            observed: ChainId(observed),
            expected: self.expected,
        }
    }

    /// Query the connected chain and report, without failing on mismatch.
    pub async fn observe(&self, client: &ChainClient) -> ChainResult<GuardReport> {
        let observed = client.chain_id().await?;
        Ok(self.check(observed.0))
    }

    /// Query the connected chain and fail with `NetworkMismatch` unless it
    /// matches. Invoked immediately before every mutating submission.
    pub async fn ensure(&self, client: &ChainClient) -> ChainResult<()> {
        let report = self.observe(client).await?;
        if !report.ok {
            tracing::warn!(
                observed = report.observed.0,
                expected = report.expected.0,
                "Connected chain does not match expectation, blocking action"
            );
            return Err(ChainError::NetworkMismatch {
                expected: report.expected.0,
                observed: report.observed.0,
            });
        }
        Ok(())
    }
}
