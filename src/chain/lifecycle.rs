//! Transaction lifecycle.
//!
//! # Responsibilities
//! - Guard-check the connected chain before every submission
//! - Submit one state-changing call and surface its handle immediately
//! - Await the confirmation signal (receipt) with a caller-imposed bound
//! - Terminate in `Confirmed` or `Failed`, never retrying automatically
//!
//! Every mutating action in the system (campaign operations and bootstrap
//! steps alike) runs through this one state machine; the operation itself
//! is just a parameter.

use alloy::providers::Provider;
use alloy::rpc::types::TransactionRequest;
use alloy::transports::{RpcError, TransportErrorKind};
use std::time::Duration;

use crate::chain::client::ChainClient;
use crate::chain::guard::NetworkGuard;
use crate::chain::types::{
    ChainError, ChainResult, OperationKind, PendingTransaction, TxOutcome, TxStatus,
};

/// EIP-1193 "user rejected request" error code, returned by wallet-backed
/// endpoints when the human declines a signature prompt.
const USER_REJECTED_CODE: i64 = 4001;

/// Runs mutating calls through the guard → submit → await pattern.
#[derive(Debug, Clone)]
pub struct TxLifecycle {
    client: ChainClient,
    guard: NetworkGuard,
    confirm_timeout: Duration,
}

impl TxLifecycle {
    pub fn new(client: ChainClient, guard: NetworkGuard, confirm_timeout_secs: u64) -> Self {
        Self {
            client,
            guard,
            confirm_timeout: Duration::from_secs(confirm_timeout_secs),
        }
    }

    /// Run one state-changing call to a terminal state.
    ///
    /// Returns `Err` when nothing reached the ledger (chain mismatch,
    /// signer refusal, node rejection at submission — with the remote
    /// reason passed through verbatim) and `Ok` once a handle exists, with
    /// the terminal status inside: `Confirmed` or, for a transaction that
    /// mined but reverted, `Failed`.
    pub async fn execute(
        &self,
        kind: OperationKind,
        tx: TransactionRequest,
    ) -> ChainResult<TxOutcome> {
        // No submission on a mismatched chain.
        self.guard.ensure(&self.client).await?;

        let pending = self
            .client
            .provider()
            .send_transaction(tx)
            .await
            .map_err(classify_send_error)?;
        let hash = *pending.tx_hash();

        // The handle is the pending indicator; surface it before blocking.
        tracing::info!(tx_hash = %hash, op = %kind, "Transaction submitted, awaiting confirmation");

        let receipt = pending
            .with_timeout(Some(self.confirm_timeout))
            .get_receipt()
            .await
            .map_err(|e| ChainError::Rpc(format!("awaiting receipt for {}: {}", hash, e)))?;

        let status = if receipt.status() {
            let block_number = receipt.block_number.unwrap_or_default();
            tracing::info!(tx_hash = %hash, block = block_number, op = %kind, "Transaction confirmed");
            TxStatus::Confirmed { block_number }
        } else {
            // A mined revert carries no explanation in its receipt.
            tracing::warn!(tx_hash = %hash, op = %kind, "Transaction reverted on-chain");
            TxStatus::Failed { reason: format!("transaction reverted on-chain (tx {})", hash) }
        };

        Ok(TxOutcome {
            record: PendingTransaction { hash, kind, status },
            receipt,
        })
    }
}

/// Map a submission error onto the error taxonomy.
///
/// An error *response* is the remote service speaking: code 4001 is the
/// signer declining, anything else (including revert explanations from
/// simulation) passes through verbatim. Everything else is plumbing.
fn classify_send_error(err: RpcError<TransportErrorKind>) -> ChainError {
    match err {
        RpcError::ErrorResp(payload) => {
            if payload.code == USER_REJECTED_CODE {
                ChainError::UserRejected(payload.message.to_string())
            } else {
                let mut reason = payload.message.to_string();
                if let Some(data) = &payload.data {
                    reason = format!("{} ({})", reason, data);
                }
                ChainError::RemoteRejected(reason)
            }
        }
        other => ChainError::Rpc(other.to_string()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use alloy::rpc::json_rpc::ErrorPayload;

    #[test]
    fn test_revert_passes_through_verbatim() {
        let err = RpcError::ErrorResp(ErrorPayload {
            code: 3,
            message: "execution reverted: Deadline has not passed".into(),
            data: None,
        });

        match classify_send_error(err) {
            ChainError::RemoteRejected(reason) => {
                assert_eq!(reason, "execution reverted: Deadline has not passed");
            }
            other => panic!("expected RemoteRejected, got {:?}", other),
        }
    }

    #[test]
    fn test_user_rejection_code() {
        let err = RpcError::ErrorResp(ErrorPayload {
            code: 4001,
            message: "User rejected the request".into(),
            data: None,
        });

        assert!(matches!(classify_send_error(err), ChainError::UserRejected(_)));
    }

    #[test]
    fn test_transport_failure_is_rpc_error() {
        let err = TransportErrorKind::custom_str("connection refused");
        assert!(matches!(classify_send_error(err), ChainError::Rpc(_)));
    }
}
