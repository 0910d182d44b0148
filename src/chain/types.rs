//! Chain-specific types and error definitions.

use alloy::primitives::{Address, TxHash};
use thiserror::Error;

/// Chain ID type for strong typing.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ChainId(pub u64);

impl From<u64> for ChainId {
    fn from(id: u64) -> Self {
        Self(id)
    }
}

impl From<ChainId> for u64 {
    fn from(id: ChainId) -> Self {
        id.0
    }
}

impl std::fmt::Display for ChainId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Errors that can occur while talking to the ledger.
#[derive(Debug, Error)]
pub enum ChainError {
    /// No signing credential is available for this session.
    #[error("wallet unavailable: {0}")]
    WalletUnavailable(String),

    /// The signer declined the request (EIP-1193 rejection).
    #[error("rejected by signer: {0}")]
    UserRejected(String),

    /// Connected chain differs from the expected chain. Blocks only the
    /// specific action that was about to be submitted.
    #[error("chain mismatch: connected to chain {observed}, expected {expected}")]
    NetworkMismatch { expected: u64, observed: u64 },

    /// The remote service declined or reverted a submitted mutation.
    /// Carries the remote-supplied explanation unmodified.
    #[error("rejected by remote: {0}")]
    RemoteRejected(String),

    /// A queried record does not exist. Used as the enumeration
    /// termination signal, not an application error.
    #[error("record not found")]
    NotFound,

    /// A deployment step produced no confirmed contract address.
    #[error("deploy failed: {0}")]
    DeployFailed(String),

    /// Malformed user-supplied amount.
    #[error("invalid amount: {0}")]
    InvalidAmount(String),

    /// RPC connection or request failed.
    #[error("RPC error: {0}")]
    Rpc(String),

    /// RPC request timed out.
    #[error("RPC timeout after {0} seconds")]
    Timeout(u64),

    /// Required configuration is absent.
    #[error("not available: {0}")]
    NotAvailable(String),
}

/// Result type for chain operations.
pub type ChainResult<T> = Result<T, ChainError>;

/// What a transaction was submitted for. Determines which read models a
/// confirmation invalidates.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum OperationKind {
    CreateCampaign,
    Contribute { campaign_id: u64 },
    Finalize { campaign_id: u64 },
    DeployContract { name: &'static str },
    LinkRewardToken,
    TransferOwnership,
}

impl OperationKind {
    /// Whether a confirmation of this operation changes the campaign list.
    pub fn touches_campaigns(&self) -> bool {
        matches!(
            self,
            OperationKind::CreateCampaign
                | OperationKind::Contribute { .. }
                | OperationKind::Finalize { .. }
        )
    }
}

impl std::fmt::Display for OperationKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            OperationKind::CreateCampaign => write!(f, "create-campaign"),
            OperationKind::Contribute { campaign_id } => write!(f, "contribute#{}", campaign_id),
            OperationKind::Finalize { campaign_id } => write!(f, "finalize#{}", campaign_id),
            OperationKind::DeployContract { name } => write!(f, "deploy:{}", name),
            OperationKind::LinkRewardToken => write!(f, "link-reward-token"),
            OperationKind::TransferOwnership => write!(f, "transfer-ownership"),
        }
    }
}

/// Terminal-or-pending status of a submitted transaction.
///
/// The idle state has no representation here: before submission there is
/// no `PendingTransaction` at all, and each user action creates a fresh
/// one. `Confirmed` and `Failed` are terminal.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TxStatus {
    /// Accepted by the node, awaiting irreversible inclusion.
    Submitted,
    /// Durably recorded.
    Confirmed { block_number: u64 },
    /// Rejected or reverted on-chain; carries the reason.
    Failed { reason: String },
}

/// One in-flight user action against the ledger.
#[derive(Debug, Clone)]
pub struct PendingTransaction {
    /// Transaction handle assigned at submission.
    pub hash: TxHash,
    /// The operation this transaction performs.
    pub kind: OperationKind,
    /// Current lifecycle status.
    pub status: TxStatus,
}

impl PendingTransaction {
    pub fn is_confirmed(&self) -> bool {
        matches!(self.status, TxStatus::Confirmed { .. })
    }
}

/// Everything known about a mined transaction: the lifecycle record plus
/// the receipt, which is the confirmation signal itself (and carries the
/// created contract address for deployments).
#[derive(Debug)]
pub struct TxOutcome {
    pub record: PendingTransaction,
    pub receipt: alloy::rpc::types::TransactionReceipt,
}

impl TxOutcome {
    pub fn is_confirmed(&self) -> bool {
        self.record.is_confirmed()
    }

    /// Address of the contract created by this transaction, if any.
    pub fn deployed_address(&self) -> Option<Address> {
        self.receipt.contract_address
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_chain_id_conversion() {
        let chain_id = ChainId::from(1u64);
        assert_eq!(chain_id.0, 1);
        assert_eq!(u64::from(chain_id), 1);
    }

    #[test]
    fn test_error_display() {
        let err = ChainError::NetworkMismatch { expected: 11_155_111, observed: 1 };
        let msg = err.to_string();
        assert!(msg.contains("11155111"));
        assert!(msg.contains("connected to chain 1"));

        let err = ChainError::RemoteRejected("execution reverted: goal not reached".to_string());
        assert!(err.to_string().contains("execution reverted: goal not reached"));
    }

    #[test]
    fn test_refresh_scope() {
        assert!(OperationKind::CreateCampaign.touches_campaigns());
        assert!(OperationKind::Contribute { campaign_id: 3 }.touches_campaigns());
        assert!(OperationKind::Finalize { campaign_id: 0 }.touches_campaigns());
        assert!(!OperationKind::DeployContract { name: "RewardToken" }.touches_campaigns());
        assert!(!OperationKind::LinkRewardToken.touches_campaigns());
        assert!(!OperationKind::TransferOwnership.touches_campaigns());
    }

    #[test]
    fn test_terminal_status() {
        let tx = PendingTransaction {
            hash: TxHash::ZERO,
            kind: OperationKind::CreateCampaign,
            status: TxStatus::Confirmed { block_number: 100 },
        };
        assert!(tx.is_confirmed());

        let tx = PendingTransaction {
            hash: TxHash::ZERO,
            kind: OperationKind::Finalize { campaign_id: 1 },
            status: TxStatus::Failed { reason: "transaction reverted".to_string() },
        };
        assert!(!tx.is_confirmed());
    }
}
