//! Ledger RPC client with timeout and error handling.
//!
//! # Responsibilities
//! - Query chain state (chain id, balances) with per-request timeouts
//! - Expose the underlying provider for contract bindings and submission

use alloy::primitives::{Address, U256};
use alloy::providers::{DynProvider, Provider};
use std::time::Duration;
use tokio::time::timeout;

use crate::chain::types::{ChainError, ChainId, ChainResult};

/// Ledger RPC client wrapper.
#[derive(Clone)]
pub struct ChainClient {
    provider: DynProvider,
    /// Request timeout duration.
    timeout_duration: Duration,
}

impl ChainClient {
    /// Wrap a connected provider.
    pub fn new(provider: DynProvider, rpc_timeout_secs: u64) -> Self {
        Self {
            provider,
            timeout_duration: Duration::from_secs(rpc_timeout_secs),
        }
    }

    /// Get the chain ID from the RPC.
    pub async fn chain_id(&self) -> ChainResult<ChainId> {
        let fut = self.provider.get_chain_id();
        match timeout(self.timeout_duration, fut).await {
            Ok(Ok(id)) => Ok(ChainId(id)),
            Ok(Err(e)) => Err(ChainError::Rpc(format!("eth_chainId: {}", e))),
            Err(_) => Err(ChainError::Timeout(self.timeout_duration.as_secs())),
        }
    }

    /// Get the native balance of an address.
    pub async fn balance(&self, address: Address) -> ChainResult<U256> {
        let fut = self.provider.get_balance(address);
        match timeout(self.timeout_duration, fut).await {
            Ok(Ok(balance)) => Ok(balance),
            Ok(Err(e)) => Err(ChainError::Rpc(format!("eth_getBalance: {}", e))),
            Err(_) => Err(ChainError::Timeout(self.timeout_duration.as_secs())),
        }
    }

    /// Get the underlying provider.
    pub fn provider(&self) -> &DynProvider {
        &self.provider
    }
}

impl std::fmt::Debug for ChainClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ChainClient")
            .field("timeout_secs", &self.timeout_duration.as_secs())
            .finish()
    }
}
