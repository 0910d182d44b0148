//! Session establishment.
//!
//! A session binds together a query handle to the ledger, the connected
//! chain id, and (for signer-capable sessions) the account that signs
//! mutations. Sessions are immutable: an account or chain change requires
//! establishing a new session, never patching an existing one, so a stale
//! signer can never silently persist.

use alloy::network::EthereumWallet;
use alloy::primitives::Address;
use alloy::providers::{Provider, ProviderBuilder};

use crate::chain::client::ChainClient;
use crate::chain::types::{ChainError, ChainResult};
use crate::chain::wallet;
use crate::config::NetworkConfig;

/// An established connection to the ledger.
pub struct Session {
    client: ChainClient,
    account: Option<Address>,
    chain_id: u64,
}

impl Session {
    /// Establish a signer-capable session.
    ///
    /// The signing identity is re-derived fresh from the environment on
    /// every call; a previously derived account is never trusted.
    pub async fn connect(config: &NetworkConfig) -> ChainResult<Session> {
        let signer = wallet::load_signer()?;
        let account = signer.address();

        let url = parse_rpc_url(&config.rpc_url)?;
        let provider = ProviderBuilder::new()
            .wallet(EthereumWallet::from(signer))
            .connect_http(url)
            .erased();

        let client = ChainClient::new(provider, config.rpc_timeout_secs);
        let chain_id = client.chain_id().await?.0;

        tracing::info!(
            account = %account,
            chain_id = chain_id,
            rpc_url = %config.rpc_url,
            "Session established"
        );

        Ok(Session { client, account: Some(account), chain_id })
    }

    /// Establish a read-only session (no signing identity required).
    pub async fn read_only(config: &NetworkConfig) -> ChainResult<Session> {
        let url = parse_rpc_url(&config.rpc_url)?;
        let provider = ProviderBuilder::new().connect_http(url).erased();

        let client = ChainClient::new(provider, config.rpc_timeout_secs);
        let chain_id = client.chain_id().await?.0;

        tracing::debug!(chain_id = chain_id, "Read-only session established");

        Ok(Session { client, account: None, chain_id })
    }

    /// The signing account, if this session is signer-capable.
    pub fn account(&self) -> ChainResult<Address> {
        self.account.ok_or_else(|| {
            ChainError::WalletUnavailable("session is read-only, no signing account".to_string())
        })
    }

    pub fn signer_capable(&self) -> bool {
        self.account.is_some()
    }

    /// Chain id observed when the session was established. Mutating calls
    /// must not rely on this snapshot; the guard re-checks per call.
    pub fn chain_id(&self) -> u64 {
        self.chain_id
    }

    /// The query handle, usable without a signature.
    pub fn client(&self) -> &ChainClient {
        &self.client
    }
}

fn parse_rpc_url(rpc_url: &str) -> ChainResult<url::Url> {
    rpc_url
        .parse()
        .map_err(|e| ChainError::Rpc(format!("invalid RPC URL '{}': {}", rpc_url, e)))
}

impl std::fmt::Debug for Session {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Session")
            .field("account", &self.account)
            .field("chain_id", &self.chain_id)
            .finish()
    }
}
