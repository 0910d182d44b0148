//! View synchronization.
//!
//! Pulls current on-ledger state into local projections. Each projection
//! is rebuilt in full from the ledger and swapped wholesale; nothing is
//! ever patched in place, so a reader always observes a complete,
//! consistent snapshot.

use std::sync::Arc;

use alloy::primitives::Address;
use arc_swap::ArcSwap;

use crate::campaigns::bindings::RewardToken;
use crate::campaigns::scanner::CampaignScanner;
use crate::campaigns::types::{BalanceView, Campaign, TokenBalance};
use crate::chain::client::ChainClient;
use crate::chain::types::{ChainError, ChainResult, OperationKind};

/// Local read model of campaigns and balances.
pub struct ViewSync {
    client: ChainClient,
    scanner: CampaignScanner,
    reward_token: Option<Address>,
    campaigns: ArcSwap<Vec<Campaign>>,
    balances: ArcSwap<Option<BalanceView>>,
}

impl ViewSync {
    pub fn new(
        client: ChainClient,
        crowdfunding: Address,
        reward_token: Option<Address>,
        max_campaign_id: u64,
    ) -> Self {
        let scanner = CampaignScanner::new(&client, crowdfunding, max_campaign_id);
        Self {
            client,
            scanner,
            reward_token,
            campaigns: ArcSwap::from_pointee(Vec::new()),
            balances: ArcSwap::from_pointee(None),
        }
    }

    /// Current campaign projection (cheap snapshot load).
    pub fn campaigns(&self) -> Arc<Vec<Campaign>> {
        self.campaigns.load_full()
    }

    /// Current balance projection, if one has been fetched.
    pub fn balances(&self) -> Arc<Option<BalanceView>> {
        self.balances.load_full()
    }

    /// Rebuild the campaign list from the ledger and replace it.
    pub async fn refresh_campaigns(&self) -> Arc<Vec<Campaign>> {
        let fresh = Arc::new(self.scanner.scan().await);
        self.campaigns.store(fresh.clone());
        fresh
    }

    /// Rebuild the balance view for an account and replace it.
    ///
    /// The native balance must succeed; the reward-token balance is
    /// best-effort and degrades to unavailable (e.g. while the token is
    /// not yet linked during bootstrap).
    pub async fn refresh_balances(&self, account: Address) -> ChainResult<BalanceView> {
        let native_wei = self.client.balance(account).await?;

        let reward = match self.reward_token {
            Some(token) => match self.token_balance(token, account).await {
                Ok(balance) => Some(balance),
                Err(e) => {
                    tracing::debug!(error = %e, "Reward token unavailable, degrading balance view");
                    None
                }
            },
            None => None,
        };

        let view = BalanceView { account, native_wei, reward };
        self.balances.store(Arc::new(Some(view.clone())));
        Ok(view)
    }

    /// Refresh every read model a confirmed operation could have touched:
    /// balances always, the campaign list when the operation targeted or
    /// created a campaign.
    pub async fn refresh_after(&self, kind: &OperationKind, account: Address) -> ChainResult<()> {
        self.refresh_balances(account).await?;
        if kind.touches_campaigns() {
            self.refresh_campaigns().await;
        }
        Ok(())
    }

    async fn token_balance(&self, token: Address, account: Address) -> ChainResult<TokenBalance> {
        let contract = RewardToken::new(token, self.client.provider().clone());

        let decimals = contract.decimals().call().await.map_err(call_error)?;
        let symbol = contract.symbol().call().await.map_err(call_error)?;
        let amount = contract.balanceOf(account).call().await.map_err(call_error)?;

        Ok(TokenBalance { amount, decimals, symbol })
    }
}

fn call_error(e: alloy::contract::Error) -> ChainError {
    ChainError::Rpc(e.to_string())
}
