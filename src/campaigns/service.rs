//! User-facing campaign actions.
//!
//! Composes the session, network guard, transaction lifecycle, and view
//! sync: every mutation follows the identical guard → submit → await →
//! refresh pattern, and a failed outcome surfaces its reason without
//! touching the projections.

use alloy::primitives::{utils::parse_ether, Address, U256};
use alloy::providers::DynProvider;
use alloy::rpc::types::TransactionReceipt;

use crate::campaigns::bindings::Crowdfunding;
use crate::campaigns::types::{BalanceView, Campaign};
use crate::campaigns::view::ViewSync;
use crate::chain::guard::{GuardReport, NetworkGuard};
use crate::chain::lifecycle::TxLifecycle;
use crate::chain::session::Session;
use crate::chain::types::{ChainError, ChainResult, OperationKind, TxOutcome};
use crate::config::ClientConfig;

/// Outcome of one user action.
#[derive(Debug)]
pub struct ActionResult {
    pub outcome: TxOutcome,
    /// Campaign id assigned by the contract, decoded from the creation
    /// event. Only present for confirmed create operations.
    pub assigned_id: Option<u64>,
}

/// Orchestrates campaign operations for one session.
pub struct CampaignService {
    session: Session,
    guard: NetworkGuard,
    lifecycle: TxLifecycle,
    view: ViewSync,
    crowdfunding: Crowdfunding::CrowdfundingInstance<DynProvider>,
}

impl CampaignService {
    pub fn new(session: Session, config: &ClientConfig) -> ChainResult<Self> {
        let crowdfunding_addr =
            require_address(&config.contracts.crowdfunding_address, "contracts.crowdfunding_address")?;
        let reward_token = optional_address(&config.contracts.reward_token_address);

        let guard = NetworkGuard::new(config.network.chain_id);
        let lifecycle = TxLifecycle::new(
            session.client().clone(),
            guard,
            config.network.confirm_timeout_secs,
        );
        let view = ViewSync::new(
            session.client().clone(),
            crowdfunding_addr,
            reward_token,
            config.scan.max_campaign_id,
        );
        let crowdfunding =
            Crowdfunding::new(crowdfunding_addr, session.client().provider().clone());

        Ok(Self { session, guard, lifecycle, view, crowdfunding })
    }

    pub fn session(&self) -> &Session {
        &self.session
    }

    /// Guard report for a status display; does not block anything.
    pub async fn status(&self) -> ChainResult<GuardReport> {
        self.guard.observe(self.session.client()).await
    }

    /// Create a campaign with a goal in ETH and a duration in days.
    pub async fn create_campaign(
        &self,
        title: &str,
        goal_eth: &str,
        duration_days: u64,
    ) -> ChainResult<ActionResult> {
        let goal_wei = parse_amount(goal_eth)?;
        let tx = self
            .crowdfunding
            .createCampaign(title.to_string(), goal_wei, U256::from(duration_days))
            .into_transaction_request();

        let outcome = self.lifecycle.execute(OperationKind::CreateCampaign, tx).await?;

        let assigned_id = if outcome.is_confirmed() {
            let id = assigned_campaign_id(&outcome.receipt);
            self.refresh(&outcome).await?;
            id
        } else {
            None
        };

        Ok(ActionResult { outcome, assigned_id })
    }

    /// Contribute ETH to a campaign.
    pub async fn contribute(&self, campaign_id: u64, amount_eth: &str) -> ChainResult<ActionResult> {
        let value = parse_amount(amount_eth)?;
        let tx = self
            .crowdfunding
            .contribute(U256::from(campaign_id))
            .value(value)
            .into_transaction_request();

        let outcome = self
            .lifecycle
            .execute(OperationKind::Contribute { campaign_id }, tx)
            .await?;
        if outcome.is_confirmed() {
            self.refresh(&outcome).await?;
        }

        Ok(ActionResult { outcome, assigned_id: None })
    }

    /// Finalize a campaign past its deadline.
    pub async fn finalize(&self, campaign_id: u64) -> ChainResult<ActionResult> {
        let tx = self
            .crowdfunding
            .finalizeCampaign(U256::from(campaign_id))
            .into_transaction_request();

        let outcome = self
            .lifecycle
            .execute(OperationKind::Finalize { campaign_id }, tx)
            .await?;
        if outcome.is_confirmed() {
            self.refresh(&outcome).await?;
        }

        Ok(ActionResult { outcome, assigned_id: None })
    }

    /// Enumerate campaigns (rebuilds the projection).
    pub async fn load_campaigns(&self) -> std::sync::Arc<Vec<Campaign>> {
        self.view.refresh_campaigns().await
    }

    /// Current campaign projection without refetching.
    pub fn campaigns(&self) -> std::sync::Arc<Vec<Campaign>> {
        self.view.campaigns()
    }

    /// Fetch balances for the session account (rebuilds the projection).
    pub async fn load_balances(&self) -> ChainResult<BalanceView> {
        let account = self.session.account()?;
        self.view.refresh_balances(account).await
    }

    async fn refresh(&self, outcome: &TxOutcome) -> ChainResult<()> {
        let account = self.session.account()?;
        self.view.refresh_after(&outcome.record.kind, account).await
    }
}

/// Decode the id the contract assigned, from the creation event.
fn assigned_campaign_id(receipt: &TransactionReceipt) -> Option<u64> {
    for log in receipt.inner.logs() {
        if let Ok(decoded) = log.log_decode::<Crowdfunding::CampaignCreated>() {
            return Some(decoded.inner.data.campaignId.to::<u64>());
        }
    }
    None
}

fn parse_amount(eth: &str) -> ChainResult<U256> {
    parse_ether(eth.trim()).map_err(|e| ChainError::InvalidAmount(format!("'{}': {}", eth, e)))
}

fn require_address(value: &str, field: &str) -> ChainResult<Address> {
    if value.is_empty() {
        return Err(ChainError::NotAvailable(format!("{} is not configured", field)));
    }
    value
        .parse()
        .map_err(|e| ChainError::NotAvailable(format!("{} is invalid: {}", field, e)))
}

fn optional_address(value: &str) -> Option<Address> {
    if value.is_empty() {
        None
    } else {
        value.parse().ok()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_amount_half_eth() {
        // 0.5 ETH in smallest units.
        let wei = parse_amount("0.5").unwrap();
        assert_eq!(wei, U256::from(500_000_000_000_000_000u64));
    }

    #[test]
    fn test_parse_amount_two_eth() {
        let wei = parse_amount("2").unwrap();
        assert_eq!(wei, U256::from(2_000_000_000_000_000_000u64));
    }

    #[test]
    fn test_parse_amount_rejects_garbage() {
        assert!(matches!(parse_amount("lots"), Err(ChainError::InvalidAmount(_))));
    }

    #[test]
    fn test_missing_contract_address() {
        let err = require_address("", "contracts.crowdfunding_address").unwrap_err();
        assert!(err.to_string().contains("contracts.crowdfunding_address"));
    }

    #[test]
    fn test_optional_address_empty_is_none() {
        assert!(optional_address("").is_none());
        assert!(optional_address("0x36a3049b546d8021ecff9b36f9d614208736c145").is_some());
    }
}
