//! Campaign enumeration.
//!
//! The contract exposes no count or pagination query; records are
//! discovered by probing ids sequentially from 0 until the first absent
//! id. This is a capped heuristic over a densely packed id space, not a
//! general index: the probe stops at the first failure even if higher ids
//! could theoretically exist, and never looks past the configured bound.

use std::future::Future;

use alloy::primitives::{Address, U256};
use alloy::providers::DynProvider;

use crate::campaigns::bindings::Crowdfunding;
use crate::campaigns::types::Campaign;
use crate::chain::client::ChainClient;
use crate::chain::types::{ChainError, ChainResult};

/// Probe ids `0..max_id` strictly in increasing order, one at a time.
///
/// Queries run sequentially (not concurrently) to bound load on the
/// remote service and because absence of id *k* terminates the probe.
/// The first fetch failure stops the scan; everything gathered so far is
/// returned.
pub async fn scan_prefix<F, Fut>(max_id: u64, fetch: F) -> Vec<Campaign>
where
    F: Fn(u64) -> Fut,
    Fut: Future<Output = ChainResult<Campaign>>,
{
    let mut found = Vec::new();

    for id in 0..max_id {
        match fetch(id).await {
            Ok(campaign) => found.push(campaign),
            Err(_) => {
                tracing::debug!(id = id, gathered = found.len(), "Probe stopped at absent id");
                break;
            }
        }
    }

    found
}

/// Enumerates campaign records through the crowdfunding contract.
pub struct CampaignScanner {
    contract: Crowdfunding::CrowdfundingInstance<DynProvider>,
    max_id: u64,
}

impl CampaignScanner {
    /// `max_id` is the operational ceiling on the probe, supplied by
    /// configuration (`scan.max_campaign_id`).
    pub fn new(client: &ChainClient, crowdfunding: Address, max_id: u64) -> Self {
        Self {
            contract: Crowdfunding::new(crowdfunding, client.provider().clone()),
            max_id,
        }
    }

    /// Fetch one campaign record, or `NotFound` if the id is absent.
    pub async fn fetch(&self, id: u64) -> ChainResult<Campaign> {
        let record = self
            .contract
            .campaigns(U256::from(id))
            .call()
            .await
            .map_err(|_| ChainError::NotFound)?;
        Ok(Campaign::from_record(id, record))
    }

    /// Enumerate all reachable campaigns (a prefix of `0..max_id`).
    pub async fn scan(&self) -> Vec<Campaign> {
        let campaigns = scan_prefix(self.max_id, |id| self.fetch(id)).await;
        tracing::debug!(count = campaigns.len(), max_id = self.max_id, "Campaign scan complete");
        campaigns
    }
}
