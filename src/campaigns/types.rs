//! Campaign and balance projections.
//!
//! Read-only copies of remote state. Never authoritative: discarded and
//! re-fetched after every confirmed mutation.

use alloy::primitives::{
    utils::{format_ether, format_units},
    Address, U256,
};
use chrono::DateTime;

use crate::campaigns::bindings::Crowdfunding;

/// One campaign record as stored by the crowdfunding contract.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Campaign {
    pub id: u64,
    pub title: String,
    pub creator: Address,
    pub goal_wei: U256,
    pub collected_wei: U256,
    /// Unix timestamp (seconds).
    pub deadline: u64,
    pub finalized: bool,
}

impl Campaign {
    pub fn from_record(id: u64, record: Crowdfunding::campaignsReturn) -> Self {
        Self {
            id,
            title: record.title,
            creator: record.creator,
            goal_wei: record.goal,
            collected_wei: record.collectedAmount,
            deadline: record.deadline.to::<u64>(),
            finalized: record.finalized,
        }
    }

    pub fn goal_eth(&self) -> String {
        format_ether(self.goal_wei)
    }

    pub fn collected_eth(&self) -> String {
        format_ether(self.collected_wei)
    }

    pub fn deadline_utc(&self) -> String {
        match DateTime::from_timestamp(self.deadline as i64, 0) {
            Some(ts) => ts.format("%Y-%m-%d %H:%M:%S UTC").to_string(),
            None => format!("@{}", self.deadline),
        }
    }

    pub fn is_active(&self) -> bool {
        !self.finalized
    }
}

/// Reward token balance with display metadata.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TokenBalance {
    pub amount: U256,
    pub decimals: u8,
    pub symbol: String,
}

impl TokenBalance {
    pub fn display(&self) -> String {
        match format_units(self.amount, self.decimals) {
            Ok(human) => format!("{} {}", human, self.symbol),
            Err(_) => format!("{} (raw) {}", self.amount, self.symbol),
        }
    }
}

/// Balances of one account.
///
/// The reward balance is best-effort: `None` means the token could not be
/// queried (e.g. not yet linked during bootstrap), not zero.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BalanceView {
    pub account: Address,
    pub native_wei: U256,
    pub reward: Option<TokenBalance>,
}

impl BalanceView {
    pub fn native_eth(&self) -> String {
        format_ether(self.native_wei)
    }

    pub fn reward_display(&self) -> String {
        match &self.reward {
            Some(balance) => balance.display(),
            None => "N/A".to_string(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use alloy::primitives::utils::parse_ether;

    fn water_well() -> Campaign {
        Campaign {
            id: 0,
            title: "Water Well".to_string(),
            creator: Address::ZERO,
            goal_wei: parse_ether("2").unwrap(),
            collected_wei: parse_ether("0.5").unwrap(),
            deadline: 1_767_225_600,
            finalized: false,
        }
    }

    #[test]
    fn test_wei_formatting() {
        let campaign = water_well();
        assert_eq!(campaign.goal_eth(), "2.000000000000000000");
        assert_eq!(campaign.collected_eth(), "0.500000000000000000");
        assert!(campaign.is_active());
    }

    #[test]
    fn test_half_eth_in_smallest_units() {
        // 0.5 ETH expressed in wei.
        let campaign = water_well();
        assert_eq!(campaign.collected_wei, U256::from(500_000_000_000_000_000u64));
    }

    #[test]
    fn test_deadline_rendering() {
        let campaign = water_well();
        assert!(campaign.deadline_utc().ends_with("UTC"));
    }

    #[test]
    fn test_reward_unavailable_display() {
        let view = BalanceView {
            account: Address::ZERO,
            native_wei: parse_ether("1").unwrap(),
            reward: None,
        };
        assert_eq!(view.reward_display(), "N/A");
        assert_eq!(view.native_eth(), "1.000000000000000000");
    }

    #[test]
    fn test_token_balance_display() {
        let balance = TokenBalance {
            amount: U256::from(1_500_000_000_000_000_000u64),
            decimals: 18,
            symbol: "CRT".to_string(),
        };
        assert_eq!(balance.display(), "1.500000000000000000 CRT");
    }
}
