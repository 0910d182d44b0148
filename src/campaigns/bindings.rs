//! Typed bindings for the deployed contracts.
//!
//! The contracts are external collaborators; only their observable
//! call/event surface is declared here. Campaign accounting (goal
//! tracking, the reward-mint formula) lives on-chain.

use alloy::sol;

sol! {
    #[sol(rpc)]
    contract Crowdfunding {
        function campaigns(uint256 id) external view returns (
            string title,
            address creator,
            uint256 goal,
            uint256 collectedAmount,
            uint256 deadline,
            bool finalized
        );

        function createCampaign(string _title, uint256 _goal, uint256 _durationInDays) external;
        function contribute(uint256 _campaignId) external payable;
        function finalizeCampaign(uint256 _campaignId) external;

        function rewardToken() external view returns (address);
        function setRewardToken(address token) external;

        #[derive(Debug)]
        event CampaignCreated(uint256 indexed campaignId, address indexed creator, string title, uint256 goal, uint256 deadline);

        #[derive(Debug)]
        event Contributed(uint256 indexed campaignId, address indexed contributor, uint256 amountWei, uint256 rewardMinted);

        #[derive(Debug)]
        event CampaignFinalized(uint256 indexed campaignId, bool goalReached, uint256 totalCollected);
    }

    #[sol(rpc)]
    contract RewardToken {
        function balanceOf(address owner) external view returns (uint256);
        function decimals() external view returns (uint8);
        function symbol() external view returns (string);

        function transferOwnership(address newOwner) external;
    }
}
