//! Configuration schema definitions.
//!
//! This module defines the complete configuration structure for the client.
//! All types derive Serde traits for deserialization from config files.

use serde::{Deserialize, Serialize};

/// Root configuration for the crowdfunding client.
#[derive(Debug, Clone, Deserialize, Serialize, Default)]
#[serde(default)]
pub struct ClientConfig {
    /// Target network (RPC endpoint, expected chain id, timeouts).
    pub network: NetworkConfig,

    /// Deployed contract addresses consumed by the end-user client.
    pub contracts: ContractsConfig,

    /// Campaign enumeration settings.
    pub scan: ScanConfig,

    /// Deployment bootstrap settings (operator tool only).
    pub deploy: DeployConfig,
}

/// Target network configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct NetworkConfig {
    /// JSON-RPC endpoint URL.
    pub rpc_url: String,

    /// Expected chain ID. Every mutating call re-checks the connected
    /// chain against this value immediately before submission.
    pub chain_id: u64,

    /// RPC request timeout in seconds.
    pub rpc_timeout_secs: u64,

    /// Maximum time to wait for a submitted transaction's confirmation,
    /// in seconds. A submitted transaction cannot be withdrawn; on timeout
    /// the client stops waiting and the result surfaces later on-chain.
    pub confirm_timeout_secs: u64,
}

impl Default for NetworkConfig {
    fn default() -> Self {
        Self {
            rpc_url: "http://localhost:8545".to_string(),
            // Sepolia
            chain_id: 11_155_111,
            rpc_timeout_secs: 10,
            confirm_timeout_secs: 180,
        }
    }
}

/// Deployed contract addresses.
///
/// Both may be empty until a deployment exists; user operations that need
/// them fail before anything is submitted.
#[derive(Debug, Clone, Deserialize, Serialize, Default)]
#[serde(default)]
pub struct ContractsConfig {
    /// Address of the crowdfunding contract (hex, 0x-prefixed).
    pub crowdfunding_address: String,

    /// Address of the reward token contract (hex, 0x-prefixed).
    pub reward_token_address: String,
}

/// Campaign enumeration settings.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct ScanConfig {
    /// Upper bound on campaign ids probed during enumeration.
    ///
    /// The contract exposes no count query; campaigns are discovered by
    /// probing ids 0.. until the first absent id. This value caps that
    /// probe and is an operational ceiling, not a derived quantity.
    pub max_campaign_id: u64,
}

impl Default for ScanConfig {
    fn default() -> Self {
        Self { max_campaign_id: 20 }
    }
}

/// Deployment bootstrap settings.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct DeployConfig {
    /// Directory holding compiled contract artifacts
    /// (`<dir>/<File>.sol/<Name>.json`).
    pub artifacts_dir: String,

    /// Path of the bootstrap checkpoint file. Written after every
    /// completed step so a halted run can resume.
    pub checkpoint_path: String,
}

impl Default for DeployConfig {
    fn default() -> Self {
        Self {
            artifacts_dir: "artifacts/contracts".to_string(),
            checkpoint_path: "deployment.json".to_string(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = ClientConfig::default();
        assert_eq!(config.network.chain_id, 11_155_111);
        assert_eq!(config.network.rpc_timeout_secs, 10);
        assert_eq!(config.scan.max_campaign_id, 20);
        assert!(config.contracts.crowdfunding_address.is_empty());
    }

    #[test]
    fn test_partial_toml() {
        let config: ClientConfig = toml::from_str(
            r#"
            [network]
            rpc_url = "https://rpc.example.org"
            chain_id = 31337

            [contracts]
            crowdfunding_address = "0x38aa4d86a9e09db53550b1a21099f462de6be629"
            "#,
        )
        .unwrap();

        assert_eq!(config.network.rpc_url, "https://rpc.example.org");
        assert_eq!(config.network.chain_id, 31337);
        // Unspecified sections fall back to defaults.
        assert_eq!(config.network.confirm_timeout_secs, 180);
        assert_eq!(config.scan.max_campaign_id, 20);
        assert!(config.contracts.reward_token_address.is_empty());
    }
}
