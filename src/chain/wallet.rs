//! Signing credential loading.
//!
//! # Security
//! - Private keys are loaded ONLY from environment variables
//! - Keys are never logged or serialized; only the derived address is

use alloy::signers::local::PrivateKeySigner;

use crate::chain::types::{ChainError, ChainResult};

/// Environment variable name for the private key.
pub const PRIVATE_KEY_ENV_VAR: &str = "CROWDFUND_PRIVATE_KEY";

/// Parse a signer from a hex-encoded private key string (0x prefix
/// optional).
pub fn signer_from_key(private_key_hex: &str) -> ChainResult<PrivateKeySigner> {
    let key_hex = private_key_hex.strip_prefix("0x").unwrap_or(private_key_hex);

    key_hex
        .parse()
        .map_err(|e| ChainError::WalletUnavailable(format!("invalid private key format: {}", e)))
}

/// Load the signer from the environment.
///
/// Reads `CROWDFUND_PRIVATE_KEY`. Absence means no signing identity is
/// available for this session attempt.
pub fn load_signer() -> ChainResult<PrivateKeySigner> {
    let private_key = std::env::var(PRIVATE_KEY_ENV_VAR).map_err(|_| {
        ChainError::WalletUnavailable(format!(
            "environment variable {} not set",
            PRIVATE_KEY_ENV_VAR
        ))
    })?;

    signer_from_key(&private_key)
}

#[cfg(test)]
mod tests {
    use super::*;

    // Well-known test private key (Anvil's first account)
    const TEST_PRIVATE_KEY: &str = "ac0974bec39a17e36ba4a6b4d238ff944bacb478cbed5efcae784d7bf4f2ff80";

    #[test]
    fn test_signer_from_key() {
        let signer = signer_from_key(TEST_PRIVATE_KEY).unwrap();
        assert_eq!(
            signer.address().to_string().to_lowercase(),
            "0xf39fd6e51aad88f6f4ce6ab8827279cfffb92266"
        );
    }

    #[test]
    fn test_signer_with_0x_prefix() {
        let signer = signer_from_key(&format!("0x{}", TEST_PRIVATE_KEY)).unwrap();
        assert_eq!(
            signer.address().to_string().to_lowercase(),
            "0xf39fd6e51aad88f6f4ce6ab8827279cfffb92266"
        );
    }

    #[test]
    fn test_invalid_private_key() {
        let result = signer_from_key("invalid_key");
        assert!(result.is_err());
        assert!(result.unwrap_err().to_string().contains("invalid private key"));
    }
}
