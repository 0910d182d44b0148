//! Configuration validation.
//!
//! # Responsibilities
//! - Semantic validation (serde handles syntactic)
//! - Validate value ranges (timeouts > 0, scan bound > 0)
//! - Check that configured addresses and URLs actually parse
//!
//! # Design Decisions
//! - Returns all validation errors, not just first
//! - Validation is pure function: ClientConfig → Result<(), Vec<ValidationError>>
//! - Runs before config is accepted into the system

use alloy::primitives::Address;

use crate::config::schema::ClientConfig;

/// A single semantic violation in the configuration.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ValidationError {
    InvalidRpcUrl(String),
    ZeroChainId,
    InvalidAddress { field: &'static str, value: String },
    ZeroTimeout(&'static str),
    ZeroScanBound,
}

impl std::fmt::Display for ValidationError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ValidationError::InvalidRpcUrl(url) => write!(f, "invalid RPC URL '{}'", url),
            ValidationError::ZeroChainId => write!(f, "network.chain_id must not be 0"),
            ValidationError::InvalidAddress { field, value } => {
                write!(f, "{} is not a valid address: '{}'", field, value)
            }
            ValidationError::ZeroTimeout(field) => write!(f, "{} must be greater than 0", field),
            ValidationError::ZeroScanBound => {
                write!(f, "scan.max_campaign_id must be greater than 0")
            }
        }
    }
}

/// Validate a configuration, collecting every violation.
pub fn validate_config(config: &ClientConfig) -> Result<(), Vec<ValidationError>> {
    let mut errors = Vec::new();

    if config.network.rpc_url.parse::<url::Url>().is_err() {
        errors.push(ValidationError::InvalidRpcUrl(config.network.rpc_url.clone()));
    }

    if config.network.chain_id == 0 {
        errors.push(ValidationError::ZeroChainId);
    }

    if config.network.rpc_timeout_secs == 0 {
        errors.push(ValidationError::ZeroTimeout("network.rpc_timeout_secs"));
    }

    if config.network.confirm_timeout_secs == 0 {
        errors.push(ValidationError::ZeroTimeout("network.confirm_timeout_secs"));
    }

    if config.scan.max_campaign_id == 0 {
        errors.push(ValidationError::ZeroScanBound);
    }

    // Addresses may be left empty (nothing deployed yet); if present they
    // must parse.
    for (field, value) in [
        ("contracts.crowdfunding_address", &config.contracts.crowdfunding_address),
        ("contracts.reward_token_address", &config.contracts.reward_token_address),
    ] {
        if !value.is_empty() && value.parse::<Address>().is_err() {
            errors.push(ValidationError::InvalidAddress { field, value: value.clone() });
        }
    }

    if errors.is_empty() {
        Ok(())
    } else {
        Err(errors)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config_is_valid() {
        assert!(validate_config(&ClientConfig::default()).is_ok());
    }

    #[test]
    fn test_all_errors_collected() {
        let mut config = ClientConfig::default();
        config.network.rpc_url = "not a url".to_string();
        config.network.chain_id = 0;
        config.scan.max_campaign_id = 0;
        config.contracts.crowdfunding_address = "0x1234".to_string();

        let errors = validate_config(&config).unwrap_err();
        assert_eq!(errors.len(), 4);
        assert!(errors.contains(&ValidationError::ZeroChainId));
        assert!(errors.contains(&ValidationError::ZeroScanBound));
    }

    #[test]
    fn test_empty_addresses_allowed() {
        let config = ClientConfig::default();
        assert!(config.contracts.crowdfunding_address.is_empty());
        assert!(validate_config(&config).is_ok());
    }

    #[test]
    fn test_well_formed_address_accepted() {
        let mut config = ClientConfig::default();
        config.contracts.crowdfunding_address =
            "0x38aa4d86a9e09db53550b1a21099f462de6be629".to_string();
        assert!(validate_config(&config).is_ok());
    }
}
