//! Compiled contract artifact loading.
//!
//! Artifacts follow the Hardhat layout: one JSON file per contract at
//! `<artifacts_dir>/<SourceFile>.sol/<ContractName>.json`, holding the ABI
//! description and the deployable bytecode.

use std::fs::File;
use std::io::BufReader;
use std::path::{Path, PathBuf};

use alloy::primitives::Bytes;
use serde::Deserialize;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ArtifactError {
    #[error("artifact not found: {0} (compile the contracts first)")]
    Missing(PathBuf),

    #[error("failed to read artifact {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to parse artifact {path}: {source}")]
    Parse {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },

    #[error("artifact {0} has malformed bytecode")]
    Bytecode(String),
}

/// One compiled contract: ABI description plus deployable bytecode.
#[derive(Debug, Clone, Deserialize)]
pub struct Artifact {
    #[serde(rename = "contractName", default)]
    pub contract_name: Option<String>,
    pub abi: serde_json::Value,
    /// 0x-prefixed hex creation code.
    pub bytecode: String,
}

impl Artifact {
    /// Parse the creation code for a deployment transaction.
    pub fn deploy_code(&self) -> Result<Bytes, ArtifactError> {
        self.bytecode.parse().map_err(|_| {
            let name = self.contract_name.clone().unwrap_or_else(|| "<unnamed>".to_string());
            ArtifactError::Bytecode(name)
        })
    }
}

/// Load an artifact addressed by source filename and contract name,
/// e.g. `("RewardToken.sol", "RewardToken")`.
pub fn load_artifact(
    artifacts_dir: &Path,
    contract_file: &str,
    contract_name: &str,
) -> Result<Artifact, ArtifactError> {
    let path = artifacts_dir
        .join(contract_file)
        .join(format!("{}.json", contract_name));

    if !path.exists() {
        return Err(ArtifactError::Missing(path));
    }

    let file = File::open(&path).map_err(|source| ArtifactError::Io { path: path.clone(), source })?;
    let artifact: Artifact = serde_json::from_reader(BufReader::new(file))
        .map_err(|source| ArtifactError::Parse { path, source })?;

    Ok(artifact)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;

    #[test]
    fn test_load_artifact_roundtrip() {
        let dir = std::env::temp_dir().join("crowdfund_artifact_test");
        let contract_dir = dir.join("RewardToken.sol");
        fs::create_dir_all(&contract_dir).unwrap();
        fs::write(
            contract_dir.join("RewardToken.json"),
            r#"{"contractName":"RewardToken","abi":[],"bytecode":"0x6080604052"}"#,
        )
        .unwrap();

        let artifact = load_artifact(&dir, "RewardToken.sol", "RewardToken").unwrap();
        assert_eq!(artifact.contract_name.as_deref(), Some("RewardToken"));
        let code = artifact.deploy_code().unwrap();
        assert_eq!(code.len(), 5);

        fs::remove_dir_all(&dir).unwrap_or_default();
    }

    #[test]
    fn test_missing_artifact_names_path_and_hint() {
        let err = load_artifact(Path::new("/nonexistent"), "Crowdfunding.sol", "Crowdfunding")
            .unwrap_err();
        let msg = err.to_string();
        assert!(msg.contains("Crowdfunding.json"));
        assert!(msg.contains("compile"));
    }

    #[test]
    fn test_malformed_bytecode() {
        let artifact = Artifact {
            contract_name: Some("Broken".to_string()),
            abi: serde_json::Value::Array(vec![]),
            bytecode: "not hex".to_string(),
        };
        assert!(artifact.deploy_code().is_err());
    }
}
