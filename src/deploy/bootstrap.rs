//! Two-contract deployment bootstrap.
//!
//! Creates the reward-token and crowdfunding contracts and wires them
//! together: the crowdfunding contract must learn which token it mints,
//! and the token must be owned by the crowdfunding contract before it can
//! mint rewards on contribution. The ledger does not order independently
//! submitted operations, so each step starts only after the previous
//! step's confirmation is observed and checkpointed.

use std::path::PathBuf;

use alloy::network::TransactionBuilder;
use alloy::primitives::Address;
use alloy::rpc::types::TransactionRequest;
use thiserror::Error;

use crate::campaigns::bindings::{Crowdfunding, RewardToken};
use crate::chain::guard::NetworkGuard;
use crate::chain::lifecycle::TxLifecycle;
use crate::chain::session::Session;
use crate::chain::types::{ChainError, OperationKind, TxOutcome, TxStatus};
use crate::config::ClientConfig;
use crate::deploy::artifact::{load_artifact, ArtifactError};
use crate::deploy::checkpoint::{Checkpoint, DeploymentRecord};

pub use crate::deploy::checkpoint::BootstrapStep;

/// Addresses of a finished, linked deployment.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Deployment {
    pub reward_token: Address,
    pub crowdfunding: Address,
}

/// Failure inside one bootstrap step.
#[derive(Debug, Error)]
pub enum StepError {
    #[error(transparent)]
    Chain(#[from] ChainError),

    #[error(transparent)]
    Artifact(#[from] ArtifactError),

    #[error("checkpoint write failed: {0}")]
    Checkpoint(#[from] std::io::Error),

    #[error("step ordering violated: {0}")]
    Ordering(&'static str),
}

/// A halted bootstrap run: the failed step plus every address already
/// obtained, preserved for manual resumption.
#[derive(Debug)]
pub struct BootstrapError {
    pub step: BootstrapStep,
    pub record: DeploymentRecord,
    pub source: StepError,
}

impl std::fmt::Display for BootstrapError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        fn or_missing(addr: Option<Address>) -> String {
            addr.map(|a| a.to_string()).unwrap_or_else(|| "not deployed".to_string())
        }

        write!(
            f,
            "bootstrap halted at step '{}': {} (reward token: {}, crowdfunding: {}; \
             progress is checkpointed, re-run to resume from this step)",
            self.step,
            self.source,
            or_missing(self.record.reward_token),
            or_missing(self.record.crowdfunding),
        )
    }
}

impl std::error::Error for BootstrapError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        Some(&self.source)
    }
}

/// Drives the bootstrap sequence for one target pair.
///
/// Not safe to invoke concurrently against the same checkpoint.
pub struct Bootstrap {
    session: Session,
    lifecycle: TxLifecycle,
    checkpoint: Checkpoint,
    artifacts_dir: PathBuf,
}

impl Bootstrap {
    pub fn new(session: Session, config: &ClientConfig) -> Self {
        let guard = NetworkGuard::new(config.network.chain_id);
        let lifecycle = TxLifecycle::new(
            session.client().clone(),
            guard,
            config.network.confirm_timeout_secs,
        );
        Self {
            session,
            lifecycle,
            checkpoint: Checkpoint::new(&config.deploy.checkpoint_path),
            artifacts_dir: PathBuf::from(&config.deploy.artifacts_dir),
        }
    }

    /// Run the sequence to completion, resuming from the checkpoint.
    ///
    /// Halts on the first failure; completed steps stay recorded, so a
    /// re-run continues where this one stopped.
    pub async fn run(&self) -> Result<Deployment, BootstrapError> {
        let mut record = self
            .checkpoint
            .load()
            .map_err(|e| halt(BootstrapStep::DeployToken, &DeploymentRecord::default(), e.into()))?;

        while let Some(step) = record.next_step() {
            tracing::info!(step = %step, "Bootstrap step starting");

            self.apply(step, &mut record)
                .await
                .map_err(|e| halt(step, &record, e))?;

            self.checkpoint
                .save(&record)
                .map_err(|e| halt(step, &record, e.into()))?;

            tracing::info!(step = %step, "Bootstrap step confirmed");
        }

        let (Some(reward_token), Some(crowdfunding)) = (record.reward_token, record.crowdfunding)
        else {
            return Err(halt(
                BootstrapStep::DeployToken,
                &record,
                StepError::Ordering("complete record is missing an address"),
            ));
        };

        tracing::info!(
            reward_token = %reward_token,
            crowdfunding = %crowdfunding,
            "Bootstrap complete, contracts linked"
        );

        Ok(Deployment { reward_token, crowdfunding })
    }

    async fn apply(&self, step: BootstrapStep, record: &mut DeploymentRecord) -> Result<(), StepError> {
        match step {
            BootstrapStep::DeployToken => {
                let address = self.deploy("RewardToken.sol", "RewardToken").await?;
                record.reward_token = Some(address);
            }
            BootstrapStep::DeployCrowdfunding => {
                let address = self.deploy("Crowdfunding.sol", "Crowdfunding").await?;
                record.crowdfunding = Some(address);
            }
            BootstrapStep::LinkToken => {
                let (Some(crowdfunding), Some(token)) = (record.crowdfunding, record.reward_token)
                else {
                    return Err(StepError::Ordering("link before both deployments confirmed"));
                };
                let contract =
                    Crowdfunding::new(crowdfunding, self.session.client().provider().clone());
                let tx = contract.setRewardToken(token).into_transaction_request();
                require_confirmed(self.lifecycle.execute(OperationKind::LinkRewardToken, tx).await?)?;
                record.linked = true;
            }
            BootstrapStep::TransferOwnership => {
                let (Some(crowdfunding), Some(token)) = (record.crowdfunding, record.reward_token)
                else {
                    return Err(StepError::Ordering("ownership transfer before link"));
                };
                let contract =
                    RewardToken::new(token, self.session.client().provider().clone());
                let tx = contract.transferOwnership(crowdfunding).into_transaction_request();
                require_confirmed(
                    self.lifecycle.execute(OperationKind::TransferOwnership, tx).await?,
                )?;
                record.ownership_transferred = true;
            }
        }
        Ok(())
    }

    /// Deploy one contract's creation code and return its address.
    async fn deploy(&self, file: &str, name: &'static str) -> Result<Address, StepError> {
        let artifact = load_artifact(&self.artifacts_dir, file, name)?;
        let code = artifact.deploy_code()?;
        let tx = TransactionRequest::default().with_deploy_code(code);

        let outcome = self
            .lifecycle
            .execute(OperationKind::DeployContract { name }, tx)
            .await?;

        match outcome.record.status {
            TxStatus::Confirmed { .. } => outcome.deployed_address().ok_or_else(|| {
                ChainError::DeployFailed(format!(
                    "{} deployment confirmed but produced no contract address",
                    name
                ))
                .into()
            }),
            TxStatus::Failed { reason } => {
                Err(ChainError::DeployFailed(format!("{}: {}", name, reason)).into())
            }
            TxStatus::Submitted => Err(ChainError::DeployFailed(format!(
                "{} deployment confirmation was not observed",
                name
            ))
            .into()),
        }
    }

}

fn halt(step: BootstrapStep, record: &DeploymentRecord, source: StepError) -> BootstrapError {
    BootstrapError { step, record: record.clone(), source }
}

/// A linking step that mined but reverted leaves the pair half-wired;
/// surface the reason and halt.
fn require_confirmed(outcome: TxOutcome) -> Result<(), ChainError> {
    match outcome.record.status {
        TxStatus::Confirmed { .. } => Ok(()),
        TxStatus::Failed { reason } => Err(ChainError::RemoteRejected(reason)),
        TxStatus::Submitted => {
            Err(ChainError::Rpc("confirmation was not observed".to_string()))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_halt_report_names_step_and_addresses() {
        // Step 1 succeeded, step 2 failed: the report must carry the
        // preserved token address so the operator can resume manually.
        let token = Address::repeat_byte(0xaa);
        let err = BootstrapError {
            step: BootstrapStep::DeployCrowdfunding,
            record: DeploymentRecord { reward_token: Some(token), ..Default::default() },
            source: StepError::Chain(ChainError::DeployFailed(
                "Crowdfunding: transaction reverted on-chain".to_string(),
            )),
        };

        let msg = err.to_string();
        assert!(msg.contains("deploy crowdfunding"));
        assert!(msg.contains(&token.to_string()));
        assert!(msg.contains("crowdfunding: not deployed"));
        assert!(msg.contains("resume"));
    }

    #[test]
    fn test_step_error_source_chain() {
        let err = BootstrapError {
            step: BootstrapStep::LinkToken,
            record: DeploymentRecord::default(),
            source: StepError::Chain(ChainError::NetworkMismatch { expected: 11_155_111, observed: 1 }),
        };
        // The underlying cause stays reachable through the error chain.
        assert!(std::error::Error::source(&err).is_some());
    }
}
