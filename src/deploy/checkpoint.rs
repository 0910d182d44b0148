//! Bootstrap checkpoint persistence.
//!
//! The bootstrap is resumable, not transactional: every completed step is
//! recorded on disk before the next one begins, so a halted run preserves
//! the addresses it already obtained and the next run continues from the
//! first incomplete step.

use std::fs::File;
use std::io::{BufReader, BufWriter};
use std::path::{Path, PathBuf};

use alloy::primitives::Address;
use serde::{Deserialize, Serialize};

/// The four confirmation-gated bootstrap steps, in execution order.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BootstrapStep {
    DeployToken,
    DeployCrowdfunding,
    LinkToken,
    TransferOwnership,
}

impl std::fmt::Display for BootstrapStep {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            BootstrapStep::DeployToken => write!(f, "deploy reward token"),
            BootstrapStep::DeployCrowdfunding => write!(f, "deploy crowdfunding"),
            BootstrapStep::LinkToken => write!(f, "link reward token"),
            BootstrapStep::TransferOwnership => write!(f, "transfer token ownership"),
        }
    }
}

/// Durable record of bootstrap progress.
///
/// Fields transition exactly once, strictly in step order; a field is
/// never set before its predecessors.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct DeploymentRecord {
    pub reward_token: Option<Address>,
    pub crowdfunding: Option<Address>,
    pub linked: bool,
    pub ownership_transferred: bool,
}

impl DeploymentRecord {
    /// The first incomplete step, or `None` when the bootstrap is done.
    pub fn next_step(&self) -> Option<BootstrapStep> {
        if self.reward_token.is_none() {
            Some(BootstrapStep::DeployToken)
        } else if self.crowdfunding.is_none() {
            Some(BootstrapStep::DeployCrowdfunding)
        } else if !self.linked {
            Some(BootstrapStep::LinkToken)
        } else if !self.ownership_transferred {
            Some(BootstrapStep::TransferOwnership)
        } else {
            None
        }
    }

    pub fn is_complete(&self) -> bool {
        self.next_step().is_none()
    }
}

/// File-backed checkpoint store.
pub struct Checkpoint {
    path: PathBuf,
}

impl Checkpoint {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Load the record, or start fresh if no checkpoint exists yet.
    pub fn load(&self) -> std::io::Result<DeploymentRecord> {
        if !self.path.exists() {
            return Ok(DeploymentRecord::default());
        }
        let file = File::open(&self.path)?;
        let record = serde_json::from_reader(BufReader::new(file))?;
        tracing::info!(path = %self.path.display(), "Resuming from checkpoint");
        Ok(record)
    }

    /// Persist the record. Called after every completed step.
    pub fn save(&self, record: &DeploymentRecord) -> std::io::Result<()> {
        let file = File::create(&self.path)?;
        serde_json::to_writer_pretty(BufWriter::new(file), record)?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn addr(byte: u8) -> Address {
        Address::repeat_byte(byte)
    }

    #[test]
    fn test_steps_run_strictly_in_order() {
        let mut record = DeploymentRecord::default();
        assert_eq!(record.next_step(), Some(BootstrapStep::DeployToken));

        record.reward_token = Some(addr(0xaa));
        assert_eq!(record.next_step(), Some(BootstrapStep::DeployCrowdfunding));

        record.crowdfunding = Some(addr(0xbb));
        assert_eq!(record.next_step(), Some(BootstrapStep::LinkToken));

        record.linked = true;
        assert_eq!(record.next_step(), Some(BootstrapStep::TransferOwnership));

        record.ownership_transferred = true;
        assert_eq!(record.next_step(), None);
        assert!(record.is_complete());
    }

    #[test]
    fn test_resume_after_failed_second_step() {
        // Step 1 succeeded, step 2 halted the run: the preserved token
        // address must let the next run start at step 2 without
        // redeploying the token.
        let record = DeploymentRecord {
            reward_token: Some(addr(0xaa)),
            ..Default::default()
        };
        assert_eq!(record.next_step(), Some(BootstrapStep::DeployCrowdfunding));
    }

    #[test]
    fn test_persistence_roundtrip() {
        let path = std::env::temp_dir().join("crowdfund_checkpoint_test.json");
        let checkpoint = Checkpoint::new(&path);

        let record = DeploymentRecord {
            reward_token: Some(addr(0x11)),
            crowdfunding: Some(addr(0x22)),
            linked: true,
            ownership_transferred: false,
        };
        checkpoint.save(&record).unwrap();

        let loaded = checkpoint.load().unwrap();
        assert_eq!(loaded, record);
        assert_eq!(loaded.next_step(), Some(BootstrapStep::TransferOwnership));

        std::fs::remove_file(&path).unwrap_or_default();
    }

    #[test]
    fn test_missing_checkpoint_starts_fresh() {
        let checkpoint = Checkpoint::new("/nonexistent/dir/never.json");
        let record = checkpoint.load().unwrap();
        assert_eq!(record, DeploymentRecord::default());
    }
}
