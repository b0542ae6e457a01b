//! Checkpoint retention
//!
//! Pruning runs after each auto checkpoint and keeps the checkpoint count
//! bounded. Failures removing individual blobs are logged and skipped so a
//! flaky delete can never fail the mutation that triggered the prune.

use crate::checkpoint_store::CheckpointStore;
use sitevault_core::{DocumentId, Result};
use tracing::warn;

/// Default number of checkpoints retained per document
pub const DEFAULT_RETAINED: usize = 50;

/// How many checkpoints to keep per document
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RetentionPolicy {
    /// Never prune
    KeepAll,
    /// Keep the newest `n`, delete the rest
    KeepLast(usize),
}

impl Default for RetentionPolicy {
    fn default() -> Self {
        RetentionPolicy::KeepLast(DEFAULT_RETAINED)
    }
}

impl RetentionPolicy {
    /// Retain every checkpoint
    pub const fn keep_all() -> Self {
        RetentionPolicy::KeepAll
    }

    /// Retain the newest `n` checkpoints
    ///
    /// # Panics
    ///
    /// Panics if `n` is zero; use [`RetentionPolicy::keep_all`] to disable
    /// pruning instead.
    pub fn keep_last(n: usize) -> Self {
        assert!(n > 0, "retention count must be positive");
        RetentionPolicy::KeepLast(n)
    }

    /// Short human-readable form for logs
    pub fn summary(&self) -> String {
        match self {
            RetentionPolicy::KeepAll => "keep-all".to_string(),
            RetentionPolicy::KeepLast(n) => format!("keep-last({})", n),
        }
    }

    /// Delete checkpoints beyond the retained window, oldest first
    ///
    /// Returns the number of checkpoints removed. Idempotent: a second call
    /// with no intervening checkpoint creation removes nothing.
    pub fn prune(&self, store: &CheckpointStore, id: &DocumentId) -> Result<usize> {
        let keep = match self {
            RetentionPolicy::KeepAll => return Ok(0),
            RetentionPolicy::KeepLast(n) => *n,
        };
        let ids = store.list(id)?;
        let mut removed = 0;
        for checkpoint in ids.into_iter().skip(keep) {
            match store.remove(id, checkpoint) {
                Ok(()) => removed += 1,
                Err(error) => {
                    warn!(document = %id, checkpoint = %checkpoint, %error,
                          "failed to prune checkpoint, skipping");
                }
            }
        }
        Ok(removed)
    }
}
