//! Checkpoint lifecycle
//!
//! Checkpoint ids are epoch millis, made strictly monotonic per manager so
//! two checkpoints created within the same millisecond never collide.

use sitevault_core::{
    Checkpoint, CheckpointId, CheckpointKind, Document, DocumentId, Error, HistoryEntry, Result,
    Timestamp,
};
use sitevault_storage::{CheckpointStore, RetentionPolicy};
use std::sync::atomic::{AtomicU64, Ordering};
use tracing::debug;

/// Creates, loads, lists, and prunes checkpoints for documents
pub struct CheckpointManager {
    store: CheckpointStore,
    last_issued: AtomicU64,
}

impl CheckpointManager {
    /// Wrap a checkpoint store
    pub fn new(store: CheckpointStore) -> Self {
        CheckpointManager {
            store,
            last_issued: AtomicU64::new(0),
        }
    }

    /// Issue the next checkpoint id: wall clock millis, bumped past the
    /// previously issued id when the clock has not advanced.
    fn next_id(&self) -> CheckpointId {
        let now = Timestamp::now().as_millis();
        let mut issued = now;
        // The closure never returns None, so fetch_update cannot fail.
        let _ = self
            .last_issued
            .fetch_update(Ordering::SeqCst, Ordering::SeqCst, |last| {
                issued = now.max(last + 1);
                Some(issued)
            });
        CheckpointId::from_millis(issued)
    }

    /// Snapshot the current state of `document` as a full deep copy
    pub fn create(
        &self,
        id: &DocumentId,
        document: &Document,
        kind: CheckpointKind,
    ) -> Result<Checkpoint> {
        let checkpoint = Checkpoint {
            version: document.version,
            timestamp: self.next_id(),
            kind,
            data: document.clone(),
        };
        self.store.write(id, &checkpoint)?;
        debug!(document = %id, checkpoint = %checkpoint.timestamp,
               version = checkpoint.version, kind = ?kind, "checkpoint created");
        Ok(checkpoint)
    }

    /// Load a checkpoint, failing if it does not exist
    pub fn load(&self, id: &DocumentId, checkpoint: CheckpointId) -> Result<Checkpoint> {
        self.store
            .read(id, checkpoint)?
            .ok_or_else(|| Error::CheckpointNotFound {
                document: id.clone(),
                checkpoint,
            })
    }

    /// List history entries, newest first, at most `limit`
    pub fn history(&self, id: &DocumentId, limit: usize) -> Result<Vec<HistoryEntry>> {
        let mut entries = Vec::new();
        for checkpoint_id in self.store.list(id)?.into_iter().take(limit) {
            // Skip blobs that vanish between list and read.
            let Some(checkpoint) = self.store.read(id, checkpoint_id)? else {
                continue;
            };
            entries.push(HistoryEntry {
                id: checkpoint_id,
                timestamp: Timestamp::from_millis(checkpoint_id.as_millis()),
                version: checkpoint.version,
                kind: checkpoint.kind,
                description: checkpoint.description(),
            });
        }
        Ok(entries)
    }

    /// Apply `policy` to this document's checkpoints
    pub fn prune(&self, id: &DocumentId, policy: RetentionPolicy) -> Result<usize> {
        policy.prune(&self.store, id)
    }
}
