//! Typed checkpoint persistence

use sitevault_core::{BlobStore, Checkpoint, CheckpointId, DocumentId, Error, Result};
use std::sync::Arc;

/// Typed layer over checkpoint blobs
#[derive(Clone)]
pub struct CheckpointStore {
    blobs: Arc<dyn BlobStore>,
}

impl CheckpointStore {
    /// Wrap a blob store
    pub fn new(blobs: Arc<dyn BlobStore>) -> Self {
        CheckpointStore { blobs }
    }

    /// Persist a checkpoint atomically
    pub fn write(&self, id: &DocumentId, checkpoint: &Checkpoint) -> Result<()> {
        let bytes = serde_json::to_vec_pretty(checkpoint)
            .map_err(|e| Error::corrupt(blob_path(id, checkpoint.timestamp), e))?;
        self.blobs.write_checkpoint(id, checkpoint.timestamp, &bytes)
    }

    /// Read a checkpoint, `None` if absent
    pub fn read(&self, id: &DocumentId, checkpoint: CheckpointId) -> Result<Option<Checkpoint>> {
        match self.blobs.read_checkpoint(id, checkpoint)? {
            Some(bytes) => {
                let parsed = serde_json::from_slice(&bytes)
                    .map_err(|e| Error::corrupt(blob_path(id, checkpoint), e))?;
                Ok(Some(parsed))
            }
            None => Ok(None),
        }
    }

    /// List checkpoint ids, newest first
    pub fn list(&self, id: &DocumentId) -> Result<Vec<CheckpointId>> {
        let mut ids = self.blobs.list_checkpoints(id)?;
        ids.sort_unstable_by(|a, b| b.cmp(a));
        Ok(ids)
    }

    /// Remove a checkpoint; idempotent
    pub fn remove(&self, id: &DocumentId, checkpoint: CheckpointId) -> Result<()> {
        self.blobs.remove_checkpoint(id, checkpoint)
    }
}

fn blob_path(id: &DocumentId, checkpoint: CheckpointId) -> String {
    format!("documents/{}/checkpoints/ckpt-{}.json", id, checkpoint)
}
