//! In-memory blob store
//!
//! Lock-protected maps keyed by document id. Used by unit tests and as an
//! ephemeral mode; writes are trivially atomic under the lock.

use parking_lot::RwLock;
use rustc_hash::FxHashMap;
use sitevault_core::{BlobStore, CheckpointId, DocumentId, Result};

/// Ephemeral blob store backed by hash maps
#[derive(Debug, Default)]
pub struct MemoryBlobStore {
    documents: RwLock<FxHashMap<DocumentId, Vec<u8>>>,
    checkpoints: RwLock<FxHashMap<DocumentId, FxHashMap<CheckpointId, Vec<u8>>>>,
}

impl MemoryBlobStore {
    /// Create an empty store
    pub fn new() -> Self {
        Self::default()
    }
}

impl BlobStore for MemoryBlobStore {
    fn read_document(&self, id: &DocumentId) -> Result<Option<Vec<u8>>> {
        Ok(self.documents.read().get(id).cloned())
    }

    fn write_document(&self, id: &DocumentId, bytes: &[u8]) -> Result<()> {
        self.documents.write().insert(id.clone(), bytes.to_vec());
        Ok(())
    }

    fn read_checkpoint(
        &self,
        id: &DocumentId,
        checkpoint: CheckpointId,
    ) -> Result<Option<Vec<u8>>> {
        Ok(self
            .checkpoints
            .read()
            .get(id)
            .and_then(|per_doc| per_doc.get(&checkpoint))
            .cloned())
    }

    fn write_checkpoint(
        &self,
        id: &DocumentId,
        checkpoint: CheckpointId,
        bytes: &[u8],
    ) -> Result<()> {
        self.checkpoints
            .write()
            .entry(id.clone())
            .or_default()
            .insert(checkpoint, bytes.to_vec());
        Ok(())
    }

    fn list_checkpoints(&self, id: &DocumentId) -> Result<Vec<CheckpointId>> {
        Ok(self
            .checkpoints
            .read()
            .get(id)
            .map(|per_doc| per_doc.keys().copied().collect())
            .unwrap_or_default())
    }

    fn remove_checkpoint(&self, id: &DocumentId, checkpoint: CheckpointId) -> Result<()> {
        if let Some(per_doc) = self.checkpoints.write().get_mut(id) {
            per_doc.remove(&checkpoint);
        }
        Ok(())
    }
}
