//! The persistence seam
//!
//! The engine speaks to durable storage only through [`BlobStore`]. The
//! trait deals in opaque bytes; typed (de)serialization lives above it.
//!
//! Implementations guarantee per-blob atomicity: a reader never observes a
//! half-written blob. They perform no locking beyond that — conflict
//! detection is the engine's version check, and the documented lost-update
//! window between two full load-mutate-save cycles is accepted behavior.
//! A stricter backend (e.g. compare-and-swap on version) can be substituted
//! here without changing the public contract.

use crate::error::Result;
use crate::types::{CheckpointId, DocumentId};

/// Atomic byte-level storage for documents and their checkpoints
pub trait BlobStore: Send + Sync {
    /// Read a document blob, `None` if it has never been written
    fn read_document(&self, id: &DocumentId) -> Result<Option<Vec<u8>>>;

    /// Atomically replace a document blob (all-or-nothing)
    fn write_document(&self, id: &DocumentId, bytes: &[u8]) -> Result<()>;

    /// Read a checkpoint blob, `None` if absent
    fn read_checkpoint(&self, id: &DocumentId, checkpoint: CheckpointId)
        -> Result<Option<Vec<u8>>>;

    /// Atomically write a checkpoint blob
    fn write_checkpoint(
        &self,
        id: &DocumentId,
        checkpoint: CheckpointId,
        bytes: &[u8],
    ) -> Result<()>;

    /// List checkpoint ids for a document, in no particular order
    ///
    /// A document with no checkpoints yields an empty list, not an error.
    fn list_checkpoints(&self, id: &DocumentId) -> Result<Vec<CheckpointId>>;

    /// Remove a checkpoint blob; removing an absent one is a no-op
    fn remove_checkpoint(&self, id: &DocumentId, checkpoint: CheckpointId) -> Result<()>;
}
