//! Storage backends and typed persistence for sitevault
//!
//! Two [`sitevault_core::BlobStore`] implementations:
//! - [`FsBlobStore`]: one directory per document under a data directory,
//!   every blob written with the write-fsync-rename protocol
//! - [`MemoryBlobStore`]: lock-protected maps, for tests and ephemeral use
//!
//! On top of the blob trait sit the typed layers: [`DocumentStore`] (with
//! migration-on-read for pre-versioning documents), [`CheckpointStore`],
//! and the [`RetentionPolicy`] that bounds per-document history.

#![warn(missing_docs)]
#![warn(clippy::all)]

pub mod checkpoint_store;
pub mod document_store;
pub mod fs;
pub mod memory;
pub mod retention;

pub use checkpoint_store::CheckpointStore;
pub use document_store::DocumentStore;
pub use fs::FsBlobStore;
pub use memory::MemoryBlobStore;
pub use retention::{RetentionPolicy, DEFAULT_RETAINED};
