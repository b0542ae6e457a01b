//! Core types for sitevault
//!
//! This crate defines the domain vocabulary shared by every layer:
//! - DocumentId / Identity / Timestamp / CheckpointId: validated identifiers
//! - Document / Checkpoint: the versioned unit of work and its snapshots
//! - FieldPath: dotted-path addressing into document content
//! - FieldChange: a single field edit, applied in atomic batches
//! - ApplyOutcome / VersionConflict: tagged results of optimistic writes
//! - Error: the error taxonomy (version conflicts are deliberately not here)
//! - BlobStore: the persistence seam implemented by the storage crate

#![warn(missing_docs)]
#![warn(clippy::all)]

pub mod change;
pub mod document;
pub mod error;
pub mod outcome;
pub mod path;
pub mod traits;
pub mod types;

pub use change::{apply_changes, FieldChange};
pub use document::{Checkpoint, CheckpointKind, Document};
pub use error::{Error, Result};
pub use outcome::{ApplyOutcome, HistoryEntry, RestoreOutcome, SessionInfo, VersionConflict};
pub use path::{FieldPath, Segment, MAX_ARRAY_PAD};
pub use traits::BlobStore;
pub use types::{CheckpointId, DocumentId, DocumentIdError, Identity, Timestamp};
