//! Error types for sitevault
//!
//! Version conflicts are intentionally absent from this enum: a stale
//! `expected_version` is a normal outcome of concurrent editing and travels
//! through the success channel as [`crate::ApplyOutcome::Conflict`]. Only
//! genuine failures are represented here.

use crate::types::{CheckpointId, DocumentId, Identity};
use std::io;
use std::path::PathBuf;
use thiserror::Error;

/// Result type alias for sitevault operations
pub type Result<T> = std::result::Result<T, Error>;

/// Error taxonomy for the versioned document store
#[derive(Debug, Error)]
pub enum Error {
    /// No document exists with the given id
    #[error("document not found: {0}")]
    DocumentNotFound(DocumentId),

    /// No checkpoint exists with the given id
    #[error("checkpoint {checkpoint} not found for document {document}")]
    CheckpointNotFound {
        /// The document whose history was searched
        document: DocumentId,
        /// The missing checkpoint id
        checkpoint: CheckpointId,
    },

    /// A create collided with an existing document
    #[error("document already exists: {0}")]
    AlreadyExists(DocumentId),

    /// A field path failed the syntactic rules
    #[error("invalid field path: {0:?}")]
    InvalidPath(String),

    /// Path traversal hit a node of an incompatible type
    #[error("type mismatch at '{path}': expected {expected}, found {found}")]
    TypeMismatch {
        /// The type traversal required
        expected: &'static str,
        /// The type actually present
        found: &'static str,
        /// The full path being resolved
        path: String,
    },

    /// The identity is not permitted to edit the document
    #[error("identity '{identity}' may not edit document '{document}'")]
    Forbidden {
        /// The identity that was denied
        identity: Identity,
        /// The document it tried to edit
        document: DocumentId,
    },

    /// A persisted blob could not be deserialized
    #[error("corrupt data in '{path}': {reason}")]
    CorruptData {
        /// Logical location of the corrupt blob
        path: String,
        /// What failed during deserialization
        reason: String,
    },

    /// Persistence failed part-way through a write
    #[error("write failed for '{}': {source}", path.display())]
    WriteFailed {
        /// The blob path being written
        path: PathBuf,
        /// The underlying I/O failure
        source: io::Error,
    },

    /// Underlying I/O error
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),
}

impl Error {
    /// Build a `CorruptData` error from anything displayable
    pub fn corrupt(path: impl Into<String>, reason: impl std::fmt::Display) -> Self {
        Error::CorruptData {
            path: path.into(),
            reason: reason.to_string(),
        }
    }
}
