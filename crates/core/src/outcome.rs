//! Tagged results of vault operations
//!
//! An optimistic write has two normal endings: applied, or rejected because
//! the caller's view of the document was stale. Both are success values;
//! see [`crate::error::Error`] for the actual failure taxonomy.

use crate::document::CheckpointKind;
use crate::types::{CheckpointId, Timestamp};
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// Everything a stale writer needs to reconcile
///
/// Carries the authoritative version and full server content so the caller
/// can discard, merge manually, or retry with a fresh expected version. The
/// system never merges automatically.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct VersionConflict {
    /// The version actually stored
    pub current_version: u64,
    /// The version the caller expected
    pub expected_version: u64,
    /// The authoritative live content
    pub server_content: Map<String, Value>,
}

/// Result of an optimistic write
#[derive(Debug, Clone, PartialEq)]
pub enum ApplyOutcome {
    /// The batch was applied and persisted
    Applied {
        /// The new document version
        version: u64,
        /// When the mutation landed
        timestamp: Timestamp,
    },
    /// The expected version was stale; nothing was mutated
    Conflict(VersionConflict),
}

impl ApplyOutcome {
    /// True when the mutation landed
    pub fn is_applied(&self) -> bool {
        matches!(self, ApplyOutcome::Applied { .. })
    }

    /// True when the write was rejected as stale
    pub fn is_conflict(&self) -> bool {
        matches!(self, ApplyOutcome::Conflict(_))
    }
}

/// Result of restoring a checkpoint
///
/// Restores never rewind the version counter: the restored content lands as
/// a fresh version one past the live document.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RestoreOutcome {
    /// The checkpoint's original version, now recorded as provenance;
    /// `restoredVersion` on the wire
    #[serde(rename = "restoredVersion")]
    pub restored_from_version: u64,
    /// The live document's new version
    pub new_version: u64,
    /// The checkpoint that was restored
    pub checkpoint: CheckpointId,
}

/// One entry in a document's version history, newest first
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct HistoryEntry {
    /// Checkpoint id
    pub id: CheckpointId,
    /// Creation time
    pub timestamp: Timestamp,
    /// Document version the checkpoint captured
    pub version: u64,
    /// How the checkpoint was created; `type` on the wire
    #[serde(rename = "type")]
    pub kind: CheckpointKind,
    /// Human-readable label
    pub description: String,
}

/// Read-only session snapshot for editor UI state
///
/// Unlike the enforcing permission gate, this never fails for a non-owner;
/// `can_edit` is reported as a boolean instead.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SessionInfo {
    /// The document's current version
    pub current_version: u64,
    /// When it last changed
    pub last_modified: Timestamp,
    /// Whether the probing identity owns the document
    pub can_edit: bool,
}
