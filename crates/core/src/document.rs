//! Documents and checkpoints
//!
//! A `Document` is the mutable, versioned unit of work: an arbitrary JSON
//! tree plus metadata. A `Checkpoint` is a full, immutable copy of a
//! document taken just before a mutation or restore.
//!
//! The persisted and wire shape uses camelCase field names.

use crate::types::{CheckpointId, Identity, Timestamp};
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// The versioned unit of storage
///
/// `version` starts at 1 and increments by exactly 1 on every successful
/// mutation or restore; it never rewinds. Content is schemaless apart from
/// being a JSON object at the root.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Document {
    /// Monotonic mutation counter, starts at 1
    pub version: u64,
    /// The JSON tree the editor mutates
    pub content: Map<String, Value>,
    /// When the last successful mutation or restore landed
    pub last_modified: Timestamp,
    /// The identity permitted to mutate this document
    pub owner: Identity,
    /// When set, the checkpoint version this state was restored from
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub restored_from: Option<u64>,
    /// When set, the moment of that restore
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub restored_at: Option<Timestamp>,
}

impl Document {
    /// Create a fresh document at version 1
    pub fn new(owner: Identity, content: Map<String, Value>) -> Self {
        Document {
            version: 1,
            content,
            last_modified: Timestamp::now(),
            owner,
            restored_from: None,
            restored_at: None,
        }
    }

    /// Advance the version and stamp the modification time
    #[inline]
    pub fn touch(&mut self) {
        self.version += 1;
        self.last_modified = Timestamp::now();
    }
}

/// How a checkpoint came to exist
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum CheckpointKind {
    /// Taken automatically before a mutation
    Auto,
    /// Requested explicitly by the editor
    Manual,
    /// Safety copy of the live state taken before a restore
    BeforeRestore,
}

/// An immutable point-in-time snapshot of a document
///
/// `version` records the document version at snapshot time (pre-mutation).
/// `timestamp` doubles as the checkpoint's unique id. `data` is a full deep
/// copy, so later mutation of the live document cannot alter a checkpoint.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Checkpoint {
    /// Document version the snapshot captured
    pub version: u64,
    /// Creation time in epoch millis; unique id within the document
    pub timestamp: CheckpointId,
    /// How this checkpoint was created; `type` on the wire
    #[serde(rename = "type")]
    pub kind: CheckpointKind,
    /// Full copy of the document at snapshot time
    pub data: Document,
}

impl Checkpoint {
    /// Human-readable label for history listings
    pub fn description(&self) -> String {
        match self.kind {
            CheckpointKind::Auto => format!("Auto-save at version {}", self.version),
            CheckpointKind::Manual => "Manual save point".to_string(),
            CheckpointKind::BeforeRestore => "Backup before restore".to_string(),
        }
    }
}
