//! Wire DTOs for the editor surface
//!
//! Everything here serializes camelCase and mirrors what the browser editor
//! sends and receives. The engine's typed values map into these at the
//! facade boundary and nowhere else.

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use sitevault_core::{
    ApplyOutcome, Checkpoint, CheckpointId, CheckpointKind, Document, HistoryEntry, RestoreOutcome,
    SessionInfo, Timestamp,
};

/// One field mutation as the editor sends it
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FieldChangeDto {
    /// Dot-separated field path, e.g. `"hero.title"` or `"sections.0.body"`
    pub field: String,
    /// The new value, any JSON
    pub value: Value,
}

/// Request body for applying a batch of changes
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ApplyChangesRequest {
    /// The document version the editor last saw
    pub expected_version: u64,
    /// Changes applied in order; later entries win on the same path
    pub changes: Vec<FieldChangeDto>,
}

/// Result of an apply call, discriminated by `status`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "status", rename_all = "camelCase")]
pub enum ApplyChangesResponse {
    /// The batch landed
    #[serde(rename_all = "camelCase")]
    Applied {
        /// New document version
        version: u64,
        /// When the mutation landed, epoch millis
        timestamp: Timestamp,
    },
    /// Someone else saved first; nothing was written
    #[serde(rename_all = "camelCase")]
    Conflict {
        /// The version actually stored
        current_version: u64,
        /// The version the editor expected
        expected_version: u64,
        /// The authoritative live content, for client-side recovery
        server_content: Map<String, Value>,
    },
}

impl From<ApplyOutcome> for ApplyChangesResponse {
    fn from(outcome: ApplyOutcome) -> Self {
        match outcome {
            ApplyOutcome::Applied { version, timestamp } => {
                ApplyChangesResponse::Applied { version, timestamp }
            }
            ApplyOutcome::Conflict(conflict) => ApplyChangesResponse::Conflict {
                current_version: conflict.current_version,
                expected_version: conflict.expected_version,
                server_content: conflict.server_content,
            },
        }
    }
}

/// Request body for restoring a checkpoint
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RestoreRequest {
    /// Id of the checkpoint to restore
    pub checkpoint: CheckpointId,
}

/// Result of a restore
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RestoreResponse {
    /// Version of the checkpoint the content came from;
    /// `restoredVersion` on the wire
    #[serde(rename = "restoredVersion")]
    pub restored_from_version: u64,
    /// Version of the document after the restore
    pub new_version: u64,
    /// The checkpoint that was restored
    pub checkpoint: CheckpointId,
}

impl From<RestoreOutcome> for RestoreResponse {
    fn from(outcome: RestoreOutcome) -> Self {
        RestoreResponse {
            restored_from_version: outcome.restored_from_version,
            new_version: outcome.new_version,
            checkpoint: outcome.checkpoint,
        }
    }
}

/// One row in the version history listing
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct HistoryEntryDto {
    /// Checkpoint id
    pub id: CheckpointId,
    /// Creation time, epoch millis
    pub timestamp: Timestamp,
    /// Document version the checkpoint captured
    pub version: u64,
    /// How the checkpoint was created; `type` on the wire
    #[serde(rename = "type")]
    pub kind: CheckpointKind,
    /// Human-readable label
    pub description: String,
}

impl From<HistoryEntry> for HistoryEntryDto {
    fn from(entry: HistoryEntry) -> Self {
        HistoryEntryDto {
            id: entry.id,
            timestamp: entry.timestamp,
            version: entry.version,
            kind: entry.kind,
            description: entry.description,
        }
    }
}

/// What an editor session needs to know before editing
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SessionInfoDto {
    /// Current document version
    pub current_version: u64,
    /// When the document last changed, epoch millis
    pub last_modified: Timestamp,
    /// Whether the calling identity may mutate the document
    pub can_edit: bool,
}

impl From<SessionInfo> for SessionInfoDto {
    fn from(info: SessionInfo) -> Self {
        SessionInfoDto {
            current_version: info.current_version,
            last_modified: info.last_modified,
            can_edit: info.can_edit,
        }
    }
}

/// Full document shape on the wire
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DocumentDto {
    /// Current version
    pub version: u64,
    /// The JSON content tree
    pub content: Map<String, Value>,
    /// Last mutation time, epoch millis
    pub last_modified: Timestamp,
    /// Owning identity
    pub owner: String,
    /// Checkpoint version this state was restored from, if any
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub restored_from: Option<u64>,
    /// When that restore happened, if any
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub restored_at: Option<Timestamp>,
}

impl From<Document> for DocumentDto {
    fn from(document: Document) -> Self {
        DocumentDto {
            version: document.version,
            content: document.content,
            last_modified: document.last_modified,
            owner: document.owner.to_string(),
            restored_from: document.restored_from,
            restored_at: document.restored_at,
        }
    }
}

/// DTO form of a freshly created checkpoint
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CheckpointDto {
    /// Checkpoint id
    pub id: CheckpointId,
    /// Document version the checkpoint captured
    pub version: u64,
    /// How the checkpoint was created; `type` on the wire
    #[serde(rename = "type")]
    pub kind: CheckpointKind,
    /// Human-readable label
    pub description: String,
}

impl From<Checkpoint> for CheckpointDto {
    fn from(checkpoint: Checkpoint) -> Self {
        CheckpointDto {
            id: checkpoint.timestamp,
            version: checkpoint.version,
            kind: checkpoint.kind,
            description: checkpoint.description(),
        }
    }
}
