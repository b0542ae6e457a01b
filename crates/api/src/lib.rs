//! Editor-facing API: wire DTOs plus the `SiteVault` facade over the engine.

#![warn(missing_docs)]
#![warn(clippy::all)]

pub mod editor;
pub mod types;

pub use editor::SiteVault;
pub use types::{
    ApplyChangesRequest, ApplyChangesResponse, CheckpointDto, DocumentDto, FieldChangeDto,
    HistoryEntryDto, RestoreRequest, RestoreResponse, SessionInfoDto,
};

// The typed surface callers need alongside the DTOs.
pub use sitevault_core::{
    CheckpointId, CheckpointKind, DocumentId, DocumentIdError, Error, Identity, Result, Timestamp,
};
pub use sitevault_engine::{Vault, VaultConfig};
