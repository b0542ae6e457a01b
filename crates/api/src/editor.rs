//! Editor-facing facade
//!
//! `SiteVault` translates between wire DTOs and the engine's typed surface.
//! All semantics live in [`Vault`]; this layer only maps shapes.

use crate::types::{
    ApplyChangesRequest, ApplyChangesResponse, CheckpointDto, DocumentDto, HistoryEntryDto,
    RestoreRequest, RestoreResponse, SessionInfoDto,
};
use serde_json::{Map, Value};
use sitevault_core::{DocumentId, FieldChange, Identity, Result};
use sitevault_engine::{MemoryBlobStore, Vault, VaultConfig};
use std::path::Path;
use std::sync::Arc;

/// The embedded editor backend
pub struct SiteVault {
    vault: Vault,
}

impl SiteVault {
    /// Open on a data directory, loading or creating `sitevault.toml`
    pub fn open(data_dir: &Path) -> Result<Self> {
        Ok(SiteVault {
            vault: Vault::open(data_dir)?,
        })
    }

    /// Open on a data directory with an explicit config
    pub fn open_with_config(data_dir: &Path, config: VaultConfig) -> Result<Self> {
        Ok(SiteVault {
            vault: Vault::open_with_config(data_dir, config)?,
        })
    }

    /// Ephemeral in-memory instance, nothing touches disk
    pub fn in_memory() -> Self {
        SiteVault {
            vault: Vault::with_store(Arc::new(MemoryBlobStore::new()), VaultConfig::default()),
        }
    }

    /// Wrap an existing vault
    pub fn from_vault(vault: Vault) -> Self {
        SiteVault { vault }
    }

    /// Create a new document owned by `owner`
    pub fn create_document(
        &self,
        id: &DocumentId,
        owner: &Identity,
        content: Map<String, Value>,
    ) -> Result<DocumentDto> {
        Ok(self.vault.create_document(id, owner, content)?.into())
    }

    /// Fetch the current document state
    pub fn get_document(&self, id: &DocumentId) -> Result<DocumentDto> {
        Ok(self.vault.get_document(id)?.into())
    }

    /// Apply an editor save under optimistic concurrency
    pub fn apply_changes(
        &self,
        id: &DocumentId,
        identity: &Identity,
        request: ApplyChangesRequest,
    ) -> Result<ApplyChangesResponse> {
        let changes = request
            .changes
            .into_iter()
            .map(|dto| FieldChange::new(&dto.field, dto.value))
            .collect::<Result<Vec<_>>>()?;
        let outcome = self
            .vault
            .apply_changes(id, identity, request.expected_version, &changes)?;
        Ok(outcome.into())
    }

    /// Restore a previous checkpoint
    pub fn restore(
        &self,
        id: &DocumentId,
        identity: &Identity,
        request: RestoreRequest,
    ) -> Result<RestoreResponse> {
        Ok(self.vault.restore(id, identity, request.checkpoint)?.into())
    }

    /// Take a manual checkpoint
    pub fn checkpoint(&self, id: &DocumentId, identity: &Identity) -> Result<CheckpointDto> {
        Ok(self.vault.checkpoint(id, identity)?.into())
    }

    /// List version history, newest first
    pub fn history(&self, id: &DocumentId, limit: Option<usize>) -> Result<Vec<HistoryEntryDto>> {
        Ok(self
            .vault
            .history(id, limit)?
            .into_iter()
            .map(Into::into)
            .collect())
    }

    /// Describe the document for an editing session
    pub fn session_info(&self, id: &DocumentId, identity: &Identity) -> Result<SessionInfoDto> {
        Ok(self.vault.session_info(id, identity)?.into())
    }

    /// The underlying vault, for callers needing the typed surface
    pub fn vault(&self) -> &Vault {
        &self.vault
    }
}
